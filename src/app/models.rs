//! Data models for production reporting
//!
//! This module contains the core data structures: the typed production record,
//! the schema column enumeration, the loaded dataset, inclusive date ranges and
//! the role/capability model used for access gating.

pub mod audit;

use crate::app::services::dataset_loader::field_parsers;
use crate::constants::{LOCKED_COLUMNS, MISSING_REASON_LABEL, ROW_ID_COLUMN, columns};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use audit::{AuditRecord, CellEdit};

// =============================================================================
// Production Record
// =============================================================================

/// One row of the production dataset
///
/// Records are immutable once loaded; edits produce a new dataset. `row_id` is
/// the 0-based position in the source file and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    /// Stable row identity assigned at load time
    pub row_id: usize,

    /// Production date (any time component is discarded at load)
    pub date: NaiveDate,

    /// Shift code
    pub shift: String,

    pub product_name: String,
    pub product_id: String,
    pub machine_operator_id: String,
    pub supervisor_id: String,

    /// Units the plan called for
    pub planned_production_units: u64,

    /// Units actually produced
    pub actual_production_units: u64,

    /// Raw material consumed in kg
    pub raw_material_used_kg: f64,

    /// Waste produced in kg (expected, not required, to be <= raw material)
    pub waste_weight_kg: f64,

    /// Minutes the line was stopped
    pub downtime_minutes: f64,

    /// Minutes the line was running
    pub total_time_run_minutes: f64,

    /// Reason for the stoppage; `None` when the cell was empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downtime_reason: Option<String>,
}

impl ProductionRecord {
    /// Downtime reason as a category label; missing reasons become `"nan"`
    pub fn downtime_reason_label(&self) -> &str {
        self.downtime_reason.as_deref().unwrap_or(MISSING_REASON_LABEL)
    }

    /// Stringified value of a column, as shown in tables and the audit log
    pub fn field_value(&self, column: Column) -> String {
        match column {
            Column::RowId => self.row_id.to_string(),
            Column::Date => self.date.format("%Y-%m-%d").to_string(),
            Column::Shift => self.shift.clone(),
            Column::ProductName => self.product_name.clone(),
            Column::ProductId => self.product_id.clone(),
            Column::MachineOperatorId => self.machine_operator_id.clone(),
            Column::SupervisorId => self.supervisor_id.clone(),
            Column::PlannedProductionUnits => self.planned_production_units.to_string(),
            Column::ActualProductionUnits => self.actual_production_units.to_string(),
            Column::RawMaterialUsedKg => self.raw_material_used_kg.to_string(),
            Column::WasteWeightKg => self.waste_weight_kg.to_string(),
            Column::DowntimeMinutes => self.downtime_minutes.to_string(),
            Column::TotalTimeRunMinutes => self.total_time_run_minutes.to_string(),
            Column::DowntimeReason => self.downtime_reason_label().to_string(),
        }
    }

    /// Replace one column's value, parsing `raw` with the loader's field rules
    ///
    /// `row` is only used for error messages.
    pub fn set_field(&mut self, column: Column, raw: &str, row: usize) -> Result<()> {
        let name = column.name();
        match column {
            Column::RowId => {
                return Err(Error::invalid_field(
                    row,
                    name,
                    raw,
                    "row identity cannot be changed",
                ));
            }
            Column::Date => self.date = field_parsers::parse_date(raw, row, name)?,
            Column::Shift => self.shift = field_parsers::parse_label(raw, row, name)?,
            Column::ProductName => self.product_name = field_parsers::parse_label(raw, row, name)?,
            Column::ProductId => self.product_id = field_parsers::parse_label(raw, row, name)?,
            Column::MachineOperatorId => {
                self.machine_operator_id = field_parsers::parse_label(raw, row, name)?
            }
            Column::SupervisorId => self.supervisor_id = field_parsers::parse_label(raw, row, name)?,
            Column::PlannedProductionUnits => {
                self.planned_production_units = field_parsers::parse_count(raw, row, name)?
            }
            Column::ActualProductionUnits => {
                self.actual_production_units = field_parsers::parse_count(raw, row, name)?
            }
            Column::RawMaterialUsedKg => {
                self.raw_material_used_kg = field_parsers::parse_quantity(raw, row, name)?
            }
            Column::WasteWeightKg => {
                self.waste_weight_kg = field_parsers::parse_quantity(raw, row, name)?
            }
            Column::DowntimeMinutes => {
                self.downtime_minutes = field_parsers::parse_quantity(raw, row, name)?
            }
            Column::TotalTimeRunMinutes => {
                self.total_time_run_minutes = field_parsers::parse_quantity(raw, row, name)?
            }
            Column::DowntimeReason => self.downtime_reason = field_parsers::parse_reason(raw),
        }
        Ok(())
    }
}

// =============================================================================
// Schema Columns
// =============================================================================

/// Typed dataset column, replacing string lookups past the load boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    RowId,
    Date,
    Shift,
    ProductName,
    ProductId,
    MachineOperatorId,
    SupervisorId,
    PlannedProductionUnits,
    ActualProductionUnits,
    RawMaterialUsedKg,
    WasteWeightKg,
    DowntimeMinutes,
    TotalTimeRunMinutes,
    DowntimeReason,
}

impl Column {
    /// All columns in dataset order, `Row_ID` first
    pub const ALL: [Column; 14] = [
        Column::RowId,
        Column::Date,
        Column::Shift,
        Column::ProductName,
        Column::ProductId,
        Column::MachineOperatorId,
        Column::SupervisorId,
        Column::PlannedProductionUnits,
        Column::ActualProductionUnits,
        Column::RawMaterialUsedKg,
        Column::WasteWeightKg,
        Column::DowntimeMinutes,
        Column::TotalTimeRunMinutes,
        Column::DowntimeReason,
    ];

    /// CSV header name
    pub fn name(&self) -> &'static str {
        match self {
            Column::RowId => ROW_ID_COLUMN,
            Column::Date => columns::DATE,
            Column::Shift => columns::SHIFT,
            Column::ProductName => columns::PRODUCT_NAME,
            Column::ProductId => columns::PRODUCT_ID,
            Column::MachineOperatorId => columns::MACHINE_OPERATOR_ID,
            Column::SupervisorId => columns::SUPERVISOR_ID,
            Column::PlannedProductionUnits => columns::PLANNED_PRODUCTION_UNITS,
            Column::ActualProductionUnits => columns::ACTUAL_PRODUCTION_UNITS,
            Column::RawMaterialUsedKg => columns::RAW_MATERIAL_USED_KG,
            Column::WasteWeightKg => columns::WASTE_WEIGHT_KG,
            Column::DowntimeMinutes => columns::DOWNTIME_MINUTES,
            Column::TotalTimeRunMinutes => columns::TOTAL_TIME_RUN_MINUTES,
            Column::DowntimeReason => columns::DOWNTIME_REASON,
        }
    }

    /// Whether the editor may change this column
    pub fn is_editable(&self) -> bool {
        !LOCKED_COLUMNS.contains(&self.name())
    }
}

impl FromStr for Column {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Column::ALL
            .iter()
            .copied()
            .find(|column| column.name() == s)
            .ok_or_else(|| Error::invalid_edit(format!("Unknown column '{}'", s)))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// The working table: every record loaded from one source file
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    source: String,
    records: Vec<ProductionRecord>,
    extra_columns: Vec<String>,
}

impl Dataset {
    /// Create a dataset from records already carrying their row identities
    pub fn new(source: impl Into<String>, records: Vec<ProductionRecord>) -> Self {
        Self {
            source: source.into(),
            records,
            extra_columns: Vec::new(),
        }
    }

    /// Attach the names of columns that were present in the file but ignored
    pub fn with_extra_columns(mut self, extra_columns: Vec<String>) -> Self {
        self.extra_columns = extra_columns;
        self
    }

    /// Name of the file (or stream) the data came from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn records(&self) -> &[ProductionRecord] {
        &self.records
    }

    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by its row identity
    pub fn record(&self, row_id: usize) -> Option<&ProductionRecord> {
        self.records
            .binary_search_by_key(&row_id, |r| r.row_id)
            .ok()
            .map(|index| &self.records[index])
    }

    /// Earliest date present, if any
    pub fn min_date(&self) -> Option<NaiveDate> {
        self.records.iter().map(|r| r.date).min()
    }

    /// Latest date present, if any
    pub fn max_date(&self) -> Option<NaiveDate> {
        self.records.iter().map(|r| r.date).max()
    }

    /// Build a copy with its records replaced wholesale
    pub fn with_records(&self, records: Vec<ProductionRecord>) -> Self {
        Self {
            source: self.source.clone(),
            records,
            extra_columns: self.extra_columns.clone(),
        }
    }
}

// =============================================================================
// Date Range
// =============================================================================

/// Inclusive calendar date range; `end` covers its entire day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::invalid_filter(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

// =============================================================================
// Roles and Capabilities
// =============================================================================

/// User role; each role includes every capability of the roles below it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Viewer,
    Analyst,
    Admin,
}

impl Role {
    /// Check whether this role grants the capability
    pub fn allows(&self, capability: Capability) -> bool {
        *self >= capability.minimum_role()
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "viewer" => Ok(Role::Viewer),
            "analyst" => Ok(Role::Analyst),
            "admin" => Ok(Role::Admin),
            other => Err(Error::configuration(format!(
                "Unknown role '{}'. Expected viewer, analyst or admin",
                other
            ))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Viewer => "Viewer",
            Role::Analyst => "Analyst",
            Role::Admin => "Admin",
        };
        f.write_str(name)
    }
}

/// Gated operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    ViewDashboard,
    EditData,
    GenerateReport,
    ExportData,
    UseAssistant,
}

impl Capability {
    pub fn minimum_role(&self) -> Role {
        match self {
            Capability::ViewDashboard => Role::Viewer,
            Capability::EditData
            | Capability::GenerateReport
            | Capability::ExportData
            | Capability::UseAssistant => Role::Analyst,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            Capability::ViewDashboard => "view the dashboard",
            Capability::EditData => "edit data",
            Capability::GenerateReport => "generate reports",
            Capability::ExportData => "export data",
            Capability::UseAssistant => "use the assistant",
        };
        f.write_str(action)
    }
}
