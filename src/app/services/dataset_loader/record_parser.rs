//! Conversion of one CSV row into a typed production record

use csv::StringRecord;

use super::column_mapping::ColumnMapping;
use super::field_parsers::{parse_count, parse_date, parse_label, parse_quantity, parse_reason};
use crate::app::models::{Column, ProductionRecord};
use crate::{Error, Result};

/// Parse a single data row; `row_id` is the 0-based data-row position
pub fn parse_production_record(
    record: &StringRecord,
    mapping: &ColumnMapping,
    row_id: usize,
) -> Result<ProductionRecord> {
    let label = |column: Column| -> Result<String> {
        parse_label(get_field(record, mapping, column, row_id)?, row_id, column.name())
    };
    let count = |column: Column| -> Result<u64> {
        parse_count(get_field(record, mapping, column, row_id)?, row_id, column.name())
    };
    let quantity = |column: Column| -> Result<f64> {
        parse_quantity(get_field(record, mapping, column, row_id)?, row_id, column.name())
    };

    Ok(ProductionRecord {
        row_id,
        date: parse_date(
            get_field(record, mapping, Column::Date, row_id)?,
            row_id,
            Column::Date.name(),
        )?,
        shift: label(Column::Shift)?,
        product_name: label(Column::ProductName)?,
        product_id: label(Column::ProductId)?,
        machine_operator_id: label(Column::MachineOperatorId)?,
        supervisor_id: label(Column::SupervisorId)?,
        planned_production_units: count(Column::PlannedProductionUnits)?,
        actual_production_units: count(Column::ActualProductionUnits)?,
        raw_material_used_kg: quantity(Column::RawMaterialUsedKg)?,
        waste_weight_kg: quantity(Column::WasteWeightKg)?,
        downtime_minutes: quantity(Column::DowntimeMinutes)?,
        total_time_run_minutes: quantity(Column::TotalTimeRunMinutes)?,
        downtime_reason: parse_reason(get_field(
            record,
            mapping,
            Column::DowntimeReason,
            row_id,
        )?),
    })
}

/// Get the raw text of a schema column from a CSV record
fn get_field<'a>(
    record: &'a StringRecord,
    mapping: &ColumnMapping,
    column: Column,
    row_id: usize,
) -> Result<&'a str> {
    mapping
        .index(column)
        .and_then(|index| record.get(index))
        .ok_or_else(|| Error::invalid_field(row_id, column.name(), "", "value is missing"))
}
