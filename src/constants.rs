//! Application constants for the production reporter
//!
//! This module contains the dataset schema, default thresholds and limits,
//! report section titles and fixed message texts used throughout the
//! application.

// =============================================================================
// Dataset Schema
// =============================================================================

/// Synthesised row identity column, prepended at load time
pub const ROW_ID_COLUMN: &str = "Row_ID";

pub mod columns {
    pub const DATE: &str = "Date";
    pub const SHIFT: &str = "Shift";
    pub const PRODUCT_NAME: &str = "Product_Name";
    pub const PRODUCT_ID: &str = "Product_ID";
    pub const MACHINE_OPERATOR_ID: &str = "Machine_Operator_ID";
    pub const SUPERVISOR_ID: &str = "Supervisor_ID";
    pub const PLANNED_PRODUCTION_UNITS: &str = "Planned_Production_Units";
    pub const ACTUAL_PRODUCTION_UNITS: &str = "Actual_Production_Units";
    pub const RAW_MATERIAL_USED_KG: &str = "Raw_Material_Used_kg";
    pub const WASTE_WEIGHT_KG: &str = "Waste_Weight_kg";
    pub const DOWNTIME_MINUTES: &str = "Downtime_Minutes";
    pub const TOTAL_TIME_RUN_MINUTES: &str = "Total_Time_Run_Minutes";
    pub const DOWNTIME_REASON: &str = "Downtime_Reason";
}

/// Columns every dataset file must carry (names are case-sensitive)
pub const REQUIRED_COLUMNS: &[&str] = &[
    columns::DATE,
    columns::SHIFT,
    columns::PRODUCT_NAME,
    columns::PRODUCT_ID,
    columns::MACHINE_OPERATOR_ID,
    columns::SUPERVISOR_ID,
    columns::PLANNED_PRODUCTION_UNITS,
    columns::ACTUAL_PRODUCTION_UNITS,
    columns::RAW_MATERIAL_USED_KG,
    columns::WASTE_WEIGHT_KG,
    columns::DOWNTIME_MINUTES,
    columns::TOTAL_TIME_RUN_MINUTES,
    columns::DOWNTIME_REASON,
];

/// Columns the editor refuses to change (row keys and identifiers)
pub const LOCKED_COLUMNS: &[&str] = &[
    ROW_ID_COLUMN,
    columns::DATE,
    columns::SHIFT,
    columns::PRODUCT_ID,
    columns::SUPERVISOR_ID,
    columns::MACHINE_OPERATOR_ID,
];

/// Largest unit count a single row may carry
pub const MAX_UNIT_COUNT: u64 = u32::MAX as u64;

/// Label a missing downtime reason is stringified to for matching and grouping
pub const MISSING_REASON_LABEL: &str = "nan";

/// Date formats accepted for the `Date` column, tried in order
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Date-time formats accepted for the `Date` column (time part is discarded)
pub const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

// =============================================================================
// Audit Log
// =============================================================================

/// Default audit log file name
pub const DEFAULT_AUDIT_LOG_FILE: &str = "audit_logs.csv";

/// Fixed audit log columns, in file order
pub const AUDIT_COLUMNS: &[&str] = &[
    "user",
    "timestamp",
    "row_id",
    "column_name",
    "old_value",
    "new_value",
];

/// Second-precision local timestamp format used by the audit log
pub const AUDIT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Report Defaults
// =============================================================================

/// Default dashboard window, in calendar days ending at the latest date
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Overall efficiency below this triggers the planning recommendation
pub const EFFICIENCY_THRESHOLD: f64 = 0.95;

/// Material yield below this triggers the material-loss recommendation
pub const YIELD_THRESHOLD: f64 = 0.97;

/// Max shift downtime-per-unit above mean times this triggers the shift recommendation
pub const SHIFT_VARIABILITY_FACTOR: f64 = 1.2;

pub const TOP_DOWNTIME_REASONS: usize = 5;
pub const RECENT_DAYS: usize = 10;
pub const PRODUCTION_PEAKS: usize = 6;
pub const TOP_PRODUCTS: usize = 8;
pub const TOP_OPERATORS: usize = 6;
pub const TOP_WASTE_PRODUCTS: usize = 6;

/// Width of the `#` bars drawn for production peaks
pub const TEXT_BAR_WIDTH: usize = 24;

/// Entries per ranked table in the assistant summary
pub const SUMMARY_TOP_N: usize = 5;

// =============================================================================
// Fixed Messages
// =============================================================================

pub mod messages {
    pub const NO_DATA_INSIGHT: &str = "No data available to generate insights.";
    pub const TREND_ZERO_BASELINE: &str =
        "Production Trend: Comparison to previous period is not possible (zero production).";
    pub const TREND_INSUFFICIENT_DATA: &str = "Production Trend: Insufficient data for trend analysis; \
         comparison is not possible with fewer than two weeks in the current selection.";
    pub const UNKNOWN_DOWNTIME_CAUSE: &str = "unknown causes";

    pub const REVIEW_PLANNING: &str =
        "Review planning accuracy and line balancing to improve plan attainment.";
    pub const INVESTIGATE_MATERIAL_LOSS: &str =
        "Investigate material losses and tighten quality control checkpoints.";
    pub const STANDARDIZE_SHIFTS: &str =
        "Standardize best practices across shifts to reduce variability.";
    pub const MAINTAIN_PRACTICES: &str =
        "Maintain current operating practices and continue monitoring key drivers.";
}

// =============================================================================
// Document Sections
// =============================================================================

/// Section titles of the paginated report, in their fixed order
pub mod sections {
    pub const EXECUTIVE_SUMMARY: &str = "I. Executive Summary";
    pub const KPIS: &str = "II. Key Performance Indicators";
    pub const TOP_DOWNTIME: &str = "III. Top Downtime Reasons";
    pub const DAILY_TREND: &str = "IV. Daily Production Trend";
    pub const PRODUCTION_PEAKS: &str = "V. Production Peaks";
    pub const PRODUCT_MIX: &str = "VI. Product Mix & Performance";
    pub const SHIFT_PERFORMANCE: &str = "VII. Shift Performance";
    pub const OPERATOR_PERFORMANCE: &str = "VIII. Operator Performance";
    pub const QUALITY_WASTE: &str = "IX. Quality & Waste";
    pub const RECOMMENDATIONS: &str = "X. Recommendations & Actions";
    pub const STATISTICS: &str = "XI. Appendix - Descriptive Statistics";

    pub const ORDER: &[&str] = &[
        EXECUTIVE_SUMMARY,
        KPIS,
        TOP_DOWNTIME,
        DAILY_TREND,
        PRODUCTION_PEAKS,
        PRODUCT_MIX,
        SHIFT_PERFORMANCE,
        OPERATOR_PERFORMANCE,
        QUALITY_WASTE,
        RECOMMENDATIONS,
        STATISTICS,
    ];
}

// =============================================================================
// Environment
// =============================================================================

pub const ENV_AUDIT_LOG: &str = "PRODUCTION_REPORTER_AUDIT_LOG";
pub const ENV_LOG_LEVEL: &str = "PRODUCTION_REPORTER_LOG_LEVEL";

/// Directory name under the user config dir holding `config.toml`
pub const CONFIG_DIR_NAME: &str = "production-reporter";
