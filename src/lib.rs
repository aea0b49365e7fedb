//! Production Reporter Library
//!
//! A Rust library for turning factory production data (one CSV row per
//! production run) into filtered views, KPIs, aggregations, insights and
//! recommendations, and for rendering the resulting report for the dashboard,
//! paginated documents, CSV export and the assistant summary.
//!
//! This library provides tools for:
//! - Loading production CSV files into a strongly typed, validated dataset
//! - Filtering by date range and categorical selections
//! - Computing scalar KPIs with safe division
//! - Aggregating by day, product, shift, operator and downtime reason
//! - Generating ranked insights and rule-based recommendations
//! - Assembling a renderer-agnostic report payload and rendering it
//! - Applying audited cell edits and maintaining the append-only audit log

pub mod config;
pub mod constants;
pub mod numbers;

// Core application modules
pub mod app {
    pub mod models;
    pub mod session;
    pub mod services {
        pub mod audit_log;
        pub mod dataset_loader;
        pub mod editor;
        pub mod filter_engine;
        pub mod render;
        pub mod report_engine;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Dataset, DateRange, ProductionRecord};
pub use app::services::filter_engine::{FilterParams, FilteredView};
pub use app::services::report_engine::{ReportPayload, assemble, safe_div};
pub use config::Config;

/// Result type alias for the production reporter
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for production reporting operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// A required dataset column is absent
    #[error("Dataset '{file}' is missing required column '{column}'")]
    MissingColumn { file: String, column: String },

    /// A column outside the schema was found while strict column checking is on
    #[error("Dataset '{file}' contains unexpected column '{column}'")]
    UnexpectedColumn { file: String, column: String },

    /// A field could not be converted into its typed value
    #[error("Invalid value '{value}' in column '{column}' at row {row}: {reason}")]
    InvalidField {
        row: usize,
        column: String,
        value: String,
        reason: String,
    },

    /// The file had a header but no data rows
    #[error("Dataset '{file}' contains no data rows")]
    EmptyDataset { file: String },

    /// An operation needed a dataset but none is loaded in the session
    #[error("No dataset loaded")]
    NoDatasetLoaded,

    /// Filter parameters are inconsistent
    #[error("Invalid filter: {message}")]
    InvalidFilter { message: String },

    /// The user's role does not grant the requested capability
    #[error("Access denied: role '{role}' cannot {capability}")]
    AccessDenied { role: String, capability: String },

    /// A cell edit could not be applied
    #[error("Invalid edit: {message}")]
    InvalidEdit { message: String },

    /// Document generation failed
    #[error("Render error: {message}")]
    Render { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Polars data frame error
    #[error("Data frame error: {message}")]
    Polars {
        message: String,
        #[source]
        source: polars::error::PolarsError,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a missing column error
    pub fn missing_column(file: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            file: file.into(),
            column: column.into(),
        }
    }

    /// Create an unexpected column error
    pub fn unexpected_column(file: impl Into<String>, column: impl Into<String>) -> Self {
        Self::UnexpectedColumn {
            file: file.into(),
            column: column.into(),
        }
    }

    /// Create an invalid field error
    pub fn invalid_field(
        row: usize,
        column: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            row,
            column: column.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an empty dataset error
    pub fn empty_dataset(file: impl Into<String>) -> Self {
        Self::EmptyDataset { file: file.into() }
    }

    /// Create an invalid filter error
    pub fn invalid_filter(message: impl Into<String>) -> Self {
        Self::InvalidFilter {
            message: message.into(),
        }
    }

    /// Create an access denied error
    pub fn access_denied(role: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::AccessDenied {
            role: role.into(),
            capability: capability.into(),
        }
    }

    /// Create an invalid edit error
    pub fn invalid_edit(message: impl Into<String>) -> Self {
        Self::InvalidEdit {
            message: message.into(),
        }
    }

    /// Create a render error
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a polars error with context
    pub fn polars(message: impl Into<String>, source: polars::error::PolarsError) -> Self {
        Self::Polars {
            message: message.into(),
            source,
        }
    }

    /// True for failures that happen while loading a dataset file
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Error::Io { .. }
                | Error::CsvParsing { .. }
                | Error::MissingColumn { .. }
                | Error::UnexpectedColumn { .. }
                | Error::InvalidField { .. }
                | Error::EmptyDataset { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<polars::error::PolarsError> for Error {
    fn from(error: polars::error::PolarsError) -> Self {
        Self::Polars {
            message: "Data frame operation failed".to_string(),
            source: error,
        }
    }
}
