//! Renderers for report payloads
//!
//! Every renderer takes the same [`ReportPayload`] and only lays it out, so
//! the dashboard cards, the paginated document, the JSON output and the
//! assistant summary always show identical numbers with identical rounding.
//!
//! - [`format`] - Number formatting rules
//! - [`table`] - Aligned text and markdown tables
//! - [`kpi_cards`] - On-screen KPI cards
//! - [`document`] - Paginated report document with Latin-1 output
//! - [`json`] - Machine-readable payload
//! - [`assistant`] - Condensed plain-text summary for the assistant
//! - [`csv_export`] - Filtered rows as CSV (polars)

pub mod assistant;
pub mod csv_export;
pub mod document;
pub mod format;
pub mod json;
pub mod kpi_cards;
pub mod table;

pub use assistant::AssistantSummary;
pub use csv_export::export_csv;
pub use document::DocumentRenderer;
pub use json::JsonRenderer;
pub use kpi_cards::KpiCardRenderer;

use crate::Result;
use crate::app::services::report_engine::ReportPayload;
use chrono::NaiveDateTime;

/// Details about the render request that are not part of the report data
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    /// Local time the output was generated
    pub generated_at: NaiveDateTime,

    /// User the output was generated for
    pub prepared_for: String,
}

impl RenderContext {
    pub fn new(generated_at: NaiveDateTime, prepared_for: impl Into<String>) -> Self {
        Self {
            generated_at,
            prepared_for: prepared_for.into(),
        }
    }

    /// Context stamped with the current local time
    pub fn now(prepared_for: impl Into<String>) -> Self {
        Self::new(chrono::Local::now().naive_local(), prepared_for)
    }
}

/// A consumer of report payloads
pub trait ReportRenderer {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Render the whole payload; no partial output is returned on error
    fn render(&self, payload: &ReportPayload, context: &RenderContext) -> Result<String>;
}
