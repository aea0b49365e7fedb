//! JSON output of the report payload

use super::format;
use super::{RenderContext, ReportRenderer};
use crate::app::services::report_engine::ReportPayload;
use crate::{Error, Result};
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    prepared_for: &'a str,
    kpi_display: Vec<KpiDisplay<'a>>,
    report: &'a ReportPayload,
}

#[derive(Serialize)]
struct KpiDisplay<'a> {
    name: &'a str,
    value: f64,
    display: String,
}

/// Pretty-printed JSON with both raw KPI values and their display strings
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn name(&self) -> &'static str {
        "json"
    }

    fn render(&self, payload: &ReportPayload, context: &RenderContext) -> Result<String> {
        let report = JsonReport {
            generated_at: context.generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            prepared_for: &context.prepared_for,
            kpi_display: payload
                .kpis
                .iter()
                .map(|kpi| KpiDisplay {
                    name: kpi.name.label(),
                    value: kpi.value,
                    display: format::kpi_value(kpi),
                })
                .collect(),
            report: payload,
        };

        serde_json::to_string_pretty(&report)
            .map_err(|e| Error::render(format!("Failed to serialize report: {}", e)))
    }
}
