//! On-screen KPI cards

use super::format;
use super::{RenderContext, ReportRenderer};
use crate::Result;
use crate::app::services::report_engine::ReportPayload;

const CARDS_PER_ROW: usize = 3;
const CARD_WIDTH: usize = 26;

/// Renders the KPI set as a grid of boxed cards
#[derive(Debug, Clone, Copy, Default)]
pub struct KpiCardRenderer;

impl ReportRenderer for KpiCardRenderer {
    fn name(&self) -> &'static str {
        "kpi-cards"
    }

    fn render(&self, payload: &ReportPayload, _context: &RenderContext) -> Result<String> {
        let cards: Vec<(&str, String)> = payload
            .kpis
            .iter()
            .map(|kpi| (kpi.name.label(), format::kpi_value(kpi)))
            .collect();

        let mut out = String::new();
        for row in cards.chunks(CARDS_PER_ROW) {
            let border = vec![format!("+{}+", "-".repeat(CARD_WIDTH)); row.len()].join(" ");
            let labels: Vec<String> = row
                .iter()
                .map(|(label, _)| format!("| {:<w$} |", label, w = CARD_WIDTH - 2))
                .collect();
            let values: Vec<String> = row
                .iter()
                .map(|(_, value)| format!("| {:<w$} |", value, w = CARD_WIDTH - 2))
                .collect();

            out.push_str(&border);
            out.push('\n');
            out.push_str(&labels.join(" "));
            out.push('\n');
            out.push_str(&values.join(" "));
            out.push('\n');
            out.push_str(&border);
            out.push('\n');
        }
        Ok(out)
    }
}
