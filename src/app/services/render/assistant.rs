//! Condensed summary for the assistant chat
//!
//! The session builds this over the full dataset, not the filtered view, so
//! the assistant always answers about everything that is loaded.

use super::format;
use super::table::Table;
use super::{RenderContext, ReportRenderer};
use crate::Result;
use crate::app::services::report_engine::ReportPayload;
use crate::constants::SUMMARY_TOP_N;

#[derive(Debug, Clone, Copy, Default)]
pub struct AssistantSummary;

impl ReportRenderer for AssistantSummary {
    fn name(&self) -> &'static str {
        "assistant-summary"
    }

    fn render(&self, payload: &ReportPayload, _context: &RenderContext) -> Result<String> {
        let metrics = &payload.metrics;
        let mut lines = vec![
            "--- FULL DATASET SUMMARY ---".to_string(),
            format!("Total Production (Units): {}", format::count(metrics.total_actual)),
            format!(
                "Total Downtime (Minutes): {}",
                format::thousands(metrics.total_downtime_minutes)
            ),
            format!("Total Waste (kg): {}", format::weight(metrics.total_waste_kg)),
        ];
        if metrics.total_planned > 0 {
            lines.push(format!("Overall Efficiency: {}", format::percent(metrics.efficiency)));
        }

        let mut products = Table::new(["Product_Name", "Actual_Production_Units"]);
        for row in &payload.summary_top_products {
            products.push_row(vec![row.key.clone(), format::count(row.actual)]);
        }
        lines.push(format!("\n2. Production by Product (Top {}):", SUMMARY_TOP_N));
        lines.push(products.to_markdown());

        let mut downtime = Table::new(["Downtime_Reason", "Downtime_Minutes"]);
        for row in &payload.summary_top_downtime {
            downtime.push_row(vec![row.key.clone(), format::thousands(row.downtime_minutes)]);
        }
        lines.push("\n3. Downtime Breakdown by Reason:".to_string());
        lines.push(downtime.to_markdown());

        let mut waste = Table::new(["Shift", "Waste_Weight_kg"]);
        for row in &payload.shifts {
            waste.push_row(vec![row.key.clone(), format::weight(row.waste_kg)]);
        }
        lines.push("\n4. Waste Analysis by Shift:".to_string());
        lines.push(waste.to_markdown());

        let period = match (payload.coverage.date_min, payload.coverage.date_max) {
            (Some(min), Some(max)) => {
                format!("{} to {}", min.format("%Y-%m-%d"), max.format("%Y-%m-%d"))
            }
            _ => "n/a".to_string(),
        };
        lines.push(format!(
            "\nData Period: {} ({} total records).",
            period, payload.coverage.rows
        ));

        Ok(lines.join("\n"))
    }
}
