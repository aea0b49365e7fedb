//! Paginated report document
//!
//! Lays the payload out as a sectioned text document in the fixed section
//! order. Pages are separated by form feeds. In Latin-1 mode any character
//! outside ISO-8859-1 fails the whole render.

use super::format;
use super::table::Table;
use super::{RenderContext, ReportRenderer};
use crate::app::services::report_engine::{GroupRow, ReportPayload};
use crate::constants::sections;
use crate::{Error, Result};

const TITLE: &str = "Weekly Production Report";
const PAGE_BREAK: char = '\u{0c}';
const NO_ROWS: &str = "No data available.";

/// Sections that start on a new page
const NEW_PAGE_SECTIONS: &[&str] = &[
    sections::TOP_DOWNTIME,
    sections::PRODUCT_MIX,
    sections::QUALITY_WASTE,
];

#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentRenderer {
    latin1: bool,
}

impl DocumentRenderer {
    /// Renderer producing UTF-8 text
    pub fn new() -> Self {
        Self { latin1: false }
    }

    /// Renderer restricted to the Latin-1 character set
    pub fn latin1() -> Self {
        Self { latin1: true }
    }

    /// Render and encode for writing: Latin-1 bytes or UTF-8 bytes
    pub fn render_bytes(&self, payload: &ReportPayload, context: &RenderContext) -> Result<Vec<u8>> {
        let text = self.render(payload, context)?;
        if self.latin1 {
            encode_latin1(&text)
        } else {
            Ok(text.into_bytes())
        }
    }

    fn section_body(&self, title: &str, payload: &ReportPayload) -> String {
        match title {
            sections::EXECUTIVE_SUMMARY => executive_summary(payload),
            sections::KPIS => kpis(payload),
            sections::TOP_DOWNTIME => table_or_empty(
                Table::new(["Downtime Reason", "Minutes"]),
                &payload.top_downtime,
                |row| vec![row.key.clone(), format::thousands(row.downtime_minutes)],
            ),
            sections::DAILY_TREND => table_or_empty(
                Table::new(["Date", "Units", "Downtime", "Efficiency"]),
                &payload.recent_days,
                |row| {
                    vec![
                        row.key.clone(),
                        format::count(row.actual),
                        format::thousands(row.downtime_minutes),
                        format::percent(row.efficiency),
                    ]
                },
            ),
            sections::PRODUCTION_PEAKS => production_peaks(payload),
            sections::PRODUCT_MIX => table_or_empty(
                Table::new(["Product", "Units", "Efficiency", "Share"]),
                &payload.top_products,
                |row| {
                    vec![
                        row.key.clone(),
                        format::count(row.actual),
                        format::percent(row.efficiency),
                        format::share(row.share.unwrap_or(0.0)),
                    ]
                },
            ),
            sections::SHIFT_PERFORMANCE => table_or_empty(
                Table::new(["Shift", "Units", "Efficiency", "Downtime/Unit"]),
                &payload.shifts,
                |row| {
                    vec![
                        row.key.clone(),
                        format::count(row.actual),
                        format::percent(row.efficiency),
                        format::per_unit(row.downtime_per_unit),
                    ]
                },
            ),
            sections::OPERATOR_PERFORMANCE => table_or_empty(
                Table::new(["Operator", "Units", "Efficiency", "Downtime"]),
                &payload.top_operators,
                |row| {
                    vec![
                        row.key.clone(),
                        format::count(row.actual),
                        format::percent(row.efficiency),
                        format::thousands(row.downtime_minutes),
                    ]
                },
            ),
            sections::QUALITY_WASTE => table_or_empty(
                Table::new(["Product", "Waste (kg)", "Waste Rate", "Yield"]),
                &payload.waste_by_product,
                |row| {
                    vec![
                        row.key.clone(),
                        format::weight(row.waste_kg),
                        format::percent(row.waste_rate),
                        format::percent(row.yield_rate),
                    ]
                },
            ),
            sections::RECOMMENDATIONS => payload
                .recommendations
                .iter()
                .map(|item| format!("- {}\n", item))
                .collect(),
            sections::STATISTICS => statistics(payload),
            _ => String::new(),
        }
    }
}

impl ReportRenderer for DocumentRenderer {
    fn name(&self) -> &'static str {
        if self.latin1 { "document-latin1" } else { "document" }
    }

    fn render(&self, payload: &ReportPayload, context: &RenderContext) -> Result<String> {
        let mut out = String::new();
        out.push_str(TITLE);
        out.push('\n');
        out.push_str(&"=".repeat(TITLE.len()));
        out.push('\n');
        out.push_str(&format!(
            "Generated: {} | Prepared for: {}\n",
            context.generated_at.format("%Y-%m-%d %H:%M:%S"),
            context.prepared_for
        ));

        for title in sections::ORDER {
            if NEW_PAGE_SECTIONS.contains(title) {
                out.push(PAGE_BREAK);
            }
            out.push('\n');
            out.push_str(title);
            out.push('\n');
            out.push_str(&"-".repeat(title.chars().count()));
            out.push('\n');
            out.push_str(&self.section_body(title, payload));
        }

        if self.latin1 {
            check_latin1(&out)?;
        }
        Ok(out)
    }
}

fn executive_summary(payload: &ReportPayload) -> String {
    let coverage = &payload.coverage;
    let mut out: String = payload
        .insights
        .iter()
        .map(|insight| format!("- {}\n", insight.message))
        .collect();

    let period = match (coverage.date_min, coverage.date_max) {
        (Some(min), Some(max)) => format!("{} to {}", min.format("%Y-%m-%d"), max.format("%Y-%m-%d")),
        _ => "n/a".to_string(),
    };
    out.push_str("\nData Coverage\n");
    out.push_str(&format!(
        "Period: {} | Days Covered: {} | Rows: {}\n",
        period, coverage.days_covered, coverage.rows
    ));
    out.push_str(&format!(
        "Shifts: {} | Products: {} | Operators: {}\n",
        coverage.shifts, coverage.products, coverage.operators
    ));
    out
}

fn kpis(payload: &ReportPayload) -> String {
    let highlights = &payload.highlights;
    let mut out: String = payload
        .kpis
        .iter()
        .map(|kpi| format!("{}: {}\n", kpi.name.label(), format::kpi_value(kpi)))
        .collect();

    out.push_str("\nAdditional KPI Highlights\n");
    out.push_str(&format!(
        "Average Daily Output: {} units | Average Daily Downtime: {} min\n",
        format::thousands(highlights.avg_daily_output),
        format::weight(highlights.avg_daily_downtime)
    ));
    out.push_str(&format!(
        "Plan Attainment: {} | Material Yield: {} | Utilization: {}\n",
        format::percent(highlights.plan_attainment),
        format::percent(highlights.material_yield),
        format::percent(highlights.utilization)
    ));
    out
}

fn production_peaks(payload: &ReportPayload) -> String {
    if payload.production_peaks.is_empty() {
        return format!("{}\n", NO_ROWS);
    }
    payload
        .production_peaks
        .iter()
        .map(|peak| format!("{}: {} | {}\n", peak.day, format::count(peak.units), peak.bar))
        .collect()
}

fn statistics(payload: &ReportPayload) -> String {
    let mut table = Table::new(["Metric", "Mean", "Std", "Min", "Max"]);
    for stats in &payload.statistics {
        table.push_row(vec![
            stats.column.clone(),
            format::decimal2(stats.mean),
            format::decimal2(stats.std),
            format::decimal2(stats.min),
            format::decimal2(stats.max),
        ]);
    }
    table.to_text()
}

fn table_or_empty<F>(mut table: Table, rows: &[GroupRow], cells: F) -> String
where
    F: Fn(&GroupRow) -> Vec<String>,
{
    if rows.is_empty() {
        return format!("{}\n", NO_ROWS);
    }
    for row in rows {
        table.push_row(cells(row));
    }
    table.to_text()
}

fn check_latin1(text: &str) -> Result<()> {
    match text.chars().find(|c| u32::from(*c) > 0xFF) {
        Some(c) => Err(Error::render(format!(
            "character '{}' (U+{:04X}) cannot be encoded as Latin-1",
            c,
            u32::from(c)
        ))),
        None => Ok(()),
    }
}

/// Encode text as ISO-8859-1 bytes
pub fn encode_latin1(text: &str) -> Result<Vec<u8>> {
    check_latin1(text)?;
    Ok(text.chars().map(|c| u32::from(c) as u8).collect())
}
