//! Report assembly
//!
//! Collects metrics, every aggregation table, ranked slices, insights,
//! recommendations and statistics into one payload. Renderers only lay out
//! what is here; they never recompute numbers.

use super::aggregation::{Dimension, GroupRow, aggregate_by, rank_by};
use super::insights::{Insight, generate_insights};
use super::metrics::{KpiSet, ReportMetrics, compute_metrics, safe_div};
use super::recommendations::recommend;
use super::statistics::{ColumnStatistics, describe};
use crate::Result;
use crate::app::services::filter_engine::FilteredView;
use crate::config::ReportConfig;
use crate::constants::SUMMARY_TOP_N;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// What the view covers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    pub date_min: Option<NaiveDate>,
    pub date_max: Option<NaiveDate>,
    pub days_covered: usize,
    pub rows: usize,
    pub shifts: usize,
    pub products: usize,
    pub operators: usize,
}

impl Coverage {
    pub fn from_view(view: &FilteredView) -> Self {
        let mut days = HashSet::new();
        let mut shifts = HashSet::new();
        let mut products = HashSet::new();
        let mut operators = HashSet::new();
        let mut coverage = Self::default();

        for record in view.records() {
            coverage.rows += 1;
            coverage.date_min = Some(coverage.date_min.map_or(record.date, |d| d.min(record.date)));
            coverage.date_max = Some(coverage.date_max.map_or(record.date, |d| d.max(record.date)));
            days.insert(record.date);
            shifts.insert(record.shift.as_str());
            products.insert(record.product_name.as_str());
            operators.insert(record.machine_operator_id.as_str());
        }

        coverage.days_covered = days.len();
        coverage.shifts = shifts.len();
        coverage.products = products.len();
        coverage.operators = operators.len();
        coverage
    }
}

/// Additional executive-summary figures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Highlights {
    pub avg_daily_output: f64,
    pub avg_daily_downtime: f64,
    pub plan_attainment: f64,
    pub material_yield: f64,
    pub utilization: f64,
}

impl Highlights {
    pub fn new(metrics: &ReportMetrics, coverage: &Coverage) -> Self {
        let days = coverage.days_covered as f64;
        Self {
            avg_daily_output: safe_div(metrics.total_actual as f64, days),
            avg_daily_downtime: safe_div(metrics.total_downtime_minutes, days),
            plan_attainment: metrics.efficiency,
            material_yield: metrics.yield_rate,
            utilization: metrics.utilization,
        }
    }
}

/// One production peak with its text bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakBar {
    pub day: String,
    pub units: u64,
    pub bar: String,
}

/// Everything a renderer needs, computed once per view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPayload {
    pub coverage: Coverage,
    pub metrics: ReportMetrics,
    pub kpis: KpiSet,
    pub highlights: Highlights,

    pub daily: Vec<GroupRow>,
    pub products: Vec<GroupRow>,
    pub shifts: Vec<GroupRow>,
    pub operators: Vec<GroupRow>,
    pub downtime: Vec<GroupRow>,

    pub top_downtime: Vec<GroupRow>,
    pub recent_days: Vec<GroupRow>,
    pub production_peaks: Vec<PeakBar>,
    pub top_products: Vec<GroupRow>,
    pub top_operators: Vec<GroupRow>,
    pub waste_by_product: Vec<GroupRow>,

    /// Condensed slices for the assistant summary
    pub summary_top_products: Vec<GroupRow>,
    pub summary_top_downtime: Vec<GroupRow>,

    pub insights: Vec<Insight>,
    pub recommendations: Vec<String>,
    pub statistics: Vec<ColumnStatistics>,
}

/// Assemble the report payload for a view
pub fn assemble(view: &FilteredView, config: &ReportConfig) -> Result<ReportPayload> {
    let metrics = compute_metrics(view);
    let coverage = Coverage::from_view(view);

    let daily = aggregate_by(view, Dimension::Day);
    let products = aggregate_by(view, Dimension::Product);
    let shifts = aggregate_by(view, Dimension::Shift);
    let operators = aggregate_by(view, Dimension::Operator);
    let downtime = aggregate_by(view, Dimension::DowntimeReason);

    let recent_start = daily.len().saturating_sub(config.recent_days);
    let payload = ReportPayload {
        kpis: KpiSet::from_metrics(&metrics),
        highlights: Highlights::new(&metrics, &coverage),
        top_downtime: downtime.iter().take(config.top_downtime_reasons).cloned().collect(),
        recent_days: daily[recent_start..].to_vec(),
        production_peaks: production_peaks(&daily, config.production_peaks, config.text_bar_width),
        top_products: rank_by(&products, config.top_products, |r| r.actual as f64),
        top_operators: rank_by(&operators, config.top_operators, |r| r.actual as f64),
        waste_by_product: rank_by(&products, config.top_waste_products, |r| r.waste_rate),
        summary_top_products: rank_by(&products, SUMMARY_TOP_N, |r| r.actual as f64),
        summary_top_downtime: downtime.iter().take(SUMMARY_TOP_N).cloned().collect(),
        insights: generate_insights(view),
        recommendations: recommend(&metrics, &shifts, &downtime, config),
        statistics: describe(view)?,
        coverage,
        metrics,
        daily,
        products,
        shifts,
        operators,
        downtime,
    };

    debug!(
        "Assembled report over {} rows: {} days, {} products, {} recommendations",
        payload.coverage.rows,
        payload.daily.len(),
        payload.products.len(),
        payload.recommendations.len()
    );
    Ok(payload)
}

/// Top days by output, each with a `#` bar scaled to the highest day
fn production_peaks(daily: &[GroupRow], limit: usize, width: usize) -> Vec<PeakBar> {
    let top = rank_by(daily, limit, |r| r.actual as f64);
    let max = top.iter().map(|r| r.actual).max().unwrap_or(0) as f64;

    top.into_iter()
        .map(|row| {
            let length = (safe_div(row.actual as f64, max) * width as f64).floor() as usize;
            PeakBar {
                day: row.key,
                units: row.actual,
                bar: "#".repeat(length),
            }
        })
        .collect()
}
