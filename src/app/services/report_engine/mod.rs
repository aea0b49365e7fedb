//! Report metrics and aggregation engine
//!
//! Pure functions from a [`FilteredView`] to numbers and text:
//!
//! - [`metrics`] - Scalar KPIs with safe division
//! - [`aggregation`] - Group-by tables for day, product, shift, operator and downtime reason
//! - [`insights`] - Trend, best product and top downtime cause
//! - [`recommendations`] - Threshold rules producing actionable text
//! - [`statistics`] - Descriptive statistics appendix (polars)
//! - [`assembler`] - The renderer-agnostic [`ReportPayload`]
//! - [`cache`] - Payload memoisation keyed by dataset version and filters
//!
//! [`FilteredView`]: crate::app::services::filter_engine::FilteredView

pub mod aggregation;
pub mod assembler;
pub mod cache;
pub mod insights;
pub mod metrics;
pub mod recommendations;
pub mod statistics;

#[cfg(test)]
pub mod tests;

pub use aggregation::{Dimension, GroupRow, aggregate_by, rank_by};
pub use assembler::{Coverage, Highlights, PeakBar, ReportPayload, assemble};
pub use cache::ReportCache;
pub use insights::{Insight, InsightKind, generate_insights};
pub use metrics::{Kpi, KpiName, KpiSet, KpiUnit, ReportMetrics, compute_kpis, compute_metrics, safe_div};
pub use recommendations::recommend;
pub use statistics::{ColumnStatistics, describe};
