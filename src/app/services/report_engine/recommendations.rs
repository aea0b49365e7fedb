//! Rule-based recommendations
//!
//! Rules are evaluated independently and every rule that fires contributes one
//! line, in rule order. When none fires a single fallback line is returned.

use super::aggregation::GroupRow;
use super::metrics::ReportMetrics;
use crate::config::ReportConfig;
use crate::constants::messages;

/// Produce recommendation lines from metrics and the shift and downtime tables
pub fn recommend(
    metrics: &ReportMetrics,
    shifts: &[GroupRow],
    downtime: &[GroupRow],
    config: &ReportConfig,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if metrics.efficiency < config.efficiency_threshold {
        recommendations.push(messages::REVIEW_PLANNING.to_string());
    }
    if metrics.yield_rate < config.yield_threshold {
        recommendations.push(messages::INVESTIGATE_MATERIAL_LOSS.to_string());
    }
    if metrics.total_downtime_minutes > 0.0 {
        let top_reason = downtime
            .first()
            .map(|row| row.key.as_str())
            .unwrap_or(messages::UNKNOWN_DOWNTIME_CAUSE);
        recommendations.push(format!(
            "Focus downtime reduction on {} through preventive maintenance and SOP refresh.",
            top_reason
        ));
    }
    if shift_variability_exceeded(shifts, config.shift_variability_factor) {
        recommendations.push(messages::STANDARDIZE_SHIFTS.to_string());
    }

    if recommendations.is_empty() {
        recommendations.push(messages::MAINTAIN_PRACTICES.to_string());
    }
    recommendations
}

/// Max shift downtime per unit above `factor` times the mean
fn shift_variability_exceeded(shifts: &[GroupRow], factor: f64) -> bool {
    if shifts.is_empty() {
        return false;
    }
    let values = shifts.iter().map(|row| row.downtime_per_unit);
    let max = values.clone().fold(f64::MIN, f64::max);
    let mean = values.sum::<f64>() / shifts.len() as f64;
    max > mean * factor
}
