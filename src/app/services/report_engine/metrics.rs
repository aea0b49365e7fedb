//! Scalar KPIs with safe division
//!
//! Metrics stay numeric here. Display strings are produced by the renderers,
//! so every consumer formats the same numbers with the same rules.

use crate::app::models::ProductionRecord;
use crate::app::services::filter_engine::FilteredView;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Divide, returning 0 for a zero denominator or any non-finite result
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let value = numerator / denominator;
    if value.is_finite() { value } else { 0.0 }
}

// =============================================================================
// Report Metrics
// =============================================================================

/// Totals and ratios over a filtered view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportMetrics {
    pub row_count: usize,
    pub total_planned: u64,
    pub total_actual: u64,
    pub total_raw_material_kg: f64,
    pub total_waste_kg: f64,
    pub total_downtime_minutes: f64,
    pub total_run_minutes: f64,

    /// Actual over planned units
    pub efficiency: f64,

    /// Material efficiency: share of raw material that did not become waste,
    /// `(raw - waste) / raw`. Reported under the "Raw Material Yield" name.
    pub yield_rate: f64,

    /// Run time over run time plus downtime
    pub utilization: f64,
}

impl ReportMetrics {
    /// Accumulate totals over records and derive the ratios
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ProductionRecord>,
    {
        let mut metrics = Self::default();
        for record in records {
            metrics.row_count += 1;
            metrics.total_planned = metrics
                .total_planned
                .saturating_add(record.planned_production_units);
            metrics.total_actual = metrics
                .total_actual
                .saturating_add(record.actual_production_units);
            metrics.total_raw_material_kg += record.raw_material_used_kg;
            metrics.total_waste_kg += record.waste_weight_kg;
            metrics.total_downtime_minutes += record.downtime_minutes;
            metrics.total_run_minutes += record.total_time_run_minutes;
        }

        metrics.efficiency = safe_div(metrics.total_actual as f64, metrics.total_planned as f64);
        metrics.yield_rate = safe_div(
            metrics.total_raw_material_kg - metrics.total_waste_kg,
            metrics.total_raw_material_kg,
        );
        metrics.utilization = safe_div(
            metrics.total_run_minutes,
            metrics.total_run_minutes + metrics.total_downtime_minutes,
        );
        metrics
    }
}

/// Compute metrics for a view; an empty view yields all zeros
pub fn compute_metrics(view: &FilteredView) -> ReportMetrics {
    ReportMetrics::from_records(view.records())
}

// =============================================================================
// KPI Set
// =============================================================================

/// The six dashboard KPIs, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KpiName {
    TotalProduction,
    OverallEfficiency,
    RawMaterialYield,
    TotalWaste,
    TotalDowntime,
    UtilizationRate,
}

impl KpiName {
    pub const ORDER: [KpiName; 6] = [
        KpiName::TotalProduction,
        KpiName::OverallEfficiency,
        KpiName::RawMaterialYield,
        KpiName::TotalWaste,
        KpiName::TotalDowntime,
        KpiName::UtilizationRate,
    ];

    /// Display label, part of the renderer contract
    pub fn label(&self) -> &'static str {
        match self {
            KpiName::TotalProduction => "Total Production (Units)",
            KpiName::OverallEfficiency => "Overall Efficiency",
            KpiName::RawMaterialYield => "Raw Material Yield",
            KpiName::TotalWaste => "Total Waste (kg)",
            KpiName::TotalDowntime => "Total Downtime (min)",
            KpiName::UtilizationRate => "Utilization Rate",
        }
    }

    /// How the value is displayed
    pub fn unit(&self) -> KpiUnit {
        match self {
            KpiName::TotalProduction | KpiName::TotalDowntime => KpiUnit::Count,
            KpiName::OverallEfficiency
            | KpiName::RawMaterialYield
            | KpiName::UtilizationRate => KpiUnit::Ratio,
            KpiName::TotalWaste => KpiUnit::Weight,
        }
    }
}

impl fmt::Display for KpiName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display class of a KPI value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KpiUnit {
    /// Thousands-separated whole number
    Count,
    /// Percentage with two decimals
    Ratio,
    /// Thousands-separated with one decimal
    Weight,
}

/// One KPI with its numeric value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub name: KpiName,
    pub value: f64,
}

/// Ordered KPI mapping; key set and order are fixed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSet {
    kpis: Vec<Kpi>,
}

impl KpiSet {
    pub fn from_metrics(metrics: &ReportMetrics) -> Self {
        let kpis = KpiName::ORDER
            .iter()
            .map(|&name| {
                let value = match name {
                    KpiName::TotalProduction => metrics.total_actual as f64,
                    KpiName::OverallEfficiency => metrics.efficiency,
                    KpiName::RawMaterialYield => metrics.yield_rate,
                    KpiName::TotalWaste => metrics.total_waste_kg,
                    KpiName::TotalDowntime => metrics.total_downtime_minutes,
                    KpiName::UtilizationRate => metrics.utilization,
                };
                Kpi { name, value }
            })
            .collect();
        Self { kpis }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Kpi> {
        self.kpis.iter()
    }

    pub fn get(&self, name: KpiName) -> Option<f64> {
        self.kpis.iter().find(|k| k.name == name).map(|k| k.value)
    }

    pub fn len(&self) -> usize {
        self.kpis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kpis.is_empty()
    }
}

/// Compute the KPI set for a view
pub fn compute_kpis(view: &FilteredView) -> KpiSet {
    KpiSet::from_metrics(&compute_metrics(view))
}
