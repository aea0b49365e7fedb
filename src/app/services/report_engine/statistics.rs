//! Descriptive statistics appendix
//!
//! Computed with polars over the view's numeric columns. Values are rounded to
//! two decimals, and undefined results (empty view, sample std of one row)
//! become 0.

use crate::{Error, Result};
use crate::app::models::Column as DatasetColumn;
use crate::app::services::filter_engine::FilteredView;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Columns summarised in the appendix, in display order
pub const DESCRIBED_COLUMNS: [DatasetColumn; 4] = [
    DatasetColumn::ActualProductionUnits,
    DatasetColumn::PlannedProductionUnits,
    DatasetColumn::DowntimeMinutes,
    DatasetColumn::WasteWeightKg,
];

/// Summary statistics for one numeric column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (one degree of freedom)
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

/// Describe the appendix columns of a view
pub fn describe(view: &FilteredView) -> Result<Vec<ColumnStatistics>> {
    let frame = numeric_frame(view)?;

    DESCRIBED_COLUMNS
        .iter()
        .map(|column| {
            let values = frame
                .column(column.name())
                .and_then(|c| c.as_materialized_series().f64().cloned())
                .map_err(|e| {
                    Error::polars(format!("Failed to read column {}", column.name()), e)
                })?;
            Ok(ColumnStatistics {
                column: column.name().to_string(),
                count: values.len() - values.null_count(),
                mean: round2(values.mean()),
                std: round2(values.std(1)),
                min: round2(values.min()),
                max: round2(values.max()),
            })
        })
        .collect()
}

fn numeric_frame(view: &FilteredView) -> Result<DataFrame> {
    let mut actual = Vec::with_capacity(view.len());
    let mut planned = Vec::with_capacity(view.len());
    let mut downtime = Vec::with_capacity(view.len());
    let mut waste = Vec::with_capacity(view.len());

    for record in view.records() {
        actual.push(record.actual_production_units as f64);
        planned.push(record.planned_production_units as f64);
        downtime.push(record.downtime_minutes);
        waste.push(record.waste_weight_kg);
    }

    let frame = df!(
        DatasetColumn::ActualProductionUnits.name() => actual,
        DatasetColumn::PlannedProductionUnits.name() => planned,
        DatasetColumn::DowntimeMinutes.name() => downtime,
        DatasetColumn::WasteWeightKg.name() => waste,
    )
    .map_err(|e| Error::polars("Failed to build the statistics frame", e))?;
    Ok(frame)
}

fn round2(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => (v * 100.0).round() / 100.0,
        _ => 0.0,
    }
}
