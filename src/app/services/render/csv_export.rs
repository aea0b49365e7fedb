//! CSV export of a filtered view
//!
//! Rows are written with `Row_ID` first and the schema columns in dataset
//! order. Missing downtime reasons are written as empty cells.

use crate::{Error, Result};
use crate::app::models::Column as DatasetColumn;
use crate::app::services::filter_engine::FilteredView;
use polars::prelude::*;
use std::io::Write;
use tracing::debug;

/// Build a data frame holding the view's rows
pub fn view_frame(view: &FilteredView) -> Result<DataFrame> {
    let records: Vec<_> = view.records().collect();

    let text = |f: fn(&crate::app::models::ProductionRecord) -> String| -> Vec<String> {
        records.iter().map(|r| f(r)).collect()
    };

    let frame = df!(
        DatasetColumn::RowId.name() => records.iter().map(|r| r.row_id as u64).collect::<Vec<u64>>(),
        DatasetColumn::Date.name() => text(|r| r.date.format("%Y-%m-%d").to_string()),
        DatasetColumn::Shift.name() => text(|r| r.shift.clone()),
        DatasetColumn::ProductName.name() => text(|r| r.product_name.clone()),
        DatasetColumn::ProductId.name() => text(|r| r.product_id.clone()),
        DatasetColumn::MachineOperatorId.name() => text(|r| r.machine_operator_id.clone()),
        DatasetColumn::SupervisorId.name() => text(|r| r.supervisor_id.clone()),
        DatasetColumn::PlannedProductionUnits.name() => records.iter().map(|r| r.planned_production_units).collect::<Vec<u64>>(),
        DatasetColumn::ActualProductionUnits.name() => records.iter().map(|r| r.actual_production_units).collect::<Vec<u64>>(),
        DatasetColumn::RawMaterialUsedKg.name() => records.iter().map(|r| r.raw_material_used_kg).collect::<Vec<f64>>(),
        DatasetColumn::WasteWeightKg.name() => records.iter().map(|r| r.waste_weight_kg).collect::<Vec<f64>>(),
        DatasetColumn::DowntimeMinutes.name() => records.iter().map(|r| r.downtime_minutes).collect::<Vec<f64>>(),
        DatasetColumn::TotalTimeRunMinutes.name() => records.iter().map(|r| r.total_time_run_minutes).collect::<Vec<f64>>(),
        DatasetColumn::DowntimeReason.name() => records.iter().map(|r| r.downtime_reason.clone()).collect::<Vec<Option<String>>>(),
    )
    .map_err(|e| Error::polars("Failed to build the export frame", e))?;
    Ok(frame)
}

/// Write the view as CSV with a header row; returns the number of data rows
pub fn export_csv<W: Write>(view: &FilteredView, writer: &mut W) -> Result<usize> {
    let mut frame = view_frame(view)?;
    CsvWriter::new(writer)
        .include_header(true)
        .finish(&mut frame)
        .map_err(|e| Error::polars("Failed to write CSV export", e))?;

    debug!("Exported {} rows as CSV", frame.height());
    Ok(frame.height())
}
