//! Edit command implementation
//!
//! Applies one cell edit, appends the audit record and writes the updated
//! dataset back out. Unchanged cells write nothing.

use super::shared::{open_session, write_output};
use crate::app::models::{CellEdit, Dataset};
use crate::app::services::audit_log::AuditLog;
use crate::app::services::filter_engine::FilteredView;
use crate::app::services::render::export_csv;
use crate::cli::args::{Args, EditArgs};
use crate::config::Config;
use crate::{Error, Result};
use colored::*;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub async fn run_edit(args: &Args, edit_args: &EditArgs, config: &Config) -> Result<()> {
    let mut session = open_session(args, config, &edit_args.input).await?;
    let output = {
        let dataset = session.dataset().ok_or(Error::NoDatasetLoaded)?;
        output_path(edit_args, dataset)?
    };

    let edit = CellEdit::new(edit_args.row, edit_args.column, edit_args.value.clone());
    let timestamp = chrono::Local::now().naive_local();
    let records = session.apply_edits(std::slice::from_ref(&edit), timestamp)?;

    if records.is_empty() {
        println!(
            "{} row {} column {} already holds '{}'",
            "Unchanged:".bright_yellow().bold(),
            edit.row_id,
            edit.column,
            edit.new_value
        );
        return Ok(());
    }

    let dataset = session.dataset().ok_or(Error::NoDatasetLoaded)?;
    let mut buffer = Vec::new();
    export_csv(&FilteredView::full(Arc::clone(dataset)), &mut buffer)?;

    // the audit log is written first so a saved change is never unaudited
    let audit_log = AuditLog::from_config(&config.audit);
    audit_log.append(&records).await?;

    write_output(Some(output), &buffer).await?;
    info!("Saved edited dataset to {}", output.display());

    for record in &records {
        println!(
            "{} row {} {}: {} -> {}",
            "Edited".bright_green().bold(),
            record.row_id,
            record.column_name,
            record.old_value.bright_red(),
            record.new_value.bright_white().bold()
        );
    }
    Ok(())
}

/// Where the edited dataset goes
///
/// Exports only hold the schema columns, so an input carrying other columns
/// is never overwritten in place.
fn output_path<'a>(edit_args: &'a EditArgs, dataset: &Dataset) -> Result<&'a Path> {
    match edit_args.output.as_deref() {
        Some(output) => Ok(output),
        None if dataset.extra_columns().is_empty() => Ok(&edit_args.input),
        None => Err(Error::invalid_edit(format!(
            "'{}' has columns outside the schema ({}) that saving would drop; \
             choose another file with --output",
            edit_args.input.display(),
            dataset.extra_columns().join(", ")
        ))),
    }
}
