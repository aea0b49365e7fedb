//! Audited cell edits
//!
//! Edits are applied to a copy of the dataset. A batch either applies in full
//! or not at all, and every cell whose stringified value actually changes
//! yields one [`AuditRecord`].

use crate::app::models::{AuditRecord, CellEdit, Dataset};
use crate::{Error, Result};
use chrono::NaiveDateTime;
use tracing::{debug, info};

/// Result of applying an edit batch
#[derive(Debug, Clone)]
pub struct EditOutcome {
    /// The dataset with every edit applied
    pub dataset: Dataset,

    /// One record per changed cell, in edit order
    pub audit_records: Vec<AuditRecord>,
}

impl EditOutcome {
    /// Whether any cell changed
    pub fn has_changes(&self) -> bool {
        !self.audit_records.is_empty()
    }
}

/// Apply `edits` to a copy of `dataset` on behalf of `actor`
///
/// Locked columns, unknown rows and values the loader would reject fail the
/// whole batch with [`Error::InvalidEdit`]. A cell is left alone, and not
/// audited, when the new value stringifies to the current one.
pub fn apply_edits(
    dataset: &Dataset,
    edits: &[CellEdit],
    actor: &str,
    timestamp: NaiveDateTime,
) -> Result<EditOutcome> {
    let mut records = dataset.records().to_vec();
    let mut audit_records = Vec::new();

    for edit in edits {
        if !edit.column.is_editable() {
            return Err(Error::invalid_edit(format!(
                "column '{}' cannot be edited",
                edit.column
            )));
        }

        // row ids are dense and sorted, but look up by id rather than position
        let index = records
            .binary_search_by_key(&edit.row_id, |r| r.row_id)
            .map_err(|_| Error::invalid_edit(format!("row {} does not exist", edit.row_id)))?;
        let record = &mut records[index];

        let old_value = record.field_value(edit.column);
        if old_value == edit.new_value {
            debug!(
                "Skipping unchanged cell row {} column {}",
                edit.row_id, edit.column
            );
            continue;
        }

        record
            .set_field(edit.column, &edit.new_value, edit.row_id)
            .map_err(|e| Error::invalid_edit(e.to_string()))?;

        let new_value = record.field_value(edit.column);
        if new_value == old_value {
            debug!(
                "Value '{}' for row {} column {} normalises to the current value",
                edit.new_value, edit.row_id, edit.column
            );
            continue;
        }

        audit_records.push(AuditRecord {
            user: actor.to_string(),
            timestamp,
            row_id: edit.row_id,
            column_name: edit.column.name().to_string(),
            old_value,
            new_value,
        });
    }

    info!(
        "Applied {} edits for {}: {} cells changed",
        edits.len(),
        actor,
        audit_records.len()
    );

    Ok(EditOutcome {
        dataset: dataset.with_records(records),
        audit_records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::Column;
    use crate::app::services::dataset_loader::tests::{dataset_from_csv, sample_csv};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(16, 45, 12)
            .unwrap()
    }

    #[test]
    fn test_edit_changes_cell_and_audits() {
        let dataset = dataset_from_csv(&sample_csv());
        let edits = [CellEdit::new(0, Column::ActualProductionUnits, "95")];

        let outcome = apply_edits(&dataset, &edits, "dana", now()).unwrap();

        assert_eq!(outcome.dataset.records()[0].actual_production_units, 95);
        assert_eq!(
            outcome.audit_records,
            vec![AuditRecord {
                user: "dana".to_string(),
                timestamp: now(),
                row_id: 0,
                column_name: "Actual_Production_Units".to_string(),
                old_value: "100".to_string(),
                new_value: "95".to_string(),
            }]
        );
        // source dataset untouched
        assert_eq!(dataset.records()[0].actual_production_units, 100);
    }

    #[test]
    fn test_string_equal_edit_is_noop() {
        let dataset = dataset_from_csv(&sample_csv());
        // row 0 has 30 downtime minutes
        let edits = [CellEdit::new(0, Column::DowntimeMinutes, "30")];

        let outcome = apply_edits(&dataset, &edits, "dana", now()).unwrap();

        assert!(!outcome.has_changes());
        assert_eq!(outcome.dataset.records(), dataset.records());
    }

    #[test]
    fn test_normalised_equal_edit_is_noop() {
        let dataset = dataset_from_csv(&sample_csv());
        let edits = [
            CellEdit::new(0, Column::ActualProductionUnits, "100.0"),
            // row 1 has no reason; an empty cell is still no reason
            CellEdit::new(1, Column::DowntimeReason, ""),
        ];

        let outcome = apply_edits(&dataset, &edits, "dana", now()).unwrap();
        assert!(!outcome.has_changes());
    }

    #[test]
    fn test_clearing_reason_is_audited_as_nan() {
        let dataset = dataset_from_csv(&sample_csv());
        let edits = [CellEdit::new(2, Column::DowntimeReason, "  ")];

        let outcome = apply_edits(&dataset, &edits, "dana", now()).unwrap();

        assert_eq!(outcome.dataset.records()[2].downtime_reason, None);
        assert_eq!(outcome.audit_records[0].old_value, "Jam");
        assert_eq!(outcome.audit_records[0].new_value, "nan");
    }

    #[test]
    fn test_locked_column_rejects_batch() {
        let dataset = dataset_from_csv(&sample_csv());
        let edits = [
            CellEdit::new(0, Column::WasteWeightKg, "1.5"),
            CellEdit::new(0, Column::Shift, "C"),
        ];

        let err = apply_edits(&dataset, &edits, "dana", now()).unwrap_err();
        assert!(matches!(err, Error::InvalidEdit { .. }));
        assert!(err.to_string().contains("Shift"));
    }

    #[test]
    fn test_unknown_row_rejects_batch() {
        let dataset = dataset_from_csv(&sample_csv());
        let edits = [CellEdit::new(42, Column::WasteWeightKg, "1.5")];

        let err = apply_edits(&dataset, &edits, "dana", now()).unwrap_err();
        assert!(err.to_string().contains("row 42"));
    }

    #[test]
    fn test_invalid_value_rejects_batch() {
        let dataset = dataset_from_csv(&sample_csv());
        let edits = [
            CellEdit::new(0, Column::WasteWeightKg, "1.5"),
            CellEdit::new(1, Column::WasteWeightKg, "-3"),
        ];

        let err = apply_edits(&dataset, &edits, "dana", now()).unwrap_err();
        assert!(matches!(err, Error::InvalidEdit { .. }));
        assert_eq!(dataset.records()[0].waste_weight_kg, 5.0);
    }

    #[test]
    fn test_product_name_edit_keeps_source_and_order() {
        let dataset = dataset_from_csv(&sample_csv());
        let edits = [CellEdit::new(3, Column::ProductName, "Smoky Barbecue")];

        let outcome = apply_edits(&dataset, &edits, "dana", now()).unwrap();

        assert_eq!(outcome.dataset.source(), dataset.source());
        assert_eq!(outcome.dataset.len(), 4);
        assert_eq!(outcome.dataset.records()[3].product_name, "Smoky Barbecue");
        assert_eq!(outcome.audit_records[0].column_name, "Product_Name");
    }
}
