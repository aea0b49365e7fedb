//! Header validation and column index lookup
//!
//! Required columns are matched case-sensitively. A pre-existing `Row_ID`
//! column is ignored because row identity is always assigned by the loader.

use crate::app::models::Column;
use crate::constants::ROW_ID_COLUMN;
use crate::{Error, Result};
use csv::StringRecord;
use std::collections::HashMap;

/// Column positions for one dataset file
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    /// Column to index mapping for every schema column present
    indices: HashMap<Column, usize>,

    /// Columns present in the file but not part of the schema
    pub extra_columns: Vec<String>,

    /// Total number of columns in the header
    pub total_columns: usize,
}

impl ColumnMapping {
    /// Validate the header row and build the mapping
    ///
    /// With `strict` set, any column outside the schema fails the load.
    pub fn analyze(headers: &StringRecord, file: &str, strict: bool) -> Result<Self> {
        let mut indices = HashMap::new();
        let mut extra_columns = Vec::new();

        for (index, header) in headers.iter().enumerate() {
            let name = header.trim().trim_start_matches('\u{feff}');
            if name == ROW_ID_COLUMN {
                continue;
            }

            match name.parse::<Column>() {
                Ok(column) => {
                    indices.entry(column).or_insert(index);
                }
                Err(_) if strict => return Err(Error::unexpected_column(file, name)),
                Err(_) => extra_columns.push(name.to_string()),
            }
        }

        if let Some(missing) = Column::ALL
            .iter()
            .filter(|column| **column != Column::RowId)
            .find(|column| !indices.contains_key(column))
        {
            return Err(Error::missing_column(file, missing.name()));
        }

        Ok(Self {
            indices,
            extra_columns,
            total_columns: headers.len(),
        })
    }

    /// Index of a schema column in the file
    pub fn index(&self, column: Column) -> Option<usize> {
        self.indices.get(&column).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::REQUIRED_COLUMNS;

    fn header(extra: &[&str]) -> StringRecord {
        let mut fields: Vec<&str> = REQUIRED_COLUMNS.to_vec();
        fields.extend_from_slice(extra);
        StringRecord::from(fields)
    }

    #[test]
    fn test_analyze_full_header() {
        let mapping = ColumnMapping::analyze(&header(&[]), "data.csv", false).unwrap();
        assert_eq!(mapping.index(Column::Date), Some(0));
        assert_eq!(mapping.index(Column::DowntimeReason), Some(12));
        assert!(mapping.extra_columns.is_empty());
        assert_eq!(mapping.total_columns, 13);
    }

    #[test]
    fn test_missing_column_is_named() {
        let fields: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|name| *name != "Waste_Weight_kg")
            .collect();
        let err = ColumnMapping::analyze(&StringRecord::from(fields), "data.csv", false)
            .unwrap_err();

        match err {
            Error::MissingColumn { file, column } => {
                assert_eq!(file, "data.csv");
                assert_eq!(column, "Waste_Weight_kg");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_column_names_are_case_sensitive() {
        let fields: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .map(|name| {
                if *name == "Shift" {
                    "shift".to_string()
                } else {
                    name.to_string()
                }
            })
            .collect();
        let err = ColumnMapping::analyze(&StringRecord::from(fields), "data.csv", false)
            .unwrap_err();
        assert!(matches!(err, Error::MissingColumn { ref column, .. } if column == "Shift"));
    }

    #[test]
    fn test_extra_columns_and_row_id() {
        let mut fields = vec!["Row_ID"];
        fields.extend_from_slice(REQUIRED_COLUMNS);
        fields.push("Line");
        let mapping =
            ColumnMapping::analyze(&StringRecord::from(fields.clone()), "data.csv", false).unwrap();

        assert_eq!(mapping.index(Column::Date), Some(1));
        assert_eq!(mapping.index(Column::RowId), None);
        assert_eq!(mapping.extra_columns, vec!["Line".to_string()]);

        let err = ColumnMapping::analyze(&StringRecord::from(fields), "data.csv", true)
            .unwrap_err();
        assert!(matches!(err, Error::UnexpectedColumn { ref column, .. } if column == "Line"));
    }

    #[test]
    fn test_byte_order_mark_is_stripped() {
        let mut fields: Vec<String> = REQUIRED_COLUMNS.iter().map(|s| s.to_string()).collect();
        fields[0] = format!("\u{feff}{}", fields[0]);
        let mapping =
            ColumnMapping::analyze(&StringRecord::from(fields), "data.csv", true).unwrap();
        assert_eq!(mapping.index(Column::Date), Some(0));
    }
}
