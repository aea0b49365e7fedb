//! Dataset load orchestration
//!
//! Handles reading the file, validating the header and converting every data
//! row. Loads are all-or-nothing: the first bad row aborts with an error that
//! names the row and column.

use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use super::column_mapping::ColumnMapping;
use super::record_parser::parse_production_record;
use super::stats::{LoadResult, LoadStats};
use crate::app::models::Dataset;
use crate::config::LoadingConfig;
use crate::{Error, Result};

/// Loader for production CSV files
#[derive(Debug, Clone, Default)]
pub struct DatasetLoader {
    strict_columns: bool,
}

impl DatasetLoader {
    /// Create a loader; with `strict_columns` unknown columns fail the load
    pub fn new(strict_columns: bool) -> Self {
        Self { strict_columns }
    }

    pub fn from_config(config: &LoadingConfig) -> Self {
        Self::new(config.strict_columns)
    }

    /// Load a dataset from a CSV file on disk
    pub async fn load_file(&self, path: &Path) -> Result<LoadResult> {
        info!("Loading production dataset: {}", path.display());

        let content = tokio::fs::read(path).await.map_err(|e| {
            Error::io(
                format!("Failed to read dataset file '{}'", path.display()),
                e,
            )
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        self.load_reader(&name, content.as_slice())
    }

    /// Load a dataset from any reader; `name` identifies the source in errors
    pub fn load_reader<R: Read>(&self, name: &str, reader: R) -> Result<LoadResult> {
        let start = Instant::now();
        let mut stats = LoadStats::new();

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| Error::csv_parsing(name, "Failed to read CSV header", Some(e)))?
            .clone();

        let mapping = ColumnMapping::analyze(&headers, name, self.strict_columns)?;
        stats.columns = mapping.total_columns;
        stats.ignored_columns = mapping.extra_columns.clone();
        if !mapping.extra_columns.is_empty() {
            debug!("Ignoring columns outside the schema: {:?}", mapping.extra_columns);
        }

        let mut records = Vec::new();
        for (row_id, result) in csv_reader.records().enumerate() {
            let record = result.map_err(|e| {
                Error::csv_parsing(name, format!("Malformed CSV at data row {}", row_id), Some(e))
            })?;
            records.push(parse_production_record(&record, &mapping, row_id)?);
        }

        if records.is_empty() {
            return Err(Error::empty_dataset(name));
        }

        stats.rows = records.len();
        stats.elapsed = start.elapsed();

        info!(
            "Loaded {} rows ({} columns) from {} in {:?}",
            stats.rows, stats.columns, name, stats.elapsed
        );

        let dataset = Dataset::new(name, records).with_extra_columns(mapping.extra_columns);
        Ok(LoadResult { dataset, stats })
    }
}
