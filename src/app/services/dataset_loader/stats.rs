//! Load statistics and result structures

use crate::app::models::Dataset;
use std::time::Duration;

/// A loaded dataset together with load statistics
#[derive(Debug, Clone)]
pub struct LoadResult {
    pub dataset: Dataset,
    pub stats: LoadStats,
}

/// Statistics gathered while loading a dataset
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LoadStats {
    /// Number of data rows loaded
    pub rows: usize,

    /// Number of columns in the file header
    pub columns: usize,

    /// Columns present in the file but not part of the schema
    pub ignored_columns: Vec<String>,

    /// Wall time spent reading and parsing
    pub elapsed: Duration,
}

impl LoadStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            rows: 0,
            columns: 0,
            ignored_columns: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Rows parsed per second, 0 when no time was measured
    pub fn rows_per_second(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds == 0.0 {
            0.0
        } else {
            self.rows as f64 / seconds
        }
    }
}

impl Default for LoadStats {
    fn default() -> Self {
        Self::new()
    }
}
