//! Filtered view over a dataset snapshot

use crate::app::models::{Dataset, ProductionRecord};
use std::sync::Arc;

/// Read-only subset of dataset rows
///
/// Holds the dataset snapshot it was taken from, so later edits to the session
/// never change an existing view.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView {
    dataset: Arc<Dataset>,
    indices: Vec<usize>,
}

impl FilteredView {
    pub(crate) fn new(dataset: Arc<Dataset>, indices: Vec<usize>) -> Self {
        Self { dataset, indices }
    }

    /// A view of every row in the dataset
    pub fn full(dataset: Arc<Dataset>) -> Self {
        let indices = (0..dataset.len()).collect();
        Self::new(dataset, indices)
    }

    /// The dataset snapshot behind this view
    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Selected records in dataset order
    pub fn records(&self) -> impl Iterator<Item = &ProductionRecord> + '_ {
        let records = self.dataset.records();
        self.indices.iter().map(move |&index| &records[index])
    }

    /// Row identities of the selected records
    pub fn row_ids(&self) -> Vec<usize> {
        self.records().map(|r| r.row_id).collect()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
