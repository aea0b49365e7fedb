//! Test utilities for the report engine
//!
//! Views are built from in-memory records with the dataset loader's record
//! builder, so each test states only the fields it cares about.

use crate::app::models::ProductionRecord;
use crate::app::services::dataset_loader::tests::dataset;
use crate::app::services::filter_engine::FilteredView;

mod aggregation_tests;
mod assembler_tests;

/// A view over every record
pub fn view_of(records: Vec<ProductionRecord>) -> FilteredView {
    FilteredView::full(dataset(records))
}
