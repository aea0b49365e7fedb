//! Production CSV loader
//!
//! Turns a production CSV file into a validated, strongly typed [`Dataset`].
//! Column names are checked once at the boundary and every row is converted
//! into a [`ProductionRecord`]; any bad row fails the whole load.
//!
//! ## Architecture
//!
//! - [`loader`] - Load orchestration for files and in-memory readers
//! - [`column_mapping`] - Header validation and column index lookup
//! - [`record_parser`] - Conversion of one CSV row into a record
//! - [`field_parsers`] - Typed field parsing shared with the editor
//! - [`stats`] - Load statistics and result structures
//!
//! ## Usage
//!
//! ```rust,no_run
//! use production_reporter::app::services::dataset_loader::DatasetLoader;
//!
//! # async fn example() -> production_reporter::Result<()> {
//! let loader = DatasetLoader::new(false);
//! let result = loader.load_file(std::path::Path::new("production.csv")).await?;
//!
//! println!("Loaded {} rows in {:?}", result.stats.rows, result.stats.elapsed);
//! # Ok(())
//! # }
//! ```
//!
//! [`Dataset`]: crate::app::models::Dataset
//! [`ProductionRecord`]: crate::app::models::ProductionRecord

pub mod column_mapping;
pub mod field_parsers;
pub mod loader;
pub mod record_parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use column_mapping::ColumnMapping;
pub use loader::DatasetLoader;
pub use stats::{LoadResult, LoadStats};
