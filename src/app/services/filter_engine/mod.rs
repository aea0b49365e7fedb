//! Filter engine for production datasets
//!
//! Selects the rows of a [`Dataset`] that fall inside an inclusive date range
//! and match the categorical selections for shift, product, operator and
//! downtime reason. The result is a [`FilteredView`]: a read-only list of row
//! positions sharing the dataset snapshot it was taken from.
//!
//! - [`params`] - Filter parameters (hashable, used as a cache key)
//! - [`view`] - The filtered view over a dataset snapshot
//! - [`engine`] - Filtering, default window and filter option lists
//!
//! [`Dataset`]: crate::app::models::Dataset

pub mod engine;
pub mod params;
pub mod view;

#[cfg(test)]
mod tests;

pub use engine::{FilterOptions, default_date_range, filter, filter_options};
pub use params::FilterParams;
pub use view::FilteredView;
