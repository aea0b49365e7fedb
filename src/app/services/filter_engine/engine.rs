//! Filtering, default window and filter option lists

use super::params::FilterParams;
use super::view::FilteredView;
use crate::app::models::{Dataset, DateRange};
use crate::{Error, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Apply filter parameters to a dataset snapshot
///
/// An empty result is a valid view. Identical parameters on an unchanged
/// dataset always select the same rows in the same order.
pub fn filter(dataset: &Arc<Dataset>, params: &FilterParams) -> Result<FilteredView> {
    if let Some(range) = params.date_range {
        if range.start > range.end {
            return Err(Error::invalid_filter(format!(
                "start date {} is after end date {}",
                range.start, range.end
            )));
        }
    }

    let indices: Vec<usize> = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| params.matches(record))
        .map(|(index, _)| index)
        .collect();

    debug!(
        "Filter selected {} of {} rows",
        indices.len(),
        dataset.len()
    );

    Ok(FilteredView::new(Arc::clone(dataset), indices))
}

/// Default window: the last `window_days` calendar days ending at the latest
/// date, clamped to the earliest date. `None` for an empty dataset.
pub fn default_date_range(dataset: &Dataset, window_days: u32) -> Option<DateRange> {
    let min = dataset.min_date()?;
    let max = dataset.max_date()?;
    let span = i64::from(window_days.max(1)) - 1;
    let start = (max - Duration::days(span)).max(min);
    Some(DateRange { start, end: max })
}

/// Option lists for the categorical filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub shifts: Vec<String>,
    pub products: Vec<String>,
    pub operators: Vec<String>,
    pub downtime_reasons: Vec<String>,
}

/// Distinct values per categorical dimension, in first-appearance order,
/// taken from the date-filtered subset only
pub fn filter_options(dataset: &Dataset, date_range: Option<DateRange>) -> FilterOptions {
    let mut options = FilterOptions::default();
    let mut seen: [HashSet<&str>; 4] = Default::default();

    let in_range = dataset
        .records()
        .iter()
        .filter(|r| date_range.is_none_or(|range| range.contains(r.date)));

    for record in in_range {
        let values = [
            (&mut options.shifts, record.shift.as_str()),
            (&mut options.products, record.product_name.as_str()),
            (&mut options.operators, record.machine_operator_id.as_str()),
            (&mut options.downtime_reasons, record.downtime_reason_label()),
        ];
        for ((list, value), seen) in values.into_iter().zip(seen.iter_mut()) {
            if seen.insert(value) {
                list.push(value.to_string());
            }
        }
    }

    options
}
