//! Filter parameters

use crate::app::models::{DateRange, ProductionRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Selection applied by the filter engine
///
/// `None` means "no restriction" for that dimension. `Some` with an empty set
/// selects nothing, matching a multiselect with every option cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterParams {
    /// Inclusive date range; the end date covers its whole day
    pub date_range: Option<DateRange>,

    /// Allowed shift codes
    pub shifts: Option<BTreeSet<String>>,

    /// Allowed product names
    pub products: Option<BTreeSet<String>>,

    /// Allowed machine operator ids
    pub operators: Option<BTreeSet<String>>,

    /// Allowed downtime reasons, with missing reasons selected as `"nan"`
    pub downtime_reasons: Option<BTreeSet<String>>,
}

impl FilterParams {
    /// Parameters that select every row
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn with_shifts<I, S>(mut self, shifts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shifts = Some(shifts.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_products<I, S>(mut self, products: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.products = Some(products.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_operators<I, S>(mut self, operators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.operators = Some(operators.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_downtime_reasons<I, S>(mut self, reasons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.downtime_reasons = Some(reasons.into_iter().map(Into::into).collect());
        self
    }

    /// Check whether a record passes every selection
    pub fn matches(&self, record: &ProductionRecord) -> bool {
        fn allowed(selection: &Option<BTreeSet<String>>, value: &str) -> bool {
            selection.as_ref().is_none_or(|set| set.contains(value))
        }

        self.date_range.is_none_or(|range| range.contains(record.date))
            && allowed(&self.shifts, &record.shift)
            && allowed(&self.products, &record.product_name)
            && allowed(&self.operators, &record.machine_operator_id)
            && allowed(&self.downtime_reasons, record.downtime_reason_label())
    }
}
