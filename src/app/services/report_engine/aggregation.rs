//! Group-by aggregations over a filtered view
//!
//! Groups are collected in first-appearance order, then put into each
//! dimension's canonical order: days chronologically, products, shifts and
//! operators by key, downtime reasons by total minutes descending with ties
//! kept in first-appearance order.

use super::metrics::safe_div;
use crate::app::models::ProductionRecord;
use crate::app::services::filter_engine::FilteredView;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// Grouping dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Day,
    Product,
    Shift,
    Operator,
    DowntimeReason,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Day,
        Dimension::Product,
        Dimension::Shift,
        Dimension::Operator,
        Dimension::DowntimeReason,
    ];

    /// Group key of a record along this dimension
    pub fn key_of(&self, record: &ProductionRecord) -> String {
        match self {
            Dimension::Day => record.date.format("%Y-%m-%d").to_string(),
            Dimension::Product => record.product_name.clone(),
            Dimension::Shift => record.shift.clone(),
            Dimension::Operator => record.machine_operator_id.clone(),
            Dimension::DowntimeReason => record.downtime_reason_label().to_string(),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Day => "Date",
            Dimension::Product => "Product",
            Dimension::Shift => "Shift",
            Dimension::Operator => "Operator",
            Dimension::DowntimeReason => "Downtime Reason",
        };
        f.write_str(name)
    }
}

/// One group of an aggregation table: raw sums plus derived ratios
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRow {
    pub key: String,

    /// Position of the group's first record within the view
    pub first_seen: usize,

    pub records: usize,
    pub actual: u64,
    pub planned: u64,
    pub downtime_minutes: f64,
    pub waste_kg: f64,
    pub raw_material_kg: f64,

    pub efficiency: f64,
    pub waste_rate: f64,
    pub yield_rate: f64,
    pub downtime_per_unit: f64,

    /// Share of total output; only set for the product dimension
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share: Option<f64>,
}

impl GroupRow {
    fn empty(key: String, first_seen: usize) -> Self {
        Self {
            key,
            first_seen,
            records: 0,
            actual: 0,
            planned: 0,
            downtime_minutes: 0.0,
            waste_kg: 0.0,
            raw_material_kg: 0.0,
            efficiency: 0.0,
            waste_rate: 0.0,
            yield_rate: 0.0,
            downtime_per_unit: 0.0,
            share: None,
        }
    }

    fn add(&mut self, record: &ProductionRecord) {
        self.records += 1;
        self.actual = self.actual.saturating_add(record.actual_production_units);
        self.planned = self.planned.saturating_add(record.planned_production_units);
        self.downtime_minutes += record.downtime_minutes;
        self.waste_kg += record.waste_weight_kg;
        self.raw_material_kg += record.raw_material_used_kg;
    }

    fn derive(&mut self) {
        self.efficiency = safe_div(self.actual as f64, self.planned as f64);
        self.waste_rate = safe_div(self.waste_kg, self.raw_material_kg);
        self.yield_rate = safe_div(self.raw_material_kg - self.waste_kg, self.raw_material_kg);
        self.downtime_per_unit = safe_div(self.downtime_minutes, self.actual as f64);
    }
}

/// Group a view by one dimension, returning rows in the dimension's canonical order
pub fn aggregate_by(view: &FilteredView, dimension: Dimension) -> Vec<GroupRow> {
    let mut rows: Vec<GroupRow> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (position, record) in view.records().enumerate() {
        let key = dimension.key_of(record);
        let index = match positions.get(&key) {
            Some(&index) => index,
            None => {
                positions.insert(key.clone(), rows.len());
                rows.push(GroupRow::empty(key, position));
                rows.len() - 1
            }
        };
        rows[index].add(record);
    }

    for row in &mut rows {
        row.derive();
    }

    if dimension == Dimension::Product {
        let total = rows.iter().fold(0u64, |sum, r| sum.saturating_add(r.actual));
        for row in &mut rows {
            row.share = Some(safe_div(row.actual as f64, total as f64));
        }
    }

    match dimension {
        Dimension::DowntimeReason => {
            rows.sort_by(|a, b| descending(a.downtime_minutes, b.downtime_minutes))
        }
        _ => rows.sort_by(|a, b| a.key.cmp(&b.key)),
    }

    rows
}

/// Stable top-N ranking by a numeric column, highest first
///
/// Rows are taken in the slice's existing order, so ties keep that order.
pub fn rank_by<F>(rows: &[GroupRow], limit: usize, value: F) -> Vec<GroupRow>
where
    F: Fn(&GroupRow) -> f64,
{
    let mut ranked = rows.to_vec();
    ranked.sort_by(|a, b| descending(value(a), value(b)));
    ranked.truncate(limit);
    ranked
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
