//! Natural-language insights over a filtered view
//!
//! Weekly buckets run Monday to Sunday and are labelled by their Sunday. Every
//! calendar week between the first and last date in the view is a bucket, so
//! a week with no rows counts as zero output.

use super::aggregation::{Dimension, GroupRow, aggregate_by};
use crate::app::services::filter_engine::FilteredView;
use crate::constants::messages;
use crate::numbers::thousands;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What an insight is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsightKind {
    Trend,
    BestProduct,
    TopDowntimeCause,
    NoData,
}

/// One insight line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub message: String,
}

impl Insight {
    fn new(kind: InsightKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Sunday that closes the week containing `date`
pub fn week_ending(date: NaiveDate) -> NaiveDate {
    let days_to_sunday = 6 - i64::from(date.weekday().num_days_from_monday());
    date + Duration::days(days_to_sunday)
}

/// Weekly output totals keyed by week-ending Sunday, including empty weeks
pub fn weekly_totals(view: &FilteredView) -> Vec<(NaiveDate, u64)> {
    let mut totals: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in view.records() {
        let total = totals.entry(week_ending(record.date)).or_insert(0);
        *total = total.saturating_add(record.actual_production_units);
    }

    let (Some(&first), Some(&last)) = (totals.keys().next(), totals.keys().next_back()) else {
        return Vec::new();
    };

    let mut weeks = Vec::new();
    let mut week = first;
    while week <= last {
        weeks.push((week, totals.get(&week).copied().unwrap_or(0)));
        week = week + Duration::days(7);
    }
    weeks
}

/// Generate the trend, best product and top downtime cause insights
///
/// An empty view yields exactly one sentinel insight.
pub fn generate_insights(view: &FilteredView) -> Vec<Insight> {
    if view.is_empty() {
        return vec![Insight::new(InsightKind::NoData, messages::NO_DATA_INSIGHT)];
    }

    let products = aggregate_by(view, Dimension::Product);
    let downtime = aggregate_by(view, Dimension::DowntimeReason);

    let mut insights = vec![trend_insight(&weekly_totals(view))];
    if let Some(best) = best_product(&products) {
        insights.push(Insight::new(
            InsightKind::BestProduct,
            format!("Highest Volume: {} is the highest produced product.", best.key),
        ));
    }
    if let Some(top) = downtime.first() {
        insights.push(Insight::new(
            InsightKind::TopDowntimeCause,
            format!(
                "Actionable Insight: The primary cause of stoppages is {}, accounting for {} minutes of downtime.",
                top.key,
                thousands(top.downtime_minutes)
            ),
        ));
    }
    insights
}

fn trend_insight(weeks: &[(NaiveDate, u64)]) -> Insight {
    let [.., (_, previous), (_, last)] = weeks else {
        return Insight::new(InsightKind::Trend, messages::TREND_INSUFFICIENT_DATA);
    };
    if *previous == 0 {
        return Insight::new(InsightKind::Trend, messages::TREND_ZERO_BASELINE);
    }

    let change = (*last as f64 - *previous as f64) / *previous as f64 * 100.0;
    let direction = if change >= 0.0 { "increased" } else { "decreased" };
    Insight::new(
        InsightKind::Trend,
        format!(
            "Production Trend: Total output has {} by {:.1}% compared to the previous reporting period.",
            direction,
            change.abs()
        ),
    )
}

/// Highest total output; ties go to the product seen first in the view
fn best_product(products: &[GroupRow]) -> Option<&GroupRow> {
    products.iter().fold(None, |best: Option<&GroupRow>, row| match best {
        Some(current)
            if current.actual > row.actual
                || (current.actual == row.actual && current.first_seen < row.first_seen) =>
        {
            Some(current)
        }
        _ => Some(row),
    })
}
