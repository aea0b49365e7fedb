//! Tests for group-by aggregations

use super::view_of;
use crate::app::services::dataset_loader::tests::record;
use crate::app::services::report_engine::aggregation::*;
use pretty_assertions::assert_eq;

fn keys(rows: &[GroupRow]) -> Vec<&str> {
    rows.iter().map(|r| r.key.as_str()).collect()
}

#[test]
fn test_downtime_ties_keep_first_appearance() {
    let view = view_of(vec![
        record(0, "2024-03-01").downtime(30.0, Some("A")).build(),
        record(1, "2024-03-01").downtime(10.0, Some("C")).build(),
        record(2, "2024-03-02").downtime(30.0, Some("B")).build(),
    ]);

    let rows = aggregate_by(&view, Dimension::DowntimeReason);
    assert_eq!(keys(&rows), vec!["A", "B", "C"]);
    assert_eq!(rows[0].downtime_minutes, 30.0);
    assert_eq!(rows[2].downtime_minutes, 10.0);
}

#[test]
fn test_missing_reason_is_its_own_group() {
    let view = view_of(vec![
        record(0, "2024-03-01").downtime(5.0, None).build(),
        record(1, "2024-03-01").downtime(20.0, Some("Jam")).build(),
        record(2, "2024-03-02").downtime(7.0, None).build(),
    ]);

    let rows = aggregate_by(&view, Dimension::DowntimeReason);
    assert_eq!(keys(&rows), vec!["Jam", "nan"]);
    assert_eq!(rows[1].downtime_minutes, 12.0);
    assert_eq!(rows[1].records, 2);
}

#[test]
fn test_daily_rows_are_chronological() {
    let view = view_of(vec![
        record(0, "2024-03-05").units(10, 10).build(),
        record(1, "2024-03-01").units(20, 20).build(),
        record(2, "2024-03-03").units(30, 30).build(),
        record(3, "2024-03-01").units(5, 5).build(),
    ]);

    let rows = aggregate_by(&view, Dimension::Day);
    assert_eq!(keys(&rows), vec!["2024-03-01", "2024-03-03", "2024-03-05"]);
    assert_eq!(rows[0].actual, 25);
}

#[test]
fn test_product_share_and_ratios() {
    let view = view_of(vec![
        record(0, "2024-03-01").product("Puffs").units(100, 75).material(200.0, 10.0).build(),
        record(1, "2024-03-01").product("Chips").units(50, 25).material(0.0, 0.0).build(),
    ]);

    let rows = aggregate_by(&view, Dimension::Product);
    assert_eq!(keys(&rows), vec!["Chips", "Puffs"]);

    let chips = &rows[0];
    assert_eq!(chips.share, Some(0.25));
    assert_eq!(chips.efficiency, 0.5);
    assert_eq!(chips.waste_rate, 0.0);
    assert_eq!(chips.yield_rate, 0.0);

    let puffs = &rows[1];
    assert_eq!(puffs.share, Some(0.75));
    assert_eq!(puffs.waste_rate, 0.05);
    assert_eq!(puffs.yield_rate, 0.95);
}

#[test]
fn test_share_is_zero_without_output() {
    let view = view_of(vec![
        record(0, "2024-03-01").product("Puffs").units(10, 0).build(),
        record(1, "2024-03-01").product("Chips").units(10, 0).build(),
    ]);

    let rows = aggregate_by(&view, Dimension::Product);
    assert!(rows.iter().all(|r| r.share == Some(0.0)));
}

#[test]
fn test_share_only_on_product_dimension() {
    let view = view_of(vec![record(0, "2024-03-01").build()]);
    for dimension in [Dimension::Day, Dimension::Shift, Dimension::Operator, Dimension::DowntimeReason] {
        assert!(aggregate_by(&view, dimension).iter().all(|r| r.share.is_none()));
    }
}

#[test]
fn test_shift_downtime_per_unit() {
    let view = view_of(vec![
        record(0, "2024-03-01").shift("B").units(100, 50).downtime(25.0, Some("Jam")).build(),
        record(1, "2024-03-01").shift("A").units(100, 0).downtime(40.0, Some("Jam")).build(),
    ]);

    let rows = aggregate_by(&view, Dimension::Shift);
    assert_eq!(keys(&rows), vec!["A", "B"]);
    assert_eq!(rows[0].downtime_per_unit, 0.0);
    assert_eq!(rows[1].downtime_per_unit, 0.5);
}

#[test]
fn test_empty_view_has_empty_tables() {
    let view = view_of(vec![]);
    for dimension in Dimension::ALL {
        assert!(aggregate_by(&view, dimension).is_empty());
    }
}

#[test]
fn test_rank_by_is_stable_and_truncates() {
    let view = view_of(vec![
        record(0, "2024-03-01").operator("OP-3").units(10, 10).build(),
        record(1, "2024-03-01").operator("OP-1").units(10, 10).build(),
        record(2, "2024-03-01").operator("OP-2").units(20, 20).build(),
    ]);

    let rows = aggregate_by(&view, Dimension::Operator);
    let ranked = rank_by(&rows, 2, |r| r.actual as f64);
    assert_eq!(keys(&ranked), vec!["OP-2", "OP-1"]);
}
