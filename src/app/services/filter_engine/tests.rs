use super::*;
use crate::Error;
use crate::app::models::DateRange;
use crate::app::services::dataset_loader::tests::{dataset, record};
use chrono::NaiveDate;
use proptest::prelude::*;
use std::sync::Arc;

fn date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
}

fn week_of_data() -> Arc<crate::app::models::Dataset> {
    dataset(vec![
        record(0, "2024-03-01").shift("A").product("Chips").operator("OP-1").build(),
        record(1, "2024-03-03").shift("B").product("Puffs").operator("OP-2").downtime(20.0, Some("Jam")).build(),
        record(2, "2024-03-05").shift("A").product("Puffs").operator("OP-1").build(),
        record(3, "2024-03-10").shift("C").product("Crisps").operator("OP-3").downtime(5.0, Some("Cleaning")).build(),
        record(4, "2024-03-12").shift("B").product("Chips").operator("OP-2").build(),
    ])
}

#[test]
fn test_unrestricted_filter_selects_everything() {
    let data = week_of_data();
    let view = filter(&data, &FilterParams::all()).unwrap();
    assert_eq!(view.len(), 5);
    assert_eq!(view.row_ids(), vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_date_range_is_inclusive() {
    let data = week_of_data();
    let params = FilterParams::all()
        .with_date_range(DateRange::new(date("2024-03-03"), date("2024-03-10")).unwrap());

    let view = filter(&data, &params).unwrap();
    assert_eq!(view.row_ids(), vec![1, 2, 3]);
}

#[test]
fn test_inverted_date_range_is_rejected() {
    let data = week_of_data();
    let params = FilterParams {
        date_range: Some(DateRange {
            start: date("2024-03-10"),
            end: date("2024-03-01"),
        }),
        ..FilterParams::default()
    };

    assert!(matches!(filter(&data, &params), Err(Error::InvalidFilter { .. })));
}

#[test]
fn test_categorical_filters_combine() {
    let data = week_of_data();
    let params = FilterParams::all()
        .with_shifts(["A", "B"])
        .with_products(["Chips"]);

    let view = filter(&data, &params).unwrap();
    assert_eq!(view.row_ids(), vec![0, 4]);
}

#[test]
fn test_missing_reason_is_selectable_as_nan() {
    let data = week_of_data();

    let only_missing = filter(&data, &FilterParams::all().with_downtime_reasons(["nan"])).unwrap();
    assert_eq!(only_missing.row_ids(), vec![0, 2, 4]);

    let without_missing =
        filter(&data, &FilterParams::all().with_downtime_reasons(["Jam", "Cleaning"])).unwrap();
    assert_eq!(without_missing.row_ids(), vec![1, 3]);
}

#[test]
fn test_empty_selection_yields_empty_view() {
    let data = week_of_data();
    let params = FilterParams::all().with_operators(Vec::<String>::new());

    let view = filter(&data, &params).unwrap();
    assert!(view.is_empty());
    assert_eq!(view.dataset().len(), 5);
}

#[test]
fn test_default_date_range_last_seven_days() {
    let data = week_of_data();
    let range = default_date_range(&data, 7).unwrap();
    assert_eq!(range.start, date("2024-03-06"));
    assert_eq!(range.end, date("2024-03-12"));
}

#[test]
fn test_default_date_range_clamps_to_min_date() {
    let data = dataset(vec![
        record(0, "2024-03-01").build(),
        record(1, "2024-03-03").build(),
    ]);
    let range = default_date_range(&data, 7).unwrap();
    assert_eq!(range.start, date("2024-03-01"));
    assert_eq!(range.end, date("2024-03-03"));

    assert!(default_date_range(&dataset(vec![]), 7).is_none());
}

#[test]
fn test_filter_options_come_from_date_filtered_subset() {
    let data = week_of_data();
    let range = DateRange::new(date("2024-03-01"), date("2024-03-05")).unwrap();

    let options = filter_options(&data, Some(range));
    assert_eq!(options.shifts, vec!["A", "B"]);
    assert_eq!(options.products, vec!["Chips", "Puffs"]);
    assert_eq!(options.operators, vec!["OP-1", "OP-2"]);
    assert_eq!(options.downtime_reasons, vec!["nan", "Jam"]);

    let all = filter_options(&data, None);
    assert_eq!(all.shifts, vec!["A", "B", "C"]);
    assert!(all.products.contains(&"Crisps".to_string()));
}

proptest! {
    #[test]
    fn prop_filter_is_idempotent(
        day_offsets in proptest::collection::vec(0i64..30, 1..40),
        shifts in proptest::collection::vec(prop_oneof![Just("A"), Just("B"), Just("C")], 1..40),
        start in 0i64..30,
        len in 0i64..30,
    ) {
        let base = date("2024-01-01");
        let records = day_offsets
            .iter()
            .zip(shifts.iter().cycle())
            .enumerate()
            .map(|(i, (offset, shift))| {
                let day = (base + chrono::Duration::days(*offset)).format("%Y-%m-%d").to_string();
                record(i, &day).shift(shift).build()
            })
            .collect();
        let data = dataset(records);

        let range_start = base + chrono::Duration::days(start);
        let params = FilterParams::all()
            .with_date_range(DateRange::new(range_start, range_start + chrono::Duration::days(len)).unwrap())
            .with_shifts(["A", "C"]);

        let first = filter(&data, &params).unwrap();
        let second = filter(&data, &params).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert!(first.records().all(|r| params.matches(r)));
    }
}
