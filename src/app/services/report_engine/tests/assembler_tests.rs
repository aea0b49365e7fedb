//! Tests for report assembly, statistics and the payload cache

use super::view_of;
use crate::app::services::dataset_loader::tests::record;
use crate::app::services::filter_engine::FilterParams;
use crate::app::services::report_engine::*;
use crate::config::ReportConfig;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;

fn fortnight() -> Vec<crate::app::models::ProductionRecord> {
    (0..14)
        .map(|day| {
            let date = format!("2024-03-{:02}", day + 1);
            record(day, &date)
                .shift(if day % 2 == 0 { "A" } else { "B" })
                .product(["Chips", "Puffs", "Crisps"][day % 3])
                .units(100, 50 + day as u64 * 10)
                .downtime(day as f64, Some(if day % 4 == 0 { "Jam" } else { "Cleaning" }))
                .build()
        })
        .collect()
}

#[test]
fn test_payload_coverage_and_highlights() {
    let payload = assemble(&view_of(fortnight()), &ReportConfig::default()).unwrap();

    assert_eq!(payload.coverage.rows, 14);
    assert_eq!(payload.coverage.days_covered, 14);
    assert_eq!(payload.coverage.date_min, NaiveDate::from_ymd_opt(2024, 3, 1));
    assert_eq!(payload.coverage.date_max, NaiveDate::from_ymd_opt(2024, 3, 14));
    assert_eq!(payload.coverage.shifts, 2);
    assert_eq!(payload.coverage.products, 3);
    assert_eq!(payload.coverage.operators, 1);

    // 50 + 60 + ... + 180
    assert_eq!(payload.metrics.total_actual, 1610);
    assert_eq!(payload.highlights.avg_daily_output, 115.0);
    assert_eq!(payload.highlights.plan_attainment, payload.metrics.efficiency);
}

#[test]
fn test_ranked_slices_respect_limits() {
    let config = ReportConfig::default();
    let payload = assemble(&view_of(fortnight()), &config).unwrap();

    assert_eq!(payload.daily.len(), 14);
    assert_eq!(payload.recent_days.len(), config.recent_days);
    assert_eq!(payload.recent_days.first().unwrap().key, "2024-03-05");
    assert_eq!(payload.recent_days.last().unwrap().key, "2024-03-14");

    assert_eq!(payload.production_peaks.len(), config.production_peaks);
    assert_eq!(payload.production_peaks[0].day, "2024-03-14");
    assert_eq!(payload.production_peaks[0].bar.len(), config.text_bar_width);
    // 130 / 180 * 24 = 17.33
    assert_eq!(payload.production_peaks[5].units, 130);
    assert_eq!(payload.production_peaks[5].bar, "#".repeat(17));

    assert_eq!(payload.top_downtime.len(), 2);
    assert_eq!(payload.top_products.len(), 3);
    assert_eq!(payload.top_operators.len(), 1);
    assert_eq!(payload.waste_by_product.len(), 3);
}

#[test]
fn test_summary_slices_hold_top_five() {
    let records: Vec<_> = (0..7)
        .map(|i| {
            record(i, "2024-03-04")
                .product(&format!("Product {}", i))
                .units(100, 10 * (i as u64 + 1))
                .downtime(5.0 * i as f64, Some(&format!("Cause {}", i)))
                .build()
        })
        .collect();
    let payload = assemble(&view_of(records), &ReportConfig::default()).unwrap();

    let keys = |rows: &[GroupRow]| rows.iter().map(|r| r.key.clone()).collect::<Vec<_>>();
    assert_eq!(
        keys(&payload.summary_top_products),
        vec!["Product 6", "Product 5", "Product 4", "Product 3", "Product 2"]
    );
    assert_eq!(
        keys(&payload.summary_top_downtime),
        vec!["Cause 6", "Cause 5", "Cause 4", "Cause 3", "Cause 2"]
    );
    // the full tables stay complete
    assert_eq!(payload.products.len(), 7);
    assert_eq!(payload.downtime.len(), 7);
}

#[test]
fn test_insights_and_recommendations_included() {
    let payload = assemble(&view_of(fortnight()), &ReportConfig::default()).unwrap();
    assert_eq!(payload.insights.len(), 3);
    assert!(!payload.recommendations.is_empty());
    assert_eq!(payload.statistics.len(), 4);
}

#[test]
fn test_empty_view_payload() {
    let payload = assemble(&view_of(vec![]), &ReportConfig::default()).unwrap();

    assert_eq!(payload.coverage, Coverage::default());
    assert!(payload.daily.is_empty());
    assert!(payload.production_peaks.is_empty());
    assert_eq!(payload.insights.len(), 1);
    assert_eq!(payload.insights[0].kind, InsightKind::NoData);
    assert!(payload.statistics.iter().all(|s| s.count == 0 && s.mean == 0.0 && s.std == 0.0));
}

#[test]
fn test_descriptive_statistics() {
    let view = view_of(vec![
        record(0, "2024-03-01").units(10, 1).downtime(0.0, None).build(),
        record(1, "2024-03-02").units(20, 2).downtime(5.0, None).build(),
        record(2, "2024-03-03").units(30, 4).downtime(10.0, None).build(),
    ]);

    let statistics = describe(&view).unwrap();
    let columns: Vec<&str> = statistics.iter().map(|s| s.column.as_str()).collect();
    assert_eq!(
        columns,
        vec![
            "Actual_Production_Units",
            "Planned_Production_Units",
            "Downtime_Minutes",
            "Waste_Weight_kg",
        ]
    );

    let actual = &statistics[0];
    assert_eq!(actual.count, 3);
    assert_eq!(actual.mean, 2.33);
    assert_eq!(actual.std, 1.53);
    assert_eq!(actual.min, 1.0);
    assert_eq!(actual.max, 4.0);

    let planned = &statistics[1];
    assert_eq!(planned.mean, 20.0);
    assert_eq!(planned.std, 10.0);
}

#[test]
fn test_single_row_statistics_have_zero_std() {
    let statistics = describe(&view_of(vec![record(0, "2024-03-01").build()])).unwrap();
    assert!(statistics.iter().all(|s| s.std == 0.0 && s.count == 1));
}

#[test]
fn test_report_cache_memoises_by_version_and_filters() {
    let view = view_of(fortnight());
    let config = ReportConfig::default();
    let mut cache = ReportCache::new();
    let mut builds = 0;

    let params = FilterParams::all();
    let first = cache
        .get_or_try_insert(1, &params, || {
            builds += 1;
            assemble(&view, &config)
        })
        .unwrap();
    let second = cache
        .get_or_try_insert(1, &params, || {
            builds += 1;
            assemble(&view, &config)
        })
        .unwrap();

    assert_eq!(builds, 1);
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(cache.hit_rate(), 50.0);

    cache
        .get_or_try_insert(2, &params, || assemble(&view, &config))
        .unwrap();
    cache
        .get_or_try_insert(2, &FilterParams::all().with_shifts(["A"]), || {
            assemble(&view, &config)
        })
        .unwrap();
    assert_eq!(cache.len(), 3);

    cache.clear();
    assert!(cache.is_empty());
}
