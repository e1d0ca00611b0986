// Chart descriptor tests
//
// Validates the typed chart descriptions handed to renderers: fixed document
// order, stable element identifiers, and the render gate that keeps empty
// charts out of exports.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use washpro::modules::reports::{ChartDescriptor, ChartKind, ReportData, ReportPeriod, ReportService};

#[path = "../helpers/mod.rs"]
mod helpers;
use helpers::ReportFixtures;

fn weekly_report() -> ReportData {
    let now = ReportFixtures::fixed_now();
    let roster = ReportFixtures::roster();
    let catalog = ReportFixtures::catalog();
    let basic = ReportFixtures::service(&catalog, "Basic Wash");
    let gold = ReportFixtures::service(&catalog, "Gold Package");

    let records = vec![
        ReportFixtures::paid_record(
            "Alice",
            "Toyota Corolla",
            vec![basic.clone(), gold],
            "staff01",
            ReportFixtures::days_ago(1),
        ),
        ReportFixtures::paid_record(
            "Bob",
            "Honda Civic",
            vec![basic],
            "staff01",
            ReportFixtures::hours_ago(2),
        ),
    ];

    ReportService::new().generate_at(&records, ReportPeriod::Weekly, &roster, &catalog, now)
}

fn empty_report() -> ReportData {
    ReportService::new().generate_at(
        &[],
        ReportPeriod::Weekly,
        &ReportFixtures::roster(),
        &ReportFixtures::catalog(),
        ReportFixtures::fixed_now(),
    )
}

#[test]
fn test_charts_keep_fixed_document_order() {
    let charts = ChartDescriptor::for_report(&weekly_report());

    let kinds: Vec<ChartKind> = charts.iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ChartKind::ServiceUsage,
            ChartKind::RevenueOverTime,
            ChartKind::StaffPerformance,
        ]
    );

    let ids: Vec<&str> = charts.iter().map(|c| c.kind.element_id()).collect();
    assert_eq!(
        ids,
        vec!["serviceUsageChart", "revenueChart", "staffPerformanceChart"]
    );
}

#[test]
fn test_chart_titles_and_headings() {
    let charts = ChartDescriptor::for_report(&weekly_report());

    assert_eq!(charts[0].title, "Service Usage Frequency");
    assert_eq!(charts[1].title, "Revenue Over Time (Paid Services)");
    assert_eq!(charts[2].title, "Staff Performance (by Revenue)");

    assert_eq!(charts[0].kind.section_heading(), "Service Usage");
    assert_eq!(charts[1].kind.section_heading(), "Revenue Over Time");
    assert_eq!(
        charts[2].kind.section_heading(),
        "Staff Performance (Revenue)"
    );
}

#[test]
fn test_service_usage_chart_follows_ranking() {
    let chart = ChartDescriptor::service_usage(&weekly_report());

    // Basic Wash appears twice, Gold Package once
    assert_eq!(chart.categories, vec!["Basic Wash", "Gold Package"]);
    assert_eq!(chart.series.len(), 1);
    assert_eq!(chart.series[0].name, "Times Used");
    assert_eq!(chart.series[0].data, vec![dec!(2), dec!(1)]);
}

#[test]
fn test_revenue_chart_uses_iso_dates_ascending() {
    let chart = ChartDescriptor::revenue_over_time(&weekly_report());

    assert_eq!(chart.categories, vec!["2025-03-14", "2025-03-15"]);
    assert_eq!(chart.series[0].name, "Revenue");
    assert_eq!(chart.series[0].data, vec![dec!(120), dec!(20)]);
}

#[test]
fn test_staff_chart_excludes_zero_earners() {
    let report = weekly_report();
    let chart = ChartDescriptor::staff_performance(&report);

    // Jane is on the roster but earned nothing in this window
    assert_eq!(report.staff_performance.len(), 2);
    assert_eq!(chart.categories, vec!["John Doe"]);
    assert_eq!(chart.series[0].name, "Total Revenue");
    assert_eq!(chart.series[0].data, vec![dec!(140)]);
}

#[test]
fn test_has_data_gates_empty_charts() {
    let empty = empty_report();
    for chart in ChartDescriptor::for_report(&empty) {
        assert!(!chart.has_data(), "{} should have no data", chart.title);
    }

    let populated = weekly_report();
    for chart in ChartDescriptor::for_report(&populated) {
        assert!(chart.has_data(), "{} should have data", chart.title);
    }
}

#[test]
fn test_staff_chart_is_empty_when_roster_never_earned() {
    // No paid activity at all; roster members stay seeded at zero
    let now = ReportFixtures::fixed_now();
    let roster = ReportFixtures::roster();
    let catalog = ReportFixtures::catalog();
    let report = ReportService::new().generate_at(&[], ReportPeriod::Daily, &roster, &catalog, now);

    let chart = ChartDescriptor::staff_performance(&report);
    assert!(chart.categories.is_empty());
    assert_eq!(chart.series[0].data, Vec::<Decimal>::new());
    assert!(!chart.has_data());
}
