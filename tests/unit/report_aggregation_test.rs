// Report aggregation tests
//
// Validates filtering, totals, and the three breakdowns computed from
// billing records: service usage, revenue over time, staff performance.
// Monetary expectations use exact decimals throughout.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use washpro::modules::billing::{BillingRecord, PaymentStatus};
use washpro::modules::catalog::Service;
use washpro::modules::reports::{ReportPeriod, ReportService};

#[path = "../helpers/mod.rs"]
mod helpers;
use helpers::ReportFixtures;

fn synthetic_service(id: &str, name: &str, price: Decimal) -> Service {
    Service {
        id: id.to_string(),
        name: name.to_string(),
        price,
        description: "Synthetic".to_string(),
    }
}

#[test]
fn test_only_paid_records_inside_window_count() {
    let now = ReportFixtures::fixed_now();
    let roster = ReportFixtures::roster();
    let catalog = ReportFixtures::catalog();
    let basic = ReportFixtures::service(&catalog, "Basic Wash");
    let premium = ReportFixtures::service(&catalog, "Premium Wash");

    let records = vec![
        ReportFixtures::paid_record(
            "Alice",
            "Toyota Corolla",
            vec![basic],
            "staff01",
            ReportFixtures::hours_ago(3),
        ),
        ReportFixtures::record_with_status(
            "Bob",
            "Honda Civic",
            vec![premium],
            "staff02",
            PaymentStatus::Pending,
            ReportFixtures::hours_ago(2),
        ),
    ];

    let report =
        ReportService::new().generate_at(&records, ReportPeriod::Daily, &roster, &catalog, now);

    assert_eq!(report.total_revenue, dec!(20));
    assert_eq!(report.total_washes, 1);
    assert_eq!(report.filtered_records.len(), 1);
    assert_eq!(report.filtered_records[0].customer_name, "Alice");

    assert_eq!(report.service_usage.len(), 1);
    assert_eq!(report.service_usage[0].name, "Basic Wash");
    assert_eq!(report.service_usage[0].count, 1);
    assert_eq!(report.service_usage[0].revenue, dec!(20));

    let john = report
        .staff_performance
        .iter()
        .find(|s| s.staff_id == "staff01")
        .expect("staff01 seeded");
    assert_eq!(john.washes_count, 1);
    assert_eq!(john.total_revenue, dec!(20));

    // The pending record leaves Jane seeded at zero
    let jane = report
        .staff_performance
        .iter()
        .find(|s| s.staff_id == "staff02")
        .expect("staff02 seeded");
    assert_eq!(jane.washes_count, 0);
    assert_eq!(jane.total_revenue, Decimal::ZERO);
}

#[test]
fn test_cancelled_records_never_count() {
    let now = ReportFixtures::fixed_now();
    let roster = ReportFixtures::roster();
    let catalog = ReportFixtures::catalog();
    let gold = ReportFixtures::service(&catalog, "Gold Package");

    let records = vec![ReportFixtures::record_with_status(
        "Carol",
        "BMW X5",
        vec![gold],
        "staff01",
        PaymentStatus::Cancelled,
        ReportFixtures::hours_ago(1),
    )];

    let report =
        ReportService::new().generate_at(&records, ReportPeriod::Daily, &roster, &catalog, now);

    assert!(report.is_empty());
    assert_eq!(report.total_revenue, Decimal::ZERO);
    assert_eq!(report.total_washes, 0);
}

#[test]
fn test_service_usage_groups_by_id_across_price_changes() {
    let now = ReportFixtures::fixed_now();
    let roster = ReportFixtures::roster();
    let catalog = ReportFixtures::catalog();
    let tire_at_10 = ReportFixtures::service(&catalog, "Tire Shine");
    let mut tire_at_12 = tire_at_10.clone();
    tire_at_12.price = dec!(12);

    let records = vec![
        ReportFixtures::paid_record(
            "Alice",
            "Toyota Corolla",
            vec![tire_at_10],
            "staff01",
            ReportFixtures::days_ago(2),
        ),
        ReportFixtures::paid_record(
            "Bob",
            "Honda Civic",
            vec![tire_at_12],
            "staff02",
            ReportFixtures::days_ago(1),
        ),
    ];

    let report =
        ReportService::new().generate_at(&records, ReportPeriod::Weekly, &roster, &catalog, now);

    // One entry for the service ID, counting both snapshots at their own price
    assert_eq!(report.service_usage.len(), 1);
    let usage = &report.service_usage[0];
    assert_eq!(usage.service_id, "S006");
    assert_eq!(usage.name, "Tire Shine");
    assert_eq!(usage.count, 2);
    assert_eq!(usage.revenue, dec!(22));
    assert_eq!(report.total_revenue, dec!(22));
}

#[test]
fn test_departed_staff_revenue_is_never_dropped() {
    let now = ReportFixtures::fixed_now();
    let roster = ReportFixtures::roster();
    let catalog = ReportFixtures::catalog();
    let wax = ReportFixtures::service(&catalog, "Detailing - Wax & Polish");
    let basic = ReportFixtures::service(&catalog, "Basic Wash");

    let records = vec![
        ReportFixtures::paid_record(
            "Dedi",
            "Suzuki Ertiga",
            vec![wax],
            "ghost99xyz",
            ReportFixtures::days_ago(1),
        ),
        ReportFixtures::paid_record(
            "Eka",
            "Mazda 3",
            vec![basic],
            "owner01",
            ReportFixtures::days_ago(2),
        ),
    ];

    let report =
        ReportService::new().generate_at(&records, ReportPeriod::Weekly, &roster, &catalog, now);

    // Unknown ID gets a placeholder built from its first six characters
    let ghost = report
        .staff_performance
        .iter()
        .find(|s| s.staff_id == "ghost99xyz")
        .expect("ghost entry synthesized");
    assert_eq!(ghost.staff_name, "Unknown/Deleted Staff (ID: ghost9)");
    assert_eq!(ghost.washes_count, 1);
    assert_eq!(ghost.total_revenue, dec!(75));

    // Owner-attributed washes resolve to the owner's real name
    let owner = report
        .staff_performance
        .iter()
        .find(|s| s.staff_id == "owner01")
        .expect("owner entry synthesized");
    assert_eq!(owner.staff_name, "Main Owner");
    assert_eq!(owner.washes_count, 1);

    let attributed: Decimal = report
        .staff_performance
        .iter()
        .map(|s| s.total_revenue)
        .sum();
    assert_eq!(attributed, report.total_revenue);
}

#[test]
fn test_revenue_over_time_buckets_by_local_day() {
    let now = ReportFixtures::fixed_now();
    let roster = ReportFixtures::roster();
    let catalog = ReportFixtures::catalog();
    let basic = ReportFixtures::service(&catalog, "Basic Wash");
    let premium = ReportFixtures::service(&catalog, "Premium Wash");
    let tire = ReportFixtures::service(&catalog, "Tire Shine");

    // 2025-03-14 17:00 UTC is already 2025-03-15 01:00 in the +08:00 zone
    let crossing_midnight = Utc.with_ymd_and_hms(2025, 3, 14, 17, 0, 0).unwrap();

    let records = vec![
        ReportFixtures::paid_record(
            "Alice",
            "Toyota Corolla",
            vec![basic],
            "staff01",
            crossing_midnight,
        ),
        ReportFixtures::paid_record(
            "Bob",
            "Honda Civic",
            vec![premium],
            "staff02",
            ReportFixtures::days_ago(3),
        ),
        ReportFixtures::paid_record(
            "Carol",
            "BMW X5",
            vec![tire],
            "staff01",
            ReportFixtures::days_ago(3) - Duration::hours(1),
        ),
    ];

    let report =
        ReportService::new().generate_at(&records, ReportPeriod::Weekly, &roster, &catalog, now);

    assert_eq!(report.revenue_over_time.len(), 2);
    assert_eq!(report.revenue_over_time[0].date.to_string(), "2025-03-12");
    assert_eq!(report.revenue_over_time[0].revenue, dec!(50));
    assert_eq!(report.revenue_over_time[1].date.to_string(), "2025-03-15");
    assert_eq!(report.revenue_over_time[1].revenue, dec!(20));
}

#[test]
fn test_live_catalog_prices_never_affect_report() {
    let now = ReportFixtures::fixed_now();
    let roster = ReportFixtures::roster();
    let mut catalog = ReportFixtures::catalog();
    let basic = ReportFixtures::service(&catalog, "Basic Wash");

    let records = vec![ReportFixtures::paid_record(
        "Alice",
        "Toyota Corolla",
        vec![basic],
        "staff01",
        ReportFixtures::hours_ago(1),
    )];

    // Reprice the whole live catalog after the wash was recorded
    for service in &mut catalog {
        service.price = dec!(999);
    }

    let report =
        ReportService::new().generate_at(&records, ReportPeriod::Weekly, &roster, &catalog, now);

    assert_eq!(report.total_revenue, dec!(20));
    assert_eq!(report.service_usage[0].revenue, dec!(20));
}

#[test]
fn test_empty_inputs_yield_zeroed_report() {
    let now = ReportFixtures::fixed_now();
    let roster = ReportFixtures::roster();
    let catalog = ReportFixtures::catalog();

    let report =
        ReportService::new().generate_at(&[], ReportPeriod::Monthly, &roster, &catalog, now);

    assert!(report.is_empty());
    assert_eq!(report.total_revenue, Decimal::ZERO);
    assert_eq!(report.total_washes, 0);
    assert!(report.service_usage.is_empty());
    assert!(report.revenue_over_time.is_empty());

    // Roster staff still appear, zeroed, so exports can list the whole team
    assert_eq!(report.staff_performance.len(), 2);
    assert!(report
        .staff_performance
        .iter()
        .all(|s| s.washes_count == 0 && s.total_revenue == Decimal::ZERO));
}

#[test]
fn test_empty_roster_and_catalog_are_tolerated() {
    let now = ReportFixtures::fixed_now();
    let records = vec![ReportFixtures::paid_record(
        "Alice",
        "Toyota Corolla",
        vec![synthetic_service("S900", "Orphan Wash", dec!(30))],
        "staff01",
        ReportFixtures::hours_ago(4),
    )];

    let report = ReportService::new().generate_at(&records, ReportPeriod::Weekly, &[], &[], now);

    assert_eq!(report.total_washes, 1);
    assert_eq!(report.staff_performance.len(), 1);
    assert!(report.staff_performance[0]
        .staff_name
        .starts_with("Unknown/Deleted Staff"));
}

#[test]
fn test_window_bounds_are_inclusive() {
    let now = ReportFixtures::fixed_now();
    let roster = ReportFixtures::roster();
    let catalog = ReportFixtures::catalog();
    let basic = ReportFixtures::service(&catalog, "Basic Wash");

    let (start, end) = ReportService::resolve_window(ReportPeriod::Weekly, now);
    let at_start = start.with_timezone(&Utc);
    let at_end = end.with_timezone(&Utc);

    let records = vec![
        ReportFixtures::paid_record(
            "Edge Start",
            "Toyota Corolla",
            vec![basic.clone()],
            "staff01",
            at_start,
        ),
        ReportFixtures::paid_record(
            "Edge End",
            "Honda Civic",
            vec![basic.clone()],
            "staff02",
            at_end,
        ),
        ReportFixtures::paid_record(
            "Too Early",
            "BMW X5",
            vec![basic],
            "staff01",
            at_start - Duration::milliseconds(1),
        ),
    ];

    let report =
        ReportService::new().generate_at(&records, ReportPeriod::Weekly, &roster, &catalog, now);

    assert_eq!(report.total_washes, 2);
    assert!(report
        .filtered_records
        .iter()
        .all(|r| r.customer_name != "Too Early"));
}

#[test]
fn test_rankings_break_ties_in_stable_order() {
    let now = ReportFixtures::fixed_now();
    let roster = ReportFixtures::roster();
    let catalog = ReportFixtures::catalog();
    let wax = ReportFixtures::service(&catalog, "Detailing - Wax & Polish");

    let records = vec![
        ReportFixtures::paid_record(
            "Alice",
            "Toyota Corolla",
            vec![wax.clone()],
            "staff01",
            ReportFixtures::days_ago(2),
        ),
        ReportFixtures::paid_record(
            "Bob",
            "Honda Civic",
            vec![synthetic_service("S101", "Spot Wash", dec!(75))],
            "staff02",
            ReportFixtures::days_ago(1),
        ),
    ];

    let report =
        ReportService::new().generate_at(&records, ReportPeriod::Weekly, &roster, &catalog, now);

    // Equal counts keep encounter order; equal revenue keeps roster order
    let usage_names: Vec<&str> = report.service_usage.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(usage_names, vec!["Detailing - Wax & Polish", "Spot Wash"]);

    assert_eq!(report.staff_performance[0].staff_id, "staff01");
    assert_eq!(report.staff_performance[1].staff_id, "staff02");
    assert_eq!(
        report.staff_performance[0].total_revenue,
        report.staff_performance[1].total_revenue
    );
}

#[test]
fn test_generation_is_deterministic_for_fixed_now() {
    let now = ReportFixtures::fixed_now();
    let roster = ReportFixtures::roster();
    let catalog = ReportFixtures::catalog();
    let basic = ReportFixtures::service(&catalog, "Basic Wash");
    let gold = ReportFixtures::service(&catalog, "Gold Package");

    let records = vec![
        ReportFixtures::paid_record(
            "Alice",
            "Toyota Corolla",
            vec![basic],
            "staff01",
            ReportFixtures::days_ago(4),
        ),
        ReportFixtures::paid_record(
            "Bob",
            "Honda Civic",
            vec![gold],
            "staff02",
            ReportFixtures::hours_ago(5),
        ),
    ];

    let service = ReportService::new();
    let first = service.generate_at(&records, ReportPeriod::Monthly, &roster, &catalog, now);
    let second = service.generate_at(&records, ReportPeriod::Monthly, &roster, &catalog, now);

    assert_eq!(
        serde_json::to_value(&first).expect("Serializable report"),
        serde_json::to_value(&second).expect("Serializable report")
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_revenue_is_conserved_across_breakdowns(
        specs in prop::collection::vec(
            (0usize..3usize, 1u64..100_000u64, 0i64..40i64, 0usize..2usize),
            0..40
        )
    ) {
        let now = ReportFixtures::fixed_now();
        let roster = ReportFixtures::roster();
        let catalog = ReportFixtures::catalog();
        let staff_ids = ["staff01", "staff02"];
        let statuses = [
            PaymentStatus::Paid,
            PaymentStatus::Pending,
            PaymentStatus::Cancelled,
        ];

        let mut expected_total = Decimal::ZERO;
        let mut expected_washes = 0u64;
        let records: Vec<BillingRecord> = specs
            .iter()
            .enumerate()
            .map(|(i, &(status_idx, cents, days_back, staff_idx))| {
                let amount = Decimal::new(cents as i64, 2);
                if statuses[status_idx] == PaymentStatus::Paid && days_back <= 30 {
                    expected_total += amount;
                    expected_washes += 1;
                }
                ReportFixtures::record_with_status(
                    &format!("Customer {}", i),
                    "Test Car",
                    vec![synthetic_service(
                        &format!("SVC{:02}", i % 5),
                        &format!("Synthetic Service {}", i % 5),
                        amount,
                    )],
                    staff_ids[staff_idx],
                    statuses[status_idx],
                    ReportFixtures::days_ago(days_back),
                )
            })
            .collect();

        let report = ReportService::new().generate_at(
            &records,
            ReportPeriod::Monthly,
            &roster,
            &catalog,
            now,
        );

        prop_assert_eq!(report.total_revenue, expected_total);
        prop_assert_eq!(report.total_washes, expected_washes);

        // Every cent lands in exactly one staff entry and one usage entry
        let attributed: Decimal = report
            .staff_performance
            .iter()
            .map(|s| s.total_revenue)
            .sum();
        prop_assert_eq!(attributed, expected_total);

        let usage_revenue: Decimal = report.service_usage.iter().map(|u| u.revenue).sum();
        prop_assert_eq!(usage_revenue, expected_total);

        let daily_revenue: Decimal = report.revenue_over_time.iter().map(|p| p.revenue).sum();
        prop_assert_eq!(daily_revenue, expected_total);
    }
}
