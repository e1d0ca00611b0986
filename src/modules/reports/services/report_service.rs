use chrono::{DateTime, Days, Duration, Local, LocalResult, NaiveDate, TimeZone};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::modules::billing::{BillingRecord, PaymentStatus};
use crate::modules::catalog::Service;
use crate::modules::reports::models::{
    ReportData, ReportPeriod, RevenueDataPoint, ServiceUsageData, StaffPerformanceData,
};
use crate::modules::staff::User;

/// Service for aggregating billing records into business reports
///
/// Stateless and purely computational: it reads its inputs, produces a
/// `ReportData`, and holds nothing between calls.
#[derive(Debug, Default)]
pub struct ReportService;

impl ReportService {
    /// Create a new report service
    pub fn new() -> Self {
        Self
    }

    /// Generate a report for the given period, ending at the current moment
    ///
    /// Convenience wrapper around [`ReportService::generate_at`] using the
    /// system local time.
    pub fn generate(
        &self,
        records: &[BillingRecord],
        period: ReportPeriod,
        staff_roster: &[User],
        service_catalog: &[Service],
    ) -> ReportData {
        self.generate_at(records, period, staff_roster, service_catalog, Local::now())
    }

    /// Generate a report for the given period, ending at `now`
    ///
    /// Deterministic for a fixed `now`: identical inputs always yield an
    /// identical report. Records are included when their timestamp falls
    /// inside the resolved window (inclusive on both ends) and their status
    /// is `Paid`; pending and cancelled records contribute nothing.
    ///
    /// # Arguments
    /// * `records` - All billing records, filtered internally
    /// * `period` - Lookback window to resolve against `now`
    /// * `staff_roster` - Current team, seeds zero-valued staff entries
    /// * `_service_catalog` - Live catalog, accepted for interface parity;
    ///   revenue always comes from the per-record snapshots
    /// * `now` - End instant of the window, in the requesting user's zone
    pub fn generate_at<Tz: TimeZone>(
        &self,
        records: &[BillingRecord],
        period: ReportPeriod,
        staff_roster: &[User],
        _service_catalog: &[Service],
        now: DateTime<Tz>,
    ) -> ReportData {
        let tz = now.timezone();
        let (start, end) = Self::resolve_window(period, now.clone());
        let start_date = start.fixed_offset();
        let end_date = end.fixed_offset();

        info!(
            "Generating {} report: window {} to {} ({} records in scope)",
            period,
            start_date,
            end_date,
            records.len()
        );

        let filtered_records: Vec<BillingRecord> = records
            .iter()
            .filter(|record| {
                record.payment_status == PaymentStatus::Paid
                    && record.timestamp >= start_date
                    && record.timestamp <= end_date
            })
            .cloned()
            .collect();

        let total_revenue: Decimal = filtered_records.iter().map(|r| r.total_amount).sum();
        let total_washes = filtered_records.len() as u64;

        let service_usage = Self::aggregate_service_usage(&filtered_records);
        let revenue_over_time = Self::aggregate_revenue_over_time(&filtered_records, &tz);
        let staff_performance = Self::aggregate_staff_performance(&filtered_records, staff_roster);

        let report = ReportData {
            period,
            start_date,
            end_date,
            generated_at: now.fixed_offset(),
            filtered_records,
            total_revenue,
            total_washes,
            service_usage,
            revenue_over_time,
            staff_performance,
        };

        if report.is_empty() {
            warn!(
                "Empty report generated for period {} to {}",
                report.start_date, report.end_date
            );
        } else {
            info!(
                "Report generated: {} paid washes, {} service entries, {} staff entries",
                report.total_washes,
                report.service_usage.len(),
                report.staff_performance.len()
            );
        }

        report
    }

    /// Resolve a period into its `[start, end]` window
    ///
    /// * Daily: local midnight to 23:59:59.999 of `now`'s calendar day
    /// * Weekly: 7 calendar days back from `now`, truncated to midnight, to `now`
    /// * Monthly: 30 calendar days back from `now`, truncated to midnight, to `now`
    pub fn resolve_window<Tz: TimeZone>(
        period: ReportPeriod,
        now: DateTime<Tz>,
    ) -> (DateTime<Tz>, DateTime<Tz>) {
        let tz = now.timezone();
        let today = now.date_naive();

        match period {
            ReportPeriod::Daily => (start_of_day(&tz, today), end_of_day(&tz, today)),
            ReportPeriod::Weekly => (start_of_day(&tz, today - Days::new(7)), now),
            ReportPeriod::Monthly => (start_of_day(&tz, today - Days::new(30)), now),
        }
    }

    /// Group snapshots by service ID, counting appearances and summing the
    /// snapshot prices. Ranked by count; ties keep encounter order.
    fn aggregate_service_usage(filtered: &[BillingRecord]) -> Vec<ServiceUsageData> {
        let mut usage: Vec<ServiceUsageData> = Vec::new();

        for record in filtered {
            for snapshot in &record.services {
                match usage.iter_mut().find(|u| u.service_id == snapshot.id) {
                    Some(entry) => {
                        entry.count += 1;
                        entry.revenue += snapshot.price;
                    }
                    None => usage.push(ServiceUsageData {
                        service_id: snapshot.id.clone(),
                        name: snapshot.name.clone(),
                        count: 1,
                        revenue: snapshot.price,
                    }),
                }
            }
        }

        usage.sort_by(|a, b| b.count.cmp(&a.count));
        usage
    }

    /// Bucket record totals by calendar day in the report's zone, ascending
    fn aggregate_revenue_over_time<Tz: TimeZone>(
        filtered: &[BillingRecord],
        tz: &Tz,
    ) -> Vec<RevenueDataPoint> {
        let mut daily: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();

        for record in filtered {
            let day = record.timestamp.with_timezone(tz).date_naive();
            *daily.entry(day).or_insert(Decimal::ZERO) += record.total_amount;
        }

        daily
            .into_iter()
            .map(|(date, revenue)| RevenueDataPoint { date, revenue })
            .collect()
    }

    /// Seed zero-valued entries for every roster staff member, then attribute
    /// each record to its staff ID, synthesizing entries for IDs no longer on
    /// the roster so revenue is never dropped. Ranked by revenue.
    fn aggregate_staff_performance(
        filtered: &[BillingRecord],
        staff_roster: &[User],
    ) -> Vec<StaffPerformanceData> {
        let mut performance: Vec<StaffPerformanceData> = staff_roster
            .iter()
            .filter(|user| user.is_staff())
            .map(|user| StaffPerformanceData {
                staff_id: user.id.clone(),
                staff_name: user.name.clone(),
                washes_count: 0,
                total_revenue: Decimal::ZERO,
            })
            .collect();

        for record in filtered {
            let idx = match performance
                .iter()
                .position(|entry| entry.staff_id == record.staff_id)
            {
                Some(idx) => idx,
                None => {
                    // Not in the seeded set: resolve the name from the full
                    // roster (owners included), else use a placeholder.
                    let staff_name = staff_roster
                        .iter()
                        .find(|user| user.id == record.staff_id)
                        .map(|user| user.name.clone())
                        .unwrap_or_else(|| {
                            format!(
                                "Unknown/Deleted Staff (ID: {})",
                                record.staff_id.chars().take(6).collect::<String>()
                            )
                        });

                    performance.push(StaffPerformanceData {
                        staff_id: record.staff_id.clone(),
                        staff_name,
                        washes_count: 0,
                        total_revenue: Decimal::ZERO,
                    });
                    performance.len() - 1
                }
            };

            performance[idx].washes_count += 1;
            performance[idx].total_revenue += record.total_amount;
        }

        performance.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));
        performance
    }
}

/// First instant of `date` in `tz`
fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let midnight = date.and_hms_milli_opt(0, 0, 0, 0).expect("Valid midnight");

    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(start) => start,
        LocalResult::Ambiguous(earliest, _) => earliest,
        // A zone transition can skip local midnight entirely; take the first
        // representable local time that morning instead.
        LocalResult::None => (1..=3)
            .find_map(|hour| {
                tz.from_local_datetime(&(midnight + Duration::hours(hour)))
                    .earliest()
            })
            .expect("Valid local time shortly after midnight"),
    }
}

/// Last representable millisecond of `date` in `tz`
fn end_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let end = date
        .and_hms_milli_opt(23, 59, 59, 999)
        .expect("Valid end of day");

    match tz.from_local_datetime(&end) {
        LocalResult::Single(instant) => instant,
        LocalResult::Ambiguous(_, latest) => latest,
        LocalResult::None => (1..=3)
            .find_map(|hour| {
                tz.from_local_datetime(&(end - Duration::hours(hour)))
                    .latest()
            })
            .expect("Valid local time shortly before midnight"),
    }
}
