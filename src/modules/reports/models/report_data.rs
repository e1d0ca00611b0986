use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::billing::BillingRecord;

/// Lookback window for a report, always ending "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportPeriod {
    /// Today, local midnight to 23:59:59.999
    Daily,
    /// Last 7 days up to the current moment
    Weekly,
    /// Last 30 days up to the current moment
    Monthly,
}

impl ReportPeriod {
    /// Human-readable option label
    pub fn label(&self) -> &'static str {
        match self {
            ReportPeriod::Daily => "Daily (Today)",
            ReportPeriod::Weekly => "Weekly (Last 7 Days)",
            ReportPeriod::Monthly => "Monthly (Last 30 Days)",
        }
    }
}

impl std::fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportPeriod::Daily => write!(f, "DAILY"),
            ReportPeriod::Weekly => write!(f, "WEEKLY"),
            ReportPeriod::Monthly => write!(f, "MONTHLY"),
        }
    }
}

impl std::str::FromStr for ReportPeriod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DAILY" => Ok(ReportPeriod::Daily),
            "WEEKLY" => Ok(ReportPeriod::Weekly),
            "MONTHLY" => Ok(ReportPeriod::Monthly),
            _ => Err(format!("Invalid report period: {}", s)),
        }
    }
}

/// Usage and revenue of one service across the filtered records
///
/// Grouped by service ID, so two catalog entries sharing a display name stay
/// distinct, and revenue reflects the snapshot price of each occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceUsageData {
    /// Service ID the group was keyed on
    pub service_id: String,
    /// Display name from the first snapshot encountered
    pub name: String,
    /// Number of appearances across filtered records
    pub count: u64,
    /// Sum of snapshot prices across appearances
    pub revenue: Decimal,
}

/// Revenue total for a single calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueDataPoint {
    pub date: NaiveDate,
    pub revenue: Decimal,
}

/// Wash count and revenue attributed to one staff member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffPerformanceData {
    pub staff_id: String,
    /// Roster display name, or a placeholder for departed staff
    pub staff_name: String,
    pub washes_count: u64,
    pub total_revenue: Decimal,
}

/// Aggregated business report for one period
///
/// Constructed fresh on each generation request and never mutated afterwards;
/// chart building and both exporters read it as-is. Window bounds and the
/// generation instant carry the report's own UTC offset so exports can format
/// dates the way the requesting user saw them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub period: ReportPeriod,
    pub start_date: DateTime<FixedOffset>,
    pub end_date: DateTime<FixedOffset>,
    pub generated_at: DateTime<FixedOffset>,
    /// The paid records inside the window, exactly as aggregated
    pub filtered_records: Vec<BillingRecord>,
    pub total_revenue: Decimal,
    pub total_washes: u64,
    /// Ranked by occurrence count, ties in encounter order
    pub service_usage: Vec<ServiceUsageData>,
    /// Ascending by calendar day
    pub revenue_over_time: Vec<RevenueDataPoint>,
    /// Ranked by revenue, includes zero-activity roster staff
    pub staff_performance: Vec<StaffPerformanceData>,
}

impl ReportData {
    /// True when no paid records fell inside the window
    pub fn is_empty(&self) -> bool {
        self.filtered_records.is_empty()
    }

    /// Staff entries with at least one wash
    pub fn staff_with_washes(&self) -> impl Iterator<Item = &StaffPerformanceData> {
        self.staff_performance.iter().filter(|s| s.washes_count > 0)
    }

    /// True when any staff member generated revenue in the window
    pub fn has_staff_revenue(&self) -> bool {
        self.staff_performance
            .iter()
            .any(|s| s.total_revenue > Decimal::ZERO)
    }

    /// Convert a record timestamp into the report's own UTC offset
    pub fn local_timestamp(&self, timestamp: DateTime<Utc>) -> DateTime<FixedOffset> {
        timestamp.with_timezone(&self.start_date.timezone())
    }
}
