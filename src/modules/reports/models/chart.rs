// Fixed chart descriptors derived from a report. The rendering collaborator
// receives these instead of loosely-typed per-chart configuration; each kind
// keeps the element ID and section heading the document layout expects.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::report_data::ReportData;

/// The three charts a report can render, in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    ServiceUsage,
    RevenueOverTime,
    StaffPerformance,
}

impl ChartKind {
    /// Stable element identifier used to address the rendered chart
    pub fn element_id(&self) -> &'static str {
        match self {
            ChartKind::ServiceUsage => "serviceUsageChart",
            ChartKind::RevenueOverTime => "revenueChart",
            ChartKind::StaffPerformance => "staffPerformanceChart",
        }
    }

    /// Heading printed above the chart in the document export
    pub fn section_heading(&self) -> &'static str {
        match self {
            ChartKind::ServiceUsage => "Service Usage",
            ChartKind::RevenueOverTime => "Revenue Over Time",
            ChartKind::StaffPerformance => "Staff Performance (Revenue)",
        }
    }
}

/// One named data series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub data: Vec<Decimal>,
}

/// Everything a renderer needs to draw one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescriptor {
    pub kind: ChartKind,
    pub title: String,
    /// X-axis labels, one per data point
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl ChartDescriptor {
    /// Service usage frequency chart
    pub fn service_usage(report: &ReportData) -> Self {
        Self {
            kind: ChartKind::ServiceUsage,
            title: "Service Usage Frequency".to_string(),
            categories: report.service_usage.iter().map(|s| s.name.clone()).collect(),
            series: vec![ChartSeries {
                name: "Times Used".to_string(),
                data: report
                    .service_usage
                    .iter()
                    .map(|s| Decimal::from(s.count))
                    .collect(),
            }],
        }
    }

    /// Daily revenue line chart
    pub fn revenue_over_time(report: &ReportData) -> Self {
        Self {
            kind: ChartKind::RevenueOverTime,
            title: "Revenue Over Time (Paid Services)".to_string(),
            categories: report
                .revenue_over_time
                .iter()
                .map(|p| p.date.to_string())
                .collect(),
            series: vec![ChartSeries {
                name: "Revenue".to_string(),
                data: report.revenue_over_time.iter().map(|p| p.revenue).collect(),
            }],
        }
    }

    /// Staff revenue chart, limited to staff who earned anything
    pub fn staff_performance(report: &ReportData) -> Self {
        let earners: Vec<_> = report
            .staff_performance
            .iter()
            .filter(|s| s.total_revenue > Decimal::ZERO)
            .collect();

        Self {
            kind: ChartKind::StaffPerformance,
            title: "Staff Performance (by Revenue)".to_string(),
            categories: earners.iter().map(|s| s.staff_name.clone()).collect(),
            series: vec![ChartSeries {
                name: "Total Revenue".to_string(),
                data: earners.iter().map(|s| s.total_revenue).collect(),
            }],
        }
    }

    /// All three charts in the fixed document order
    pub fn for_report(report: &ReportData) -> Vec<ChartDescriptor> {
        vec![
            Self::service_usage(report),
            Self::revenue_over_time(report),
            Self::staff_performance(report),
        ]
    }

    /// True when there is anything to draw, mirroring the render gate
    pub fn has_data(&self) -> bool {
        self.series.first().is_some_and(|s| !s.data.is_empty())
    }
}
