mod chart;
mod report_data;

pub use chart::{ChartDescriptor, ChartKind, ChartSeries};
pub use report_data::{
    ReportData, ReportPeriod, RevenueDataPoint, ServiceUsageData, StaffPerformanceData,
};
