// Reports module

pub mod models;
pub mod services;

pub use models::{
    ChartDescriptor, ChartKind, ChartSeries, ReportData, ReportPeriod, RevenueDataPoint,
    ServiceUsageData, StaffPerformanceData,
};
pub use services::{
    ChartRenderer, DocumentExporter, NullChartRenderer, ReportService, SheetKind,
    SpreadsheetExporter,
};
