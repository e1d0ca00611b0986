pub mod chart_capture;
pub mod document_export;
pub mod report_service;
pub mod spreadsheet_export;

pub use chart_capture::{ChartRenderer, NullChartRenderer};
pub use document_export::DocumentExporter;
pub use report_service::ReportService;
pub use spreadsheet_export::{SheetKind, SpreadsheetExporter};
