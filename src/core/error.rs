/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Validation errors for business rules
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Chart image acquisition or decoding errors
    #[error("Chart render error: {0}")]
    ChartRender(String),

    /// PDF assembly errors
    #[error("Document export error: {0}")]
    DocumentExport(String),

    /// Workbook assembly errors
    #[error("Spreadsheet export error: {0}")]
    SpreadsheetExport(#[from] rust_xlsxwriter::XlsxError),

    /// Filesystem errors while writing export artifacts
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    pub fn chart_render(msg: impl Into<String>) -> Self {
        AppError::ChartRender(msg.into())
    }

    pub fn document_export(msg: impl Into<String>) -> Self {
        AppError::DocumentExport(msg.into())
    }
}
