use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub chart_capture_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("WASHPRO_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            export: ExportConfig {
                output_dir: env::var("EXPORT_OUTPUT_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(".")),
                chart_capture_timeout_ms: env::var("CHART_CAPTURE_TIMEOUT_MS")
                    .unwrap_or_else(|_| "2000".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid CHART_CAPTURE_TIMEOUT_MS".to_string())
                    })?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.export.output_dir.as_os_str().is_empty() {
            return Err(AppError::Configuration(
                "EXPORT_OUTPUT_DIR cannot be empty".to_string(),
            ));
        }

        if self.export.chart_capture_timeout_ms == 0 {
            return Err(AppError::Configuration(
                "Chart capture timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl ExportConfig {
    /// Chart capture timeout as a std duration
    pub fn chart_capture_timeout(&self) -> Duration {
        Duration::from_millis(self.chart_capture_timeout_ms)
    }
}
