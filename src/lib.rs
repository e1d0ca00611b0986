//! WashPro Admin Reporting Core
//!
//! This library provides the reporting engine behind the WashPro car wash
//! admin tool: billing record aggregation and report export to PDF and XLSX.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::billing;
pub use modules::catalog;
pub use modules::reports;
pub use modules::staff;
