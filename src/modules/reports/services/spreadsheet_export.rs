use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::Result;
use crate::modules::reports::models::ReportData;
use crate::modules::staff::User;

/// Sheets a workbook export may contain, in workbook order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    Summary,
    PaidTransactions,
    ServiceUsage,
    StaffPerformance,
    RevenueOverTime,
}

impl SheetKind {
    /// Worksheet tab name
    pub fn name(&self) -> &'static str {
        match self {
            SheetKind::Summary => "Summary",
            SheetKind::PaidTransactions => "Paid Transactions",
            SheetKind::ServiceUsage => "Service Usage",
            SheetKind::StaffPerformance => "Staff Performance",
            SheetKind::RevenueOverTime => "Revenue Over Time",
        }
    }
}

/// Renders a report into a multi-sheet XLSX workbook
///
/// Monetary cells are written as numbers so spreadsheet consumers can sum
/// them; dates go in as ISO strings in the report's zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetExporter;

impl SpreadsheetExporter {
    /// Create a new spreadsheet exporter
    pub fn new() -> Self {
        Self
    }

    /// Sheets the given report will produce, in workbook order
    ///
    /// Summary and Paid Transactions always exist; the remaining sheets are
    /// added only when they would contain at least one data row. Seeded
    /// roster entries with zero washes do not count as data.
    pub fn planned_sheets(&self, report: &ReportData) -> Vec<SheetKind> {
        let mut sheets = vec![SheetKind::Summary, SheetKind::PaidTransactions];
        if !report.service_usage.is_empty() {
            sheets.push(SheetKind::ServiceUsage);
        }
        if report.staff_with_washes().next().is_some() {
            sheets.push(SheetKind::StaffPerformance);
        }
        if !report.revenue_over_time.is_empty() {
            sheets.push(SheetKind::RevenueOverTime);
        }
        sheets
    }

    /// Build the workbook and return the XLSX bytes
    pub fn export(&self, report: &ReportData, staff_roster: &[User]) -> Result<Vec<u8>> {
        let sheets = self.planned_sheets(report);
        info!(
            "Exporting {} report to XLSX ({} sheets)",
            report.period,
            sheets.len()
        );

        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();

        for sheet in sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(sheet.name())?;

            match sheet {
                SheetKind::Summary => Self::write_summary(worksheet, &header, report)?,
                SheetKind::PaidTransactions => {
                    Self::write_transactions(worksheet, &header, report, staff_roster)?
                }
                SheetKind::ServiceUsage => Self::write_service_usage(worksheet, &header, report)?,
                SheetKind::StaffPerformance => {
                    Self::write_staff_performance(worksheet, &header, report)?
                }
                SheetKind::RevenueOverTime => Self::write_revenue(worksheet, &header, report)?,
            }
        }

        Ok(workbook.save_to_buffer()?)
    }

    /// Build the workbook and write it under `dir` using the canonical name
    pub fn export_to_dir(
        &self,
        report: &ReportData,
        staff_roster: &[User],
        dir: &Path,
    ) -> Result<PathBuf> {
        let bytes = self.export(report, staff_roster)?;
        let path = dir.join(Self::file_name(report));
        std::fs::write(&path, &bytes)?;

        info!("Report workbook written to {}", path.display());
        Ok(path)
    }

    /// Canonical workbook file name, e.g. `WashPro_Report_WEEKLY_2025-03-15.xlsx`
    pub fn file_name(report: &ReportData) -> String {
        format!(
            "WashPro_Report_{}_{}.xlsx",
            report.period,
            report.generated_at.format("%Y-%m-%d")
        )
    }

    fn write_summary(ws: &mut Worksheet, header: &Format, report: &ReportData) -> Result<()> {
        ws.set_column_width(0, 22)?;
        ws.set_column_width(1, 18)?;
        ws.write_string_with_format(0, 0, "Metric", header)?;
        ws.write_string_with_format(0, 1, "Value", header)?;

        ws.write_string(1, 0, "Report Period")?;
        ws.write_string(1, 1, report.period.to_string())?;
        ws.write_string(2, 0, "Start Date")?;
        ws.write_string(2, 1, report.start_date.format("%Y-%m-%d").to_string())?;
        ws.write_string(3, 0, "End Date")?;
        ws.write_string(3, 1, report.end_date.format("%Y-%m-%d").to_string())?;
        ws.write_string(4, 0, "Total Revenue (Paid)")?;
        ws.write_number(4, 1, decimal_cell(report.total_revenue))?;
        ws.write_string(5, 0, "Total Washes (Paid)")?;
        ws.write_number(5, 1, report.total_washes as f64)?;
        Ok(())
    }

    fn write_transactions(
        ws: &mut Worksheet,
        header: &Format,
        report: &ReportData,
        staff_roster: &[User],
    ) -> Result<()> {
        const HEADERS: [&str; 9] = [
            "ID",
            "Date",
            "Customer",
            "CarDetails",
            "Services",
            "TotalAmount",
            "PaymentStatus",
            "StaffName",
            "Notes",
        ];
        for (col, label) in HEADERS.iter().enumerate() {
            ws.write_string_with_format(0, col as u16, *label, header)?;
        }
        ws.set_column_width(0, 36)?;
        ws.set_column_width(1, 19)?;
        ws.set_column_width(4, 40)?;

        for (i, record) in report.filtered_records.iter().enumerate() {
            let row = (i + 1) as u32;
            // Roster lookup covers the whole team; departed staff fall back
            // to the raw ID.
            let staff_name = staff_roster
                .iter()
                .find(|user| user.id == record.staff_id)
                .map(|user| user.name.as_str())
                .unwrap_or(record.staff_id.as_str());
            let services = record
                .services
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join("; ");

            ws.write_string(row, 0, record.id.as_str())?;
            ws.write_string(
                row,
                1,
                report
                    .local_timestamp(record.timestamp)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string(),
            )?;
            ws.write_string(row, 2, record.customer_name.as_str())?;
            ws.write_string(row, 3, record.car_details.as_str())?;
            ws.write_string(row, 4, services)?;
            ws.write_number(row, 5, decimal_cell(record.total_amount))?;
            ws.write_string(row, 6, record.payment_status.to_string())?;
            ws.write_string(row, 7, staff_name)?;
            ws.write_string(row, 8, record.notes.as_deref().unwrap_or(""))?;
        }
        Ok(())
    }

    fn write_service_usage(ws: &mut Worksheet, header: &Format, report: &ReportData) -> Result<()> {
        ws.set_column_width(0, 28)?;
        ws.write_string_with_format(0, 0, "ServiceName", header)?;
        ws.write_string_with_format(0, 1, "TimesUsed", header)?;
        ws.write_string_with_format(0, 2, "RevenueGenerated", header)?;

        for (i, usage) in report.service_usage.iter().enumerate() {
            let row = (i + 1) as u32;
            ws.write_string(row, 0, usage.name.as_str())?;
            ws.write_number(row, 1, usage.count as f64)?;
            ws.write_number(row, 2, decimal_cell(usage.revenue))?;
        }
        Ok(())
    }

    fn write_staff_performance(
        ws: &mut Worksheet,
        header: &Format,
        report: &ReportData,
    ) -> Result<()> {
        ws.set_column_width(0, 28)?;
        ws.write_string_with_format(0, 0, "StaffName", header)?;
        ws.write_string_with_format(0, 1, "WashesHandled", header)?;
        ws.write_string_with_format(0, 2, "RevenueGenerated", header)?;

        for (i, staff) in report.staff_with_washes().enumerate() {
            let row = (i + 1) as u32;
            ws.write_string(row, 0, staff.staff_name.as_str())?;
            ws.write_number(row, 1, staff.washes_count as f64)?;
            ws.write_number(row, 2, decimal_cell(staff.total_revenue))?;
        }
        Ok(())
    }

    fn write_revenue(ws: &mut Worksheet, header: &Format, report: &ReportData) -> Result<()> {
        ws.set_column_width(0, 12)?;
        ws.write_string_with_format(0, 0, "Date", header)?;
        ws.write_string_with_format(0, 1, "Revenue", header)?;

        for (i, point) in report.revenue_over_time.iter().enumerate() {
            let row = (i + 1) as u32;
            ws.write_string(row, 0, point.date.format("%Y-%m-%d").to_string())?;
            ws.write_number(row, 1, decimal_cell(point.revenue))?;
        }
        Ok(())
    }
}

/// Report amounts are two-decimal USD; the f64 conversion is exact for any
/// total this tool will ever see
fn decimal_cell(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or(0.0)
}
