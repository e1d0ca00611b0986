use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point, Rgb,
};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::core::{money, AppError, Result};
use crate::modules::reports::models::{ChartDescriptor, ReportData};
use crate::modules::reports::services::chart_capture::{
    capture_chart, decode_png_data_uri, ChartRenderer,
};

// A4 portrait, all coordinates in millimetres from the top-left corner
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const TEXT_X: f32 = 14.0;
const IMAGE_X: f32 = 15.0;
const TOP_MARGIN: f32 = 20.0;

const CHART_MAX_WIDTH: f32 = PAGE_WIDTH - 30.0;
const CHART_MAX_HEIGHT: f32 = 70.0;
const CHART_IMAGE_DPI: f32 = 96.0;
const MM_PER_INCH: f32 = 25.4;

const TRANSACTION_SAMPLE_LIMIT: usize = 30;
const DEFAULT_CHART_TIMEOUT_MS: u64 = 2_000;

/// Renders a report into a paginated A4 PDF document
///
/// Layout follows the printed admin report: a summary block, one section per
/// chart (image when the renderer supplies one, text fallback otherwise) and
/// detail tables for services, staff and a sample of transactions. Chart
/// failures never abort the export; each failed section degrades to text.
#[derive(Debug, Clone)]
pub struct DocumentExporter {
    chart_capture_timeout: Duration,
}

impl Default for DocumentExporter {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_CHART_TIMEOUT_MS))
    }
}

impl DocumentExporter {
    /// Create an exporter with the given per-chart capture timeout
    pub fn new(chart_capture_timeout: Duration) -> Self {
        Self {
            chart_capture_timeout,
        }
    }

    /// Render the report into PDF bytes
    ///
    /// Chart images are captured up front so rendering itself stays
    /// synchronous; an unavailable chart becomes a placeholder line.
    pub async fn export(
        &self,
        report: &ReportData,
        renderer: &dyn ChartRenderer,
    ) -> Result<Vec<u8>> {
        info!(
            "Exporting {} report to PDF ({} paid records)",
            report.period,
            report.filtered_records.len()
        );

        let charts = ChartDescriptor::for_report(report);
        let mut images: Vec<Option<String>> = Vec::with_capacity(charts.len());
        for chart in &charts {
            let image = if chart.has_data() {
                capture_chart(renderer, chart, self.chart_capture_timeout).await
            } else {
                None
            };
            images.push(image);
        }

        self.render(report, &charts, &images)
    }

    /// Render the report and write it under `dir` using the canonical name
    pub async fn export_to_dir(
        &self,
        report: &ReportData,
        renderer: &dyn ChartRenderer,
        dir: &Path,
    ) -> Result<PathBuf> {
        let bytes = self.export(report, renderer).await?;
        let path = dir.join(Self::file_name(report));
        tokio::fs::write(&path, &bytes).await?;

        info!("Report document written to {}", path.display());
        Ok(path)
    }

    /// Canonical document file name, e.g. `WashPro_Report_WEEKLY_2025-03-15.pdf`
    pub fn file_name(report: &ReportData) -> String {
        format!(
            "WashPro_Report_{}_{}.pdf",
            report.period,
            report.generated_at.format("%Y-%m-%d")
        )
    }

    fn render(
        &self,
        report: &ReportData,
        charts: &[ChartDescriptor],
        images: &[Option<String>],
    ) -> Result<Vec<u8>> {
        let title = format!("WashPro Admin Report: {}", report.period);
        let mut writer = PdfWriter::new(&title)?;

        writer.y = 20.0;
        writer.text(&title, 18.0, TEXT_X);
        writer.y = 30.0;
        writer.text(
            &format!(
                "Period: {} - {}",
                report.start_date.format("%Y-%m-%d"),
                report.end_date.format("%Y-%m-%d")
            ),
            11.0,
            TEXT_X,
        );

        writer.y = 45.0;
        writer.text("Summary:", 12.0, TEXT_X);
        writer.y = 50.0;
        let summary = TableSpec {
            columns: &[("Metric", TEXT_X), ("Value", 80.0)],
            font_size: 10.0,
            row_height: 7.0,
        };
        writer.draw_table(
            &summary,
            &[
                vec![
                    "Total Revenue".to_string(),
                    money::format_usd(report.total_revenue),
                ],
                vec![
                    "Total Washes (Paid)".to_string(),
                    report.total_washes.to_string(),
                ],
            ],
        );
        writer.y += 10.0;

        for (chart, image) in charts.iter().zip(images) {
            Self::draw_chart_section(&mut writer, chart, image.as_deref());
        }

        Self::draw_service_usage_table(&mut writer, report);
        Self::draw_staff_performance_table(&mut writer, report);
        Self::draw_transactions_table(&mut writer, report);

        writer.finish()
    }

    /// One section per chart: heading, then the image scaled into the chart
    /// band, or a placeholder line when no image exists.
    fn draw_chart_section(writer: &mut PdfWriter, chart: &ChartDescriptor, image: Option<&str>) {
        if writer.y > 220.0 {
            writer.break_page();
        }

        writer.text(chart.kind.section_heading(), 14.0, TEXT_X);
        writer.y += 7.0;

        match image {
            Some(uri) => match writer.embed_chart_image(uri) {
                Ok(drawn_height) => {
                    writer.y += drawn_height + 10.0;
                }
                Err(err) => {
                    warn!("Could not embed chart {}: {}", chart.kind.element_id(), err);
                    writer.colored_text(
                        &format!("Could not embed chart: {}.", chart.title),
                        10.0,
                        IMAGE_X,
                        Rgb::new(1.0, 0.0, 0.0, None),
                    );
                    writer.y += 10.0;
                }
            },
            None => {
                writer.text(
                    &format!(
                        "Chart data for \"{}\" is not available or chart not rendered.",
                        chart.title
                    ),
                    10.0,
                    IMAGE_X,
                );
                writer.y += 10.0;
            }
        }
    }

    fn draw_service_usage_table(writer: &mut PdfWriter, report: &ReportData) {
        writer.break_before_table(!report.service_usage.is_empty());
        if report.service_usage.is_empty() {
            return;
        }

        writer.text("Service Usage Details", 14.0, TEXT_X);
        writer.y += 5.0;

        let spec = TableSpec {
            columns: &[
                ("Service Name", TEXT_X),
                ("Times Used", 100.0),
                ("Revenue Generated", 140.0),
            ],
            font_size: 9.0,
            row_height: 6.0,
        };
        let rows: Vec<Vec<String>> = report
            .service_usage
            .iter()
            .map(|usage| {
                vec![
                    usage.name.clone(),
                    usage.count.to_string(),
                    money::format_usd(usage.revenue),
                ]
            })
            .collect();
        writer.draw_table(&spec, &rows);
        writer.y += 10.0;
    }

    /// Staff entries with zero washes are seeded roster members; only staff
    /// who actually handled washes appear in the table.
    fn draw_staff_performance_table(writer: &mut PdfWriter, report: &ReportData) {
        writer.break_before_table(!report.staff_performance.is_empty());

        let rows: Vec<Vec<String>> = report
            .staff_with_washes()
            .map(|staff| {
                vec![
                    staff.staff_name.clone(),
                    staff.washes_count.to_string(),
                    money::format_usd(staff.total_revenue),
                ]
            })
            .collect();
        if rows.is_empty() {
            return;
        }

        writer.text("Staff Performance Details", 14.0, TEXT_X);
        writer.y += 5.0;

        let spec = TableSpec {
            columns: &[
                ("Staff Name", TEXT_X),
                ("Washes Handled", 100.0),
                ("Revenue Generated", 140.0),
            ],
            font_size: 9.0,
            row_height: 6.0,
        };
        writer.draw_table(&spec, &rows);
        writer.y += 10.0;
    }

    fn draw_transactions_table(writer: &mut PdfWriter, report: &ReportData) {
        if report.filtered_records.is_empty() {
            return;
        }
        writer.break_before_table(true);

        writer.text("Detailed Paid Transactions (Sample)", 14.0, TEXT_X);
        writer.y += 5.0;

        let spec = TableSpec {
            columns: &[
                ("Date", TEXT_X),
                ("Customer", 40.0),
                ("Car", 75.0),
                ("Services", 110.0),
                ("Amount", 170.0),
            ],
            font_size: 8.0,
            row_height: 5.0,
        };
        let rows: Vec<Vec<String>> = report
            .filtered_records
            .iter()
            .take(TRANSACTION_SAMPLE_LIMIT)
            .map(|record| {
                let services = record
                    .services
                    .iter()
                    .map(|s| s.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                vec![
                    report
                        .local_timestamp(record.timestamp)
                        .format("%Y-%m-%d")
                        .to_string(),
                    record.customer_name.clone(),
                    record.car_details.clone(),
                    services,
                    money::format_usd(record.total_amount),
                ]
            })
            .collect();
        writer.draw_table(&spec, &rows);
        writer.y += 10.0;
    }
}

/// Column layout for a text table: header labels with their x offsets
struct TableSpec<'a> {
    columns: &'a [(&'a str, f32)],
    font_size: f32,
    row_height: f32,
}

/// Cursor-based page writer over a printpdf document
///
/// Tracks a top-down y cursor the way the layout constants are expressed and
/// converts to PDF's bottom-up coordinates at the drawing calls.
struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::document_export(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::document_export(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            font,
            bold,
            y: TOP_MARGIN,
        })
    }

    fn text(&self, text: &str, font_size: f32, x: f32) {
        self.layer
            .use_text(text, font_size, Mm(x), Mm(PAGE_HEIGHT - self.y), &self.font);
    }

    fn bold_text(&self, text: &str, font_size: f32, x: f32) {
        self.layer
            .use_text(text, font_size, Mm(x), Mm(PAGE_HEIGHT - self.y), &self.bold);
    }

    fn colored_text(&self, text: &str, font_size: f32, x: f32, color: Rgb) {
        self.layer.set_fill_color(Color::Rgb(color));
        self.text(text, font_size, x);
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    }

    fn break_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = TOP_MARGIN;
    }

    /// Start a fresh page when the cursor sits too low to fit a heading and
    /// a first batch of rows
    fn break_before_table(&mut self, has_rows: bool) {
        if self.y > 250.0 || (self.y > 20.0 && has_rows && PAGE_HEIGHT - self.y < 50.0) {
            self.break_page();
        }
    }

    fn draw_table(&mut self, spec: &TableSpec<'_>, rows: &[Vec<String>]) {
        self.draw_table_header(spec);

        for row in rows {
            if self.y > 280.0 {
                self.break_page();
                self.draw_table_header(spec);
            }
            for (cell, (_, x)) in row.iter().zip(spec.columns) {
                self.text(cell, spec.font_size, *x);
            }
            self.y += spec.row_height;
        }
    }

    fn draw_table_header(&mut self, spec: &TableSpec<'_>) {
        for (label, x) in spec.columns {
            self.bold_text(label, spec.font_size, *x);
        }
        self.rule(TEXT_X, PAGE_WIDTH - TEXT_X, self.y + 1.5);
        self.y += spec.row_height;
    }

    fn rule(&self, x_start: f32, x_end: f32, y: f32) {
        self.layer.set_outline_thickness(0.3);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x_start), Mm(PAGE_HEIGHT - y)), false),
                (Point::new(Mm(x_end), Mm(PAGE_HEIGHT - y)), false),
            ],
            is_closed: false,
        });
    }

    /// Decode the data URI and place the image at the cursor, scaled into the
    /// chart band. Returns the drawn height in millimetres.
    fn embed_chart_image(&mut self, uri: &str) -> Result<f32> {
        let png = decode_png_data_uri(uri)?;
        let decoder = PngDecoder::new(Cursor::new(png.as_slice())).map_err(|e| {
            AppError::document_export(format!("Chart PNG could not be decoded: {}", e))
        })?;
        let image = Image::try_from(decoder).map_err(|e| {
            AppError::document_export(format!("Chart PNG could not be decoded: {}", e))
        })?;

        let width_px = image.image.width.0;
        let height_px = image.image.height.0;
        if width_px == 0 || height_px == 0 {
            return Err(AppError::document_export("Chart PNG has no pixels"));
        }

        let natural_width = width_px as f32 * MM_PER_INCH / CHART_IMAGE_DPI;
        let natural_height = height_px as f32 * MM_PER_INCH / CHART_IMAGE_DPI;
        let (width, height) =
            fit_image_size(natural_width, natural_height, CHART_MAX_WIDTH, CHART_MAX_HEIGHT);

        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(IMAGE_X)),
                translate_y: Some(Mm(PAGE_HEIGHT - (self.y + height))),
                scale_x: Some(width / natural_width),
                scale_y: Some(height / natural_height),
                dpi: Some(CHART_IMAGE_DPI),
                ..Default::default()
            },
        );

        Ok(height)
    }

    fn finish(self) -> Result<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| AppError::document_export(e.to_string()))
    }
}

/// Clamp to the drawable width first, then to the band height, preserving
/// aspect ratio. Images inside both bounds keep their natural size.
fn fit_image_size(width: f32, height: f32, max_width: f32, max_height: f32) -> (f32, f32) {
    let aspect = height / width;
    let (mut width, mut height) = (width, height);

    if width > max_width {
        width = max_width;
        height = width * aspect;
    }
    if height > max_height {
        height = max_height;
        width = height / aspect;
    }

    (width, height)
}
