use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::time::Duration;
use tracing::warn;

use crate::core::{AppError, Result};
use crate::modules::reports::models::ChartDescriptor;

const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Source of rendered chart images
///
/// The export pipeline is headless, so whatever actually draws charts (a
/// browser canvas, a plotting backend) plugs in through this trait.
/// `Ok(None)` means the chart was legitimately unavailable; the document
/// exporter renders a textual fallback in that case instead of failing.
#[async_trait]
pub trait ChartRenderer: Send + Sync {
    /// Render the chart and return it as a `data:image/png;base64,` URI
    async fn chart_data_uri(&self, chart: &ChartDescriptor) -> Result<Option<String>>;
}

/// Renderer for environments with no rendering surface
///
/// Every chart section degrades to its placeholder text.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullChartRenderer;

#[async_trait]
impl ChartRenderer for NullChartRenderer {
    async fn chart_data_uri(&self, _chart: &ChartDescriptor) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Ask the renderer for a chart image, tolerating failure
///
/// Renderer errors and timeouts degrade to `None` so a single broken chart
/// never aborts a whole document export.
pub(crate) async fn capture_chart(
    renderer: &dyn ChartRenderer,
    chart: &ChartDescriptor,
    timeout: Duration,
) -> Option<String> {
    match tokio::time::timeout(timeout, renderer.chart_data_uri(chart)).await {
        Ok(Ok(Some(uri))) => Some(uri),
        Ok(Ok(None)) => {
            warn!("Chart image unavailable for {}", chart.kind.element_id());
            None
        }
        Ok(Err(err)) => {
            warn!(
                "Chart capture failed for {}: {}",
                chart.kind.element_id(),
                err
            );
            None
        }
        Err(_) => {
            warn!(
                "Chart capture timed out for {} after {:?}",
                chart.kind.element_id(),
                timeout
            );
            None
        }
    }
}

/// Decode a `data:image/png;base64,` URI into raw PNG bytes
pub(crate) fn decode_png_data_uri(uri: &str) -> Result<Vec<u8>> {
    let encoded = uri
        .strip_prefix(PNG_DATA_URI_PREFIX)
        .ok_or_else(|| AppError::chart_render("Chart image is not a PNG data URI"))?;

    STANDARD
        .decode(encoded)
        .map_err(|e| AppError::chart_render(format!("Invalid base64 chart payload: {}", e)))
}
