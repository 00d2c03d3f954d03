//! Bar chart rendering.
//!
//! Renders the two comparison charts as PNG files using the [`plotters`]
//! bitmap backend. Rendering is a pure write-to-file operation with no
//! interactive display, so it works in headless environments (Docker/CI).

use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

/// Chart resolution in pixels.
const CHART_SIZE: (u32, u32) = (1200, 800);

/// Bar fill colors, cycled per bar.
const BAR_COLORS: [RGBColor; 2] = [RGBColor(31, 119, 180), RGBColor(255, 127, 14)];

/// Errors that can occur during chart generation.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, ChartError>;

/// Render a vertical bar chart and save it as a PNG file.
///
/// One bar per `(label, value)` pair, labeled on the X-axis. The Y-axis
/// starts at zero; headroom above the tallest bar keeps its top visible.
pub fn render_bar_chart(
    bars: &[(&str, f64)],
    title: &str,
    y_label: &str,
    output_path: &Path,
) -> Result<()> {
    if bars.is_empty() {
        return Err(ChartError::InvalidData("Bars cannot be empty".to_string()));
    }
    if bars.iter().any(|(_, value)| *value < 0.0) {
        return Err(ChartError::InvalidData(
            "Bar values must be non-negative".to_string(),
        ));
    }

    let tallest = bars.iter().map(|(_, value)| *value).fold(0.0, f64::max);
    let y_max = if tallest > 0.0 { tallest * 1.1 } else { 1.0 };

    let drawing_area = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    drawing_area
        .fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&drawing_area)
        .caption(title, ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(85)
        .build_cartesian_2d(0..bars.len() as i32, 0f64..y_max)
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    let labels: Vec<&str> = bars.iter().map(|(label, _)| *label).collect();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len())
        .x_label_formatter(&|x| {
            labels
                .get(*x as usize)
                .map(|label| label.to_string())
                .unwrap_or_default()
        })
        .x_desc("Model Type")
        .x_label_style(("sans-serif", 25))
        .y_desc(y_label)
        .y_label_style(("sans-serif", 25))
        .label_style(("sans-serif", 20))
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    for (index, (_, value)) in bars.iter().enumerate() {
        let color = BAR_COLORS[index % BAR_COLORS.len()];
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(index as i32, 0.0), (index as i32 + 1, *value)],
                color.filled(),
            )))
            .map_err(|e| ChartError::Drawing(e.to_string()))?;
    }

    drawing_area
        .present()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    Ok(())
}
