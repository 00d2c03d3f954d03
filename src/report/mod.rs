//! Report artifacts: spreadsheet and charts.
//!
//! The analysis stage hands its two [`MediaSummary`] values to
//! [`write_reports`], which materializes every output artifact in the
//! results directory.

pub mod charts;
pub mod spreadsheet;

use crate::models::MediaSummary;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the space totals bar chart.
pub const TOTAL_SPACES_CHART: &str = "total_spaces_image_vs_video.png";

/// File name of the average size bar chart.
pub const AVERAGE_SIZE_CHART: &str = "average_source_code_size_image_vs_video.png";

/// Write the spreadsheet and both bar charts into `results_dir`.
///
/// The directory is created if absent. Returns the spreadsheet path for
/// the confirmation message.
pub fn write_reports(
    results_dir: &Path,
    spreadsheet_name: &str,
    image: &MediaSummary,
    video: &MediaSummary,
) -> Result<PathBuf> {
    fs::create_dir_all(results_dir).with_context(|| {
        format!(
            "Failed to create results directory: {}",
            results_dir.display()
        )
    })?;

    let spreadsheet_path = results_dir.join(spreadsheet_name);
    spreadsheet::write_spreadsheet(&spreadsheet_path, image, video)?;
    info!("Wrote spreadsheet: {}", spreadsheet_path.display());

    let totals_path = results_dir.join(TOTAL_SPACES_CHART);
    charts::render_bar_chart(
        &[
            (image.media.models_label(), image.total_spaces as f64),
            (video.media.models_label(), video.total_spaces as f64),
        ],
        "Total Number of Spaces in Image vs Video Models",
        "Total Spaces",
        &totals_path,
    )?;
    info!("Wrote chart: {}", totals_path.display());

    let averages_path = results_dir.join(AVERAGE_SIZE_CHART);
    charts::render_bar_chart(
        &[
            (image.media.spaces_label(), image.average_size_kb),
            (video.media.spaces_label(), video.average_size_kb),
        ],
        "Average Source Code Size in Image vs Video Spaces",
        "Average Source Code Size (KB)",
        &averages_path,
    )?;
    info!("Wrote chart: {}", averages_path.display());

    Ok(spreadsheet_path)
}
