//! Spreadsheet output.
//!
//! Writes the two derived tables as separate sheets of a single `.xlsx`
//! workbook. Sheet and column names are part of the output contract and
//! stable across runs.

use crate::models::MediaSummary;
use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// Sheet holding the per-media-type space totals.
pub const TOTAL_SPACES_SHEET: &str = "Total Spaces";

/// Sheet holding the per-media-type average sizes.
pub const AVERAGE_SIZE_SHEET: &str = "Average Source Code Size";

/// First column header, shared by both sheets.
pub const MODEL_TYPE_HEADER: &str = "Model Type";

/// Value column header of the totals sheet.
pub const TOTAL_SPACES_HEADER: &str = "Total Spaces";

/// Value column header of the averages sheet.
pub const AVERAGE_SIZE_HEADER: &str = "Average Source Code Size (KB)";

/// Write the analysis workbook: one sheet of space totals, one of averages.
pub fn write_spreadsheet(
    output_path: &Path,
    image: &MediaSummary,
    video: &MediaSummary,
) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let totals = workbook.add_worksheet();
    totals.set_name(TOTAL_SPACES_SHEET)?;
    write_table(
        totals,
        &header_format,
        TOTAL_SPACES_HEADER,
        &[
            (image.media.models_label(), image.total_spaces as f64),
            (video.media.models_label(), video.total_spaces as f64),
        ],
    )?;

    let averages = workbook.add_worksheet();
    averages.set_name(AVERAGE_SIZE_SHEET)?;
    write_table(
        averages,
        &header_format,
        AVERAGE_SIZE_HEADER,
        &[
            (image.media.spaces_label(), image.average_size_kb),
            (video.media.spaces_label(), video.average_size_kb),
        ],
    )?;

    workbook
        .save(output_path)
        .with_context(|| format!("Failed to write spreadsheet: {}", output_path.display()))?;

    Ok(())
}

/// Write a two-column table with a bold header row.
fn write_table(
    sheet: &mut Worksheet,
    header_format: &Format,
    value_header: &str,
    rows: &[(&str, f64)],
) -> Result<()> {
    sheet.write_string_with_format(0, 0, MODEL_TYPE_HEADER, header_format)?;
    sheet.write_string_with_format(0, 1, value_header, header_format)?;

    for (index, (label, value)) in rows.iter().enumerate() {
        let row = index as u32 + 1;
        sheet.write_string(row, 0, *label)?;
        sheet.write_number(row, 1, *value)?;
    }

    Ok(())
}
