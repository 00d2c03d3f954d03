//! Dataset files: CSV loading, writing and discovery.
//!
//! Every dataset is a CSV file named `<media>_<dataset>_<timestamp>.csv`,
//! where the timestamp is RFC 3339 with `:` and `.` replaced by `-` so the
//! name stays filesystem-safe. Repeated harvest runs never overwrite an
//! earlier file; consumers pick the newest matching file instead.

use crate::models::{MediaType, ModelRecord, ModelSpacesRecord, SpaceSizeRecord};
use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Dataset name for model listings (`*_models_*.csv`).
pub const MODELS_DATASET: &str = "models";

/// Dataset name for per-model space lists (`*_spaces_*.csv`).
pub const SPACES_DATASET: &str = "spaces";

/// Dataset name for per-space sizes (`*_spaces_with_sizes_*.csv`).
pub const SIZES_DATASET: &str = "spaces_with_sizes";

/// Filesystem-safe timestamp token for dataset file names.
pub fn timestamp_token() -> String {
    Utc::now()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-")
}

/// File name for a dataset, e.g. `image_spaces_2024-11-20T12-21-02-567Z.csv`.
pub fn dataset_file_name(media: MediaType, dataset: &str, token: &str) -> String {
    format!("{}_{}_{}.csv", media.prefix(), dataset, token)
}

/// Find the newest file for a dataset in `data_dir`.
///
/// Candidates must start with `<media>_<dataset>_` followed by a timestamp;
/// the timestamp requirement keeps the `spaces` dataset from matching
/// `spaces_with_sizes` files. Newest is decided lexicographically, which for
/// these timestamps equals chronological order.
pub fn discover_latest(data_dir: &Path, media: MediaType, dataset: &str) -> Result<PathBuf> {
    let prefix = format!("{}_{}_", media.prefix(), dataset);

    let entries = fs::read_dir(data_dir)
        .with_context(|| format!("Failed to read data directory: {}", data_dir.display()))?;

    let mut newest: Option<String> = None;
    for entry in entries.flatten() {
        if !entry.path().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        let Some(rest) = name.strip_prefix(&prefix) else {
            continue;
        };

        // The remainder must be a timestamp, not a longer dataset name.
        if !rest.ends_with(".csv") || !rest.starts_with(|c: char| c.is_ascii_digit()) {
            continue;
        }

        if newest.as_deref().map_or(true, |current| name.as_str() > current) {
            newest = Some(name);
        }
    }

    match newest {
        Some(name) => {
            let path = data_dir.join(name);
            debug!("Resolved {} {} dataset to {}", media, dataset, path.display());
            Ok(path)
        }
        None => anyhow::bail!(
            "No {}_{} dataset found in {}",
            media.prefix(),
            dataset,
            data_dir.display()
        ),
    }
}

/// Load all rows of a CSV dataset.
fn load_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open dataset: {}", path.display()))?;

    let mut rows = Vec::new();
    for (line, result) in reader.deserialize::<T>().enumerate() {
        let row = result
            .with_context(|| format!("Malformed row {} in {}", line + 2, path.display()))?;
        rows.push(row);
    }

    Ok(rows)
}

/// Write all rows of a CSV dataset, header first.
fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create dataset: {}", path.display()))?;

    for row in rows {
        writer.serialize(row)?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to write dataset: {}", path.display()))?;
    Ok(())
}

/// Load a model listing dataset.
pub fn load_models(path: &Path) -> Result<Vec<ModelRecord>> {
    load_rows(path)
}

/// Load a per-model space list dataset.
pub fn load_model_spaces(path: &Path) -> Result<Vec<ModelSpacesRecord>> {
    load_rows(path)
}

/// Load a per-space size dataset.
pub fn load_space_sizes(path: &Path) -> Result<Vec<SpaceSizeRecord>> {
    load_rows(path)
}

/// Write a model listing dataset.
pub fn write_models(path: &Path, rows: &[ModelRecord]) -> Result<()> {
    write_rows(path, rows)
}

/// Write a per-model space list dataset.
pub fn write_model_spaces(path: &Path, rows: &[ModelSpacesRecord]) -> Result<()> {
    write_rows(path, rows)
}

/// Write a per-space size dataset.
pub fn write_space_sizes(path: &Path, rows: &[SpaceSizeRecord]) -> Result<()> {
    write_rows(path, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    #[test]
    fn test_timestamp_token_is_filesystem_safe() {
        let token = timestamp_token();

        assert!(token.ends_with('Z'));
        assert!(!token.contains(':'));
        assert!(!token.contains('.'));
        // 2024-11-20T12-21-02-567Z
        assert_eq!(token.len(), 24);
    }

    #[test]
    fn test_dataset_file_name() {
        let name = dataset_file_name(MediaType::Image, SPACES_DATASET, "2024-11-20T12-21-02-567Z");
        assert_eq!(name, "image_spaces_2024-11-20T12-21-02-567Z.csv");
    }

    #[test]
    fn test_discover_latest_picks_newest() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "image_spaces_2024-11-19T08-00-00-000Z.csv",
            "image_spaces_2024-11-20T12-21-02-567Z.csv",
            "video_spaces_2024-11-21T00-00-00-000Z.csv",
        ] {
            fs::write(dir.path().join(name), "model_name,spaces_count,spaces\n").unwrap();
        }

        let path = discover_latest(dir.path(), MediaType::Image, SPACES_DATASET).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            "image_spaces_2024-11-20T12-21-02-567Z.csv"
        );
    }

    #[test]
    fn test_discover_latest_ignores_longer_dataset_names() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path()
                .join("image_spaces_with_sizes_2024-11-20T17-54-29-487Z.csv"),
            "model_name,space_id,source_code_size_kb\n",
        )
        .unwrap();

        let result = discover_latest(dir.path(), MediaType::Image, SPACES_DATASET);
        assert!(result.is_err());

        let path = discover_latest(dir.path(), MediaType::Image, SIZES_DATASET).unwrap();
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("image_spaces_with_sizes_"));
    }

    #[test]
    fn test_discover_latest_missing_dataset_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = discover_latest(dir.path(), MediaType::Video, MODELS_DATASET);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_model_spaces_fixture() {
        let path = fixtures_dir().join("image_spaces_2024-11-20T12-21-02-567Z.csv");
        let rows = load_model_spaces(&path).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].model_name, "google/vit-base-patch16-224");
        assert_eq!(rows[0].spaces_count, 3);
        assert_eq!(
            rows[0].space_ids(),
            vec!["demo/vit-classifier", "labs/image-playground"]
        );
        // Empty cell reads back as no spaces.
        assert_eq!(rows[2].spaces, None);
        assert!(rows[2].space_ids().is_empty());
    }

    #[test]
    fn test_load_space_sizes_fixture() {
        let path = fixtures_dir().join("image_spaces_with_sizes_2024-11-20T17-54-29-487Z.csv");
        let rows = load_space_sizes(&path).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].space_id, "demo/vit-classifier");
        assert_eq!(rows[0].source_code_size_kb, 120.5);
    }

    #[test]
    fn test_write_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("video_spaces_2024-11-20T12-21-02-569Z.csv");

        let rows = vec![
            ModelSpacesRecord {
                model_name: "owner/model-a".to_string(),
                spaces_count: 2,
                spaces: Some("demo/a|demo/b".to_string()),
            },
            ModelSpacesRecord {
                model_name: "owner/model-b".to_string(),
                spaces_count: 0,
                spaces: None,
            },
        ];
        write_model_spaces(&path, &rows).unwrap();

        let loaded = load_model_spaces(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].spaces.as_deref(), Some("demo/a|demo/b"));
        assert_eq!(loaded[1].spaces, None);
    }

    #[test]
    fn test_fixtures_end_to_end_summaries() {
        use crate::analysis::summarize;

        let dir = fixtures_dir();
        let image_models =
            load_model_spaces(&dir.join("image_spaces_2024-11-20T12-21-02-567Z.csv")).unwrap();
        let image_sizes =
            load_space_sizes(&dir.join("image_spaces_with_sizes_2024-11-20T17-54-29-487Z.csv"))
                .unwrap();
        let video_models =
            load_model_spaces(&dir.join("video_spaces_2024-11-20T12-21-02-569Z.csv")).unwrap();
        let video_sizes =
            load_space_sizes(&dir.join("video_spaces_with_sizes_2024-11-20T17-54-29-489Z.csv"))
                .unwrap();

        let image = summarize(MediaType::Image, &image_models, &image_sizes);
        assert_eq!(image.total_spaces, 6);
        assert_eq!(image.matched_spaces, 3);
        assert_eq!(image.listed_spaces, 3);
        assert!((image.average_size_kb - (242.75 / 3.0)).abs() < 1e-9);

        let video = summarize(MediaType::Video, &video_models, &video_sizes);
        assert_eq!(video.total_spaces, 3);
        assert_eq!(video.matched_spaces, 1);
        assert_eq!(video.listed_spaces, 1);
        assert!((video.average_size_kb - 310.10).abs() < 1e-9);
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let result = load_models(Path::new("does/not/exist.csv"));
        assert!(result.is_err());
    }
}
