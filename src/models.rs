//! Data records for the spaces statistics pipeline.
//!
//! This module contains the CSV row types produced and consumed by the
//! harvest and analysis stages, plus the derived summary types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Media type partitioning the two parallel datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    /// Image-generation models and their spaces.
    Image,
    /// Video-generation models and their spaces.
    Video,
}

impl MediaType {
    /// Both media types, in report order.
    pub const ALL: [MediaType; 2] = [MediaType::Image, MediaType::Video];

    /// Dataset file name prefix ("image" / "video").
    pub fn prefix(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }

    /// Hub task filter used when listing models.
    pub fn task(&self) -> &'static str {
        match self {
            MediaType::Image => "image-classification",
            MediaType::Video => "video-classification",
        }
    }

    /// Row label used in the "Total Spaces" table.
    pub fn models_label(&self) -> &'static str {
        match self {
            MediaType::Image => "Image Models",
            MediaType::Video => "Video Models",
        }
    }

    /// Row label used in the "Average Source Code Size" table.
    pub fn spaces_label(&self) -> &'static str {
        match self {
            MediaType::Image => "Image Spaces",
            MediaType::Video => "Video Spaces",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A model listed by the Hub, one row of `*_models_<timestamp>.csv`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Fully qualified model name (e.g. `owner/model`).
    pub model_name: String,
    /// Download count reported by the Hub.
    pub downloads: u64,
    /// Like count reported by the Hub.
    pub likes: u64,
    /// Model tags, comma-joined.
    pub tags: String,
}

/// A model and its space list, one row of `*_spaces_<timestamp>.csv`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSpacesRecord {
    /// Fully qualified model name.
    pub model_name: String,
    /// Number of spaces the Hub reported for this model.
    pub spaces_count: u64,
    /// Pipe-separated space identifiers; `None` when the cell is empty.
    pub spaces: Option<String>,
}

impl ModelSpacesRecord {
    /// Split the `spaces` cell into space identifiers.
    ///
    /// Total over all inputs: an absent or empty cell yields no identifiers,
    /// empty segments are dropped, and parsing never fails.
    pub fn space_ids(&self) -> Vec<&str> {
        match self.spaces.as_deref() {
            Some(cell) => cell.split('|').filter(|id| !id.is_empty()).collect(),
            None => Vec::new(),
        }
    }
}

/// A space and its source code size, one row of
/// `*_spaces_with_sizes_<timestamp>.csv`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceSizeRecord {
    /// Fully qualified model name the space belongs to.
    pub model_name: String,
    /// Space identifier (e.g. `owner/space`).
    pub space_id: String,
    /// Source code size in kilobytes.
    pub source_code_size_kb: f64,
}

/// Aggregated statistics for one media type.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSummary {
    /// Which dataset pair this summary covers.
    pub media: MediaType,
    /// Sum of the `spaces_count` column over the model table.
    pub total_spaces: u64,
    /// Mean source code size over the resolvable spaces, 0.0 when none resolve.
    pub average_size_kb: f64,
    /// Number of listed spaces that resolved to a size record.
    pub matched_spaces: usize,
    /// Number of space identifiers listed across all models.
    pub listed_spaces: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(spaces: Option<&str>) -> ModelSpacesRecord {
        ModelSpacesRecord {
            model_name: "owner/model".to_string(),
            spaces_count: 0,
            spaces: spaces.map(String::from),
        }
    }

    #[test]
    fn test_space_ids_absent_cell() {
        assert!(record(None).space_ids().is_empty());
    }

    #[test]
    fn test_space_ids_empty_cell() {
        assert!(record(Some("")).space_ids().is_empty());
    }

    #[test]
    fn test_space_ids_splits_on_pipe() {
        assert_eq!(record(Some("a|b|c")).space_ids(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_space_ids_single_identifier() {
        assert_eq!(record(Some("demo/app")).space_ids(), vec!["demo/app"]);
    }

    #[test]
    fn test_space_ids_drops_empty_segments() {
        assert_eq!(record(Some("a||b|")).space_ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_media_type_labels() {
        assert_eq!(MediaType::Image.models_label(), "Image Models");
        assert_eq!(MediaType::Video.models_label(), "Video Models");
        assert_eq!(MediaType::Image.spaces_label(), "Image Spaces");
        assert_eq!(MediaType::Video.spaces_label(), "Video Spaces");
    }

    #[test]
    fn test_media_type_prefix() {
        assert_eq!(MediaType::Image.prefix(), "image");
        assert_eq!(MediaType::Video.prefix(), "video");
        assert_eq!(MediaType::Video.to_string(), "video");
    }
}
