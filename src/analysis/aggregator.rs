//! Space/size joining and summary statistics.
//!
//! This module resolves each model's space list against the flat table of
//! per-space size records and reduces the matches into per-media-type
//! statistics: total space count and average source code size.

use crate::models::{MediaSummary, MediaType, ModelSpacesRecord, SpaceSizeRecord};
use std::collections::HashMap;

/// Size lookup keyed by model name, then space identifier.
///
/// Built once in linear time over the size table. Duplicate
/// (model_name, space_id) keys keep the first record seen, so lookups
/// resolve to the same row a linear scan of the input would find.
#[derive(Debug, Default)]
pub struct SizeIndex {
    sizes: HashMap<String, HashMap<String, f64>>,
}

impl SizeIndex {
    /// Build the index from size records in input order.
    pub fn build(records: &[SpaceSizeRecord]) -> Self {
        let mut index = SizeIndex::default();

        for record in records {
            index
                .sizes
                .entry(record.model_name.clone())
                .or_default()
                .entry(record.space_id.clone())
                .or_insert(record.source_code_size_kb);
        }

        index
    }

    /// Look up the size for a (model, space) pair. Case-sensitive exact match.
    pub fn get(&self, model_name: &str, space_id: &str) -> Option<f64> {
        self.sizes.get(model_name)?.get(space_id).copied()
    }
}

/// Sum of the `spaces_count` column over a model table.
///
/// Independent of the join: counts come straight from the input and may
/// exceed the number of spaces that resolve to a size record.
pub fn total_spaces(models: &[ModelSpacesRecord]) -> u64 {
    models.iter().map(|m| m.spaces_count).sum()
}

/// Resolve every listed space of every model against the size index.
///
/// Returns matched sizes in model/list order. Spaces with no size record
/// are silently dropped.
pub fn matched_sizes(models: &[ModelSpacesRecord], sizes: &SizeIndex) -> Vec<f64> {
    let mut matched = Vec::new();

    for model in models {
        for space_id in model.space_ids() {
            if let Some(size_kb) = sizes.get(&model.model_name, space_id) {
                matched.push(size_kb);
            }
        }
    }

    matched
}

/// Arithmetic mean of `sizes`, or 0.0 for an empty slice.
pub fn average_size(sizes: &[f64]) -> f64 {
    if sizes.is_empty() {
        return 0.0;
    }

    sizes.iter().sum::<f64>() / sizes.len() as f64
}

/// Full reduction for one media type's dataset pair.
pub fn summarize(
    media: MediaType,
    models: &[ModelSpacesRecord],
    size_records: &[SpaceSizeRecord],
) -> MediaSummary {
    let index = SizeIndex::build(size_records);
    let matched = matched_sizes(models, &index);
    let listed = models.iter().map(|m| m.space_ids().len()).sum();

    MediaSummary {
        media,
        total_spaces: total_spaces(models),
        average_size_kb: average_size(&matched),
        matched_spaces: matched.len(),
        listed_spaces: listed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(name: &str, count: u64, spaces: Option<&str>) -> ModelSpacesRecord {
        ModelSpacesRecord {
            model_name: name.to_string(),
            spaces_count: count,
            spaces: spaces.map(String::from),
        }
    }

    fn size(name: &str, space: &str, kb: f64) -> SpaceSizeRecord {
        SpaceSizeRecord {
            model_name: name.to_string(),
            space_id: space.to_string(),
            source_code_size_kb: kb,
        }
    }

    #[test]
    fn test_total_spaces_is_column_sum() {
        let models = vec![
            model("m1", 3, Some("s1|s2")),
            model("m2", 7, None),
            model("m3", 0, None),
        ];
        assert_eq!(total_spaces(&models), 10);

        // Order-independent.
        let reversed: Vec<_> = models.into_iter().rev().collect();
        assert_eq!(total_spaces(&reversed), 10);
    }

    #[test]
    fn test_join_first_match_wins() {
        let sizes = vec![size("m1", "s1", 10.0), size("m1", "s1", 99.0)];
        let index = SizeIndex::build(&sizes);

        assert_eq!(index.get("m1", "s1"), Some(10.0));
    }

    #[test]
    fn test_join_is_case_sensitive_exact_match() {
        let index = SizeIndex::build(&[size("m1", "s1", 10.0)]);

        assert_eq!(index.get("M1", "s1"), None);
        assert_eq!(index.get("m1", "S1"), None);
        assert_eq!(index.get("m1", "s1"), Some(10.0));
    }

    #[test]
    fn test_unresolved_spaces_are_dropped() {
        let models = vec![model("m1", 3, Some("s1|missing"))];
        let index = SizeIndex::build(&[size("m1", "s1", 10.0)]);

        let matched = matched_sizes(&models, &index);
        assert_eq!(matched, vec![10.0]);
    }

    #[test]
    fn test_size_record_for_other_model_does_not_match() {
        let models = vec![model("m1", 1, Some("s1"))];
        let index = SizeIndex::build(&[size("m2", "s1", 10.0)]);

        assert!(matched_sizes(&models, &index).is_empty());
    }

    #[test]
    fn test_average_of_empty_is_zero() {
        assert_eq!(average_size(&[]), 0.0);
    }

    #[test]
    fn test_average_within_matched_bounds() {
        let sizes = vec![5.0, 10.0, 40.0];
        let avg = average_size(&sizes);

        assert!(avg > 5.0 && avg < 40.0);
    }

    #[test]
    fn test_summarize_end_to_end() {
        // Model table [{M1, 3, "s1|s2"}], sizes {(M1,s1)=10, (M1,s2)=20}
        // => total 3, average 15.0.
        let models = vec![model("M1", 3, Some("s1|s2"))];
        let sizes = vec![size("M1", "s1", 10.0), size("M1", "s2", 20.0)];

        let summary = summarize(MediaType::Image, &models, &sizes);

        assert_eq!(summary.total_spaces, 3);
        assert_eq!(summary.average_size_kb, 15.0);
        assert_eq!(summary.matched_spaces, 2);
        assert_eq!(summary.listed_spaces, 2);
    }

    #[test]
    fn test_summarize_null_spaces_and_empty_size_table() {
        // Model table [{M2, 1, null}], empty size table
        // => total 1, average 0.
        let models = vec![model("M2", 1, None)];

        let summary = summarize(MediaType::Video, &models, &[]);

        assert_eq!(summary.total_spaces, 1);
        assert_eq!(summary.average_size_kb, 0.0);
        assert_eq!(summary.matched_spaces, 0);
        assert_eq!(summary.listed_spaces, 0);
    }

    #[test]
    fn test_summarize_undercounts_against_spaces_count() {
        // Two spaces listed but only one resolves; spaces_count says five.
        let models = vec![model("m1", 5, Some("s1|s2"))];
        let sizes = vec![size("m1", "s1", 12.0)];

        let summary = summarize(MediaType::Image, &models, &sizes);

        assert_eq!(summary.total_spaces, 5);
        assert_eq!(summary.matched_spaces, 1);
        assert_eq!(summary.listed_spaces, 2);
        assert_eq!(summary.average_size_kb, 12.0);
    }
}
