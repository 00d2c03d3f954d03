//! Hugging Face Hub API client.
//!
//! Thin wrapper around the public Hub endpoints the harvest stages need:
//! model listings, per-model space lists, and per-space file trees.

use crate::models::ModelRecord;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// File extensions excluded from source code size sums. These are assumed
/// to be example assets rather than source code.
const EXCLUDED_EXTENSIONS: [&str; 14] = [
    "jpg", "jpeg", "png", "gif", "bmp", "svg", "webp", "mp4", "mkv", "mov", "avi", "wmv", "flv",
    "webm",
];

/// Client settings, built from the `[hub]` config section.
#[derive(Debug, Clone)]
pub struct HubClientConfig {
    /// Base URL of the Hub API (e.g. `https://huggingface.co/api`).
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
}

/// A model entry as returned by the `/models` listing endpoint.
#[derive(Debug, Deserialize)]
struct ModelListEntry {
    #[serde(rename = "modelId")]
    model_id: String,
    #[serde(default)]
    downloads: u64,
    #[serde(default)]
    likes: u64,
    #[serde(default)]
    tags: Vec<String>,
}

/// The subset of `/models/<name>` we consume.
#[derive(Debug, Deserialize)]
struct ModelDetail {
    #[serde(default)]
    spaces: Vec<String>,
}

/// One entry of a space's file tree.
#[derive(Debug, Deserialize)]
struct TreeEntry {
    path: String,
    #[serde(default)]
    size: Option<u64>,
}

/// Hugging Face Hub API client.
pub struct HubClient {
    config: HubClientConfig,
    http_client: reqwest::Client,
}

impl HubClient {
    /// Create a new client with the configured timeout.
    pub fn new(config: HubClientConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// List models for a task filter, sorted on the Hub side.
    pub async fn list_models(&self, task: &str, sort: &str, limit: usize) -> Result<Vec<ModelRecord>> {
        let url = format!(
            "{}/models?filter={}&sort={}&limit={}",
            self.config.base_url, task, sort, limit
        );
        debug!("GET {}", url);

        let entries: Vec<ModelListEntry> = self.get_json(&url).await?;

        Ok(entries
            .into_iter()
            .map(|entry| ModelRecord {
                model_name: entry.model_id,
                downloads: entry.downloads,
                likes: entry.likes,
                tags: entry.tags.join(", "),
            })
            .collect())
    }

    /// Fetch the space identifiers associated with a model.
    pub async fn model_spaces(&self, model_name: &str) -> Result<Vec<String>> {
        let url = format!("{}/models/{}", self.config.base_url, model_name);
        debug!("GET {}", url);

        let detail: ModelDetail = self.get_json(&url).await?;
        Ok(detail.spaces)
    }

    /// Sum a space's source code size in kilobytes, rounded to two decimals.
    ///
    /// Walks the space's recursive file tree and skips image/video assets.
    pub async fn space_source_size_kb(&self, space_id: &str) -> Result<f64> {
        let url = format!(
            "{}/spaces/{}/tree/main?recursive=true",
            self.config.base_url, space_id
        );
        debug!("GET {}", url);

        let entries: Vec<TreeEntry> = self.get_json(&url).await?;

        let total_bytes: u64 = entries
            .iter()
            .filter(|entry| !is_excluded_asset(&entry.path))
            .filter_map(|entry| entry.size)
            .sum();

        Ok(round_kb(total_bytes))
    }

    /// GET a URL and decode the JSON body, mapping transport errors to
    /// actionable messages.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    anyhow::anyhow!(
                        "Request timed out after {}s: {}",
                        self.config.timeout_seconds,
                        url
                    )
                } else if e.is_connect() {
                    anyhow::anyhow!("Cannot connect to Hub at {}", self.config.base_url)
                } else {
                    anyhow::anyhow!("Failed to send request: {}", e)
                }
            })?
            .error_for_status()
            .with_context(|| format!("Hub request failed: {}", url))?;

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to decode Hub response: {}", url))
    }
}

/// True when a tree path carries an excluded image/video extension.
fn is_excluded_asset(path: &str) -> bool {
    let Some((_, extension)) = path.rsplit_once('.') else {
        return false;
    };

    let extension = extension.to_ascii_lowercase();
    EXCLUDED_EXTENSIONS.contains(&extension.as_str())
}

/// Bytes to kilobytes with two decimal places.
fn round_kb(bytes: u64) -> f64 {
    (bytes as f64 / 1024.0 * 100.0).round() / 100.0
}
