//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.spacestats.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Hub API settings.
    #[serde(default)]
    pub hub: HubConfig,

    /// Analysis input overrides.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory holding the CSV datasets.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            verbose: false,
        }
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}

/// Hugging Face Hub API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    /// Base URL of the Hub API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Number of models to fetch per media type.
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Hub-side sort key for model listings.
    #[serde(default = "default_sort")]
    pub sort: String,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            limit: default_limit(),
            sort: default_sort(),
        }
    }
}

fn default_base_url() -> String {
    "https://huggingface.co/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_limit() -> usize {
    20
}

fn default_sort() -> String {
    "downloads".to_string()
}

/// Explicit analysis input paths; unset entries fall back to discovering
/// the newest matching dataset in the data directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Image spaces CSV path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_spaces: Option<String>,

    /// Video spaces CSV path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_spaces: Option<String>,

    /// Image sizes CSV path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_sizes: Option<String>,

    /// Video sizes CSV path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_sizes: Option<String>,
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory receiving the spreadsheet and charts.
    #[serde(default = "default_results_dir")]
    pub results_dir: String,

    /// Spreadsheet file name.
    #[serde(default = "default_spreadsheet")]
    pub spreadsheet: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            spreadsheet: default_spreadsheet(),
        }
    }
}

fn default_results_dir() -> String {
    "results".to_string()
}

fn default_spreadsheet() -> String {
    "model_analysis_results.xlsx".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".spacestats.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref data_dir) = args.data_dir {
            self.general.data_dir = data_dir.display().to_string();
        }
        if let Some(ref output_dir) = args.output_dir {
            self.report.results_dir = output_dir.display().to_string();
        }
        if let Some(ref hub_url) = args.hub_url {
            self.hub.base_url = hub_url.clone();
        }
        if let Some(timeout) = args.timeout {
            self.hub.timeout_seconds = timeout;
        }

        // Subcommand-specific overrides
        match &args.command {
            Some(crate::cli::Command::FetchModels { limit, sort }) => {
                if let Some(limit) = limit {
                    self.hub.limit = *limit;
                }
                if let Some(sort) = sort {
                    self.hub.sort = sort.clone();
                }
            }
            Some(crate::cli::Command::Analyze {
                image_spaces,
                video_spaces,
                image_sizes,
                video_sizes,
            }) => {
                if let Some(path) = image_spaces {
                    self.analysis.image_spaces = Some(path.display().to_string());
                }
                if let Some(path) = video_spaces {
                    self.analysis.video_spaces = Some(path.display().to_string());
                }
                if let Some(path) = image_sizes {
                    self.analysis.image_sizes = Some(path.display().to_string());
                }
                if let Some(path) = video_sizes {
                    self.analysis.video_sizes = Some(path.display().to_string());
                }
            }
            _ => {}
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
