//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SpaceStats - statistics and reporting for Hugging Face model spaces
///
/// Harvest CSV datasets describing the spaces hosted for image- and
/// video-generation models, then aggregate them into a spreadsheet and
/// comparison charts.
///
/// Examples:
///   spacestats fetch-models
///   spacestats fetch-spaces
///   spacestats fetch-sizes
///   spacestats analyze
///   spacestats analyze --data-dir ./data --output-dir ./results
///   spacestats --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Pipeline stage to run; defaults to `analyze`
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory holding the CSV datasets
    #[arg(
        short,
        long,
        global = true,
        value_name = "DIR",
        env = "SPACESTATS_DATA_DIR"
    )]
    pub data_dir: Option<PathBuf>,

    /// Directory receiving the spreadsheet and charts
    #[arg(short, long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Hugging Face Hub API base URL
    #[arg(long, global = true, value_name = "URL", env = "SPACESTATS_HUB_URL")]
    pub hub_url: Option<String>,

    /// Request timeout in seconds for Hub API calls
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .spacestats.toml in the current directory
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Generate a default .spacestats.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Pipeline stages.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch the top models per media type and write the models datasets
    FetchModels {
        /// Number of models to fetch per media type
        #[arg(long, value_name = "COUNT")]
        limit: Option<usize>,

        /// Hub-side sort key (e.g. downloads, likes)
        #[arg(long, value_name = "KEY")]
        sort: Option<String>,
    },

    /// Fetch the space list for every model in the latest models datasets
    FetchSpaces,

    /// Fetch per-space source code sizes for the latest spaces datasets
    FetchSizes,

    /// Aggregate the datasets and write the spreadsheet and charts
    Analyze {
        /// Explicit image spaces CSV (skips discovery)
        #[arg(long, value_name = "FILE")]
        image_spaces: Option<PathBuf>,

        /// Explicit video spaces CSV (skips discovery)
        #[arg(long, value_name = "FILE")]
        video_spaces: Option<PathBuf>,

        /// Explicit image sizes CSV (skips discovery)
        #[arg(long, value_name = "FILE")]
        image_sizes: Option<PathBuf>,

        /// Explicit video sizes CSV (skips discovery)
        #[arg(long, value_name = "FILE")]
        video_sizes: Option<PathBuf>,
    },
}

impl Default for Command {
    /// Running with no subcommand aggregates the existing datasets.
    fn default() -> Self {
        Command::Analyze {
            image_spaces: None,
            video_spaces: None,
            image_sizes: None,
            video_sizes: None,
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Validate Hub URL format if provided
        if let Some(ref hub_url) = self.hub_url {
            if !hub_url.starts_with("http://") && !hub_url.starts_with("https://") {
                return Err("Hub URL must start with 'http://' or 'https://'".to_string());
            }
        }

        // Validate timeout if provided
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        // Validate fetch limit if provided
        if let Some(Command::FetchModels {
            limit: Some(limit), ..
        }) = self.command
        {
            if limit == 0 {
                return Err("Model limit must be at least 1".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
