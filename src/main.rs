//! SpaceStats - Hugging Face model spaces statistics
//!
//! A CLI tool that harvests CSV datasets describing the spaces hosted for
//! image- and video-generation models, then aggregates them into a
//! spreadsheet and comparison charts.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (missing dataset, Hub failure, unwritable output)

mod analysis;
mod cli;
mod config;
mod dataset;
mod hub;
mod models;
mod report;

use anyhow::{Context, Result};
use cli::{Args, Command};
use config::Config;
use hub::{HubClient, HubClientConfig};
use indicatif::{ProgressBar, ProgressStyle};
use models::{MediaType, ModelSpacesRecord, SpaceSizeRecord};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("SpaceStats v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .spacestats.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(".spacestats.toml");

    if path.exists() {
        eprintln!("⚠️  .spacestats.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .spacestats.toml")?;

    println!("✅ Created .spacestats.toml with default settings.");
    println!("   Edit it to customize the data directory, Hub settings, and output paths.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .spacestats.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

/// Dispatch the selected pipeline stage.
async fn run(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let command = args.command.clone().unwrap_or_default();
    match command {
        Command::FetchModels { .. } => run_fetch_models(&config).await,
        Command::FetchSpaces => run_fetch_spaces(&config).await,
        Command::FetchSizes => run_fetch_sizes(&config).await,
        Command::Analyze { .. } => run_analyze(&config),
    }
}

/// Build the Hub client from the merged configuration.
fn hub_client(config: &Config) -> Result<HubClient> {
    HubClient::new(HubClientConfig {
        base_url: config.hub.base_url.clone(),
        timeout_seconds: config.hub.timeout_seconds,
    })
}

/// Progress bar for per-record harvest loops.
fn harvest_progress(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}

/// Fetch the top models per media type and write the models datasets.
async fn run_fetch_models(config: &Config) -> Result<()> {
    let client = hub_client(config)?;
    let data_dir = PathBuf::from(&config.general.data_dir);
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

    let token = dataset::timestamp_token();

    for media in MediaType::ALL {
        println!(
            "📥 Fetching top {} {} models ({})...",
            config.hub.limit,
            media,
            media.task()
        );

        // A failed listing yields an empty dataset for that media type.
        let records = match client
            .list_models(media.task(), &config.hub.sort, config.hub.limit)
            .await
        {
            Ok(records) => records,
            Err(e) => {
                warn!("Failed to list {} models: {}", media, e);
                Vec::new()
            }
        };

        let path = data_dir.join(dataset::dataset_file_name(
            media,
            dataset::MODELS_DATASET,
            &token,
        ));
        dataset::write_models(&path, &records)?;
        println!("   {} models saved to {}", records.len(), path.display());
    }

    println!("✅ Model data saved.");
    Ok(())
}

/// Fetch the space list for every model in the latest models datasets.
async fn run_fetch_spaces(config: &Config) -> Result<()> {
    let client = hub_client(config)?;
    let data_dir = PathBuf::from(&config.general.data_dir);
    let token = dataset::timestamp_token();

    for media in MediaType::ALL {
        let models_path = dataset::discover_latest(&data_dir, media, dataset::MODELS_DATASET)?;
        let models = dataset::load_models(&models_path)?;
        println!(
            "📥 Fetching spaces for {} {} models from {}",
            models.len(),
            media,
            models_path.display()
        );

        let pb = harvest_progress(models.len() as u64);
        let mut rows = Vec::with_capacity(models.len());

        for model in &models {
            pb.set_message(model.model_name.clone());

            // A failed lookup records zero spaces for the model.
            let spaces = match client.model_spaces(&model.model_name).await {
                Ok(spaces) => spaces,
                Err(e) => {
                    warn!("Failed to fetch spaces for {}: {}", model.model_name, e);
                    Vec::new()
                }
            };

            rows.push(ModelSpacesRecord {
                model_name: model.model_name.clone(),
                spaces_count: spaces.len() as u64,
                spaces: if spaces.is_empty() {
                    None
                } else {
                    Some(spaces.join("|"))
                },
            });
            pb.inc(1);
        }
        pb.finish_and_clear();

        let path = data_dir.join(dataset::dataset_file_name(
            media,
            dataset::SPACES_DATASET,
            &token,
        ));
        dataset::write_model_spaces(&path, &rows)?;
        println!("   {} rows saved to {}", rows.len(), path.display());
    }

    println!("✅ Space data saved.");
    Ok(())
}

/// Fetch per-space source code sizes for the latest spaces datasets.
async fn run_fetch_sizes(config: &Config) -> Result<()> {
    let client = hub_client(config)?;
    let data_dir = PathBuf::from(&config.general.data_dir);
    let token = dataset::timestamp_token();

    for media in MediaType::ALL {
        let spaces_path = dataset::discover_latest(&data_dir, media, dataset::SPACES_DATASET)?;
        let models = dataset::load_model_spaces(&spaces_path)?;
        let space_total: usize = models.iter().map(|m| m.space_ids().len()).sum();
        println!(
            "📥 Fetching source code sizes for {} {} spaces from {}",
            space_total,
            media,
            spaces_path.display()
        );

        let pb = harvest_progress(space_total as u64);
        let mut rows = Vec::with_capacity(space_total);

        for model in &models {
            for space_id in model.space_ids() {
                pb.set_message(space_id.to_string());

                // A failed lookup records a zero size for the space.
                let size_kb = match client.space_source_size_kb(space_id).await {
                    Ok(size_kb) => size_kb,
                    Err(e) => {
                        warn!("Failed to fetch size for {}: {}", space_id, e);
                        0.0
                    }
                };

                rows.push(SpaceSizeRecord {
                    model_name: model.model_name.clone(),
                    space_id: space_id.to_string(),
                    source_code_size_kb: size_kb,
                });
                pb.inc(1);
            }
        }
        pb.finish_and_clear();

        let path = data_dir.join(dataset::dataset_file_name(
            media,
            dataset::SIZES_DATASET,
            &token,
        ));
        dataset::write_space_sizes(&path, &rows)?;
        println!("   {} rows saved to {}", rows.len(), path.display());
    }

    println!("✅ Space source code sizes saved.");
    Ok(())
}

/// Resolve one analysis input: explicit override or newest matching dataset.
fn resolve_input(
    override_path: &Option<String>,
    data_dir: &Path,
    media: MediaType,
    dataset_name: &str,
) -> Result<PathBuf> {
    match override_path {
        Some(path) => Ok(PathBuf::from(path)),
        None => dataset::discover_latest(data_dir, media, dataset_name),
    }
}

/// Aggregate the datasets and write the spreadsheet and charts.
fn run_analyze(config: &Config) -> Result<()> {
    let data_dir = PathBuf::from(&config.general.data_dir);
    let results_dir = PathBuf::from(&config.report.results_dir);

    println!("📊 Loading datasets...");

    let image_spaces_path = resolve_input(
        &config.analysis.image_spaces,
        &data_dir,
        MediaType::Image,
        dataset::SPACES_DATASET,
    )?;
    let video_spaces_path = resolve_input(
        &config.analysis.video_spaces,
        &data_dir,
        MediaType::Video,
        dataset::SPACES_DATASET,
    )?;
    let image_sizes_path = resolve_input(
        &config.analysis.image_sizes,
        &data_dir,
        MediaType::Image,
        dataset::SIZES_DATASET,
    )?;
    let video_sizes_path = resolve_input(
        &config.analysis.video_sizes,
        &data_dir,
        MediaType::Video,
        dataset::SIZES_DATASET,
    )?;

    let image_models = dataset::load_model_spaces(&image_spaces_path)?;
    let video_models = dataset::load_model_spaces(&video_spaces_path)?;
    let image_sizes = dataset::load_space_sizes(&image_sizes_path)?;
    let video_sizes = dataset::load_space_sizes(&video_sizes_path)?;

    info!(
        "Loaded {} image models, {} video models, {} image size rows, {} video size rows",
        image_models.len(),
        video_models.len(),
        image_sizes.len(),
        video_sizes.len()
    );

    let image = analysis::summarize(MediaType::Image, &image_models, &image_sizes);
    let video = analysis::summarize(MediaType::Video, &video_models, &video_sizes);

    println!(
        "   Image: {} total spaces, {}/{} spaces matched, average {:.2} KB",
        image.total_spaces, image.matched_spaces, image.listed_spaces, image.average_size_kb
    );
    println!(
        "   Video: {} total spaces, {}/{} spaces matched, average {:.2} KB",
        video.total_spaces, video.matched_spaces, video.listed_spaces, video.average_size_kb
    );

    let spreadsheet_path =
        report::write_reports(&results_dir, &config.report.spreadsheet, &image, &video)?;

    println!("Results saved to {}", spreadsheet_path.display());
    Ok(())
}
