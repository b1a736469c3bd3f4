//! Fellcast CLI
//!
//! Local execution entry point. For AWS Lambda, use `fellcast-lambda`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fellcast::{
    error::{AppError, Result},
    models::{Config, Location},
    pipeline::{self, RunOptions},
    storage::{ArtifactStorage, LocalStorage},
    utils::http,
};

/// Fellcast - Lake District mountain weather refresh
#[derive(Parser, Debug)]
#[command(
    name = "fellcast",
    version,
    about = "Scrape the mountain forecast and summit point weather into JSON"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Write artifacts to a local directory instead of the bucket
    /// (defaults to `paths.output_dir` when no directory is given)
    #[arg(short, long, value_name = "DIR", num_args = 0..=1)]
    local: Option<Option<PathBuf>>,

    /// Pretty-print the published JSON
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape the forecast, request point weather and publish both (default)
    Run,

    /// Scrape the mountain forecast and publish weather.json only
    Forecast,

    /// Request summit point weather and publish weather_points.json only
    Points,

    /// Validate the configuration and the locations file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Pick the publishing backend.
async fn open_storage(
    config: &Config,
    local: Option<Option<PathBuf>>,
) -> Result<Box<dyn ArtifactStorage>> {
    if let Some(dir) = local {
        let dir = dir.unwrap_or_else(|| PathBuf::from(&config.paths.output_dir));
        log::info!("Publishing to local directory {}", dir.display());
        return Ok(Box::new(LocalStorage::new(dir)));
    }
    open_remote_storage(config).await
}

#[cfg(feature = "s3")]
async fn open_remote_storage(config: &Config) -> Result<Box<dyn ArtifactStorage>> {
    config.validate_remote()?;
    let storage = fellcast::storage::S3Storage::from_config(&config.storage).await?;
    log::info!("Publishing to bucket {}", config.storage.bucket);
    Ok(Box::new(storage))
}

#[cfg(not(feature = "s3"))]
async fn open_remote_storage(_config: &Config) -> Result<Box<dyn ArtifactStorage>> {
    Err(AppError::config(
        "built without the `s3` feature; pass --local <dir> to publish to disk",
    ))
}

fn validate(config: &Config, local: bool) -> Result<()> {
    log::info!("Validating configuration...");
    config.validate()?;
    if !local {
        config.validate_remote()?;
    }
    log::info!("✓ Config OK");

    let locations = Location::load_or_bundled(&config.paths.locations_file).map_err(|e| {
        AppError::config(format!(
            "cannot load locations from {}: {}",
            config.paths.locations_file, e
        ))
    })?;
    Location::validate_all(&locations)?;
    log::info!("✓ {} location(s) OK", locations.len());

    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("Fellcast starting...");

    let mut config = Config::load_with_env(&cli.config);
    if cli.pretty {
        config.output.pretty = true;
    }

    let options = match cli.command.unwrap_or(Command::Run) {
        Command::Run => RunOptions::default(),
        Command::Forecast => RunOptions {
            forecast: true,
            points: false,
        },
        Command::Points => RunOptions {
            forecast: false,
            points: true,
        },
        Command::Validate => {
            if let Err(e) = validate(&config, cli.local.is_some()) {
                log::error!("Validation failed: {}", e);
                return Err(e);
            }
            log::info!("All validations passed!");
            return Ok(());
        }
    };

    if let Err(e) = options.check(&config) {
        log::error!("Invalid configuration: {}", e);
        return Err(e);
    }

    let client = http::create_client(&config.http)?;
    let storage = open_storage(&config, cli.local).await?;

    let summary = pipeline::run_pipeline(&config, &client, storage.as_ref(), options).await;

    if let Some(days) = summary.forecast_days {
        log::info!("Forecast: {} day tab(s)", days);
    }
    if options.points {
        log::info!(
            "Points: {} location(s), {} unavailable",
            summary.locations,
            summary.unavailable_locations
        );
    }

    log::info!("Done!");

    Ok(())
}
