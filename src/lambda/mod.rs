// src/lambda/mod.rs

//! AWS Lambda handler for the weather refresh.
//!
//! Each invocation:
//! 1. Loads configuration from the environment
//! 2. Scrapes the mountain forecast and requests summit point weather
//! 3. Publishes both artifacts to the configured bucket

use lambda_runtime::{Error as LambdaError, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::error::Result;
use crate::models::Config;
use crate::pipeline::{self, RunOptions, RunSummary};
use crate::storage::S3Storage;
use crate::utils::http;

/// Lambda invocation payload. Scheduled events carry no fields.
#[derive(Debug, Default, Deserialize)]
pub struct RefreshRequest {
    /// Do not scrape the mountain forecast page
    #[serde(default)]
    pub skip_forecast: bool,

    /// Do not request summit point weather
    #[serde(default)]
    pub skip_points: bool,
}

impl RefreshRequest {
    fn options(&self) -> RunOptions {
        RunOptions {
            forecast: !self.skip_forecast,
            points: !self.skip_points,
        }
    }
}

/// Lambda response payload.
#[derive(Debug, Default, Serialize)]
pub struct RefreshResponse {
    /// Every requested artifact was published
    pub success: bool,

    /// Day tabs scraped, absent when the page was not fetched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_days: Option<usize>,

    pub locations: usize,
    pub unavailable_locations: usize,

    pub published: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,

    /// Error message if the run could not start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Execution time in milliseconds
    pub execution_time_ms: u64,
}

impl From<RunSummary> for RefreshResponse {
    fn from(summary: RunSummary) -> Self {
        Self {
            success: summary.publish.failed.is_empty(),
            forecast_days: summary.forecast_days,
            locations: summary.locations,
            unavailable_locations: summary.unavailable_locations,
            published: summary.publish.written,
            skipped: summary.publish.skipped,
            failed: summary.publish.failed,
            error: None,
            execution_time_ms: 0,
        }
    }
}

/// Main Lambda handler function.
#[instrument(skip(event))]
pub async fn handler(
    event: LambdaEvent<RefreshRequest>,
) -> std::result::Result<RefreshResponse, LambdaError> {
    let start = std::time::Instant::now();
    let (request, _context) = event.into_parts();

    info!(
        "Starting refresh: skip_forecast={}, skip_points={}",
        request.skip_forecast, request.skip_points
    );

    match run_refresh(&request).await {
        Ok(mut response) => {
            response.execution_time_ms = start.elapsed().as_millis() as u64;
            info!(
                "Refresh completed: {} published, {} skipped, {} failed in {}ms",
                response.published.len(),
                response.skipped.len(),
                response.failed.len(),
                response.execution_time_ms
            );
            Ok(response)
        }
        Err(e) => {
            error!("Refresh failed: {}", e);
            Ok(RefreshResponse {
                success: false,
                error: Some(e.to_string()),
                execution_time_ms: start.elapsed().as_millis() as u64,
                ..Default::default()
            })
        }
    }
}

async fn run_refresh(request: &RefreshRequest) -> Result<RefreshResponse> {
    let config = load_lambda_config();
    let options = request.options();
    options.check(&config)?;
    config.validate_remote()?;

    let storage = S3Storage::from_config(&config.storage).await?;
    let client = http::create_client(&config.http)?;

    let summary = pipeline::run_pipeline(&config, &client, &storage, options).await;
    Ok(summary.into())
}

/// Defaults plus environment overrides; the function ships without a config file.
fn load_lambda_config() -> Config {
    let mut config = Config::default();
    config.apply_env(|key| std::env::var(key).ok());
    config
}
