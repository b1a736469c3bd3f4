// src/pipeline/refresh.rs

//! Full refresh: scrape, request points, publish.

use reqwest::Client;
use serde::Serialize;

use super::forecast::run_forecast;
use super::points::run_points;
use super::publish::{PublishSummary, publish};
use crate::error::Result;
use crate::models::Config;
use crate::storage::ArtifactStorage;

/// Which sources a run should refresh.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub forecast: bool,
    pub points: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            forecast: true,
            points: true,
        }
    }
}

impl RunOptions {
    /// Reject a configuration that would make every enabled request fail.
    pub fn check(&self, config: &Config) -> Result<()> {
        config.validate_sources(self.forecast, self.points)
    }
}

/// Outcome of one refresh run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunSummary {
    /// Day tabs scraped; `None` when the page was not fetched
    pub forecast_days: Option<usize>,
    pub locations: usize,
    pub unavailable_locations: usize,
    pub publish: PublishSummary,
}

/// Run the enabled steps in order and publish the results.
pub async fn run_pipeline(
    config: &Config,
    client: &Client,
    storage: &dyn ArtifactStorage,
    options: RunOptions,
) -> RunSummary {
    let total_steps = usize::from(options.forecast) + usize::from(options.points) + 1;
    let mut step = 0;
    let mut next_step = |message: &str| {
        step += 1;
        log::info!("Step {}/{}: {}", step, total_steps, message);
    };

    let forecast = if options.forecast {
        next_step("Scraping mountain forecast");
        run_forecast(config, client).await
    } else {
        None
    };

    let points = if options.points {
        next_step("Requesting summit point forecasts");
        run_points(config, client).await
    } else {
        None
    };

    next_step("Publishing artifacts");
    let publish = publish(
        storage,
        forecast.as_ref(),
        points.as_ref(),
        config.output.pretty,
    )
    .await;

    let summary = RunSummary {
        forecast_days: forecast.as_ref().map(|f| f.days.len()),
        locations: points.as_ref().map_or(0, |p| p.len()),
        unavailable_locations: points
            .as_ref()
            .map_or(0, |p| p.values().filter(|e| e.report().is_none()).count()),
        publish,
    };

    log::info!(
        "Refresh finished: {} written, {} skipped, {} failed",
        summary.publish.written.len(),
        summary.publish.skipped.len(),
        summary.publish.failed.len()
    );
    summary
}
