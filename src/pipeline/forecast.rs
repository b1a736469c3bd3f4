// src/pipeline/forecast.rs

//! Mountain forecast step.

use reqwest::Client;

use crate::models::{Config, ForecastDocument};
use crate::services::ForecastScraper;

/// Scrape the configured forecast page. `None` when the page could not be fetched.
pub async fn run_forecast(config: &Config, client: &Client) -> Option<ForecastDocument> {
    let scraper = ForecastScraper::new(client.clone(), &config.sources.site_url);
    scraper.scrape().await
}
