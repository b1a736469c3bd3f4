// src/pipeline/points.rs

//! Summit point forecast step.

use reqwest::Client;

use crate::models::{Config, Location, PointWeatherMap};
use crate::services::PointWeatherClient;

/// Request point weather for every location in the locations file.
///
/// Falls back to the bundled summit list when the file is not deployed.
/// `None` when the file exists but cannot be read; individual location
/// failures are recorded inside the map instead.
pub async fn run_points(config: &Config, client: &Client) -> Option<PointWeatherMap> {
    log::info!("Requesting weather data for individual locations");

    let locations = match Location::load_or_bundled(&config.paths.locations_file) {
        Ok(locations) => locations,
        Err(e) => {
            log::error!(
                "Failed to load locations from {}: {}",
                config.paths.locations_file,
                e
            );
            return None;
        }
    };
    log::info!("Loaded {} location(s)", locations.len());

    let points = PointWeatherClient::new(client.clone(), &config.sources);
    let result = points.fetch_all(&locations).await;

    let unavailable = result.values().filter(|e| e.report().is_none()).count();
    if unavailable > 0 {
        log::warn!("{} of {} location(s) unavailable", unavailable, result.len());
    }

    Some(result)
}
