// src/pipeline/publish.rs

//! Artifact publishing.
//!
//! Each artifact is published on its own: a missing result or a failed
//! upload is logged and recorded, and never stops the other artifact.

use serde::Serialize;

use crate::error::Result;
use crate::models::{ForecastDocument, PointWeatherMap};
use crate::storage::{ArtifactStorage, FORECAST_KEY, POINTS_KEY};

/// What happened to each artifact key.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct PublishSummary {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
}

impl PublishSummary {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.failed.is_empty()
    }
}

/// Publish whichever results are present. Never returns an error.
pub async fn publish(
    storage: &dyn ArtifactStorage,
    forecast: Option<&ForecastDocument>,
    points: Option<&PointWeatherMap>,
    pretty: bool,
) -> PublishSummary {
    let mut summary = PublishSummary::default();

    publish_artifact(storage, FORECAST_KEY, forecast, pretty, &mut summary).await;

    // An empty map carries no data; treat it like a missing result.
    let points = points.filter(|p| !p.is_empty());
    publish_artifact(storage, POINTS_KEY, points, pretty, &mut summary).await;

    summary
}

async fn publish_artifact<T: Serialize + Sync>(
    storage: &dyn ArtifactStorage,
    key: &str,
    value: Option<&T>,
    pretty: bool,
    summary: &mut PublishSummary,
) {
    let Some(value) = value else {
        log::warn!("No data for {}, skipping upload", key);
        summary.skipped.push(key.to_string());
        return;
    };

    match upload(storage, key, value, pretty).await {
        Ok(location) => {
            log::info!("Published {} to {}", key, location);
            summary.written.push(key.to_string());
        }
        Err(e) => {
            log::error!("Failed to publish {}: {}", key, e);
            summary.failed.push(key.to_string());
        }
    }
}

async fn upload<T: Serialize + Sync>(
    storage: &dyn ArtifactStorage,
    key: &str,
    value: &T,
    pretty: bool,
) -> Result<String> {
    let body = if pretty {
        serde_json::to_vec_pretty(value)?
    } else {
        serde_json::to_vec(value)?
    };
    storage.put_json(key, body).await
}
