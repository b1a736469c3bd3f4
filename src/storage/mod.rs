//! Storage backends for published artifacts.
//!
//! Both artifacts live under fixed keys, relative to an output directory
//! (local) or an optional key prefix (S3):
//!
//! ```text
//! {root}/
//! ├── weather.json          # Scraped mountain forecast
//! └── weather_points.json   # Summit point forecasts by location name
//! ```

pub mod local;
#[cfg(feature = "s3")]
pub mod s3;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use local::LocalStorage;
#[cfg(feature = "s3")]
pub use s3::S3Storage;

/// Key of the scraped forecast document.
pub const FORECAST_KEY: &str = "weather.json";

/// Key of the point forecast map.
pub const POINTS_KEY: &str = "weather_points.json";

/// Content type for every artifact.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Trait for artifact storage backends.
#[async_trait]
pub trait ArtifactStorage: Send + Sync {
    /// Store a serialized JSON document under `key`, replacing any previous one.
    ///
    /// Returns a human-readable location for logging.
    async fn put_json(&self, key: &str, body: Vec<u8>) -> Result<String>;
}
