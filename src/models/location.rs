//! Named summit coordinates.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Summit list compiled into the binary, used when no locations file is deployed.
const BUNDLED_LOCATIONS: &str = include_str!("../../data/locations.json");

/// A summit from the locations file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub name: String,
    /// `[lat, lon]`
    pub coords: [f64; 2],
}

impl Location {
    pub fn latitude(&self) -> f64 {
        self.coords[0]
    }

    pub fn longitude(&self) -> f64 {
        self.coords[1]
    }

    /// Load the locations list from a JSON file.
    pub fn load_all(path: impl AsRef<Path>) -> Result<Vec<Self>> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// The summit list shipped with the crate.
    pub fn bundled() -> Result<Vec<Self>> {
        Ok(serde_json::from_str(BUNDLED_LOCATIONS)?)
    }

    /// Load the file at `path`, or the bundled list when it does not exist.
    ///
    /// A file that exists but cannot be read or parsed is still an error.
    pub fn load_or_bundled(path: impl AsRef<Path>) -> Result<Vec<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!(
                "Locations file {} not found, using bundled summit list",
                path.display()
            );
            return Self::bundled();
        }
        Self::load_all(path)
    }

    /// Reject names that would collide in the output map and out-of-range coordinates.
    pub fn validate_all(locations: &[Self]) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for location in locations {
            if location.name.trim().is_empty() {
                return Err(AppError::validation("location with empty name"));
            }
            if !seen.insert(location.name.as_str()) {
                return Err(AppError::validation(format!(
                    "duplicate location name '{}'",
                    location.name
                )));
            }
            if !(-90.0..=90.0).contains(&location.latitude())
                || !(-180.0..=180.0).contains(&location.longitude())
            {
                return Err(AppError::validation(format!(
                    "coordinates out of range for '{}'",
                    location.name
                )));
            }
        }
        Ok(())
    }
}
