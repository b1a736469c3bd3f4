//! Service layer for the weather refresh job.
//!
//! This module contains the business logic for:
//! - Guarded HTML lookups (`extract`)
//! - Mountain forecast scraping (`ForecastScraper`)
//! - Summit point forecasts (`PointWeatherClient`)

pub mod extract;
mod forecast;
mod points;

pub use forecast::{ForecastScraper, classify_day, fix_quotes, parse_forecast};
pub use points::{PointWeatherClient, parse_date, parse_point_response};
