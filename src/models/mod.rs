// src/models/mod.rs

//! Domain models for the weather refresh job.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod forecast;
mod location;
mod point;
mod weather_code;

// Re-export all public types
pub use config::{Config, HttpConfig, OutputConfig, PathsConfig, SourceConfig, StorageConfig};
pub use forecast::{
    CurrentDay, CurrentDayInfo, DayForecastSeries, DayKind, DayRecord, ForecastDocument,
    FurtherOutlook, HazardTable, MountainForecast, OutlookDay, SunTimes, ThisEvening,
    TomorrowInfo, TomorrowsTab,
};
pub use location::Location;
pub use point::{
    Pair, PointApiResponse, PointDayRecord, PointEntry, PointWeatherMap, PointWeatherReport,
    Precipitation, PrecipitationKind, Temperatures, TimeSeriesEntry, Visibility, Wind,
};
pub use weather_code::WeatherCode;
