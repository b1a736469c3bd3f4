//! Summit point forecasts: the API payload and the published shape.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::WeatherCode;

/// Location name to its report, in locations-file order.
pub type PointWeatherMap = IndexMap<String, PointEntry>;

/// Outcome for one location. A failed location publishes as `{}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PointEntry {
    Report(Box<PointWeatherReport>),
    Unavailable {},
}

impl PointEntry {
    pub fn report(&self) -> Option<&PointWeatherReport> {
        match self {
            Self::Report(report) => Some(report),
            Self::Unavailable {} => None,
        }
    }
}

/// Reshaped daily forecast for one summit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointWeatherReport {
    pub request_date: NaiveDate,
    pub name: String,
    pub elevation: i64,
    /// `[lon, lat]`
    pub coordinates: [f64; 2],
    pub days: Vec<PointDayRecord>,
}

/// Day/night pair.
pub type Pair<T> = [T; 2];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointDayRecord {
    pub date: NaiveDate,
    pub weather_type: Pair<String>,
    pub temp: Temperatures,
    pub precipitation: Precipitation,
    pub wind: Wind,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Temperatures {
    pub screen: Pair<i64>,
    pub max: Pair<i64>,
    pub min: Pair<i64>,
    pub feels: Pair<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Precipitation {
    pub prob: Pair<u32>,
    #[serde(rename = "type")]
    pub kind: Pair<PrecipitationKind>,
}

/// Precipitation types in tie-break order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PrecipitationKind {
    Rain,
    Snow,
    Hail,
}

impl PrecipitationKind {
    /// The kind with the highest probability; on a tie the earlier of rain, snow, hail wins.
    pub fn predominant(rain: u32, snow: u32, hail: u32) -> Self {
        let mut best = (Self::Rain, rain);
        for candidate in [(Self::Snow, snow), (Self::Hail, hail)] {
            if candidate.1 > best.1 {
                best = candidate;
            }
        }
        best.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Wind {
    /// km/h
    pub speed: Pair<i64>,
    /// km/h
    pub gusts: Pair<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Visibility {
    pub m: Pair<u32>,
    pub text: Pair<String>,
}

// --- API payload ---

/// GeoJSON-like response of the daily point endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PointApiResponse {
    pub features: Vec<PointFeature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PointFeature {
    pub geometry: PointGeometry,
    pub properties: PointProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PointGeometry {
    /// `[lon, lat, elevation]`
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointProperties {
    pub location: PointLocationName,
    pub model_run_date: String,
    pub time_series: Vec<TimeSeriesEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PointLocationName {
    pub name: String,
}

/// One day of the API time series. Field names follow the API verbatim.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesEntry {
    pub time: String,

    pub day_significant_weather_code: WeatherCode,
    pub night_significant_weather_code: WeatherCode,

    pub day_max_screen_temperature: f64,
    pub night_min_screen_temperature: f64,
    pub day_upper_bound_max_temp: f64,
    pub night_upper_bound_min_temp: f64,
    pub day_lower_bound_max_temp: f64,
    pub night_lower_bound_min_temp: f64,
    pub day_max_feels_like_temp: f64,
    pub night_min_feels_like_temp: f64,

    pub day_probability_of_precipitation: u32,
    pub night_probability_of_precipitation: u32,
    pub day_probability_of_rain: u32,
    pub night_probability_of_rain: u32,
    pub day_probability_of_snow: u32,
    pub night_probability_of_snow: u32,
    pub day_probability_of_hail: u32,
    pub night_probability_of_hail: u32,

    #[serde(rename = "midday10MWindSpeed")]
    pub midday_wind_speed: f64,
    #[serde(rename = "midnight10MWindSpeed")]
    pub midnight_wind_speed: f64,
    #[serde(rename = "midday10MWindGust")]
    pub midday_wind_gust: f64,
    #[serde(rename = "midnight10MWindGust")]
    pub midnight_wind_gust: f64,

    pub midday_visibility: u32,
    pub midnight_visibility: u32,
}
