// src/services/points.rs

//! Point weather client.
//!
//! Requests the daily point forecast for each summit and reshapes the API
//! payload into [`PointWeatherReport`]s.

use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::{
    Location, PointApiResponse, PointDayRecord, PointEntry, PointWeatherMap, PointWeatherReport,
    Precipitation, PrecipitationKind, SourceConfig, Temperatures, TimeSeriesEntry, Visibility,
    Wind,
};
use crate::utils::http::fetch_text;
use crate::utils::units::{mps_to_kmh, truncate, visibility_text};

/// Timestamp format of `modelRunDate` and time series entries.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%MZ";

/// Appended to the API's location name.
const NAME_SUFFIX: &str = " Summit";

/// Service for requesting point forecasts one location at a time.
pub struct PointWeatherClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl PointWeatherClient {
    pub fn new(client: Client, sources: &SourceConfig) -> Self {
        Self {
            client,
            api_url: sources.api_url.clone(),
            api_key: sources.api_key.clone(),
        }
    }

    /// Fetch every location sequentially, in list order.
    ///
    /// A failed location is logged and recorded as unavailable; the rest still run.
    pub async fn fetch_all(&self, locations: &[Location]) -> PointWeatherMap {
        let mut result = PointWeatherMap::new();

        for location in locations {
            let entry = match self.fetch_location(location).await {
                Ok(report) => {
                    log::debug!(
                        "{}: {} day(s) from {}",
                        location.name,
                        report.days.len(),
                        report.request_date
                    );
                    PointEntry::Report(Box::new(report))
                }
                Err(e) => {
                    log::error!("Failed to get point weather for {}: {}", location.name, e);
                    PointEntry::Unavailable {}
                }
            };
            result.insert(location.name.clone(), entry);
        }

        result
    }

    /// Fetch and reshape the forecast for one location.
    pub async fn fetch_location(&self, location: &Location) -> Result<PointWeatherReport> {
        let request = self
            .client
            .get(&self.api_url)
            .header("accept", "application/json")
            .header("apiKey", &self.api_key)
            .query(&[
                ("excludeParameterMetadata", "true"),
                ("includeLocationName", "true"),
            ])
            .query(&[
                ("latitude", location.latitude()),
                ("longitude", location.longitude()),
            ]);

        let body = fetch_text(request).await?;
        let response: PointApiResponse = serde_json::from_str(&body)?;
        parse_point_response(response)
    }
}

/// Reshape the API payload, keeping days on or after the model run date.
pub fn parse_point_response(response: PointApiResponse) -> Result<PointWeatherReport> {
    let feature = response
        .features
        .into_iter()
        .next()
        .ok_or_else(|| AppError::parse("response has no features"))?;

    let [lon, lat, elevation] = feature.geometry.coordinates[..] else {
        return Err(AppError::parse(format!(
            "expected [lon, lat, elevation], got {} coordinate(s)",
            feature.geometry.coordinates.len()
        )));
    };

    let properties = feature.properties;
    let request_date = parse_date(&properties.model_run_date)?;

    let mut days = Vec::with_capacity(properties.time_series.len());
    for entry in &properties.time_series {
        let date = parse_date(&entry.time)?;
        if date < request_date {
            continue;
        }
        days.push(reshape_day(date, entry)?);
    }

    Ok(PointWeatherReport {
        request_date,
        name: format!("{}{}", properties.location.name, NAME_SUFFIX),
        elevation: truncate(elevation),
        coordinates: [lon, lat],
        days,
    })
}

/// Date part of an API timestamp.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|dt| dt.date())
        .map_err(|e| AppError::parse(format!("invalid timestamp '{value}': {e}")))
}

fn reshape_day(date: NaiveDate, day: &TimeSeriesEntry) -> Result<PointDayRecord> {
    let weather_type = [
        day.day_significant_weather_code.label()?.to_string(),
        day.night_significant_weather_code.label()?.to_string(),
    ];

    Ok(PointDayRecord {
        date,
        weather_type,
        temp: Temperatures {
            screen: [
                truncate(day.day_max_screen_temperature),
                truncate(day.night_min_screen_temperature),
            ],
            max: [
                truncate(day.day_upper_bound_max_temp),
                truncate(day.night_upper_bound_min_temp),
            ],
            min: [
                truncate(day.day_lower_bound_max_temp),
                truncate(day.night_lower_bound_min_temp),
            ],
            feels: [
                truncate(day.day_max_feels_like_temp),
                truncate(day.night_min_feels_like_temp),
            ],
        },
        precipitation: Precipitation {
            prob: [
                day.day_probability_of_precipitation,
                day.night_probability_of_precipitation,
            ],
            kind: [
                PrecipitationKind::predominant(
                    day.day_probability_of_rain,
                    day.day_probability_of_snow,
                    day.day_probability_of_hail,
                ),
                PrecipitationKind::predominant(
                    day.night_probability_of_rain,
                    day.night_probability_of_snow,
                    day.night_probability_of_hail,
                ),
            ],
        },
        wind: Wind {
            speed: [
                mps_to_kmh(day.midday_wind_speed),
                mps_to_kmh(day.midnight_wind_speed),
            ],
            gusts: [
                mps_to_kmh(day.midday_wind_gust),
                mps_to_kmh(day.midnight_wind_gust),
            ],
        },
        visibility: Visibility {
            m: [day.midday_visibility, day.midnight_visibility],
            text: [
                visibility_text(day.midday_visibility).to_string(),
                visibility_text(day.midnight_visibility).to_string(),
            ],
        },
    })
}
