//! Significant weather codes reported by the point forecast API.

use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::error::{AppError, Result};

/// Sentinel the API sends instead of a number when no code is available.
const NOT_AVAILABLE: &str = "NA";

/// A raw significant-weather code: either a number or the `"NA"` sentinel.
///
/// Deserialization accepts any integer or string; whether it is a known code
/// is only decided by [`WeatherCode::label`], so unknown codes surface as
/// [`AppError::UnknownWeatherCode`] instead of a generic JSON error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherCode {
    NotAvailable,
    Code(i64),
    Other(String),
}

impl WeatherCode {
    /// Display label for this code.
    pub fn label(&self) -> Result<&'static str> {
        let label = match self {
            Self::NotAvailable => "Not available",
            Self::Code(-1) => "Trace rain",
            Self::Code(0) => "Clear night",
            Self::Code(1) => "Sunny day",
            Self::Code(2) => "Partly cloudy (night)",
            Self::Code(3) => "Partly cloudy (day)",
            Self::Code(4) => "Not used",
            Self::Code(5) => "Mist",
            Self::Code(6) => "Fog",
            Self::Code(7) => "Cloudy",
            Self::Code(8) => "Overcast",
            Self::Code(9) => "Light rain shower (night)",
            Self::Code(10) => "Light rain shower (day)",
            Self::Code(11) => "Drizzle",
            Self::Code(12) => "Light rain",
            Self::Code(13) => "Heavy rain shower (night)",
            Self::Code(14) => "Heavy rain shower (day)",
            Self::Code(15) => "Heavy rain",
            Self::Code(16) => "Sleet shower (night)",
            Self::Code(17) => "Sleed shower (day)",
            Self::Code(18) => "Sleet",
            Self::Code(19) => "Hail shower (night)",
            Self::Code(20) => "Hail shower (day)",
            Self::Code(21) => "Hail",
            Self::Code(22) => "Light snow shower (night)",
            Self::Code(23) => "Light snow shower (day)",
            Self::Code(24) => "Light snow",
            Self::Code(25) => "Heavy snow shower (night)",
            Self::Code(26) => "Heavy snow shower (day)",
            Self::Code(27) => "Heavy snow",
            Self::Code(28) => "Thunder shower (night)",
            Self::Code(29) => "Thunder shower (day)",
            Self::Code(30) => "Thunder",
            other => return Err(AppError::UnknownWeatherCode(other.to_string())),
        };
        Ok(label)
    }
}

impl fmt::Display for WeatherCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAvailable => f.write_str(NOT_AVAILABLE),
            Self::Code(code) => write!(f, "{code}"),
            Self::Other(raw) => write!(f, "{raw:?}"),
        }
    }
}

impl From<&str> for WeatherCode {
    fn from(raw: &str) -> Self {
        if raw == NOT_AVAILABLE {
            Self::NotAvailable
        } else {
            Self::Other(raw.to_string())
        }
    }
}

impl<'de> Deserialize<'de> for WeatherCode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(code) => Self::Code(code),
            Raw::Text(text) => Self::from(text.as_str()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_code_has_label() {
        let known = std::iter::once(WeatherCode::NotAvailable)
            .chain((-1..=30).map(WeatherCode::Code))
            .filter(|code| code.label().is_ok())
            .count();
        assert_eq!(known, 33);
    }

    #[test]
    fn test_documented_labels() {
        assert_eq!(WeatherCode::NotAvailable.label().unwrap(), "Not available");
        assert_eq!(WeatherCode::Code(-1).label().unwrap(), "Trace rain");
        assert_eq!(WeatherCode::Code(0).label().unwrap(), "Clear night");
        assert_eq!(WeatherCode::Code(7).label().unwrap(), "Cloudy");
        assert_eq!(WeatherCode::Code(17).label().unwrap(), "Sleed shower (day)");
        assert_eq!(WeatherCode::Code(30).label().unwrap(), "Thunder");
    }

    #[test]
    fn test_unknown_codes_fail() {
        assert!(matches!(
            WeatherCode::Code(31).label(),
            Err(AppError::UnknownWeatherCode(_))
        ));
        assert!(WeatherCode::Code(-2).label().is_err());
        assert!(WeatherCode::from("N/A").label().is_err());
    }

    #[test]
    fn test_deserialize() {
        let codes: Vec<WeatherCode> = serde_json::from_str(r#"[3, "NA", -1, "x"]"#).unwrap();
        assert_eq!(
            codes,
            vec![
                WeatherCode::Code(3),
                WeatherCode::NotAvailable,
                WeatherCode::Code(-1),
                WeatherCode::Other("x".into()),
            ]
        );
    }
}
