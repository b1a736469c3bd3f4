//! Mountain forecast scraped from the day-tab page.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Hazard level (e.g. "considerable") to hazard name to description.
pub type HazardTable = IndexMap<String, IndexMap<String, String>>;

/// The whole scraped page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ForecastDocument {
    pub update_time: Option<String>,
    pub confidence: Option<String>,
    pub days: Vec<DayRecord>,
}

/// One day-tab, tagged by the tab's type class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DayRecord {
    CurrentDay(CurrentDay),
    TomorrowsTab(TomorrowsTab),
    ThisEvening(ThisEvening),
    FurtherOutlook(FurtherOutlook),
}

impl DayRecord {
    /// The `type` tag this record serializes with.
    pub fn kind(&self) -> DayKind {
        match self {
            Self::CurrentDay(_) => DayKind::CurrentDay,
            Self::TomorrowsTab(_) => DayKind::TomorrowsTab,
            Self::ThisEvening(_) => DayKind::ThisEvening,
            Self::FurtherOutlook(_) => DayKind::FurtherOutlook,
        }
    }
}

/// Recognized day-tab types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayKind {
    #[default]
    CurrentDay,
    TomorrowsTab,
    ThisEvening,
    FurtherOutlook,
}

impl DayKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CurrentDay => "current-day",
            Self::TomorrowsTab => "tomorrows-tab",
            Self::ThisEvening => "this-evening",
            Self::FurtherOutlook => "further-outlook",
        }
    }

    /// Parse a type class name; `None` for anything unrecognized.
    pub fn from_class(class: &str) -> Option<Self> {
        match class {
            "current-day" => Some(Self::CurrentDay),
            "tomorrows-tab" => Some(Self::TomorrowsTab),
            "this-evening" => Some(Self::ThisEvening),
            "further-outlook" => Some(Self::FurtherOutlook),
            _ => None,
        }
    }
}

/// Sunrise and sunset as shown on the tab.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SunTimes {
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CurrentDay {
    pub date: Option<String>,
    #[serde(flatten)]
    pub sun: SunTimes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hazards: Option<HazardTable>,
    #[serde(flatten)]
    pub info: Option<CurrentDayInfo>,
    #[serde(flatten)]
    pub mountain: Option<MountainForecast>,
}

/// Free-text panels from the additional-info section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CurrentDayInfo {
    pub meteorologist_view: Option<String>,
    pub summary: Option<String>,
    pub cloud_free_top: Option<String>,
    pub visibility: Option<String>,
    pub ground_conditions: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MountainForecast {
    pub weather: Option<String>,
    pub forecast: DayForecastSeries,
}

/// Hourly columns of the summit forecast tables. All series share a length.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DayForecastSeries {
    pub time: Vec<String>,
    #[serde(rename = "type")]
    pub weather_type: Vec<String>,
    pub precip: Vec<String>,
    pub wind_speed: Vec<String>,
    pub wind_gust: Vec<String>,
    pub wind_dir: Vec<String>,
    pub temp: Vec<String>,
    pub feel_temp: Vec<String>,
}

/// First column shown once the series is trimmed.
const FIRST_HOUR: &str = "06:00";

impl DayForecastSeries {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    fn columns_mut(&mut self) -> [&mut Vec<String>; 8] {
        [
            &mut self.time,
            &mut self.weather_type,
            &mut self.precip,
            &mut self.wind_speed,
            &mut self.wind_gust,
            &mut self.wind_dir,
            &mut self.temp,
            &mut self.feel_temp,
        ]
    }

    /// Fit every series to the length of `time`.
    ///
    /// Short columns (a missing table, a missing cell) are padded with empty
    /// strings; columns longer than `time` are cut.
    pub fn equalize(mut self) -> Self {
        let len = self.time.len();
        for column in self.columns_mut() {
            column.resize(len, String::new());
        }
        self
    }

    /// Drop the columns before the first "06:00" entry, if there is one.
    pub fn trim_to_first_hour(mut self) -> Self {
        let start = self.time.iter().position(|t| t == FIRST_HOUR);
        if let Some(start) = start.filter(|&i| i > 0) {
            for column in self.columns_mut() {
                column.drain(..start.min(column.len()));
            }
        }
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TomorrowsTab {
    pub date: Option<String>,
    #[serde(flatten)]
    pub sun: SunTimes,
    #[serde(flatten)]
    pub info: Option<TomorrowInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TomorrowInfo {
    pub summary: Option<String>,
    pub cloud_free_top: Option<String>,
    pub max_wind: Option<String>,
    /// Label (e.g. "Valley") to the text that follows it
    pub temperature: Option<IndexMap<String, String>>,
    pub visibility: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ThisEvening {
    #[serde(flatten)]
    pub sun: SunTimes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FurtherOutlook {
    pub days: Vec<OutlookDay>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutlookDay {
    pub date: Option<String>,
    #[serde(flatten)]
    pub sun: SunTimes,
    pub summary: Option<String>,
}
