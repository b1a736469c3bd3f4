// src/services/forecast.rs

//! Mountain forecast scraper.
//!
//! Fetches the day-tab forecast page and walks it into a [`ForecastDocument`].

use indexmap::IndexMap;
use reqwest::Client;
use scraper::{ElementRef, Html};

use crate::models::{
    CurrentDay, CurrentDayInfo, DayForecastSeries, DayKind, DayRecord, ForecastDocument,
    FurtherOutlook, HazardTable, MountainForecast, OutlookDay, SunTimes, ThisEvening, TomorrowInfo,
    TomorrowsTab,
};
use crate::services::extract::{
    TableSection, attr, find, find_all, find_all_class, find_class, p_text_by_class, row_cells,
    tag_text_by_class, text,
};
use crate::utils::http::fetch_page;

/// Ids of the day-tab panels, in page order.
const DAY_TAB_IDS: [&str; 4] = ["day0", "day1", "day2", "day3"];

/// Layout classes every tab carries; they never name the tab type.
const STRUCTURAL_CLASSES: [&str; 2] = ["tab-content", "no-js-block"];

/// UTF-8 curly quotes that arrive decoded as Windows-1252.
const MOJIBAKE_QUOTES: [&str; 2] = ["\u{e2}\u{20ac}\u{2dc}", "\u{e2}\u{20ac}\u{2122}"];

/// Service for scraping the mountain forecast page.
pub struct ForecastScraper {
    client: Client,
    url: String,
}

impl ForecastScraper {
    /// Create a scraper for the given page URL.
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Fetch and parse the page.
    ///
    /// Any fetch failure is logged and yields `None`.
    pub async fn scrape(&self) -> Option<ForecastDocument> {
        log::info!("Scraping mountain forecast from {}", self.url);

        match fetch_page(&self.client, &self.url).await {
            Ok(html) => {
                let document = parse_forecast(&html);
                log::info!("Scraped {} forecast day(s)", document.days.len());
                Some(document)
            }
            Err(e) => {
                log::error!("Failed to retrieve forecast page: {}", e);
                None
            }
        }
    }
}

/// Parse the forecast page body.
pub fn parse_forecast(html: &str) -> ForecastDocument {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let days = DAY_TAB_IDS
        .iter()
        .filter_map(|id| find(root, &format!("#{id}")))
        .map(scrape_day)
        .collect();

    ForecastDocument {
        update_time: tag_text_by_class(root, "issue-time", "time"),
        confidence: p_text_by_class(root, "confidence"),
        days,
    }
}

/// Tab type from the last non-structural class, defaulting to the current day.
pub fn classify_day(day: ElementRef<'_>) -> DayKind {
    day.value()
        .attr("class")
        .unwrap_or_default()
        .split_whitespace()
        .filter(|class| !STRUCTURAL_CLASSES.contains(class))
        .last()
        .and_then(DayKind::from_class)
        .unwrap_or_default()
}

fn scrape_day(day: ElementRef<'_>) -> DayRecord {
    let kind = classify_day(day);
    log::debug!("Scraping day tab as {}", kind.as_str());

    match kind {
        DayKind::CurrentDay => DayRecord::CurrentDay(scrape_current_day(day)),
        DayKind::TomorrowsTab => DayRecord::TomorrowsTab(scrape_tomorrow(day)),
        DayKind::ThisEvening => DayRecord::ThisEvening(ThisEvening {
            sun: sun_times(day),
            summary: find_class(day, "evening-summary")
                .and_then(|section| find(section, "p"))
                .map(text),
        }),
        DayKind::FurtherOutlook => DayRecord::FurtherOutlook(FurtherOutlook {
            days: find_all_class(day, "outlook-day")
                .into_iter()
                .map(|outlook| OutlookDay {
                    date: find(outlook, "h4").map(text),
                    sun: sun_times(outlook),
                    summary: find(outlook, "p").map(text),
                })
                .collect(),
        }),
    }
}

fn scrape_current_day(day: ElementRef<'_>) -> CurrentDay {
    CurrentDay {
        date: attr(day, "data-content-id"),
        sun: sun_times(day),
        hazards: find_class(day, "mountain-hazard").map(scrape_hazards),
        info: find_class(day, "mountain-additional-info").map(|details| CurrentDayInfo {
            meteorologist_view: p_text_by_class(details, "meteorologist-view"),
            summary: p_text_by_class(details, "weather"),
            cloud_free_top: p_text_by_class(details, "cloud-free-top"),
            visibility: p_text_by_class(details, "visibility"),
            ground_conditions: p_text_by_class(details, "ground-conditions"),
        }),
        mountain: find_class(day, "mountain-forecast").map(|forecast| MountainForecast {
            weather: p_text_by_class(forecast, "weather-forecast"),
            forecast: scrape_day_series(forecast),
        }),
    }
}

fn scrape_tomorrow(day: ElementRef<'_>) -> TomorrowsTab {
    TomorrowsTab {
        date: attr(day, "data-content-id"),
        sun: sun_times(day),
        info: find_class(day, "mountain-additional-info").map(|details| TomorrowInfo {
            summary: p_text_by_class(details, "weather"),
            cloud_free_top: p_text_by_class(details, "cloud-free-top"),
            max_wind: p_text_by_class(details, "max-wind"),
            temperature: temperature_list(details, "temperature"),
            visibility: p_text_by_class(details, "visibility"),
        }),
    }
}

/// Sunrise from the first `sunrise-sunset` block, sunset from the second.
fn sun_times(scope: ElementRef<'_>) -> SunTimes {
    let blocks = find_all_class(scope, "sunrise-sunset");
    let time_in = |index: usize| {
        blocks
            .get(index)
            .and_then(|block| find(*block, "time"))
            .map(text)
    };

    SunTimes {
        sunrise: time_in(0),
        sunset: time_in(1),
    }
}

fn scrape_hazards(mountain_hazard: ElementRef<'_>) -> HazardTable {
    let Some(accordion) = find(mountain_hazard, "#accordion-group") else {
        return HazardTable::new();
    };

    let levels = find_all_class(accordion, "accordion-header")
        .into_iter()
        .map(|header| {
            text(header)
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_lowercase()
        });
    let panels = find_all_class(accordion, "accordion-panel");

    levels
        .zip(panels)
        .map(|(level, panel)| (level, scrape_hazard_level(panel)))
        .collect()
}

fn scrape_hazard_level(panel: ElementRef<'_>) -> IndexMap<String, String> {
    let names = find_all_class(panel, "hazard-header").into_iter().map(text);
    let descriptions = find_all_class(panel, "hazard-description")
        .into_iter()
        .map(|desc| fix_quotes(&text(desc)));

    names.zip(descriptions).collect()
}

/// Replace mis-decoded curly quotes with a plain apostrophe.
pub fn fix_quotes(value: &str) -> String {
    MOJIBAKE_QUOTES
        .iter()
        .fold(value.to_string(), |acc, bad| acc.replace(bad, "'"))
}

/// Each list item's leading `<span>` label mapped to the rest of its text.
fn temperature_list(scope: ElementRef<'_>, class: &str) -> Option<IndexMap<String, String>> {
    let list = find(find_class(scope, class)?, "ul")?;

    let entries = find_all(list, "li")
        .into_iter()
        .filter_map(|item| {
            let label = find(item, "span").map(text)?;
            let value = item.text().collect::<String>().replace(&label, "");
            Some((label, value.trim().to_string()))
        })
        .collect();

    Some(entries)
}

/// Build the hourly series from the five summit tables.
fn scrape_day_series(forecast: ElementRef<'_>) -> DayForecastSeries {
    use TableSection::{Body, Head};

    let times = row_cells(forecast, "weather-table", 0, Head)
        .into_iter()
        .skip(1)
        .map(text)
        .collect();

    let weather_type = row_cells(forecast, "weather-table", 0, Body)
        .into_iter()
        .map(|cell| {
            find(cell, "img")
                .and_then(|img| attr(img, "alt"))
                .unwrap_or_default()
        })
        .collect();
    let precip = row_cells(forecast, "weather-table", 1, Body)
        .into_iter()
        .map(text)
        .collect();

    let wind_row = row_cells(forecast, "wind-table", 0, Body);
    let wind_speed = wind_row
        .iter()
        .map(|cell| find_class(*cell, "speed").map(text).unwrap_or_default())
        .collect();
    let wind_dir = wind_row
        .iter()
        .map(|cell| {
            find(*cell, "span")
                .and_then(|span| attr(span, "data-value"))
                .unwrap_or_default()
        })
        .collect();

    let wind_gust = row_cells(forecast, "wind-gust-table", 0, Body)
        .into_iter()
        .map(text)
        .collect();

    let data_temps = |class: &str| -> Vec<String> {
        row_cells(forecast, class, 0, Body)
            .into_iter()
            .map(|cell| attr(cell, "data-temp").unwrap_or_default())
            .collect()
    };

    DayForecastSeries {
        time: times,
        weather_type,
        precip,
        wind_speed,
        wind_gust,
        wind_dir,
        temp: data_temps("temperature-table"),
        feel_temp: data_temps("feels-temperature-table"),
    }
    .equalize()
    .trim_to_first_hour()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../../tests/fixtures/mountain_forecast.html");

    fn day_element<'a>(doc: &'a Html, id: &str) -> ElementRef<'a> {
        find(doc.root_element(), &format!("#{id}")).unwrap()
    }

    #[test]
    fn test_classify_day() {
        let doc = Html::parse_document(
            r#"<div id="a" class="tab-content no-js-block this-evening"></div>
               <div id="b" class="tab-content no-js-block"></div>
               <div id="c" class="further-outlook tab-content"></div>
               <div id="d" class="tab-content mystery-tab"></div>"#,
        );

        assert_eq!(classify_day(day_element(&doc, "a")), DayKind::ThisEvening);
        assert_eq!(classify_day(day_element(&doc, "b")), DayKind::CurrentDay);
        assert_eq!(classify_day(day_element(&doc, "c")), DayKind::FurtherOutlook);
        assert_eq!(classify_day(day_element(&doc, "d")), DayKind::CurrentDay);
    }

    #[test]
    fn test_fix_quotes() {
        let raw = "Don\u{e2}\u{20ac}\u{2122}t \u{e2}\u{20ac}\u{2dc}underestimate\u{e2}\u{20ac}\u{2122}";
        assert_eq!(fix_quotes(raw), "Don't 'underestimate'");
    }

    #[test]
    fn test_parse_header_fields() {
        let doc = parse_forecast(FIXTURE);
        assert_eq!(doc.update_time.as_deref(), Some("05:00 (UTC) on Mon 15 Jan 2024"));
        assert_eq!(doc.confidence.as_deref(), Some("Medium confidence in the forecast."));
    }

    #[test]
    fn test_parse_day_types_in_order() {
        let doc = parse_forecast(FIXTURE);
        let kinds: Vec<_> = doc.days.iter().map(DayRecord::kind).collect();
        assert_eq!(
            kinds,
            vec![
                DayKind::CurrentDay,
                DayKind::TomorrowsTab,
                DayKind::ThisEvening,
                DayKind::FurtherOutlook,
            ]
        );
    }

    #[test]
    fn test_parse_current_day() {
        let doc = parse_forecast(FIXTURE);
        let DayRecord::CurrentDay(today) = &doc.days[0] else {
            panic!("first tab should be the current day");
        };

        assert_eq!(today.date.as_deref(), Some("2024-01-15"));
        assert_eq!(today.sun.sunrise.as_deref(), Some("08:19"));
        assert_eq!(today.sun.sunset.as_deref(), Some("16:14"));

        let hazards = today.hazards.as_ref().unwrap();
        assert_eq!(hazards.keys().collect::<Vec<_>>(), ["considerable", "low"]);
        assert_eq!(
            hazards["considerable"]["Strong winds"],
            "Gusts will make walking difficult on the summits' exposed ridges."
        );
        assert_eq!(hazards["low"]["Lightning"], "Isolated strikes possible.");

        let info = today.info.as_ref().unwrap();
        assert_eq!(
            info.meteorologist_view.as_deref(),
            Some("A cold and windy day with wintry showers.")
        );
        assert_eq!(info.summary.as_deref(), Some("Sunny spells and snow showers."));
        assert_eq!(info.cloud_free_top.as_deref(), Some("60% chance"));
        assert_eq!(info.visibility.as_deref(), Some("Very good, poor in showers."));
        assert_eq!(info.ground_conditions.as_deref(), Some("Snow above 600m."));

        let mountain = today.mountain.as_ref().unwrap();
        assert_eq!(mountain.weather.as_deref(), Some("Wintry showers, mainly in the west."));
    }

    #[test]
    fn test_parse_series_trimmed_to_six() {
        let doc = parse_forecast(FIXTURE);
        let DayRecord::CurrentDay(today) = &doc.days[0] else {
            panic!("first tab should be the current day");
        };
        let series = &today.mountain.as_ref().unwrap().forecast;

        assert_eq!(series.time, ["06:00", "09:00", "12:00"]);
        assert_eq!(series.weather_type, ["Light snow", "Sunny day", "Cloudy"]);
        assert_eq!(series.precip, ["40%", "10%", "<5%"]);
        assert_eq!(series.wind_speed, ["35", "40", "30"]);
        assert_eq!(series.wind_dir, ["NW", "W", "SW"]);
        assert_eq!(series.wind_gust, ["50", "60", "45"]);
        assert_eq!(series.temp, ["-2", "0", "1"]);
        assert_eq!(series.feel_temp, ["-9", "-8", "-6"]);
    }

    #[test]
    fn test_missing_table_keeps_other_series() {
        let page = FIXTURE.replace("feels-temperature-table", "feels-renamed");
        let doc = parse_forecast(&page);
        let DayRecord::CurrentDay(today) = &doc.days[0] else {
            panic!("first tab should be the current day");
        };
        let series = &today.mountain.as_ref().unwrap().forecast;

        assert_eq!(series.time, ["06:00", "09:00", "12:00"]);
        assert_eq!(series.weather_type, ["Light snow", "Sunny day", "Cloudy"]);
        assert_eq!(series.wind_speed, ["35", "40", "30"]);
        assert_eq!(series.temp, ["-2", "0", "1"]);
        assert_eq!(series.feel_temp, ["", "", ""]);
    }

    #[test]
    fn test_parse_tomorrow() {
        let doc = parse_forecast(FIXTURE);
        let DayRecord::TomorrowsTab(tomorrow) = &doc.days[1] else {
            panic!("second tab should be tomorrow");
        };

        assert_eq!(tomorrow.date.as_deref(), Some("2024-01-16"));
        assert_eq!(tomorrow.sun.sunrise.as_deref(), Some("08:18"));

        let info = tomorrow.info.as_ref().unwrap();
        assert_eq!(info.max_wind.as_deref(), Some("45 mph"));
        let temperature = info.temperature.as_ref().unwrap();
        assert_eq!(temperature["Valley"], "3°C");
        assert_eq!(temperature["Summit"], "-4°C");
        assert_eq!(temperature.keys().next().map(String::as_str), Some("Valley"));
    }

    #[test]
    fn test_parse_evening_and_outlook() {
        let doc = parse_forecast(FIXTURE);

        let DayRecord::ThisEvening(evening) = &doc.days[2] else {
            panic!("third tab should be this evening");
        };
        assert_eq!(evening.summary.as_deref(), Some("Showers dying out, frost forming."));
        assert_eq!(evening.sun.sunset.as_deref(), Some("16:14"));

        let DayRecord::FurtherOutlook(outlook) = &doc.days[3] else {
            panic!("fourth tab should be the outlook");
        };
        assert_eq!(outlook.days.len(), 2);
        assert_eq!(outlook.days[0].date.as_deref(), Some("Wednesday"));
        assert_eq!(outlook.days[0].sun.sunrise.as_deref(), Some("08:16"));
        assert_eq!(outlook.days[1].summary.as_deref(), Some("Milder with rain."));
    }

    #[test]
    fn test_missing_tabs_and_sections() {
        let doc = parse_forecast(
            r#"<html><body>
                 <div id="day0" class="tab-content"><p>nothing here</p></div>
               </body></html>"#,
        );

        assert!(doc.update_time.is_none());
        assert!(doc.confidence.is_none());
        assert_eq!(doc.days.len(), 1);

        let DayRecord::CurrentDay(today) = &doc.days[0] else {
            panic!("unclassified tab should default to the current day");
        };
        assert!(today.date.is_none());
        assert!(today.sun.sunrise.is_none());
        assert!(today.hazards.is_none());
        assert!(today.info.is_none());
        assert!(today.mountain.is_none());
    }

    #[test]
    fn test_hazard_section_without_accordion_is_empty() {
        let doc = parse_forecast(
            r#"<div id="day0" class="tab-content current-day">
                 <div class="mountain-hazard"><p>No hazards listed</p></div>
               </div>"#,
        );
        let DayRecord::CurrentDay(today) = &doc.days[0] else {
            panic!("expected current day");
        };
        assert_eq!(today.hazards.as_ref().map(|h| h.len()), Some(0));
    }
}
