//! Turns a forecast payload into per-date display cards.

use chrono::{DateTime, Datelike, FixedOffset, Timelike};

use crate::classify::{weather_icon, WeatherIcon};
use crate::types::{AreaWeather, ForecastPayload, OfficeForecast, TimeSeries};

/// Shown for weather, wind or wave text that is missing for a date
pub const PLACEHOLDER: &str = "-";

/// One date's weather, wind and wave summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastCard {
    /// Raw `timeDefines` entry
    pub date: String,
    /// `date` formatted for display
    pub date_label: String,
    pub weather: String,
    pub icon: WeatherIcon,
    pub wind: String,
    pub wave: String,
}

/// Header shown above the cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfficeSummary {
    pub publishing_office: String,
    pub report_label: String,
    pub headline: Option<String>,
}

impl OfficeSummary {
    pub fn from_office(office: &OfficeForecast) -> Self {
        Self {
            publishing_office: office.publishing_office.clone().unwrap_or_default(),
            report_label: office
                .report_datetime
                .as_deref()
                .map(format_datetime)
                .unwrap_or_default(),
            headline: office
                .headline_text
                .as_deref()
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .map(str::to_string),
        }
    }
}

/// Lazy card sequence over the first weather-bearing time series of office 0.
///
/// Finite and order-preserving; build a new one to render again.
#[derive(Debug, Clone)]
pub struct Cards<'a> {
    dates: std::slice::Iter<'a, String>,
    area: Option<&'a AreaWeather>,
    index: usize,
}

impl Cards<'_> {
    fn empty() -> Self {
        Self {
            dates: <&[String]>::default().iter(),
            area: None,
            index: 0,
        }
    }
}

impl Iterator for Cards<'_> {
    type Item = ForecastCard;

    fn next(&mut self) -> Option<Self::Item> {
        let date = self.dates.next()?;
        let i = self.index;
        self.index += 1;

        let weather = self
            .area
            .and_then(|a| a.weather_at(i))
            .unwrap_or(PLACEHOLDER);
        let wind = self.area.and_then(|a| a.wind_at(i)).unwrap_or(PLACEHOLDER);
        let wave = self.area.and_then(|a| a.wave_at(i)).unwrap_or(PLACEHOLDER);

        Some(ForecastCard {
            date: date.clone(),
            date_label: format_datetime(date),
            weather: weather.to_string(),
            icon: weather_icon(weather),
            wind: wind.to_string(),
            wave: wave.to_string(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.dates.size_hint()
    }
}

impl ExactSizeIterator for Cards<'_> {}

/// First time series whose first area entry has a weather sequence
pub fn weather_series(office: &OfficeForecast) -> Option<&TimeSeries> {
    office
        .time_series
        .iter()
        .find(|ts| ts.areas.first().is_some_and(|a| a.weathers.is_some()))
}

/// Cards for a payload. Empty when the payload has no office record or no
/// weather-bearing series.
pub fn cards(payload: &ForecastPayload) -> Cards<'_> {
    let Some(series) = payload.primary_office().and_then(weather_series) else {
        return Cards::empty();
    };
    Cards {
        dates: series.time_defines.iter(),
        area: series.areas.first(),
        index: 0,
    }
}

/// Format an ISO-8601 timestamp as `6月5日 17:00` in its own offset.
/// Unparseable input is returned unchanged.
pub fn format_datetime(raw: &str) -> String {
    match DateTime::<FixedOffset>::parse_from_rfc3339(raw) {
        Ok(dt) => format!(
            "{}月{}日 {:02}:{:02}",
            dt.month(),
            dt.day(),
            dt.hour(),
            dt.minute()
        ),
        Err(_) => raw.to_string(),
    }
}
