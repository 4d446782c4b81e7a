//! OpenWeatherMap forecast feed client
//!
//! This module fetches the 5-day/3-hour forecast feed and normalizes it into
//! the `ForecastEntry` sequence consumed by the aggregation pipelines. The
//! transport is deliberately thin: one GET, one JSON decode, one conversion
//! pass. Parsing is split from fetching so tests can cover it offline.

use chrono::{FixedOffset, Offset, Utc};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::{DayPart, ForecastEntry};

/// Base URL for the OpenWeatherMap forecast API
const FORECAST_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// Errors that can occur when fetching or decoding the forecast feed
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The API answered with a non-success status code
    #[error("Forecast API returned status {0}")]
    BadStatus(u16),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The feed response carried no forecast slots
    #[error("Forecast response contained no entries")]
    EmptyFeed,
}

/// A deserialized forecast feed: the normalized entry sequence plus the
/// reporting location's UTC offset, used by the pipelines to derive local
/// hours and weekdays deterministically.
#[derive(Debug, Clone)]
pub struct ForecastFeed {
    /// Chronological 3-hour forecast slots
    pub entries: Vec<ForecastEntry>,
    /// UTC offset of the forecast location
    pub utc_offset: FixedOffset,
}

/// Client for fetching the multi-day forecast feed
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    api_key: String,
}

impl FeedClient {
    /// Creates a new FeedClient with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Creates a new FeedClient with a custom HTTP client
    #[allow(dead_code)]
    pub fn with_client(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
        }
    }

    /// Fetches the 5-day/3-hour forecast feed for the given coordinates
    ///
    /// # Arguments
    /// * `lat` - Latitude coordinate
    /// * `lon` - Longitude coordinate
    ///
    /// # Returns
    /// * `Ok(ForecastFeed)` - Normalized forecast entries and UTC offset
    /// * `Err(FeedError)` - If the request or decoding fails
    pub async fn fetch_forecast(&self, lat: f64, lon: f64) -> Result<ForecastFeed, FeedError> {
        let url = format!(
            "{}?lat={}&lon={}&appid={}",
            FORECAST_BASE_URL, lat, lon, self.api_key
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::BadStatus(status.as_u16()));
        }
        let text = response.text().await?;

        parse_feed(&text)
    }
}

/// Parses a raw forecast API payload into a normalized `ForecastFeed`
pub fn parse_feed(payload: &str) -> Result<ForecastFeed, FeedError> {
    let response: ForecastResponse = serde_json::from_str(payload)?;

    if response.list.is_empty() {
        return Err(FeedError::EmptyFeed);
    }

    // Out-of-range offsets (a corrupt feed) degrade to UTC rather than fail.
    let utc_offset = FixedOffset::east_opt(response.city.timezone).unwrap_or_else(|| Utc.fix());

    let entries = response.list.into_iter().map(ForecastEntry::from).collect();

    Ok(ForecastFeed {
        entries,
        utc_offset,
    })
}

impl From<ForecastSlot> for ForecastEntry {
    fn from(slot: ForecastSlot) -> Self {
        // The weather array is non-empty in practice; an empty one falls
        // through to the classifier's clear-sky default via "".
        let description = slot
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .unwrap_or_default();

        ForecastEntry {
            timestamp: slot.dt,
            temp_min: slot.main.temp_min,
            temp_max: slot.main.temp_max,
            temp_current: slot.main.temp,
            humidity: slot.main.humidity,
            pressure_hpa: slot.main.pressure,
            wind_speed_ms: slot.wind.speed,
            visibility_m: slot.visibility.unwrap_or(0),
            cloudiness_pct: slot.clouds.all,
            precipitation_chance: slot.pop.unwrap_or(0.0),
            rain_volume_3h: slot.rain.map(|r| r.volume),
            description,
            day_part: match slot.sys.pod.as_str() {
                "n" => DayPart::Night,
                _ => DayPart::Day,
            },
        }
    }
}

/// Top-level forecast API response
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastSlot>,
    city: CityDetails,
}

/// One 3-hour forecast slot as delivered by the API
#[derive(Debug, Deserialize)]
struct ForecastSlot {
    dt: i64,
    main: MainDetails,
    weather: Vec<ConditionDescriptor>,
    clouds: CloudDetails,
    wind: WindDetails,
    visibility: Option<i32>,
    pop: Option<f64>,
    rain: Option<RainDetails>,
    sys: SlotSys,
}

/// Thermodynamic readings for a slot
#[derive(Debug, Deserialize)]
struct MainDetails {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: i32,
    humidity: u8,
}

/// Human-readable weather condition descriptor
#[derive(Debug, Deserialize)]
struct ConditionDescriptor {
    description: String,
}

#[derive(Debug, Deserialize)]
struct CloudDetails {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct WindDetails {
    speed: f64,
}

/// Rain volume block; the API names the field "3h"
#[derive(Debug, Deserialize)]
struct RainDetails {
    #[serde(rename = "3h")]
    volume: f64,
}

/// Slot-level system block carrying the part-of-day tag
#[derive(Debug, Deserialize)]
struct SlotSys {
    pod: String,
}

/// City block; only the UTC offset matters to the pipelines
#[derive(Debug, Deserialize)]
struct CityDetails {
    timezone: i32,
}
