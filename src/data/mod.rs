//! Core data models for Skycast
//!
//! This module contains the domain types shared by both forecast pipelines:
//! the normalized forecast entry handed over by the feed client, the hourly
//! timeline point produced by the interpolator, and the per-weekday summary
//! produced by the daily aggregator.

pub mod feed;

pub use feed::{FeedClient, FeedError};

use serde::{Deserialize, Serialize};

/// Part-of-day tag attached to every forecast entry by the upstream feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayPart {
    /// Daytime forecast slot (feed tag "d")
    Day,
    /// Nighttime forecast slot (feed tag "n")
    Night,
}

impl DayPart {
    /// Returns true for daytime slots.
    pub fn is_day(self) -> bool {
        matches!(self, DayPart::Day)
    }
}

/// A single 3-hour forecast slot, normalized from the feed response.
///
/// Entries arrive as an ordered chronological sequence, nominally 3 hours
/// apart with up to 8 entries per calendar day, but the feed may have gaps.
/// Temperatures are Kelvin as delivered by the feed; conversion to Celsius
/// happens inside the pipelines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Forecast slot time as epoch seconds (UTC)
    pub timestamp: i64,
    /// Minimum temperature in Kelvin
    pub temp_min: f64,
    /// Maximum temperature in Kelvin
    pub temp_max: f64,
    /// Momentary temperature in Kelvin
    pub temp_current: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Atmospheric pressure in hPa
    pub pressure_hpa: i32,
    /// Wind speed in m/s
    pub wind_speed_ms: f64,
    /// Average visibility in meters
    pub visibility_m: i32,
    /// Cloud cover percentage (0-100)
    pub cloudiness_pct: u8,
    /// Probability of precipitation (0.0-1.0)
    pub precipitation_chance: f64,
    /// Rain volume over the last 3 hours in mm, when the feed reports one
    pub rain_volume_3h: Option<f64>,
    /// Free-text weather description (e.g. "broken clouds")
    pub description: String,
    /// Day/night tag for this slot
    pub day_part: DayPart,
}

/// One hour of the interpolated "today" timeline.
///
/// The interpolator emits exactly 24 of these per invocation, ordered from
/// the current hour and wrapping at midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyPoint {
    /// Zero-padded local hour label, "00" through "23"
    pub hour: String,
    /// Interpolated temperature in whole degrees Celsius
    pub temperature: i32,
    /// Canonical icon identifier for this hour
    pub icon: String,
    /// Day/night tag inherited from the hour's source slot
    pub day_part: DayPart,
}

/// Reduced auxiliary metrics for one calendar day.
///
/// Humidity, pressure, wind speed and visibility are arithmetic means over
/// the day's slots; cloudiness and precipitation chance are maxima.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AuxMetrics {
    /// Mean relative humidity percentage
    pub humidity: f64,
    /// Mean atmospheric pressure in hPa
    pub pressure: f64,
    /// Mean wind speed in m/s
    pub wind_speed: f64,
    /// Mean visibility in meters
    pub visibility: f64,
    /// Maximum cloud cover percentage
    pub cloudiness: f64,
    /// Maximum precipitation proxy (rain volume over 3h, 0 when absent)
    pub precipitation_chance: f64,
}

/// Aggregated forecast for one weekday of the multi-day chart.
///
/// Either side can be absent when the feed has no forecasts for that part of
/// the day on that date (typically the first or last day of the horizon).
/// `altered_*` temperatures are baseline-shifted values for chart rendering;
/// they equal the raw values unless every temperature in the sequence is
/// strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    /// Short weekday label, e.g. "Mon"
    pub weekday: String,
    /// Daytime maximum temperature in °C
    pub day_temp: Option<i32>,
    /// Baseline-shifted daytime temperature for charting
    pub altered_day_temp: Option<i32>,
    /// Representative daytime icon identifier
    pub day_icon: Option<String>,
    /// Nighttime minimum temperature in °C
    pub night_temp: Option<i32>,
    /// Baseline-shifted nighttime temperature for charting
    pub altered_night_temp: Option<i32>,
    /// Representative nighttime icon identifier
    pub night_icon: Option<String>,
    /// Reduced auxiliary metrics for the day, when any slot carried them
    pub metrics: Option<AuxMetrics>,
}

/// Converts a Kelvin temperature to whole degrees Celsius.
///
/// Uses `ceil` to match the timeline's rounding, and clamps to the `i32`
/// range so extreme or garbage feed values cannot overflow.
pub fn kelvin_to_celsius(kelvin: f64) -> i32 {
    let celsius = (kelvin - 273.15).ceil();
    if celsius >= i32::MAX as f64 {
        i32::MAX
    } else if celsius <= i32::MIN as f64 {
        i32::MIN
    } else {
        celsius as i32
    }
}
