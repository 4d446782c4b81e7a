//! Hourly forecast interpolation
//!
//! Turns the first 8 three-hour forecast slots (one day's worth) into a
//! smooth 24-point hourly timeline: hour labels wrap from the current local
//! hour, temperatures are linearly interpolated between the 3-hour control
//! points, and icons and day/night flags are carried over from the nearest
//! source slot.

use chrono::{DateTime, FixedOffset, Timelike};
use thiserror::Error;

use crate::data::{kelvin_to_celsius, ForecastEntry, HourlyPoint};
use crate::icons::classify_icon;

/// Number of output points per invocation
const HOURS_PER_DAY: usize = 24;

/// Number of 3-hour source slots covering one day
const SLOTS_PER_DAY: usize = 8;

/// Errors raised by the hourly interpolator
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HourlyError {
    /// The feed is shorter than one full day of 3-hour slots
    #[error("Feed has {0} entries; more than {SLOTS_PER_DAY} are required for a full day")]
    InsufficientData(usize),

    /// A derived sequence did not come out at exactly 24 elements.
    /// Indicates a programming error, not bad input.
    #[error("Derived {name} sequence has {actual} elements, expected {HOURS_PER_DAY}")]
    MalformedSequence {
        /// Which derived sequence violated the invariant
        name: &'static str,
        /// Observed length
        actual: usize,
    },
}

/// Interpolates one day of 3-hour forecast slots into 24 hourly points.
///
/// The feed must contain more than 8 entries; only the first 8 (today) are
/// used. Hour labels are derived from the first entry's local hour in the
/// feed's own UTC offset and wrap at midnight, so the timeline always starts
/// "now" regardless of wall-clock timezone on this machine.
///
/// # Errors
/// * `HourlyError::InsufficientData` when the feed has 8 or fewer entries
/// * `HourlyError::MalformedSequence` if an internal invariant is violated
pub fn interpolate_hourly(
    entries: &[ForecastEntry],
    utc_offset: FixedOffset,
) -> Result<Vec<HourlyPoint>, HourlyError> {
    if entries.len() <= SLOTS_PER_DAY {
        return Err(HourlyError::InsufficientData(entries.len()));
    }
    let today = &entries[..SLOTS_PER_DAY];

    let hours = hour_labels(today[0].timestamp, utc_offset);
    let temperatures = interpolate_temperatures(today);

    // Each 3-hour slot covers 3 consecutive output hours.
    let mut day_parts = Vec::with_capacity(HOURS_PER_DAY);
    let mut descriptions = Vec::with_capacity(HOURS_PER_DAY);
    for entry in today {
        for _ in 0..3 {
            day_parts.push(entry.day_part);
            descriptions.push(entry.description.as_str());
        }
    }

    let icons: Vec<&'static str> = descriptions
        .iter()
        .zip(&day_parts)
        .map(|(description, part)| classify_icon(description, part.is_day()))
        .collect();

    ensure_len("hours", hours.len())?;
    ensure_len("temperatures", temperatures.len())?;
    ensure_len("day parts", day_parts.len())?;
    ensure_len("icons", icons.len())?;

    let points = hours
        .into_iter()
        .zip(temperatures)
        .zip(icons)
        .zip(day_parts)
        .map(|(((hour, temperature), icon), day_part)| HourlyPoint {
            hour,
            temperature,
            icon: icon.to_string(),
            day_part,
        })
        .collect();

    Ok(points)
}

/// Generates 24 consecutive zero-padded hour labels starting from the local
/// hour of the given timestamp, wrapping modulo 24.
fn hour_labels(timestamp: i64, utc_offset: FixedOffset) -> Vec<String> {
    let start = DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.with_timezone(&utc_offset).hour())
        .unwrap_or(0);

    (0..HOURS_PER_DAY as u32)
        .map(|offset| format!("{:02}", (start + offset) % 24))
        .collect()
}

/// Converts the 8 slot temperatures to Celsius and linearly interpolates
/// them onto 24 evenly spaced sample points spanning control indices [0, 7].
fn interpolate_temperatures(today: &[ForecastEntry]) -> Vec<i32> {
    let control: Vec<f64> = today
        .iter()
        .map(|entry| f64::from(kelvin_to_celsius(entry.temp_current)))
        .collect();

    sample_linear(&control, HOURS_PER_DAY)
        .into_iter()
        .map(ceil_to_degrees)
        .collect()
}

/// Samples a piecewise-linear curve through the control points at `count`
/// evenly spaced positions spanning [0, control.len() - 1], clamping at the
/// endpoints.
fn sample_linear(control: &[f64], count: usize) -> Vec<f64> {
    let last = control.len() - 1;
    let span = last as f64;

    (0..count)
        .map(|i| {
            let position = i as f64 * span / (count - 1) as f64;
            let lower = (position.floor() as usize).min(last);
            let upper = (position.ceil() as usize).min(last);
            let fraction = position - lower as f64;
            control[lower] + (control[upper] - control[lower]) * fraction
        })
        .collect()
}

/// Rounds an interpolated value up to a whole degree, clamped to i32 range.
fn ceil_to_degrees(value: f64) -> i32 {
    let value = value.ceil();
    if value >= i32::MAX as f64 {
        i32::MAX
    } else if value <= i32::MIN as f64 {
        i32::MIN
    } else {
        value as i32
    }
}

/// Checks the 24-element invariant for one derived sequence.
fn ensure_len(name: &'static str, actual: usize) -> Result<(), HourlyError> {
    if actual == HOURS_PER_DAY {
        Ok(())
    } else {
        Err(HourlyError::MalformedSequence { name, actual })
    }
}
