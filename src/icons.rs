//! Weather icon classification
//!
//! Maps the feed's free-text weather descriptions to canonical icon
//! identifiers via a fixed, priority-ordered keyword match. Both the hourly
//! and the daily pipeline call this one function, so the two charts can
//! never disagree about an icon.

/// Canonical icon identifiers used across the application.
pub mod icon {
    pub const DAY_FEW_CLOUDS: &str = "cloud.sun.fill";
    pub const NIGHT_FEW_CLOUDS: &str = "cloud.moon.fill";
    pub const CLOUDS: &str = "cloud.fill";
    pub const DAY_CLEAR_SKY: &str = "sun.max.fill";
    pub const NIGHT_CLEAR_SKY: &str = "moon.stars.fill";
    pub const DAY_RAIN: &str = "cloud.sun.rain.fill";
    pub const NIGHT_RAIN: &str = "cloud.moon.rain.fill";
    pub const SHOWER_RAIN: &str = "cloud.rain.fill";
    pub const THUNDERSTORM: &str = "cloud.bolt.fill";
    pub const SNOW: &str = "snowflake";
    pub const DRIZZLE: &str = "cloud.drizzle.fill";
    pub const DAY_SMOKE: &str = "sun.haze.fill";
    pub const NIGHT_SMOKE: &str = "moon.haze.fill";
}

/// Obscuration keywords that all share the haze icon family.
const OBSCURATIONS: [&str; 8] = [
    "smoke", "mist", "haze", "ash", "dust", "tornado", "squalls", "sleet",
];

/// Classifies a free-text weather description into a canonical icon id.
///
/// Matching is case-insensitive substring search with a fixed priority:
/// clouds (few clouds get their own day/night variant), clear sky, rain
/// (shower rain has no day/night split), thunderstorm, snow, drizzle, then
/// the obscuration family. Empty or unrecognized descriptions fail open to
/// the clear-sky icon for the given part of day.
///
/// # Example
///
/// ```
/// use skycast::icons::{classify_icon, icon};
///
/// assert_eq!(classify_icon("light rain", false), icon::NIGHT_RAIN);
/// assert_eq!(classify_icon("Few Clouds", true), icon::DAY_FEW_CLOUDS);
/// ```
pub fn classify_icon(description: &str, is_daytime: bool) -> &'static str {
    let description = description.to_lowercase();

    if description.contains("clouds") {
        if description.contains("few clouds") {
            if is_daytime {
                icon::DAY_FEW_CLOUDS
            } else {
                icon::NIGHT_FEW_CLOUDS
            }
        } else {
            // Generic cloud cover has no day/night variant
            icon::CLOUDS
        }
    } else if description.contains("clear sky") {
        if is_daytime {
            icon::DAY_CLEAR_SKY
        } else {
            icon::NIGHT_CLEAR_SKY
        }
    } else if description.contains("rain") {
        if description.contains("shower") {
            icon::SHOWER_RAIN
        } else if is_daytime {
            icon::DAY_RAIN
        } else {
            icon::NIGHT_RAIN
        }
    } else if description.contains("thunderstorm") {
        icon::THUNDERSTORM
    } else if description.contains("snow") {
        icon::SNOW
    } else if description.contains("drizzle") {
        icon::DRIZZLE
    } else if OBSCURATIONS.iter().any(|kw| description.contains(kw)) {
        if is_daytime {
            icon::DAY_SMOKE
        } else {
            icon::NIGHT_SMOKE
        }
    } else if is_daytime {
        icon::DAY_CLEAR_SKY
    } else {
        icon::NIGHT_CLEAR_SKY
    }
}
