//! Daily forecast aggregation
//!
//! Reduces the full multi-day feed into one record per weekday for the
//! weekly chart: forecast slots are grouped by local calendar day and part
//! of day, each bucket is reduced to a single temperature, icon and set of
//! auxiliary metrics, and the two part-of-day series are reconciled into a
//! single ordered weekday sequence.
//!
//! Unlike the hourly interpolator this pipeline is best-effort: gap-ridden
//! or single-day feeds still produce whatever summaries their data allows,
//! and only an irreconcilable weekday offset is surfaced as an error.

use chrono::{DateTime, Datelike, FixedOffset};
use thiserror::Error;

use crate::align::{align_weekdays, AlignmentError};
use crate::data::{kelvin_to_celsius, AuxMetrics, DailySummary, DayPart, ForecastEntry};
use crate::icons::classify_icon;

/// Errors raised by the daily aggregator
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DailyError {
    /// The day-time and night-time weekday series cannot be reconciled
    #[error(transparent)]
    Alignment(#[from] AlignmentError),
}

/// How a bucket of metric samples collapses to one value
#[derive(Debug, Clone, Copy)]
enum Reduce {
    /// Arithmetic mean of the samples
    Mean,
    /// Largest sample
    Max,
}

/// One calendar day's reduced forecast for a single part of day
#[derive(Debug, Clone)]
struct PartSummary {
    weekday: String,
    temperature: i32,
    icon: &'static str,
    metrics: AuxMetrics,
}

/// Aggregates the multi-day feed into one `DailySummary` per weekday.
///
/// Calendar days are identified by local day-of-month in first-seen order;
/// the feed spans at most a week, so day numbers cannot collide. A day with
/// slots for only one part of day yields a summary with the other side
/// `None` — absent buckets are dropped, never zero-filled. Temperatures are
/// additionally baseline-shifted for charting when the whole sequence is
/// strictly positive.
///
/// # Errors
/// * `DailyError::Alignment` when the two part-of-day weekday series are
///   offset in a way no alignment rule covers
pub fn aggregate_daily(
    entries: &[ForecastEntry],
    utc_offset: FixedOffset,
) -> Result<Vec<DailySummary>, DailyError> {
    let day_series = reduce_part(entries, utc_offset, DayPart::Day);
    let night_series = reduce_part(entries, utc_offset, DayPart::Night);

    let day_weekdays: Vec<String> = day_series.iter().map(|s| s.weekday.clone()).collect();
    let night_weekdays: Vec<String> = night_series.iter().map(|s| s.weekday.clone()).collect();

    // A one-sided feed has nothing to align; the populated series wins.
    let aligned = if day_weekdays.is_empty() {
        night_weekdays
    } else if night_weekdays.is_empty() {
        day_weekdays
    } else {
        align_weekdays(&day_weekdays, &night_weekdays)?
    };

    let mut summaries: Vec<DailySummary> = aligned
        .into_iter()
        .map(|weekday| {
            let day = day_series.iter().find(|s| s.weekday == weekday);
            let night = night_series.iter().find(|s| s.weekday == weekday);
            DailySummary {
                day_temp: day.map(|s| s.temperature),
                altered_day_temp: day.map(|s| s.temperature),
                day_icon: day.map(|s| s.icon.to_string()),
                night_temp: night.map(|s| s.temperature),
                altered_night_temp: night.map(|s| s.temperature),
                night_icon: night.map(|s| s.icon.to_string()),
                metrics: day.map(|s| s.metrics).or_else(|| night.map(|s| s.metrics)),
                weekday,
            }
        })
        .collect();

    normalize_for_chart(&mut summaries);

    Ok(summaries)
}

/// Reduces every calendar day's bucket for one part of day.
///
/// Day-time buckets keep the maximum of the slots' `temp_max`; night-time
/// buckets keep the minimum of the slots' `temp_min`. The weekday label and
/// the representative description come from the bucket's first slot. Days
/// without a bucket for this part are skipped entirely.
fn reduce_part(
    entries: &[ForecastEntry],
    utc_offset: FixedOffset,
    part: DayPart,
) -> Vec<PartSummary> {
    let mut summaries = Vec::new();

    for day in distinct_days(entries, utc_offset) {
        let bucket: Vec<&ForecastEntry> = entries
            .iter()
            .filter(|e| e.day_part == part && local_day(e.timestamp, utc_offset) == day)
            .collect();

        let Some(first) = bucket.first() else {
            continue;
        };

        let temperatures = bucket.iter().map(|e| match part {
            DayPart::Day => kelvin_to_celsius(e.temp_max),
            DayPart::Night => kelvin_to_celsius(e.temp_min),
        });
        let Some(temperature) = (match part {
            DayPart::Day => temperatures.max(),
            DayPart::Night => temperatures.min(),
        }) else {
            continue;
        };

        summaries.push(PartSummary {
            weekday: local_weekday(first.timestamp, utc_offset),
            temperature,
            // Night buckets keep the daytime icon variants on purpose: the
            // weekly chart restyles icons by part of day itself.
            icon: classify_icon(&first.description, true),
            metrics: reduce_metrics(&bucket),
        });
    }

    summaries
}

/// Collapses a bucket's auxiliary samples per the metric reduction table.
fn reduce_metrics(bucket: &[&ForecastEntry]) -> AuxMetrics {
    let field = |extract: fn(&ForecastEntry) -> f64, how: Reduce| -> f64 {
        let samples: Vec<f64> = bucket.iter().map(|e| extract(e)).collect();
        reduce(&samples, how)
    };

    AuxMetrics {
        humidity: field(|e| f64::from(e.humidity), Reduce::Mean),
        pressure: field(|e| f64::from(e.pressure_hpa), Reduce::Mean),
        wind_speed: field(|e| e.wind_speed_ms, Reduce::Mean),
        visibility: field(|e| f64::from(e.visibility_m), Reduce::Mean),
        cloudiness: field(|e| f64::from(e.cloudiness_pct), Reduce::Max),
        precipitation_chance: field(|e| e.rain_volume_3h.unwrap_or(0.0), Reduce::Max),
    }
}

/// Applies one reduction to a non-empty sample slice.
fn reduce(samples: &[f64], how: Reduce) -> f64 {
    match how {
        Reduce::Mean => samples.iter().sum::<f64>() / samples.len() as f64,
        Reduce::Max => samples.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}

/// Baseline-shifts the chart temperatures when every value is strictly
/// positive, so the lowest point of the weekly chart sits at zero.
fn normalize_for_chart(summaries: &mut [DailySummary]) {
    let temperatures: Vec<i32> = summaries
        .iter()
        .flat_map(|s| [s.day_temp, s.night_temp])
        .flatten()
        .collect();

    if temperatures.is_empty() || temperatures.iter().any(|&t| t <= 0) {
        return;
    }
    let Some(baseline) = temperatures.into_iter().min() else {
        return;
    };

    for summary in summaries {
        summary.altered_day_temp = summary.day_temp.map(|t| t - baseline);
        summary.altered_night_temp = summary.night_temp.map(|t| t - baseline);
    }
}

/// Distinct local day-of-month identifiers in first-seen order.
///
/// Day numbers are only unique within the feed's 5-7 day span; that is
/// enough, and it matches how slots are keyed upstream.
fn distinct_days(entries: &[ForecastEntry], utc_offset: FixedOffset) -> Vec<u32> {
    let mut days = Vec::new();
    for entry in entries {
        let day = local_day(entry.timestamp, utc_offset);
        if !days.contains(&day) {
            days.push(day);
        }
    }
    days
}

/// Local day-of-month for an epoch timestamp.
fn local_day(timestamp: i64, utc_offset: FixedOffset) -> u32 {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.with_timezone(&utc_offset).day())
        .unwrap_or(0)
}

/// Short local weekday label ("Mon") for an epoch timestamp.
fn local_weekday(timestamp: i64, utc_offset: FixedOffset) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.with_timezone(&utc_offset).format("%a").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).expect("zero offset is valid")
    }

    /// Forecast entry builder for aggregation tests; `temp` feeds both the
    /// min and max Kelvin fields.
    #[allow(clippy::too_many_arguments)]
    fn entry(
        timestamp: i64,
        temp: f64,
        description: &str,
        day_part: DayPart,
        humidity: u8,
        pressure: i32,
        wind: f64,
        cloudiness: u8,
        rain: Option<f64>,
    ) -> ForecastEntry {
        ForecastEntry {
            timestamp,
            temp_min: temp,
            temp_max: temp,
            temp_current: temp,
            humidity,
            pressure_hpa: pressure,
            wind_speed_ms: wind,
            visibility_m: 10000,
            cloudiness_pct: cloudiness,
            precipitation_chance: 0.0,
            rain_volume_3h: rain,
            description: description.to_string(),
            day_part,
        }
    }

    fn plain(timestamp: i64, temp: f64, description: &str, day_part: DayPart) -> ForecastEntry {
        entry(timestamp, temp, description, day_part, 70, 1015, 3.0, 40, None)
    }

    /// Monday 2024-01-15, three night slots then three day slots.
    fn single_day_feed() -> Vec<ForecastEntry> {
        vec![
            // Night: 00:00, 03:00, 06:00 UTC; minima 2, 4, 3 °C
            entry(1705276800, 275.15, "clear sky", DayPart::Night, 90, 1020, 2.0, 10, None),
            entry(1705287600, 277.15, "clear sky", DayPart::Night, 85, 1021, 2.5, 15, None),
            entry(1705298400, 276.15, "clear sky", DayPart::Night, 95, 1019, 1.5, 5, None),
            // Day: 09:00, 12:00, 15:00 UTC; maxima 10, 12, 11 °C
            entry(1705309200, 283.15, "few clouds", DayPart::Day, 60, 1000, 2.0, 20, None),
            entry(1705320000, 285.15, "few clouds", DayPart::Day, 70, 1010, 3.0, 80, Some(0.5)),
            entry(1705330800, 284.15, "few clouds", DayPart::Day, 80, 1020, 4.0, 50, Some(0.2)),
        ]
    }

    /// Sunday evening through Wednesday: the first night belongs to a day
    /// with no day-time slots, the last day has no night-time slots.
    fn offset_week_feed() -> Vec<ForecastEntry> {
        vec![
            plain(1705266000, 268.15, "light snow", DayPart::Night), // Sun 21:00
            plain(1705320000, 274.15, "few clouds", DayPart::Day),   // Mon 12:00
            plain(1705352400, 270.15, "clear sky", DayPart::Night),  // Mon 21:00
            plain(1705406400, 275.15, "light rain", DayPart::Day),   // Tue 12:00
            plain(1705438800, 271.15, "clear sky", DayPart::Night),  // Tue 21:00
            plain(1705492800, 276.15, "clear sky", DayPart::Day),    // Wed 12:00
        ]
    }

    #[test]
    fn test_empty_feed_produces_no_summaries() {
        let summaries = aggregate_daily(&[], utc()).expect("empty feed is not an error");
        assert!(summaries.is_empty());
    }

    #[test]
    fn test_day_bucket_reduces_maximum_night_bucket_minimum() {
        let summaries = aggregate_daily(&single_day_feed(), utc()).expect("valid feed");
        assert_eq!(summaries.len(), 1);

        let monday = &summaries[0];
        assert_eq!(monday.weekday, "Mon");
        assert_eq!(monday.day_temp, Some(12));
        assert_eq!(monday.night_temp, Some(2));
    }

    #[test]
    fn test_positive_temperatures_are_baseline_shifted() {
        let summaries = aggregate_daily(&single_day_feed(), utc()).expect("valid feed");

        // All temps strictly positive: minimum (2) becomes the zero line
        let monday = &summaries[0];
        assert_eq!(monday.altered_day_temp, Some(10));
        assert_eq!(monday.altered_night_temp, Some(0));
    }

    #[test]
    fn test_mixed_sign_temperatures_pass_through_unaltered() {
        let summaries = aggregate_daily(&offset_week_feed(), utc()).expect("valid feed");
        for summary in &summaries {
            assert_eq!(summary.altered_day_temp, summary.day_temp);
            assert_eq!(summary.altered_night_temp, summary.night_temp);
        }
    }

    #[test]
    fn test_metric_reduction_table() {
        let summaries = aggregate_daily(&single_day_feed(), utc()).expect("valid feed");
        let metrics = summaries[0].metrics.expect("day bucket carries metrics");

        // Day bucket preferred: means over its three slots, maxima likewise
        assert!((metrics.humidity - 70.0).abs() < 1e-9);
        assert!((metrics.pressure - 1010.0).abs() < 1e-9);
        assert!((metrics.wind_speed - 3.0).abs() < 1e-9);
        assert!((metrics.visibility - 10000.0).abs() < 1e-9);
        assert!((metrics.cloudiness - 80.0).abs() < 1e-9);
        assert!((metrics.precipitation_chance - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_leading_night_yields_night_only_summary() {
        let summaries = aggregate_daily(&offset_week_feed(), utc()).expect("valid feed");

        let weekdays: Vec<&str> = summaries.iter().map(|s| s.weekday.as_str()).collect();
        assert_eq!(weekdays, ["Sun", "Mon", "Tue", "Wed"]);

        let sunday = &summaries[0];
        assert_eq!(sunday.day_temp, None);
        assert_eq!(sunday.day_icon, None);
        assert_eq!(sunday.night_temp, Some(-5));
        assert!(
            sunday.metrics.is_some(),
            "night bucket metrics should back-fill a day-less date"
        );
    }

    #[test]
    fn test_trailing_day_yields_day_only_summary() {
        let summaries = aggregate_daily(&offset_week_feed(), utc()).expect("valid feed");

        let wednesday = summaries.last().expect("non-empty");
        assert_eq!(wednesday.weekday, "Wed");
        assert_eq!(wednesday.day_temp, Some(3));
        assert_eq!(wednesday.night_temp, None);
        assert_eq!(wednesday.night_icon, None);
    }

    #[test]
    fn test_representative_icons_use_daytime_variants() {
        let summaries = aggregate_daily(&offset_week_feed(), utc()).expect("valid feed");

        let monday = &summaries[1];
        assert_eq!(monday.day_icon.as_deref(), Some("cloud.sun.fill"));
        // Night "clear sky" maps to the daytime icon; the chart restyles it
        assert_eq!(monday.night_icon.as_deref(), Some("sun.max.fill"));

        let sunday = &summaries[0];
        assert_eq!(sunday.night_icon.as_deref(), Some("snowflake"));
    }

    #[test]
    fn test_irreconcilable_weekday_series_is_an_error() {
        // Monday has only day slots, Thursday only night slots
        let feed = vec![
            plain(1705320000, 274.15, "clear sky", DayPart::Day), // Mon 12:00
            plain(1705611600, 270.15, "clear sky", DayPart::Night), // Thu 21:00
        ];
        let result = aggregate_daily(&feed, utc());
        assert!(
            matches!(result, Err(DailyError::Alignment(_))),
            "expected alignment error, got {:?}",
            result
        );
    }

    #[test]
    fn test_one_sided_feed_needs_no_alignment() {
        // Day-time slots only, across two days
        let feed = vec![
            plain(1705320000, 274.15, "clear sky", DayPart::Day), // Mon 12:00
            plain(1705406400, 275.15, "clear sky", DayPart::Day), // Tue 12:00
        ];
        let summaries = aggregate_daily(&feed, utc()).expect("valid feed");
        let weekdays: Vec<&str> = summaries.iter().map(|s| s.weekday.as_str()).collect();
        assert_eq!(weekdays, ["Mon", "Tue"]);
        assert!(summaries.iter().all(|s| s.night_temp.is_none()));
    }

    #[test]
    fn test_weekdays_are_deduplicated_and_chronological() {
        let summaries = aggregate_daily(&single_day_feed(), utc()).expect("valid feed");
        let mut seen = std::collections::HashSet::new();
        for summary in &summaries {
            assert!(
                seen.insert(summary.weekday.clone()),
                "weekday {} appears twice",
                summary.weekday
            );
        }
    }
}
