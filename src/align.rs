//! Weekday alignment for the two part-of-day summary lists
//!
//! The daily aggregator builds its day-time and night-time weekday lists
//! independently, and a feed whose first slots fall before dawn (or after
//! dusk) leaves the two lists offset by one entry at the start. This module
//! reconciles them into the single ordered weekday sequence the weekly
//! chart iterates over.

use thiserror::Error;

/// Errors raised when the two weekday lists cannot be reconciled
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlignmentError {
    /// No alignment rule matched; the feed's day structure is inconsistent
    #[error("Day-time weekdays {day:?} and night-time weekdays {night:?} cannot be aligned")]
    Unalignable {
        /// Day-time weekday list as received
        day: Vec<String>,
        /// Night-time weekday list as received
        night: Vec<String>,
    },
}

/// Reconciles the day-time and night-time weekday lists into one sequence.
///
/// Both inputs must be non-empty, order-preserving and deduplicated. The
/// lists may be offset by at most one entry at the start:
///
/// * equal first entries: the longer list wins (day list on ties);
/// * the night list leads by one (its first entry is "yesterday" evening):
///   that entry is prepended to the day list;
/// * the day list leads by one: its first entry is prepended to the night
///   list; this shape should not occur with a well-formed feed, so it is
///   reported as a warning while still producing a result;
/// * anything else is a data-consistency error.
pub fn align_weekdays(day: &[String], night: &[String]) -> Result<Vec<String>, AlignmentError> {
    let unalignable = || AlignmentError::Unalignable {
        day: day.to_vec(),
        night: night.to_vec(),
    };

    let (day_first, night_first) = match (day.first(), night.first()) {
        (Some(d), Some(n)) => (d, n),
        _ => return Err(unalignable()),
    };

    if day_first == night_first {
        if day.len() >= night.len() {
            Ok(day.to_vec())
        } else {
            Ok(night.to_vec())
        }
    } else if Some(day_first) == night.get(1) {
        // The first night belongs to the day before the first full day
        let mut aligned = Vec::with_capacity(day.len() + 1);
        aligned.push(night_first.clone());
        aligned.extend(day.iter().cloned());
        Ok(aligned)
    } else if day.get(1) == Some(night_first) {
        // Mirrored offset; not expected from a well-formed feed but kept as
        // a recoverable path, reported so it can be spotted in the field.
        tracing::warn!(
            day = ?day,
            night = ?night,
            "day-time weekdays lead night-time weekdays by one entry"
        );
        let mut aligned = Vec::with_capacity(night.len() + 1);
        aligned.push(day_first.clone());
        aligned.extend(night.iter().cloned());
        Ok(aligned)
    } else {
        Err(unalignable())
    }
}
