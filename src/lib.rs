//! Skycast library
//!
//! Forecast aggregation and interpolation engine: turns a sparse 3-hour
//! multi-day forecast feed into a dense 24-point hourly timeline and a
//! day/night-bucketed weekly summary. Exposed as a library so integration
//! tests (and any other front end) can drive the pipelines directly.

pub mod align;
pub mod cli;
pub mod daily;
pub mod data;
pub mod hourly;
pub mod icons;
pub mod location;
