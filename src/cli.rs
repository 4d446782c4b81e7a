//! Command-line interface parsing for Skycast
//!
//! This module handles parsing of CLI arguments using clap: the coordinates
//! to fetch a forecast for, the API key (flag or environment variable), and
//! which of the two forecast views to print.

use clap::Parser;
use thiserror::Error;

/// Environment variable consulted when no --api-key flag is given
pub const API_KEY_ENV: &str = "SKYCAST_API_KEY";

/// Error types for CLI argument validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    /// Neither the flag nor the environment variable supplied a key
    #[error("No API key: pass --api-key or set {API_KEY_ENV}")]
    MissingApiKey,

    /// A coordinate is outside its valid range
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

/// Skycast - hourly timeline and weekly summary from a forecast feed
#[derive(Parser, Debug)]
#[command(name = "skycast")]
#[command(about = "Hourly and weekly weather forecast for a coordinate")]
#[command(version)]
pub struct Cli {
    /// Latitude of the location, decimal degrees (-90 to 90)
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude of the location, decimal degrees (-180 to 180)
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// OpenWeatherMap API key; falls back to SKYCAST_API_KEY
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Print only the 24-hour timeline
    #[arg(long, conflicts_with = "weekly")]
    pub hourly: bool,

    /// Print only the weekly summary
    #[arg(long, conflicts_with = "hourly")]
    pub weekly: bool,
}

/// Validated configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Latitude passed on the command line
    pub latitude: f64,
    /// Longitude passed on the command line
    pub longitude: f64,
    /// Resolved API key
    pub api_key: String,
    /// Whether to print the hourly timeline
    pub show_hourly: bool,
    /// Whether to print the weekly summary
    pub show_weekly: bool,
}

impl StartupConfig {
    /// Validates parsed CLI arguments into a startup configuration.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    /// * `env_api_key` - Value of the API key environment variable, if set
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with coordinates checked and the key resolved
    /// * `Err(CliError)` when a coordinate is out of range or no key exists
    pub fn from_cli(cli: &Cli, env_api_key: Option<String>) -> Result<Self, CliError> {
        if !(-90.0..=90.0).contains(&cli.lat) {
            return Err(CliError::InvalidCoordinate(format!(
                "latitude {} is outside -90..=90",
                cli.lat
            )));
        }
        if !(-180.0..=180.0).contains(&cli.lon) {
            return Err(CliError::InvalidCoordinate(format!(
                "longitude {} is outside -180..=180",
                cli.lon
            )));
        }

        let api_key = cli
            .api_key
            .clone()
            .or(env_api_key)
            .filter(|key| !key.is_empty())
            .ok_or(CliError::MissingApiKey)?;

        // No view flag means both views
        let (show_hourly, show_weekly) = match (cli.hourly, cli.weekly) {
            (false, false) => (true, true),
            views => views,
        };

        Ok(StartupConfig {
            latitude: cli.lat,
            longitude: cli.lon,
            api_key,
            show_hourly,
            show_weekly,
        })
    }
}
