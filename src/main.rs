//! Skycast - hourly and weekly weather forecast for a coordinate
//!
//! Orchestration only: parse arguments, resolve a location, fetch the
//! forecast feed, run the two aggregation pipelines and print their output.
//! All computation lives in the library modules.

mod align;
mod cli;
mod daily;
mod data;
mod hourly;
mod icons;
mod location;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, StartupConfig, API_KEY_ENV};
use daily::aggregate_daily;
use data::{DailySummary, FeedClient, HourlyPoint};
use hourly::interpolate_hourly;
use location::{Coordinates, FixedLocation, LocationProvider};

#[tokio::main]
async fn main() -> ExitCode {
    // Warnings (e.g. an anomalous weekday offset in the feed) are visible
    // by default; RUST_LOG overrides.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli, std::env::var(API_KEY_ENV).ok()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let provider = FixedLocation(Coordinates {
        latitude: config.latitude,
        longitude: config.longitude,
    });

    match run(&config, &provider).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Fetches the feed and prints the requested views.
async fn run(
    config: &StartupConfig,
    provider: &dyn LocationProvider,
) -> Result<(), Box<dyn std::error::Error>> {
    let coords = provider.resolve()?;

    let client = FeedClient::new(config.api_key.clone());
    let feed = client
        .fetch_forecast(coords.latitude, coords.longitude)
        .await?;

    if config.show_hourly {
        let timeline = interpolate_hourly(&feed.entries, feed.utc_offset)?;
        print_hourly(&timeline);
    }

    if config.show_weekly {
        let summaries = aggregate_daily(&feed.entries, feed.utc_offset)?;
        if config.show_hourly {
            println!();
        }
        print_weekly(&summaries);
    }

    Ok(())
}

/// Prints the 24-hour timeline, one hour per line.
fn print_hourly(timeline: &[HourlyPoint]) {
    println!("HOURLY FORECAST");
    for point in timeline {
        println!(
            "  {}:00  {:>4}°C  {}",
            point.hour, point.temperature, point.icon
        );
    }
}

/// Prints the weekly summary, one weekday per line plus the metrics of the
/// first day.
fn print_weekly(summaries: &[DailySummary]) {
    println!("WEEKLY FORECAST");
    for summary in summaries {
        let day = format_side(summary.day_temp, summary.day_icon.as_deref());
        let night = format_side(summary.night_temp, summary.night_icon.as_deref());
        println!("  {:<4} day {:<28} night {}", summary.weekday, day, night);
    }

    if let Some(metrics) = summaries.first().and_then(|s| s.metrics) {
        println!();
        println!("  Humidity      {:>6.0} %", metrics.humidity);
        println!("  Pressure      {:>6.0} hPa", metrics.pressure);
        println!("  Wind speed    {:>6.2} m/s", metrics.wind_speed);
        println!("  Visibility    {:>6.0} m", metrics.visibility);
        println!("  Cloudiness    {:>6.0} %", metrics.cloudiness);
        println!("  Precipitation {:>6.2} mm", metrics.precipitation_chance);
    }
}

/// Formats one part-of-day side of a weekly row, or a dash when absent.
fn format_side(temp: Option<i32>, icon: Option<&str>) -> String {
    match (temp, icon) {
        (Some(temp), Some(icon)) => format!("{:>4}°C  {}", temp, icon),
        _ => "   -".to_string(),
    }
}
