//! # Moon Ephemeris Command-Line Entry Point
//!
//! Loads the observer from `moon-config.toml` (or `--config`), computes the
//! ephemeris for now (or `--at`), and prints either a text report or JSON.
//!
//! Library diagnostics go to stderr through `env_logger`; `RUST_LOG` raises
//! the level above the default `warn`.

// Test modules
#[cfg(test)]
mod tests;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use moon_ephem_lib::{compute_at, config::Config, report::Report, Observer};
use std::path::PathBuf;

/// Sun and Moon positions, lunar phase and age for an observer
#[derive(Parser, Debug, PartialEq)]
#[command(name = "moon-ephemeris")]
#[command(version)]
struct Options {
    /// Config file to use instead of moon-config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Instant to compute, RFC 3339 (defaults to now); offsets convert to UTC
    #[arg(long, value_parser = parse_instant)]
    at: Option<DateTime<Utc>>,

    /// Observer latitude in degrees, north positive
    #[arg(long = "lat", allow_negative_numbers = true)]
    latitude: Option<f64>,

    /// Observer longitude in degrees, west positive
    #[arg(long = "lon", allow_negative_numbers = true)]
    longitude: Option<f64>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|instant| instant.with_timezone(&Utc))
}

/// Install the stderr logger, showing warnings unless `RUST_LOG` says otherwise.
fn init_logger() {
    let env = env_logger::Env::default().default_filter_or("warn");
    // Already installed is fine; the first logger wins
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Observer from the config, with command-line overrides applied.
fn resolve_observer(config: &Config, options: &Options) -> anyhow::Result<Observer> {
    let latitude = options.latitude.unwrap_or(config.observer.latitude);
    let longitude = options.longitude.unwrap_or(config.observer.longitude);
    Observer::new(latitude, longitude).context("invalid observer location")
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    init_logger();
    let options = Options::parse();

    // An explicit config path must load; the default one may be absent
    let config = match &options.config {
        Some(path) => Config::try_load_from_path(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load(),
    };

    let observer = resolve_observer(&config, &options)?;
    let instant = options.at.unwrap_or_else(Utc::now);
    let ephemeris = compute_at(instant, &observer);

    if options.json || config.output.json {
        println!("{}", serde_json::to_string_pretty(&ephemeris)?);
    } else {
        eprintln!(
            "Ephemeris for {} at {}",
            config.observer.name,
            instant.to_rfc3339()
        );
        println!("{}", Report(&ephemeris));
    }

    Ok(())
}
