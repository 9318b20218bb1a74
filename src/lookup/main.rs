//! Command-line building lookup.
//!
//! Fetches the buildings around a campus anchor and prints the best match
//! for a building name as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use campus_geocoder::{BuildingRecord, CampusGeocoder, GeocoderConfig};

#[derive(Parser, Debug)]
#[command(name = "lookup")]
#[command(about = "Resolve a campus building name to coordinates using OSM")]
struct Args {
    /// Building name to look up
    #[arg(required_unless_present = "list")]
    name: Option<String>,

    /// Latitude of a known point on campus
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude of a known point on campus
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Search radius in meters (overrides config)
    #[arg(long)]
    radius: Option<u32>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print every indexed building instead of matching
    #[arg(long)]
    list: bool,
}

#[derive(Serialize)]
struct IndexEntry<'a> {
    key: &'a str,
    #[serde(flatten)]
    building: &'a BuildingRecord,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GeocoderConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GeocoderConfig::default(),
    };
    if let Some(radius) = args.radius {
        config.radius_m = radius;
    }

    info!(
        "Looking up buildings within {}m of ({}, {})",
        config.radius_m, args.lat, args.lon
    );

    let mut geocoder =
        CampusGeocoder::from_config(&config).context("Failed to create geocoder")?;

    if args.list {
        let index = geocoder.get_campus_buildings(args.lat, args.lon).await;
        let entries: Vec<IndexEntry> = index
            .iter()
            .map(|(key, building)| IndexEntry { key, building })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let name = args.name.unwrap_or_default();
    let result = geocoder.osm_geocode(&name, args.lat, args.lon).await;
    if result.is_none() {
        info!("No match for '{}'", name);
    }
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
