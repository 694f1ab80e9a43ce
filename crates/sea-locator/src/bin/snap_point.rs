//! Diagnostic CLI: snap a coordinate to the nearest sea point and print it.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sea_locator::{OpenMeteoProbe, SeaLocator, DEFAULT_MAX_OFFSET_DEG, DEFAULT_STEP_DEG};

#[derive(Parser, Debug)]
#[command(name = "snap-point")]
#[command(about = "Snap a coordinate to the nearest point with marine SST data")]
struct Args {
    /// Latitude in degrees
    #[arg(long)]
    lat: f64,

    /// Longitude in degrees
    #[arg(long)]
    lon: f64,

    /// Maximum offset from the starting point, in degrees
    #[arg(long, default_value_t = DEFAULT_MAX_OFFSET_DEG)]
    max_offset: f64,

    /// Grid step in degrees
    #[arg(long, default_value_t = DEFAULT_STEP_DEG)]
    step: f64,

    /// Marine API base URL
    #[arg(long, env = "MARINE_API_URL", default_value = sea_locator::OPEN_METEO_MARINE_URL)]
    marine_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let probe =
        OpenMeteoProbe::with_base_url(&args.marine_url).context("Failed to create SST probe")?;
    let locator = SeaLocator::with_grid(Arc::new(probe), args.max_offset, args.step);

    let snapped = locator.snap_to_sea(args.lat, args.lon).await;
    println!("{}", serde_json::to_string_pretty(&snapped)?);
    Ok(())
}
