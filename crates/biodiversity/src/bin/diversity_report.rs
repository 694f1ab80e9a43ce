//! Diagnostic CLI: fetch biodiversity metrics for a coordinate and print
//! them as JSON.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use biodiversity::{BiodiversityService, ObisClient, DEFAULT_RADIUS_KM};

#[derive(Parser, Debug)]
#[command(name = "diversity-report")]
#[command(about = "Fetch marine biodiversity metrics for a coordinate")]
struct Args {
    /// Latitude in degrees
    #[arg(long)]
    lat: f64,

    /// Longitude in degrees
    #[arg(long)]
    lon: f64,

    /// Search radius in kilometers
    #[arg(long, default_value_t = DEFAULT_RADIUS_KM)]
    radius_km: f64,

    /// OBIS API base URL
    #[arg(long, env = "OBIS_BASE_URL", default_value = biodiversity::obis::OBIS_BASE_URL)]
    obis_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let client = ObisClient::with_base_url(&args.obis_url)
        .context("Failed to create occurrence search client")?;
    let service = BiodiversityService::new(Arc::new(client));

    let metrics = service
        .diversity_metrics(args.lat, args.lon, args.radius_km)
        .await;

    println!("{}", serde_json::to_string_pretty(&metrics)?);
    Ok(())
}
