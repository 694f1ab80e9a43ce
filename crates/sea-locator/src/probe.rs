//! Marine sea-surface-temperature probe and its Open-Meteo implementation.
//!
//! A coordinate counts as "sea" when the probe reports at least one
//! non-null hourly SST sample for it.

use async_trait::async_trait;
use marine_common::{UpstreamError, UpstreamResult};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default base URL for the Open-Meteo marine API.
pub const OPEN_METEO_MARINE_URL: &str = "https://marine-api.open-meteo.com/v1/marine";

/// Request timeout for a single probe.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Trait for services that can report sea-surface temperatures at a point.
#[async_trait]
pub trait SeaSurfaceProbe: Send + Sync {
    /// Hourly SST samples at the coordinate; entries may be null.
    async fn hourly_sst(&self, lat: f64, lon: f64) -> UpstreamResult<Vec<Option<f64>>>;
}

#[derive(Debug, Deserialize)]
struct MarineResponse {
    #[serde(default)]
    hourly: Option<MarineHourly>,
}

#[derive(Debug, Deserialize)]
struct MarineHourly {
    #[serde(default)]
    sea_surface_temperature: Vec<Option<f64>>,
}

/// HTTP client for the Open-Meteo marine API.
pub struct OpenMeteoProbe {
    client: Client,
    base_url: String,
}

impl OpenMeteoProbe {
    /// Probe against the public Open-Meteo marine API.
    pub fn new() -> UpstreamResult<Self> {
        Self::with_base_url(OPEN_METEO_MARINE_URL)
    }

    /// Probe against a custom base URL (stub servers in tests).
    pub fn with_base_url(base_url: impl Into<String>) -> UpstreamResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl SeaSurfaceProbe for OpenMeteoProbe {
    #[instrument(skip(self))]
    async fn hourly_sst(&self, lat: f64, lon: f64) -> UpstreamResult<Vec<Option<f64>>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("hourly", "sea_surface_temperature".to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status().as_u16()));
        }

        let body: MarineResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(e.to_string()))?;

        let samples = body
            .hourly
            .map(|h| h.sea_surface_temperature)
            .unwrap_or_default();

        debug!(lat, lon, samples = samples.len(), "Probed sea surface temperature");
        Ok(samples)
    }
}
