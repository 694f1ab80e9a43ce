//! Occurrence search capability and its OBIS implementation.
//!
//! The aggregator consumes the [`OccurrenceSearch`] trait; [`ObisClient`]
//! implements it against the OBIS v3 occurrence API. Tests substitute mock
//! implementations.

use async_trait::async_trait;
use marine_common::{BoundingBox, UpstreamError, UpstreamResult};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Default base URL for the OBIS v3 API.
pub const OBIS_BASE_URL: &str = "https://api.obis.org/v3";

/// Request timeout for occurrence searches.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// A raw occurrence record as reported upstream.
///
/// All name fields are optional; see [`usable_name`] for how a single
/// species name is extracted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOccurrence {
    #[serde(rename = "scientificName")]
    pub scientific_name: Option<String>,
    pub species: Option<String>,
    #[serde(rename = "vernacularName")]
    pub vernacular_name: Option<String>,
}

/// Trait for services that can search species occurrences in an area.
#[async_trait]
pub trait OccurrenceSearch: Send + Sync {
    /// Return up to `limit` occurrence records inside the bounding box.
    async fn occurrences(
        &self,
        bbox: &BoundingBox,
        limit: usize,
    ) -> UpstreamResult<Vec<RawOccurrence>>;
}

/// Extract the usable species name from a record, if any.
///
/// The first populated field wins (scientific name, then species, then
/// vernacular name) and is trimmed; if the winning field is whitespace-only
/// the record yields no name at all rather than falling through to the
/// next field.
pub fn usable_name(record: &RawOccurrence) -> Option<String> {
    let raw = record
        .scientific_name
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| record.species.as_deref().filter(|s| !s.is_empty()))
        .or_else(|| record.vernacular_name.as_deref().filter(|s| !s.is_empty()))?;

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Extract all usable species names from a batch of records.
pub fn extract_names(records: &[RawOccurrence]) -> Vec<String> {
    records.iter().filter_map(usable_name).collect()
}

#[derive(Debug, Deserialize)]
struct ObisResponse {
    #[serde(default)]
    results: Vec<RawOccurrence>,
}

/// HTTP client for the OBIS v3 occurrence API.
pub struct ObisClient {
    client: Client,
    base_url: String,
}

impl ObisClient {
    /// Client against the public OBIS API.
    pub fn new() -> UpstreamResult<Self> {
        Self::with_base_url(OBIS_BASE_URL)
    }

    /// Client against a custom base URL (stub servers in tests).
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
impl OccurrenceSearch for ObisClient {
    #[instrument(skip(self, bbox))]
    async fn occurrences(
        &self,
        bbox: &BoundingBox,
        limit: usize,
    ) -> UpstreamResult<Vec<RawOccurrence>> {
        let url = format!("{}/occurrence", self.base_url);
        let geometry = bbox.polygon_wkt();

        debug!(url = %url, geometry = %geometry, limit, "Querying occurrence search");

        let response = self
            .client
            .get(&url)
            .query(&[("geometry", geometry.as_str()), ("size", &limit.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status().as_u16()));
        }

        let body: ObisResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(e.to_string()))?;

        info!(count = body.results.len(), "Fetched occurrence records");
        Ok(body.results)
    }
}
