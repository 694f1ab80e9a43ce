//! Biodiversity aggregation service.
//!
//! Orchestrates the occurrence search, diversity calculator, TTL cache and
//! fallback simulator:
//! - Cache hit short-circuits the whole pipeline
//! - Upstream failure degrades to simulated output (not cached, so a later
//!   request retries live)
//! - A well-formed response with zero usable names is treated as a stable
//!   negative result: simulated output, cached for the TTL
//! - Live data is normalized, computed and cached
//!
//! Requests for the same cache key are serialized through a per-key mutex,
//! so concurrent callers cannot race a lost update or fetch upstream twice.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use marine_common::BoundingBox;
use serde::{Deserialize, Serialize};

use crate::cache::{cache_key, MetricsCache};
use crate::diversity::{self, DiversityMetrics};
use crate::obis::{self, OccurrenceSearch};
use crate::simulate::Simulator;

/// Default search radius in kilometers.
pub const DEFAULT_RADIUS_KM: f64 = 50.0;

/// Result-size cap for occurrence searches.
pub const MAX_RESULTS: usize = 500;

/// Species-centric view of a diversity result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesList {
    pub species: Vec<String>,
    pub total_records: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Aggregates species occurrences into biodiversity statistics for an area.
pub struct BiodiversityService {
    search: Arc<dyn OccurrenceSearch>,
    cache: MetricsCache,
    simulator: Simulator,
    key_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl BiodiversityService {
    /// Service with the default cache TTL and an entropy-seeded simulator.
    pub fn new(search: Arc<dyn OccurrenceSearch>) -> Self {
        Self::with_parts(search, MetricsCache::new(), Simulator::new())
    }

    /// Service assembled from explicit parts (custom TTL, seeded simulator).
    pub fn with_parts(
        search: Arc<dyn OccurrenceSearch>,
        cache: MetricsCache,
        simulator: Simulator,
    ) -> Self {
        Self {
            search,
            cache,
            simulator,
            key_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Borrow the cache, mainly for stats inspection.
    pub fn cache(&self) -> &MetricsCache {
        &self.cache
    }

    /// Fetch biodiversity metrics for an area, never failing.
    ///
    /// Every failure path yields a well-formed simulated result carrying a
    /// `note` with the cause; see the module docs for which outcomes are
    /// cached.
    pub async fn diversity_metrics(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
    ) -> DiversityMetrics {
        let key = cache_key(lat, lon, radius_km);

        // Serialize same-key callers: one computes, the rest hit the cache.
        let key_lock = self.key_lock(&key).await;
        let _guard = key_lock.lock().await;

        if let Some(hit) = self.cache.get(&key).await {
            debug!(key = %key, "Serving metrics from cache");
            return hit;
        }

        let bbox = BoundingBox::from_center(lat, lon, radius_km);
        let records = match self.search.occurrences(&bbox, MAX_RESULTS).await {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, lat, lon, "Occurrence search failed, simulating");
                return self.simulator.simulate(Some(&err.to_string()));
            }
        };

        let names = obis::extract_names(&records);
        if names.is_empty() {
            debug!(lat, lon, radius_km, "No usable occurrence records, simulating");
            let out = self
                .simulator
                .simulate(Some("no occurrence records in area"));
            self.cache.set(&key, out.clone()).await;
            return out;
        }

        let metrics = diversity::compute(&names);
        self.cache.set(&key, metrics.clone()).await;
        metrics
    }

    /// Fetch metrics at the default 50 km radius.
    pub async fn diversity_metrics_default(&self, lat: f64, lon: f64) -> DiversityMetrics {
        self.diversity_metrics(lat, lon, DEFAULT_RADIUS_KM).await
    }

    /// Species-list view over the same fetch path (and the same cache).
    pub async fn species_list(&self, lat: f64, lon: f64) -> SpeciesList {
        let metrics = self.diversity_metrics_default(lat, lon).await;
        SpeciesList {
            species: metrics.species,
            total_records: metrics.total_records,
            note: metrics.note,
        }
    }

    async fn key_lock(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.key_locks.lock().await;
        locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
