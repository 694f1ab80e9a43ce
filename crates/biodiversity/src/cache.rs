//! In-memory TTL cache for computed diversity metrics.
//!
//! ## Cache Key Structure
//! Keys quantize latitude/longitude to 6 decimal places and the radius to an
//! integer, so sub-microdegree jitter between requests lands on one slot.
//!
//! ## Eviction Strategy
//! TTL-based expiration on read (lazy). There is no capacity bound; the key
//! space is the set of coordinates actually queried, and unbounded growth is
//! an accepted limitation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::diversity::DiversityMetrics;

/// Default time-to-live for cached metrics: one hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Build the cache key for a metrics query.
pub fn cache_key(lat: f64, lon: f64, radius_km: f64) -> String {
    format!("biodiv:{:.6}:{:.6}:{}", lat, lon, radius_km as i64)
}

struct CacheEntry {
    value: DiversityMetrics,
    stored_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() > ttl
    }
}

/// Counters for cache behavior, readable without locking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub expired: u64,
    pub entries: usize,
}

/// Shared TTL cache mapping coordinate keys to diversity metrics.
pub struct MetricsCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
    expired: AtomicU64,
}

impl MetricsCache {
    /// Create a cache with the default one-hour TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Create a cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            expired: AtomicU64::new(0),
        }
    }

    /// Look up a cached value, evicting it first if it has outlived the TTL.
    pub async fn get(&self, key: &str) -> Option<DiversityMetrics> {
        let mut entries = self.entries.write().await;

        match entries.get(key) {
            Some(entry) if entry.is_expired(self.ttl) => {
                entries.remove(key);
                self.expired.fetch_add(1, Ordering::Relaxed);
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store a value, replacing any previous entry for the key.
    pub async fn set(&self, key: &str, value: DiversityMetrics) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Snapshot of cache counters.
    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
            entries: self.entries.read().await.len(),
        }
    }
}

impl Default for MetricsCache {
    fn default() -> Self {
        Self::new()
    }
}
