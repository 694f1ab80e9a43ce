//! Marine species-occurrence aggregation and diversity statistics.
//!
//! Key pieces:
//! - [`diversity::compute`]: pure richness / Shannon-index calculation
//! - [`cache::MetricsCache`]: shared TTL cache for computed results
//! - [`simulate::Simulator`]: schema-valid fallback when live data fails
//! - [`obis::ObisClient`]: occurrence search against the OBIS v3 API
//! - [`service::BiodiversityService`]: the aggregator tying them together

pub mod cache;
pub mod diversity;
pub mod obis;
pub mod service;
pub mod simulate;

pub use cache::{CacheStats, MetricsCache, DEFAULT_TTL};
pub use diversity::{DiversityMetrics, TopSpecies, TOP_SPECIES_LIMIT};
pub use obis::{ObisClient, OccurrenceSearch, RawOccurrence};
pub use service::{BiodiversityService, SpeciesList, DEFAULT_RADIUS_KM, MAX_RESULTS};
pub use simulate::{Simulator, REFERENCE_SPECIES};
