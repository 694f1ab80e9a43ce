//! Sea-coordinate location for marine data queries.
//!
//! Marine APIs return nothing useful for coordinates on land. This crate
//! snaps a requested point to the nearest grid candidate for which a
//! sea-surface-temperature probe reports data, and can sample heatmap
//! points around the result.

pub mod heatmap;
pub mod probe;
pub mod snap;

pub use heatmap::{sample_points, sample_points_seeded, HeatmapPoint};
pub use probe::{OpenMeteoProbe, SeaSurfaceProbe, OPEN_METEO_MARINE_URL};
pub use snap::{SeaLocator, DEFAULT_MAX_OFFSET_DEG, DEFAULT_STEP_DEG};
