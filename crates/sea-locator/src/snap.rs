//! Grid-search snapping of a coordinate to nearby sea.
//!
//! Probes a square grid of candidate offsets around the starting point and
//! accepts the first candidate for which the marine probe reports any SST
//! sample. Candidates are visited nearest-first (squared Euclidean distance
//! from the origin, row-major generation order breaking ties), so `(0, 0)`
//! is always probed first and a point already at sea snaps to itself.

use std::sync::Arc;
use tracing::{debug, info, instrument};

use marine_common::Coordinate;

use crate::probe::SeaSurfaceProbe;

/// Default maximum offset from the starting point, in degrees.
pub const DEFAULT_MAX_OFFSET_DEG: f64 = 1.0;

/// Default grid step, in degrees.
pub const DEFAULT_STEP_DEG: f64 = 0.1;

/// Enumerate grid offsets within `max_offset`, nearest to the origin first.
///
/// Offsets are generated row-major over `[-N, N]²` with `N = ⌊max_offset/step⌋`
/// and stably sorted by squared distance, so generation order is the
/// tie-break among equidistant candidates.
fn scan_offsets(max_offset_deg: f64, step_deg: f64) -> Vec<(i32, i32)> {
    // A non-positive step or offset degenerates to probing the origin only.
    let n = if step_deg > 0.0 {
        ((max_offset_deg / step_deg).floor() as i32).max(0)
    } else {
        0
    };
    let mut offsets = Vec::with_capacity(((2 * n + 1) * (2 * n + 1)) as usize);
    for dx in -n..=n {
        for dy in -n..=n {
            offsets.push((dx, dy));
        }
    }
    offsets.sort_by_key(|&(dx, dy)| dx * dx + dy * dy);
    offsets
}

/// Locates a nearby sea coordinate by probing a spatial grid.
pub struct SeaLocator {
    probe: Arc<dyn SeaSurfaceProbe>,
    max_offset_deg: f64,
    step_deg: f64,
}

impl SeaLocator {
    /// Locator with the default 1.0° search radius and 0.1° step.
    pub fn new(probe: Arc<dyn SeaSurfaceProbe>) -> Self {
        Self::with_grid(probe, DEFAULT_MAX_OFFSET_DEG, DEFAULT_STEP_DEG)
    }

    /// Locator with a custom search radius and grid step.
    pub fn with_grid(probe: Arc<dyn SeaSurfaceProbe>, max_offset_deg: f64, step_deg: f64) -> Self {
        Self {
            probe,
            max_offset_deg,
            step_deg,
        }
    }

    /// Shift a coordinate until the marine probe reports SST data.
    ///
    /// A probe failure skips that candidate and the scan continues. If no
    /// candidate within the grid yields sea data the input coordinate is
    /// returned unchanged; that degraded outcome is deliberate, not an
    /// error.
    #[instrument(skip(self))]
    pub async fn snap_to_sea(&self, lat: f64, lon: f64) -> Coordinate {
        for (dx, dy) in scan_offsets(self.max_offset_deg, self.step_deg) {
            let candidate = Coordinate {
                lat: lat + f64::from(dx) * self.step_deg,
                lon: lon + f64::from(dy) * self.step_deg,
            };
            if !candidate.is_valid() {
                continue;
            }

            match self.probe.hourly_sst(candidate.lat, candidate.lon).await {
                Ok(samples) if samples.iter().any(Option::is_some) => {
                    info!(%candidate, dx, dy, "Found sea coordinate");
                    return candidate;
                }
                Ok(_) => {}
                Err(err) => {
                    debug!(%candidate, error = %err, "Probe failed, skipping candidate");
                }
            }
        }

        info!(lat, lon, "No sea data within grid, keeping original coordinate");
        Coordinate { lat, lon }
    }
}
