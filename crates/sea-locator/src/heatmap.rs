//! Heatmap point sampling around a sea coordinate.
//!
//! Produces a small cloud of jittered points near a (typically snapped)
//! center, each with a display intensity. Seed-parameterizable so tests can
//! assert exact output.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use marine_common::Coordinate;

/// Number of points generated per heatmap.
pub const POINT_COUNT: usize = 8;

/// Maximum jitter from the center, in degrees (roughly 30 km).
pub const JITTER_DEG: f64 = 0.3;

/// A single weighted heatmap point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapPoint {
    pub lat: f64,
    pub lon: f64,
    /// Display weight in [0.5, 1.0].
    pub intensity: f64,
}

/// Sample heatmap points around a center, seeded from OS entropy.
pub fn sample_points(center: Coordinate) -> Vec<HeatmapPoint> {
    sample_points_with_rng(center, &mut StdRng::from_entropy())
}

/// Sample heatmap points with a fixed seed.
pub fn sample_points_seeded(center: Coordinate, seed: u64) -> Vec<HeatmapPoint> {
    sample_points_with_rng(center, &mut StdRng::seed_from_u64(seed))
}

fn sample_points_with_rng(center: Coordinate, rng: &mut StdRng) -> Vec<HeatmapPoint> {
    (0..POINT_COUNT)
        .map(|_| HeatmapPoint {
            lat: center.lat + rng.gen_range(-JITTER_DEG..JITTER_DEG),
            lon: center.lon + rng.gen_range(-JITTER_DEG..JITTER_DEG),
            intensity: rng.gen_range(0.5..1.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_stay_near_center() {
        let center = Coordinate { lat: 9.93, lon: 76.26 };
        let points = sample_points_seeded(center, 11);

        assert_eq!(points.len(), POINT_COUNT);
        for point in points {
            assert!((point.lat - center.lat).abs() <= JITTER_DEG);
            assert!((point.lon - center.lon).abs() <= JITTER_DEG);
            assert!(point.intensity >= 0.5 && point.intensity <= 1.0);
        }
    }

    #[test]
    fn test_seeded_sampling_is_reproducible() {
        let center = Coordinate { lat: 9.93, lon: 76.26 };
        assert_eq!(
            sample_points_seeded(center, 3),
            sample_points_seeded(center, 3)
        );
    }
}
