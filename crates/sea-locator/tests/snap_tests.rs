//! Tests for sea-coordinate snapping against mock SST probes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use marine_common::{UpstreamError, UpstreamResult};
use sea_locator::{SeaLocator, SeaSurfaceProbe};

/// Probe that reports sea everywhere.
struct AlwaysSea;

#[async_trait]
impl SeaSurfaceProbe for AlwaysSea {
    async fn hourly_sst(&self, _lat: f64, _lon: f64) -> UpstreamResult<Vec<Option<f64>>> {
        Ok(vec![Some(28.4), Some(28.1)])
    }
}

/// Probe that never reports sea, counting how often it was asked.
struct NeverSea {
    probes: AtomicUsize,
}

#[async_trait]
impl SeaSurfaceProbe for NeverSea {
    async fn hourly_sst(&self, _lat: f64, _lon: f64) -> UpstreamResult<Vec<Option<f64>>> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        Ok(vec![None, None])
    }
}

/// Probe that reports sea only within a longitude band, and records the
/// order in which candidates were visited.
struct SeaEastOf {
    min_lon: f64,
    visited: Mutex<Vec<(f64, f64)>>,
}

#[async_trait]
impl SeaSurfaceProbe for SeaEastOf {
    async fn hourly_sst(&self, lat: f64, lon: f64) -> UpstreamResult<Vec<Option<f64>>> {
        self.visited.lock().unwrap().push((lat, lon));
        if lon >= self.min_lon {
            Ok(vec![Some(27.0)])
        } else {
            Ok(vec![None])
        }
    }
}

/// Probe that fails on the origin candidate and reports sea elsewhere.
struct FlakyAtOrigin {
    origin: (f64, f64),
}

#[async_trait]
impl SeaSurfaceProbe for FlakyAtOrigin {
    async fn hourly_sst(&self, lat: f64, lon: f64) -> UpstreamResult<Vec<Option<f64>>> {
        if (lat - self.origin.0).abs() < 1e-9 && (lon - self.origin.1).abs() < 1e-9 {
            Err(UpstreamError::Transport("connection reset".into()))
        } else {
            Ok(vec![Some(26.5)])
        }
    }
}

#[tokio::test]
async fn point_already_at_sea_snaps_to_itself() {
    let locator = SeaLocator::new(Arc::new(AlwaysSea));
    let snapped = locator.snap_to_sea(9.93, 76.26).await;
    assert_eq!(snapped.lat, 9.93);
    assert_eq!(snapped.lon, 76.26);
}

#[tokio::test]
async fn exhausted_grid_returns_the_input_unchanged() {
    let probe = Arc::new(NeverSea {
        probes: AtomicUsize::new(0),
    });
    let locator = SeaLocator::new(probe.clone());

    let snapped = locator.snap_to_sea(26.91, 75.78).await;

    assert_eq!(snapped.lat, 26.91);
    assert_eq!(snapped.lon, 75.78);
    // Full 1.0°/0.1° grid: every candidate was probed exactly once.
    assert_eq!(probe.probes.load(Ordering::SeqCst), 21 * 21);
}

#[tokio::test]
async fn scan_finds_the_nearest_sea_candidate() {
    let probe = Arc::new(SeaEastOf {
        min_lon: 76.55,
        visited: Mutex::new(Vec::new()),
    });
    let locator = SeaLocator::new(probe.clone());

    let snapped = locator.snap_to_sea(10.0, 76.26).await;

    // Nearest-first scan reaches the band at lon 76.26 + 0.3.
    assert!((snapped.lon - 76.56).abs() < 1e-9);
    assert_eq!(snapped.lat, 10.0);

    // The origin was visited first, and no candidate twice.
    let visited = probe.visited.lock().unwrap();
    assert_eq!(visited[0], (10.0, 76.26));
    let mut seen = visited.clone();
    seen.sort_by(|a, b| a.partial_cmp(b).unwrap());
    seen.dedup();
    assert_eq!(seen.len(), visited.len());
}

#[tokio::test]
async fn probe_failure_skips_the_candidate_and_continues() {
    let locator = SeaLocator::new(Arc::new(FlakyAtOrigin {
        origin: (9.93, 76.26),
    }));

    let snapped = locator.snap_to_sea(9.93, 76.26).await;

    // The origin errored; the next-nearest candidate won.
    assert!((snapped.lat - 9.83).abs() < 1e-9);
    assert_eq!(snapped.lon, 76.26);
}

#[tokio::test]
async fn candidates_off_the_globe_are_never_probed() {
    let probe = Arc::new(NeverSea {
        probes: AtomicUsize::new(0),
    });
    let locator = SeaLocator::new(probe.clone());

    locator.snap_to_sea(89.95, 0.0).await;

    // Latitudes above 90° are skipped without a probe call.
    assert!(probe.probes.load(Ordering::SeqCst) < 21 * 21);
}
