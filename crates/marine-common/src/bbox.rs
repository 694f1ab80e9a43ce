//! Geographic bounding box types and operations.

use serde::{Deserialize, Serialize};

/// Approximate kilometers per degree of latitude.
pub const KM_PER_DEGREE: f64 = 111.0;

/// A geographic bounding box in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Build a square box of half-width `radius_km` around a center point.
    ///
    /// The radius is converted to degrees at roughly 111 km per degree of
    /// latitude; the same delta is applied to longitude.
    pub fn from_center(lat: f64, lon: f64, radius_km: f64) -> Self {
        let delta = radius_km / KM_PER_DEGREE;
        Self {
            min_lon: lon - delta,
            min_lat: lat - delta,
            max_lon: lon + delta,
            max_lat: lat + delta,
        }
    }

    /// Width of the bounding box in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Height of the bounding box in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Check if a point is contained within this box.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }

    /// Render the box as a WKT POLYGON ring (lon lat order, closed).
    ///
    /// This is the geometry format the OBIS occurrence API accepts.
    pub fn polygon_wkt(&self) -> String {
        format!(
            "POLYGON(({min_lon} {min_lat}, {max_lon} {min_lat}, {max_lon} {max_lat}, {min_lon} {max_lat}, {min_lon} {min_lat}))",
            min_lon = self.min_lon,
            min_lat = self.min_lat,
            max_lon = self.max_lon,
            max_lat = self.max_lat,
        )
    }
}
