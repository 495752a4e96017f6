//! Great-circle distance metric.
//!
//! Straight-line distance over the Earth's surface. Ignores roads entirely,
//! which is all a sightseeing order needs.

use crate::point::Coordinate;
use crate::traits::DistanceMetric;

/// Mean Earth radius in kilometers (IUGG).
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Haversine great-circle metric.
///
/// Distances are reported in the unit of `radius`; the default is kilometers.
#[derive(Debug, Clone)]
pub struct Haversine {
    /// Sphere radius used to scale the central angle.
    pub radius: f64,
}

impl Default for Haversine {
    fn default() -> Self {
        Self {
            radius: EARTH_RADIUS_KM,
        }
    }
}

impl Haversine {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Central angle between two points, in radians.
    fn central_angle(from: Coordinate, to: Coordinate) -> f64 {
        let lat1_rad = from.lat.to_radians();
        let lat2_rad = to.lat.to_radians();
        let delta_lat = (to.lat - from.lat).to_radians();
        let delta_lng = (to.lng - from.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);

        2.0 * a.sqrt().asin()
    }
}

impl DistanceMetric for Haversine {
    fn distance(&self, from: Coordinate, to: Coordinate) -> f64 {
        self.radius * Self::central_angle(from, to)
    }
}
