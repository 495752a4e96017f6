//! Geocoded points: the lodging anchor and the points of interest.
//!
//! Points arrive already resolved from a lookup collaborator and are never
//! mutated by the planner. Coordinates are decimal degrees.

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Finite, with a latitude inside `[-90, 90]`. Longitudes wrap and are
    /// accepted as given.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && (-90.0..=90.0).contains(&self.lat)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// A named place on the map.
///
/// The `id` doubles as the display name and must be unique within a
/// planning request. The lodging anchor carries no category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    id: String,
    coordinate: Coordinate,
    category: Option<String>,
}

impl Point {
    /// Creates an uncategorized point, e.g. the lodging anchor.
    pub fn new(id: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            coordinate: Coordinate::new(lat, lng),
            category: None,
        }
    }

    /// Creates a point of interest with a place category such as `museum`.
    pub fn with_category(
        id: impl Into<String>,
        lat: f64,
        lng: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            coordinate: Coordinate::new(lat, lng),
            category: Some(category.into()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Rejects points whose coordinate is NaN or infinite, or whose latitude
    /// lies outside `[-90, 90]`.
    pub fn validate(&self) -> Result<(), PlanError> {
        let Coordinate { lat, lng } = self.coordinate;
        if !self.coordinate.is_finite() {
            return Err(PlanError::NonFiniteCoordinate {
                id: self.id.clone(),
                lat,
                lng,
            });
        }
        if !self.coordinate.is_valid() {
            return Err(PlanError::LatitudeOutOfRange {
                id: self.id.clone(),
                lat,
            });
        }
        Ok(())
    }
}
