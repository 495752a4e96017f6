//! Seams between the planning core and its collaborators.
//!
//! The core only computes. Place lookups, plotting and spreadsheet export
//! live behind these traits and are implemented by the surrounding app.

use crate::export::ItineraryRow;
use crate::point::{Coordinate, Point};

/// Distance between two coordinates, in the metric's own unit.
///
/// Implementations must be symmetric and non-negative.
pub trait DistanceMetric {
    fn distance(&self, from: Coordinate, to: Coordinate) -> f64;

    /// Symmetric distance matrix indexed by the provided coordinate order.
    ///
    /// Each unordered pair is measured once and mirrored.
    fn matrix_for(&self, coordinates: &[Coordinate]) -> Vec<Vec<f64>> {
        let n = coordinates.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let distance = self.distance(coordinates[i], coordinates[j]);
                matrix[i][j] = distance;
                matrix[j][i] = distance;
            }
        }

        matrix
    }
}

impl<M: DistanceMetric + ?Sized> DistanceMetric for &M {
    fn distance(&self, from: Coordinate, to: Coordinate) -> f64 {
        (**self).distance(from, to)
    }
}

/// Supplies candidate points of interest around a lodging anchor.
pub trait PointSource {
    type Error: std::error::Error;

    /// Points matching any of `categories` near `anchor`.
    fn nearby(&self, anchor: &Point, categories: &[String]) -> Result<Vec<Point>, Self::Error>;
}

/// Receives the clustering input and its labels, e.g. to draw a scatter plot.
pub trait PartitionObserver {
    /// `labels[i]` is the zero-based day bucket of `coordinates[i]`.
    fn observe(&mut self, coordinates: &[Coordinate], labels: &[usize]);
}

/// Consumes finished itinerary rows (spreadsheet writer, path renderer, ...).
pub trait ItinerarySink {
    type Error;

    fn write_row(&mut self, row: &ItineraryRow) -> Result<(), Self::Error>;
}
