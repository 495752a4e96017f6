//! Error taxonomy for the planning core.
//!
//! Running out of points is not an error: it yields empty buckets and empty
//! itineraries. Degenerate geometry is reported through
//! [`PartitionKind::Degenerate`](crate::partition::PartitionKind) instead.

use thiserror::Error;

/// Errors raised by the planning core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// A trip must span at least one day.
    #[error("trip duration must be at least one day")]
    ZeroDays,
    /// A point carried a NaN or infinite coordinate.
    #[error("point {id:?} has a non-finite coordinate ({lat}, {lng})")]
    NonFiniteCoordinate {
        /// Identifier of the offending point.
        id: String,
        lat: f64,
        lng: f64,
    },
    /// A point's latitude lies beyond a pole.
    #[error("point {id:?} has latitude {lat} outside [-90, 90]")]
    LatitudeOutOfRange {
        /// Identifier of the offending point.
        id: String,
        lat: f64,
    },
    /// Two points of one route share an id.
    #[error("point id {id:?} appears more than once in the same route")]
    DuplicatePointId {
        /// The repeated identifier.
        id: String,
    },
    /// A day route is not a path reachable from the anchor.
    #[error("day {day}: no route edge continues from {node:?} ({remaining} edges left unvisited)")]
    GraphIntegrity {
        /// Day whose route could not be walked.
        day: usize,
        /// Stop at which the walk got stuck.
        node: String,
        /// Edges that were never reached.
        remaining: usize,
    },
}

impl PlanError {
    /// Whether this error signals a broken route invariant rather than bad input.
    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, PlanError::GraphIntegrity { .. })
    }
}
