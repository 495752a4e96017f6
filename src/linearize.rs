//! Path linearizer: walks a day route from the anchor into ordered legs.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::PlanError;
use crate::route::RouteEdge;

/// One hop of a day's itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryLeg {
    /// 1-based trip day.
    pub day: usize,
    pub start: String,
    pub end: String,
    pub distance: f64,
}

/// Orders the edges of a day route into legs starting at `anchor_id`.
///
/// Each leg starts where the previous one ended. Open paths end at the last
/// stop, round trips end back at the anchor. An edge set that cannot be
/// walked this way is reported as [`PlanError::GraphIntegrity`].
pub fn linearize(
    edges: &[RouteEdge],
    day: usize,
    anchor_id: &str,
) -> Result<Vec<ItineraryLeg>, PlanError> {
    let mut remaining: Vec<&RouteEdge> = edges.iter().collect();
    let mut legs = Vec::with_capacity(edges.len());
    let mut current = anchor_id;

    while !remaining.is_empty() {
        let Some(position) = remaining.iter().position(|edge| edge.touches(current)) else {
            return Err(PlanError::GraphIntegrity {
                day,
                node: current.to_string(),
                remaining: remaining.len(),
            });
        };
        let edge = remaining.remove(position);
        // `touches` guarantees the other endpoint exists.
        let next = edge.other(current).unwrap_or(current);

        trace!(day, start = current, end = next, "linearized leg");
        legs.push(ItineraryLeg {
            day,
            start: current.to_string(),
            end: next.to_string(),
            distance: edge.distance(),
        });
        current = next;
    }

    Ok(legs)
}
