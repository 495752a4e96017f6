//! Flat `day, start, end, distance` rows for spreadsheet export.

use serde::{Deserialize, Serialize};

use crate::linearize::ItineraryLeg;
use crate::planner::TripPlan;
use crate::traits::ItinerarySink;

/// One spreadsheet row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItineraryRow {
    pub day: usize,
    pub start: String,
    pub end: String,
    pub distance: f64,
}

impl From<&ItineraryLeg> for ItineraryRow {
    fn from(leg: &ItineraryLeg) -> Self {
        Self {
            day: leg.day,
            start: leg.start.clone(),
            end: leg.end.clone(),
            distance: leg.distance,
        }
    }
}

/// All legs of the plan, day by day, in walking order.
pub fn rows(plan: &TripPlan) -> Vec<ItineraryRow> {
    plan.legs().map(ItineraryRow::from).collect()
}

/// Feeds every row of `plan` to `sink`, stopping at the first error.
pub fn write_to<S: ItinerarySink>(plan: &TripPlan, sink: &mut S) -> Result<usize, S::Error> {
    let mut written = 0;
    for leg in plan.legs() {
        sink.write_row(&ItineraryRow::from(leg))?;
        written += 1;
    }
    Ok(written)
}
