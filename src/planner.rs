//! Trip planner: partitions a trip into days and builds each day's itinerary.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::PlanError;
use crate::haversine::Haversine;
use crate::kmeans::KMeansOptions;
use crate::linearize::{ItineraryLeg, linearize};
use crate::partition::{DayPartitioner, PartitionKind};
use crate::point::Point;
use crate::route::{RouteBuilder, RouteShape};
use crate::traits::{DistanceMetric, PointSource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanOptions {
    /// Clustering used to spread points over days.
    pub kmeans: KMeansOptions,
    /// Whether each day ends at the last stop or back at the anchor.
    pub shape: RouteShape,
    /// Build days concurrently on the rayon pool.
    pub parallel: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            kmeans: KMeansOptions::default(),
            shape: RouteShape::OpenPath,
            parallel: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayItinerary {
    /// 1-based trip day.
    pub day: usize,
    /// The day's points of interest in visiting order.
    pub stops: Vec<Point>,
    pub legs: Vec<ItineraryLeg>,
    pub total_distance: f64,
}

impl DayItinerary {
    /// A day with nothing to visit.
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    pub anchor: Point,
    pub partition: PartitionKind,
    pub days: Vec<DayItinerary>,
}

impl TripPlan {
    /// Every leg of the trip, day by day.
    pub fn legs(&self) -> impl Iterator<Item = &ItineraryLeg> {
        self.days.iter().flat_map(|day| day.legs.iter())
    }

    pub fn total_distance(&self) -> f64 {
        self.days.iter().map(|day| day.total_distance).sum()
    }

    /// Itinerary of `day` (1-based).
    pub fn day(&self, day: usize) -> Option<&DayItinerary> {
        day.checked_sub(1).and_then(|index| self.days.get(index))
    }

    /// True when no day has anything to visit.
    pub fn is_empty(&self) -> bool {
        self.days.iter().all(DayItinerary::is_empty)
    }
}

/// Plans a whole trip: partition `pois` over `days`, then route and
/// linearize every day around `anchor`.
pub fn plan_trip<M>(
    anchor: &Point,
    pois: &[Point],
    days: usize,
    metric: &M,
    options: &PlanOptions,
) -> Result<TripPlan, PlanError>
where
    M: DistanceMetric + Sync,
{
    anchor.validate()?;
    let partition = DayPartitioner::new(options.kmeans.clone()).partition(pois, days)?;
    let kind = partition.kind();
    if kind == PartitionKind::Degenerate {
        warn!(anchor = anchor.id(), "all points of interest share one location");
    }

    let builder = RouteBuilder::new(metric).shape(options.shape);
    let buckets: Vec<(usize, Vec<Point>)> = partition
        .into_buckets()
        .into_iter()
        .enumerate()
        .map(|(index, bucket)| (index + 1, bucket))
        .collect();

    // Each day owns its points; nothing is shared between days.
    let build_day = |(day, stops): (usize, Vec<Point>)| plan_day(&builder, anchor, day, stops);
    let days = if options.parallel {
        buckets.into_par_iter().map(build_day).collect::<Result<Vec<_>, _>>()?
    } else {
        buckets.into_iter().map(build_day).collect::<Result<Vec<_>, _>>()?
    };

    let plan = TripPlan {
        anchor: anchor.clone(),
        partition: kind,
        days,
    };
    debug!(
        anchor = plan.anchor.id(),
        days = plan.days.len(),
        legs = plan.legs().count(),
        total_distance = plan.total_distance(),
        "planned trip"
    );

    Ok(plan)
}

fn plan_day<M: DistanceMetric>(
    builder: &RouteBuilder<M>,
    anchor: &Point,
    day: usize,
    stops: Vec<Point>,
) -> Result<DayItinerary, PlanError> {
    let edges = builder.build(&stops, anchor)?;
    let legs = linearize(&edges, day, anchor.id())?;
    let total_distance = legs.iter().map(|leg| leg.distance).sum();

    let mut by_id: HashMap<String, Point> = stops
        .into_iter()
        .map(|point| (point.id().to_string(), point))
        .collect();
    let stops = legs.iter().filter_map(|leg| by_id.remove(&leg.end)).collect();

    Ok(DayItinerary {
        day,
        stops,
        legs,
        total_distance,
    })
}

/// Planner bound to a metric and options.
#[derive(Debug, Clone, Default)]
pub struct Planner<M = Haversine> {
    metric: M,
    options: PlanOptions,
}

impl<M: DistanceMetric + Sync> Planner<M> {
    pub fn new(metric: M, options: PlanOptions) -> Self {
        Self { metric, options }
    }

    pub fn options(&self) -> &PlanOptions {
        &self.options
    }

    pub fn plan(&self, anchor: &Point, pois: &[Point], days: usize) -> Result<TripPlan, PlanError> {
        plan_trip(anchor, pois, days, &self.metric, &self.options)
    }

    /// Plans a trip from the points `source` finds around `anchor`.
    ///
    /// A failed lookup plans with no candidates. Points with unusable
    /// coordinates, repeated ids, or the anchor's own id are dropped.
    pub fn plan_nearby<S: PointSource>(
        &self,
        source: &S,
        anchor: &Point,
        categories: &[String],
        days: usize,
    ) -> Result<TripPlan, PlanError> {
        let candidates = match source.nearby(anchor, categories) {
            Ok(points) => points,
            Err(err) => {
                warn!(
                    anchor = anchor.id(),
                    error = %err,
                    "point lookup failed; planning without candidates"
                );
                Vec::new()
            }
        };

        let pois = usable_points(anchor, candidates);
        self.plan(anchor, &pois, days)
    }
}

fn usable_points(anchor: &Point, candidates: Vec<Point>) -> Vec<Point> {
    let found = candidates.len();
    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(anchor.id().to_string());

    let mut usable = Vec::with_capacity(found);
    for point in candidates {
        if !point.coordinate().is_valid() || !seen.insert(point.id().to_string()) {
            continue;
        }
        usable.push(point);
    }

    if usable.len() < found {
        warn!(found, dropped = found - usable.len(), "ignoring unusable looked-up points");
    }
    usable
}
