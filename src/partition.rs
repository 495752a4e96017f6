//! Day partitioner: spreads points of interest over the days of a trip.
//!
//! Fewer points than days are simply handed out one per day. Otherwise the
//! points are clustered with seeded k-means, one cluster per day, so each
//! day covers a compact part of the map.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::PlanError;
use crate::kmeans::{self, KMeansOptions};
use crate::point::Point;
use crate::traits::PartitionObserver;

/// Coordinates closer than this (in degrees, per axis) count as identical.
const DEGENERATE_SPREAD_DEG: f64 = 1e-9;

/// How a partition was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartitionKind {
    /// No points were supplied; every bucket is empty.
    Empty,
    /// At most one point per day; no clustering took place.
    OnePerDay,
    /// Points were clustered into one group per day.
    Clustered,
    /// All points share one location; they were all placed on day 1.
    Degenerate,
}

/// Day buckets produced by the partitioner.
///
/// `buckets()[0]` holds day 1. There is always exactly one bucket per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    kind: PartitionKind,
    buckets: Vec<Vec<Point>>,
}

impl Partition {
    pub fn kind(&self) -> PartitionKind {
        self.kind
    }

    pub fn buckets(&self) -> &[Vec<Point>] {
        &self.buckets
    }

    pub fn into_buckets(self) -> Vec<Vec<Point>> {
        self.buckets
    }

    pub fn days(&self) -> usize {
        self.buckets.len()
    }

    /// Points assigned to `day` (1-based).
    pub fn day(&self, day: usize) -> Option<&[Point]> {
        day.checked_sub(1)
            .and_then(|index| self.buckets.get(index))
            .map(Vec::as_slice)
    }

    /// Whether clustering fell back to a single bucket.
    pub fn is_degenerate(&self) -> bool {
        self.kind == PartitionKind::Degenerate
    }
}

/// Assigns points of interest to day buckets.
#[derive(Debug, Clone, Default)]
pub struct DayPartitioner {
    options: KMeansOptions,
}

impl DayPartitioner {
    pub fn new(options: KMeansOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &KMeansOptions {
        &self.options
    }

    pub fn partition(&self, pois: &[Point], days: usize) -> Result<Partition, PlanError> {
        self.partition_inner(pois, days, None)
    }

    /// Like [`partition`](Self::partition), additionally reporting the
    /// coordinates and final labels to `observer`.
    pub fn partition_observed(
        &self,
        pois: &[Point],
        days: usize,
        observer: &mut dyn PartitionObserver,
    ) -> Result<Partition, PlanError> {
        self.partition_inner(pois, days, Some(observer))
    }

    fn partition_inner(
        &self,
        pois: &[Point],
        days: usize,
        observer: Option<&mut dyn PartitionObserver>,
    ) -> Result<Partition, PlanError> {
        if days == 0 {
            return Err(PlanError::ZeroDays);
        }
        for poi in pois {
            poi.validate()?;
        }

        let (kind, labels) = if pois.is_empty() {
            (PartitionKind::Empty, Vec::new())
        } else if pois.len() <= days {
            (PartitionKind::OnePerDay, (0..pois.len()).collect())
        } else if is_degenerate(pois) {
            warn!(
                points = pois.len(),
                days, "all points share one location; placing them on day 1"
            );
            (PartitionKind::Degenerate, vec![0; pois.len()])
        } else {
            let samples: Vec<[f64; 2]> = pois
                .iter()
                .map(|poi| {
                    let c = poi.coordinate();
                    [c.lat, c.lng]
                })
                .collect();
            (PartitionKind::Clustered, kmeans::kmeans(&samples, days, &self.options))
        };

        if let Some(observer) = observer {
            let coordinates: Vec<_> = pois.iter().map(Point::coordinate).collect();
            observer.observe(&coordinates, &labels);
        }

        let mut buckets: Vec<Vec<Point>> = vec![Vec::new(); days];
        for (poi, &label) in pois.iter().zip(&labels) {
            buckets[label].push(poi.clone());
        }

        let sizes: Vec<usize> = buckets.iter().map(Vec::len).collect();
        debug!(points = pois.len(), days, ?kind, ?sizes, "partitioned points into days");

        Ok(Partition { kind, buckets })
    }
}

/// Partitions `pois` into `days` buckets with the default clustering options.
pub fn partition(pois: &[Point], days: usize) -> Result<Partition, PlanError> {
    DayPartitioner::default().partition(pois, days)
}

fn is_degenerate(pois: &[Point]) -> bool {
    let Some(first) = pois.first().map(Point::coordinate) else {
        return false;
    };
    pois.iter().all(|poi| {
        let c = poi.coordinate();
        (c.lat - first.lat).abs() <= DEGENERATE_SPREAD_DEG
            && (c.lng - first.lng).abs() <= DEGENERATE_SPREAD_DEG
    })
}
