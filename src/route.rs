//! Route builder: greedy-edge ("multi-fragment") construction of a day route.
//!
//! All candidate edges between the day's points and the anchor are ranked by
//! distance. The shortest edge is taken as long as both endpoints still have
//! degree budget left and it does not join two points that are already on
//! the same fragment. Fragments grow and merge until one path spans every
//! node.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use petgraph::unionfind::UnionFind;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::PlanError;
use crate::haversine::Haversine;
use crate::point::Point;
use crate::traits::DistanceMetric;

/// One undirected edge of a day route.
///
/// Endpoints are stored in lexicographic order; the pair is unordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEdge {
    endpoints: (String, String),
    distance: f64,
}

impl RouteEdge {
    pub fn new(a: impl Into<String>, b: impl Into<String>, distance: f64) -> Self {
        let (a, b) = (a.into(), b.into());
        let endpoints = if a <= b { (a, b) } else { (b, a) };
        Self { endpoints, distance }
    }

    pub fn endpoints(&self) -> (&str, &str) {
        (&self.endpoints.0, &self.endpoints.1)
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn touches(&self, id: &str) -> bool {
        self.endpoints.0 == id || self.endpoints.1 == id
    }

    /// The endpoint opposite `id`, if `id` is an endpoint.
    pub fn other(&self, id: &str) -> Option<&str> {
        if self.endpoints.0 == id {
            Some(&self.endpoints.1)
        } else if self.endpoints.1 == id {
            Some(&self.endpoints.0)
        } else {
            None
        }
    }
}

/// Shape of the finished day route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteShape {
    /// A simple path that starts at the anchor and ends at the last stop.
    #[default]
    OpenPath,
    /// A closed tour that comes back to the anchor at the end of the day.
    RoundTrip,
}

/// Builds day routes with a configurable metric and shape.
#[derive(Debug, Clone, Default)]
pub struct RouteBuilder<M = Haversine> {
    metric: M,
    shape: RouteShape,
}

impl<M: DistanceMetric> RouteBuilder<M> {
    pub fn new(metric: M) -> Self {
        Self {
            metric,
            shape: RouteShape::default(),
        }
    }

    pub fn shape(mut self, shape: RouteShape) -> Self {
        self.shape = shape;
        self
    }

    /// Builds the route over `points` plus `anchor`.
    ///
    /// The result does not depend on the order of `points`.
    pub fn build(&self, points: &[Point], anchor: &Point) -> Result<Vec<RouteEdge>, PlanError> {
        if points.is_empty() {
            return Ok(Vec::new());
        }

        anchor.validate()?;
        let mut nodes: Vec<&Point> = Vec::with_capacity(points.len() + 1);
        nodes.push(anchor);
        for point in points {
            point.validate()?;
            nodes.push(point);
        }
        nodes.sort_by(|a, b| a.id().cmp(b.id()));
        if let Some(pair) = nodes.windows(2).find(|pair| pair[0].id() == pair[1].id()) {
            return Err(PlanError::DuplicatePointId {
                id: pair[0].id().to_string(),
            });
        }

        let coordinates: Vec<_> = nodes.iter().map(|node| node.coordinate()).collect();
        let matrix = self.metric.matrix_for(&coordinates);

        let anchor_index = nodes
            .iter()
            .position(|node| node.id() == anchor.id())
            .unwrap_or_default();
        let mut budgets = vec![2u8; nodes.len()];
        if self.shape == RouteShape::OpenPath {
            budgets[anchor_index] = 1;
        }

        let mut merger = FragmentMerger::new(&matrix, budgets);
        let mut edges = Vec::with_capacity(nodes.len());
        while let Step::Continue(candidate) = merger.next_step() {
            trace!(
                from = nodes[candidate.a].id(),
                to = nodes[candidate.b].id(),
                distance = candidate.distance,
                "accepted route edge"
            );
            edges.push(edge_between(&nodes, candidate));
        }
        debug_assert_eq!(edges.len(), nodes.len() - 1);

        if self.shape == RouteShape::RoundTrip {
            if let Some(closing) = merger.closing_edge() {
                edges.push(edge_between(&nodes, closing));
            }
        }

        debug!(
            anchor = anchor.id(),
            points = points.len(),
            edges = edges.len(),
            shape = ?self.shape,
            "built day route"
        );

        Ok(edges)
    }
}

/// Builds an open path from `anchor` through every point using great-circle distances.
pub fn build_route(points: &[Point], anchor: &Point) -> Result<Vec<RouteEdge>, PlanError> {
    RouteBuilder::new(Haversine::default()).build(points, anchor)
}

/// Sum of the edge distances of a route.
pub fn route_length(edges: &[RouteEdge]) -> f64 {
    edges.iter().map(RouteEdge::distance).sum()
}

fn edge_between(nodes: &[&Point], candidate: Candidate) -> RouteEdge {
    RouteEdge::new(nodes[candidate.a].id(), nodes[candidate.b].id(), candidate.distance)
}

/// A candidate edge between node indices `a < b`.
///
/// Ordered by distance, then by endpoint indices. Nodes are sorted by id,
/// so equal distances fall back to lexicographic id order.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance: f64,
    a: usize,
    b: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.a.cmp(&other.a))
            .then_with(|| self.b.cmp(&other.b))
    }
}

/// Outcome of one greedy selection.
#[derive(Debug)]
enum Step {
    Continue(Candidate),
    Done,
}

/// Greedy selection state for a single day.
///
/// Owns everything it mutates, so days can be built independently.
struct FragmentMerger<'m> {
    matrix: &'m [Vec<f64>],
    budgets: Vec<u8>,
    fragments: UnionFind<usize>,
    candidates: BinaryHeap<Reverse<Candidate>>,
}

impl<'m> FragmentMerger<'m> {
    fn new(matrix: &'m [Vec<f64>], budgets: Vec<u8>) -> Self {
        let n = matrix.len();
        let mut candidates = BinaryHeap::with_capacity(n * n.saturating_sub(1) / 2);
        for a in 0..n {
            for b in (a + 1)..n {
                candidates.push(Reverse(Candidate {
                    distance: matrix[a][b],
                    a,
                    b,
                }));
            }
        }

        Self {
            matrix,
            budgets,
            fragments: UnionFind::new(n),
            candidates,
        }
    }

    /// Accepts the shortest edge that keeps every fragment a simple path.
    fn next_step(&mut self) -> Step {
        while let Some(Reverse(candidate)) = self.candidates.pop() {
            let Candidate { a, b, .. } = candidate;
            // Retired node: its remaining candidates are dropped lazily.
            if self.budgets[a] == 0 || self.budgets[b] == 0 {
                continue;
            }
            let (root_a, root_b) = (self.fragments.find_mut(a), self.fragments.find_mut(b));
            if root_a == root_b {
                trace!(a, b, "discarding cycle-forming candidate");
                continue;
            }

            self.budgets[a] -= 1;
            self.budgets[b] -= 1;
            self.fragments.union(root_a, root_b);
            return Step::Continue(candidate);
        }
        Step::Done
    }

    /// The edge joining the two open ends of the finished path.
    ///
    /// With two nodes both ends are the same pair, which yields the return leg.
    fn closing_edge(&self) -> Option<Candidate> {
        let mut open = self
            .budgets
            .iter()
            .enumerate()
            .filter(|(_, budget)| **budget > 0)
            .map(|(index, _)| index);
        let a = open.next()?;
        let b = open.next()?;
        Some(Candidate {
            distance: self.matrix[a][b],
            a,
            b,
        })
    }
}
