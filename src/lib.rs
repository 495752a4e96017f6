//! itinerary-planner core
//!
//! Splits points of interest over the days of a trip and orders each day's
//! visits into a short path that starts at the lodging.

pub mod traits;
pub mod error;
pub mod point;
pub mod haversine;
pub mod kmeans;
pub mod partition;
pub mod route;
pub mod linearize;
pub mod planner;
pub mod export;

pub use error::PlanError;
pub use linearize::{ItineraryLeg, linearize};
pub use partition::{DayPartitioner, Partition, PartitionKind, partition};
pub use planner::{DayItinerary, PlanOptions, Planner, TripPlan, plan_trip};
pub use point::{Coordinate, Point};
pub use route::{RouteBuilder, RouteEdge, RouteShape, build_route};
