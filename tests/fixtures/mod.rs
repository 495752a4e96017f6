//! Test fixtures for itinerary-planner.
//!
//! Provides realistic test data:
//! - Las Vegas area attractions with place categories
//! - Lodging anchors on and off the Strip

pub mod las_vegas_attractions;

pub use las_vegas_attractions::*;
