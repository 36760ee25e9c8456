//! Test fixtures for trip-planner.
//!
//! Real Bengaluru/Mysuru locations (from OpenStreetMap) for route and
//! clustering tests.

pub mod bengaluru_locations;

pub use bengaluru_locations::*;
