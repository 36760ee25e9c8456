//! Itinerary assembly and proximity optimization for multi-day trips.
//!
//! Pure algorithm modules (distance, routing, partitioning) feed an
//! assembler and a save-then-optimize pipeline. Persistence and content
//! catalogs sit behind the traits in [`traits`]; concrete apps supply
//! their own adapters.

pub mod assemble;
pub mod cache;
pub mod error;
pub mod filter;
pub mod geo;
pub mod http_store;
pub mod memory_store;
pub mod model;
pub mod optimize;
pub mod partition;
pub mod pipeline;
pub mod route;
pub mod traits;
