//! Cargo stowage engine for a space station.
//!
//! Validates item placements inside containers, picks the best item for a
//! search, plans how to dig it out, and plans the disposal of waste at
//! undocking. `api` exposes all of it over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod geometry;
pub mod inventory;
pub mod locks;
pub mod model;
pub mod placement;
pub mod retrieval;
pub mod selector;
pub mod simulation;
pub mod store;
pub mod timestamp;
pub mod types;
pub mod waste;
