//! # Murmuration
//!
//! A boid flocking simulation: emergent group motion from purely local
//! neighbor rules, updated in parallel by a persistent worker pool.
//!
//! The engine lives in [`murmuration_core`]; plain data types in
//! [`murmuration_data`]. This crate re-exports both and ships a headless
//! driver binary that exercises the engine from a TOML config.

pub use murmuration_core as core;
pub use murmuration_core::{
    init_logging, Boid, CellKey, Metrics, Result, SpatialIndex, StepStats, Swarm, SwarmConfig,
    SwarmError, Vec2,
};
pub use murmuration_data as data;
