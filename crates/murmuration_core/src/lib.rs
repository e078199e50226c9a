//! # Murmuration Core
//!
//! The flocking simulation engine: emergent group motion from purely local
//! neighbor rules.
//!
//! This crate contains:
//! - Spatial indexing (uniform grid binning for O(1) neighbor queries)
//! - The flocking rules (cohesion, alignment, separation, target-seeking)
//! - A persistent worker pool that parallelizes per-step updates
//! - Configuration loading and validation
//! - Metrics collection and structured logging
//!
//! ## Architecture
//!
//! A [`swarm::Swarm`] owns the agent list and a fixed pool of worker threads,
//! each bound to a contiguous slice of the agents. One `update` call fans a
//! step out to all workers and blocks until every worker has finished, so the
//! caller always observes one consistent world state between steps. Workers
//! read an immutable snapshot of the previous step and write only their own
//! partition, which makes trajectories reproducible for a fixed seed
//! regardless of worker count.
//!
//! ## Example
//!
//! ```
//! use murmuration_core::{Swarm, SwarmConfig, Vec2};
//!
//! let mut config = SwarmConfig::default();
//! config.flock.size = 100;
//! config.flock.workers = 4;
//!
//! let mut swarm = Swarm::new(config).unwrap();
//! let target = Vec2::new(640.0, 360.0);
//!
//! // A dirty step recomputes velocities from neighbor interactions,
//! // a non-dirty step only integrates positions.
//! swarm.update(true, target).unwrap();
//! swarm.update(false, target).unwrap();
//! ```

/// Configuration management for simulation parameters
pub mod config;
/// Error types for swarm construction and round dispatch
pub mod error;
/// Uniform grid spatial index for O(1) proximity queries
pub mod index;
/// Metrics collection and logging
pub mod metrics;
/// The per-agent flocking rule computations
pub mod rules;
/// The swarm worker-pool engine
pub mod swarm;

pub use config::SwarmConfig;
pub use error::{Result, SwarmError};
pub use index::{CellKey, SpatialIndex};
pub use metrics::{init_logging, Metrics};
pub use murmuration_data::{Boid, Vec2};
pub use swarm::{StepStats, Swarm};
