//! # Murmuration Data
//!
//! Plain data types shared by the simulation engine and its consumers.
//!
//! This crate deliberately contains no behavior beyond value arithmetic:
//! the flocking rules, spatial indexing, and worker-pool scheduling all
//! live in `murmuration_core`. Keeping the types here lets renderers and
//! tooling read swarm state without pulling in the engine.

/// One flocking agent with position and velocity
pub mod boid;
/// Immutable 2D vector arithmetic
pub mod vector;

pub use boid::Boid;
pub use vector::Vec2;
