//! A single flocking agent.

use crate::vector::Vec2;
use serde::{Deserialize, Serialize};

/// One boid. It tries to fit in with the rest of the swarm by:
/// - moving towards the center of nearby boids (cohesion),
/// - matching nearby boids' velocity (alignment),
/// - avoiding collisions with nearby boids (separation).
///
/// It can optionally steer towards (or away from) a target point.
///
/// `id` is the boid's stable index into the owning swarm's agent list and
/// doubles as the neighbor-exclusion key: a boid is never its own neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boid {
    pub id: usize,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Boid {
    /// Creates a boid at rest at the given position.
    #[must_use]
    pub const fn new(id: usize, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_boid_at_rest() {
        let b = Boid::new(3, Vec2::new(1.0, 2.0));
        assert_eq!(b.id, 3);
        assert_eq!(b.pos, Vec2::new(1.0, 2.0));
        assert_eq!(b.vel, Vec2::ZERO);
    }
}
