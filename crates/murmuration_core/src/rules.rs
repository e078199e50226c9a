//! The per-agent flocking rule computations.
//!
//! A dirty step recomputes a boid's velocity from its neighbors (expensive);
//! a non-dirty step only integrates its position (cheap). That split is the
//! central performance trade-off: neighbor search and force evaluation run
//! far less often than position integration.
//!
//! Range checks compare squared distances against squared ranges so the
//! square root is only taken for neighbors that actually contribute, and a
//! legitimately zero distance is never divided by.

use crate::config::RuleConfig;
use crate::index::SpatialIndex;
use murmuration_data::{Boid, Vec2};

/// Computes the next state of one boid from the previous step's snapshot.
///
/// On a non-dirty step only the position advances, by the rounded velocity.
/// On a dirty step the new velocity is the old one plus cohesion, alignment,
/// separation, and targeting forces, clamped to the configured speed band.
#[must_use]
pub fn step_boid(
    b: &Boid,
    snapshot: &[Boid],
    index: &SpatialIndex,
    rules: &RuleConfig,
    dirty: bool,
    target: Vec2,
) -> Boid {
    if !dirty {
        return Boid {
            pos: b.pos.addv(b.vel.round()),
            ..*b
        };
    }

    let mut num = 0.0;
    let mut coh = Vec2::ZERO;
    let mut ali = Vec2::ZERO;
    let mut sep = Vec2::ZERO;
    index.iter_neighbours(b, |id| {
        let n = &snapshot[id];
        num += 1.0;
        coh = coh.addv(n.pos);
        ali = ali.addv(n.vel);
        sep = sep.subv(separation(b, n, rules));
    });

    if num > 0.0 {
        coh = cohesion(b, coh, num, rules);
        ali = alignment(b, ali, num, rules);
    }
    let tar = seek_target(b, target, rules);

    let vel = b.vel.addv(coh).addv(ali).addv(sep).addv(tar);
    Boid {
        vel: clamp_speed(vel, rules),
        ..*b
    }
}

/// Pull towards the average neighbor position.
fn cohesion(b: &Boid, sum_pos: Vec2, num: f64, rules: &RuleConfig) -> Vec2 {
    sum_pos.div(num).subv(b.pos).mul(rules.cohesion_factor)
}

/// Match the average neighbor velocity.
fn alignment(b: &Boid, sum_vel: Vec2, num: f64, rules: &RuleConfig) -> Vec2 {
    sum_vel.div(num).subv(b.vel).mul(rules.alignment_factor)
}

/// Repulsion from one neighbor, inversely proportional to distance.
/// Neighbors at or beyond the separation range contribute zero, as does a
/// neighbor at the exact same position (no distance to divide by).
fn separation(b: &Boid, n: &Boid, rules: &RuleConfig) -> Vec2 {
    let diff = n.pos.subv(b.pos);
    let dist_sq = diff.length_squared();
    if dist_sq == 0.0 || dist_sq >= rules.separation_range * rules.separation_range {
        return Vec2::ZERO;
    }
    diff.div(dist_sq.sqrt() / rules.separation_factor)
}

/// Repel from a close target to avoid instant convergence, attract weakly
/// towards a far one to drive long-range drift.
fn seek_target(b: &Boid, target: Vec2, rules: &RuleConfig) -> Vec2 {
    let diff = target.subv(b.pos);
    let dist_sq = diff.length_squared();
    if dist_sq == 0.0 {
        return Vec2::ZERO;
    }
    if dist_sq < rules.target_range * rules.target_range {
        return diff.div(dist_sq.sqrt() / -rules.target_repel_factor);
    }
    diff.mul(rules.target_attract_factor)
}

/// Rescales a velocity into the `[vel_min, vel_max]` speed band.
///
/// A zero-length velocity cannot be rescaled by direction, so it is kicked
/// to `vel_min` along the x axis instead of being left at rest.
fn clamp_speed(vel: Vec2, rules: &RuleConfig) -> Vec2 {
    let len = vel.length();
    if len > rules.vel_max {
        vel.mul(rules.vel_max / len)
    } else if len == 0.0 {
        Vec2::new(rules.vel_min, 0.0)
    } else if len < rules.vel_min {
        vel.mul(rules.vel_min / len)
    } else {
        vel
    }
}
