//! Immutable 2D vector value type.
//!
//! Every operation returns a new value; nothing here mutates its receiver.
//! All operations are total over finite floats, so there are no error paths.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantization factor for [`Vec2::round`]: 6 decimal digits.
///
/// Rounding to a fixed precision keeps repeated float accumulation from
/// drifting observably and makes equality-based tests stable.
const PRECISION: f64 = 1_000_000.0;

/// A 2D vector of `f64` components.
///
/// Used for positions, velocities, and steering forces alike.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector angle in radians. Multiply by `180/PI` for degrees.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Dot product of two vectors.
    #[must_use]
    pub fn dot(&self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Vector magnitude.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.dot(*self).sqrt()
    }

    /// Squared magnitude, for range checks that don't need the square root.
    #[must_use]
    pub fn length_squared(&self) -> f64 {
        self.dot(*self)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(&self, other: Self) -> f64 {
        other.subv(*self).length()
    }

    /// Squared Euclidean distance to another point.
    #[must_use]
    pub fn distance_squared(&self, other: Self) -> f64 {
        other.subv(*self).length_squared()
    }

    /// Inclusive bounding-box test.
    #[must_use]
    pub fn within(&self, min: Self, max: Self) -> bool {
        self.x >= min.x && self.y >= min.y && self.x <= max.x && self.y <= max.y
    }

    /// Quantizes both components to 6 decimal digits.
    #[must_use]
    pub fn round(&self) -> Self {
        Self {
            x: (self.x * PRECISION).round() / PRECISION,
            y: (self.y * PRECISION).round() / PRECISION,
        }
    }

    #[must_use]
    pub fn add(&self, f: f64) -> Self {
        Self::new(self.x + f, self.y + f)
    }

    #[must_use]
    pub fn sub(&self, f: f64) -> Self {
        Self::new(self.x - f, self.y - f)
    }

    #[must_use]
    pub fn mul(&self, f: f64) -> Self {
        Self::new(self.x * f, self.y * f)
    }

    #[must_use]
    pub fn div(&self, f: f64) -> Self {
        Self::new(self.x / f, self.y / f)
    }

    #[must_use]
    pub fn addv(&self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    #[must_use]
    pub fn subv(&self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    #[must_use]
    pub fn mulv(&self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    #[must_use]
    pub fn divv(&self, other: Self) -> Self {
        Self::new(self.x / other.x, self.y / other.y)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:+.3}, {:+.3})", self.x, self.y)
    }
}
