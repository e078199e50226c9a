//! Configuration management for simulation parameters.
//!
//! Strongly-typed configuration structures that map to a `config.toml` file.
//! Defaults carry the tuning constants the simulation was calibrated with;
//! a config file overrides them.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [flock]
//! seed = 0
//! workers = 10
//! size = 500
//!
//! [spawn]
//! min = { x = 0.0, y = 0.0 }
//! max = { x = 1280.0, y = 720.0 }
//!
//! [index]
//! cell_size = 50.0
//!
//! [rules]
//! cohesion_factor = 0.001
//! separation_range = 20.0
//! ```

use murmuration_data::Vec2;
use serde::{Deserialize, Serialize};

/// Flock-level parameters: how many boids, how many workers, which seed.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct FlockConfig {
    /// PRNG seed for spawn positions
    pub seed: u64,
    /// Number of persistent worker threads
    pub workers: usize,
    /// Number of boids
    pub size: usize,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            workers: 10,
            size: 500,
        }
    }
}

/// Bounding box boids spawn into, uniformly at random.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SpawnConfig {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(1280.0, 720.0),
        }
    }
}

/// Spatial index parameters.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct IndexConfig {
    /// Grid cell width/height in world units.
    ///
    /// Must be at least as large as the biggest neighbor interaction range,
    /// otherwise neighbors outside the 3x3 cell window are silently missed.
    pub cell_size: f64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self { cell_size: 50.0 }
    }
}

/// Flocking rule factors and ranges.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RuleConfig {
    /// Pull towards the local neighbor centroid
    pub cohesion_factor: f64,
    /// Match the local average heading
    pub alignment_factor: f64,
    /// Radius inside which neighbors repel
    pub separation_range: f64,
    /// Strength of the repulsion
    pub separation_factor: f64,
    /// Radius inside which the target repels instead of attracts
    pub target_range: f64,
    pub target_repel_factor: f64,
    pub target_attract_factor: f64,
    /// Speed floor; velocity is never left at exactly zero
    pub vel_min: f64,
    /// Speed ceiling
    pub vel_max: f64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            cohesion_factor: 0.001,
            alignment_factor: 0.05,
            separation_range: 20.0,
            separation_factor: 0.3,
            target_range: 50.0,
            target_repel_factor: 0.3,
            target_attract_factor: 0.00004,
            vel_min: 0.5,
            vel_max: 1.0,
        }
    }
}

/// Complete swarm configuration, consumed once at construction.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SwarmConfig {
    pub flock: FlockConfig,
    pub spawn: SpawnConfig,
    pub index: IndexConfig,
    pub rules: RuleConfig,
}

impl SwarmConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a
    /// description of the first validation failure. A swarm refuses to
    /// construct from an invalid config rather than silently producing
    /// degenerate behavior (empty worker groups, missed neighbors).
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.flock.workers > 0, "Worker count must be positive");
        if self.flock.size > 0 {
            anyhow::ensure!(
                self.flock.workers <= self.flock.size,
                "Worker count ({}) must not exceed flock size ({})",
                self.flock.workers,
                self.flock.size
            );
        }

        anyhow::ensure!(
            self.spawn.min.x <= self.spawn.max.x && self.spawn.min.y <= self.spawn.max.y,
            "Spawn box min must not exceed max"
        );

        anyhow::ensure!(self.index.cell_size > 0.0, "Cell size must be positive");
        // Hard correctness coupling: a cell smaller than the interaction
        // range makes the 3x3 neighborhood miss legitimate neighbors.
        anyhow::ensure!(
            self.index.cell_size >= self.rules.separation_range,
            "Cell size ({}) must be at least the separation range ({})",
            self.index.cell_size,
            self.rules.separation_range
        );

        anyhow::ensure!(
            self.rules.cohesion_factor >= 0.0,
            "Cohesion factor must be non-negative"
        );
        anyhow::ensure!(
            self.rules.alignment_factor >= 0.0,
            "Alignment factor must be non-negative"
        );
        anyhow::ensure!(
            self.rules.separation_range >= 0.0,
            "Separation range must be non-negative"
        );
        anyhow::ensure!(
            self.rules.separation_factor >= 0.0,
            "Separation factor must be non-negative"
        );
        anyhow::ensure!(
            self.rules.target_range >= 0.0,
            "Target range must be non-negative"
        );
        anyhow::ensure!(
            self.rules.target_repel_factor >= 0.0,
            "Target repel factor must be non-negative"
        );
        anyhow::ensure!(
            self.rules.target_attract_factor >= 0.0,
            "Target attract factor must be non-negative"
        );

        anyhow::ensure!(self.rules.vel_min > 0.0, "Minimum speed must be positive");
        anyhow::ensure!(
            self.rules.vel_min <= self.rules.vel_max,
            "Minimum speed must not exceed maximum speed"
        );

        Ok(())
    }

    /// Loads and validates configuration from TOML content.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Center of the spawn bounding box, the usual default steering target.
    #[must_use]
    pub fn spawn_center(&self) -> Vec2 {
        self.spawn.min.addv(self.spawn.max).div(2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = SwarmConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = SwarmConfig {
            flock: FlockConfig {
                workers: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_more_workers_than_boids_rejected() {
        let config = SwarmConfig {
            flock: FlockConfig {
                workers: 8,
                size: 4,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_flock_allowed() {
        let config = SwarmConfig {
            flock: FlockConfig {
                workers: 2,
                size: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cell_size_below_separation_range_rejected() {
        let config = SwarmConfig {
            index: IndexConfig { cell_size: 10.0 },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_spawn_box_rejected() {
        let config = SwarmConfig {
            spawn: SpawnConfig {
                min: Vec2::new(100.0, 0.0),
                max: Vec2::new(0.0, 100.0),
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_min_speed_rejected() {
        let mut config = SwarmConfig::default();
        config.rules.vel_min = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_speed_bounds_rejected() {
        let mut config = SwarmConfig::default();
        config.rules.vel_min = 2.0;
        config.rules.vel_max = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_roundtrip() {
        let toml = r#"
            [flock]
            seed = 7
            workers = 2
            size = 20

            [spawn]
            min = { x = 0.0, y = 0.0 }
            max = { x = 100.0, y = 100.0 }

            [index]
            cell_size = 25.0

            [rules]
            cohesion_factor = 0.001
            alignment_factor = 0.05
            separation_range = 20.0
            separation_factor = 0.3
            target_range = 50.0
            target_repel_factor = 0.3
            target_attract_factor = 0.00004
            vel_min = 0.5
            vel_max = 1.0
        "#;
        let config = SwarmConfig::from_toml(toml).unwrap();
        assert_eq!(config.flock.seed, 7);
        assert_eq!(config.flock.workers, 2);
        assert_eq!(config.index.cell_size, 25.0);
        assert_eq!(config.spawn_center(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_from_toml_invalid_rejected() {
        let toml = r#"
            [flock]
            seed = 0
            workers = 0
            size = 10
        "#;
        assert!(SwarmConfig::from_toml(toml).is_err());
    }
}
