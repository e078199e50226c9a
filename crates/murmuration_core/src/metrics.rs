//! Performance metrics collection for the simulation.
//!
//! Provides structured logging and counters for monitoring step throughput.
//! Per-step diagnostics are returned from `Swarm::update` as a
//! [`crate::swarm::StepStats`] value instead of living in shared mutable
//! state, so renderers can read them without racing the engine.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Step counters for one swarm.
pub struct Metrics {
    step_count: AtomicU64,
    dirty_count: AtomicU64,
    boid_count: AtomicU64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            step_count: AtomicU64::new(0),
            dirty_count: AtomicU64::new(0),
            boid_count: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Records a completed step with its duration.
    pub fn record_step(&self, duration: Duration, dirty: bool, boids: usize) {
        let step = self.step_count.fetch_add(1, Ordering::Relaxed) + 1;
        if dirty {
            self.dirty_count.fetch_add(1, Ordering::Relaxed);
        }
        self.boid_count.store(boids as u64, Ordering::Relaxed);

        // Log at info level every 1000 steps
        if step % 1000 == 0 {
            tracing::info!(
                step = step,
                boids = boids,
                dirty_steps = self.dirty_count.load(Ordering::Relaxed),
                duration_us = duration.as_micros() as u64,
                "Simulation step"
            );
        }
    }

    /// Total steps recorded so far.
    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.step_count.load(Ordering::Relaxed)
    }

    /// Dirty (velocity-recomputing) steps recorded so far.
    #[must_use]
    pub fn dirty_count(&self) -> u64 {
        self.dirty_count.load(Ordering::Relaxed)
    }

    /// Elapsed time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize tracing subscriber for logging.
pub fn init_logging() {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(tracing::Level::INFO)
            .finish(),
    )
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = Metrics::new();
        assert_eq!(metrics.step_count(), 0);
        assert_eq!(metrics.dirty_count(), 0);
    }

    #[test]
    fn test_record_step() {
        let metrics = Metrics::new();
        metrics.record_step(Duration::from_millis(2), true, 100);
        metrics.record_step(Duration::from_millis(1), false, 100);
        assert_eq!(metrics.step_count(), 2);
        assert_eq!(metrics.dirty_count(), 1);
    }
}
