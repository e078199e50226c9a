//! The swarm worker-pool engine.
//!
//! A [`Swarm`] owns the boid list, the spatial index, and a fixed pool of
//! persistent worker threads. Each worker is permanently bound to one
//! contiguous, non-overlapping range of the boid list. `update` fans one job
//! out to every worker and blocks until all of them have reported back, so
//! the caller always observes a single consistent world state between steps.
//!
//! Workers read an immutable snapshot of the previous step and write only
//! into their own output buffer. The dispatcher copies the buffers back once
//! the round has drained. Nothing is shared mutably across threads, so
//! trajectories are bit-identical for a fixed seed no matter how many
//! workers run or how they are scheduled.
//!
//! The index rebuild is single-threaded and strictly ordered before any job
//! for that step is sent; no worker ever reads the index mid-rebuild.

use crate::config::{RuleConfig, SwarmConfig};
use crate::error::{Result, SwarmError};
use crate::index::SpatialIndex;
use crate::metrics::Metrics;
use crate::rules;
use murmuration_data::{Boid, Vec2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// World state a round of workers reads: the boid list as it was when the
/// round was dispatched, plus the index as of the last dirty step.
struct Snapshot {
    boids: Vec<Boid>,
    index: Arc<SpatialIndex>,
}

/// One unit of work: step parameters plus a scratch buffer the worker fills
/// with its partition's next state. Buffers round-trip between dispatcher
/// and worker so steady-state rounds don't allocate.
struct StepJob {
    dirty: bool,
    target: Vec2,
    snapshot: Arc<Snapshot>,
    out: Vec<Boid>,
}

enum WorkerCommand {
    Step(StepJob),
    Shutdown,
}

/// Round completion. `out` is `None` when the worker's step panicked; the
/// worker still reports before exiting so the dispatcher never waits on a
/// completion that cannot arrive.
struct WorkerDone {
    worker: usize,
    out: Option<Vec<Boid>>,
}

struct WorkerHandle {
    tx: Sender<WorkerCommand>,
    range: Range<usize>,
    scratch: Option<Vec<Boid>>,
    handle: Option<thread::JoinHandle<()>>,
}

/// Diagnostics for one completed step.
#[derive(Debug, Clone, Copy)]
pub struct StepStats {
    /// 1-based step counter
    pub step: u64,
    /// Whether velocities were recomputed this step
    pub dirty: bool,
    pub duration: Duration,
    /// Non-empty index bins as of the last rebuild
    pub occupied_cells: usize,
}

/// A flock of boids updated in parallel by a fixed worker pool.
pub struct Swarm {
    config: SwarmConfig,
    boids: Vec<Boid>,
    index: Arc<SpatialIndex>,
    workers: Vec<WorkerHandle>,
    done_rx: Receiver<WorkerDone>,
    metrics: Metrics,
    steps: u64,
}

impl Swarm {
    /// Builds a swarm from a validated config: spawns boids at seeded random
    /// positions inside the spawn box and starts one worker thread per group.
    ///
    /// Fails fast on an invalid config or if a worker thread cannot be
    /// spawned.
    pub fn new(config: SwarmConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.flock.seed);
        let extent = config.spawn.max.subv(config.spawn.min);
        let boids: Vec<Boid> = (0..config.flock.size)
            .map(|id| {
                let pos = Vec2::new(rng.gen::<f64>(), rng.gen::<f64>())
                    .mulv(extent)
                    .addv(config.spawn.min);
                Boid::new(id, pos)
            })
            .collect();

        let (done_tx, done_rx) = mpsc::channel::<WorkerDone>();
        let mut workers = Vec::with_capacity(config.flock.workers);
        for (worker, range) in partition(config.flock.size, config.flock.workers)
            .into_iter()
            .enumerate()
        {
            let (tx, rx) = mpsc::channel::<WorkerCommand>();
            let done = done_tx.clone();
            let rules = config.rules.clone();
            let group = range.clone();
            let handle = thread::Builder::new()
                .name(format!("murmuration-worker-{worker}"))
                .spawn(move || worker_loop(&rx, &done, worker, &group, &rules))
                .map_err(|err| {
                    SwarmError::Worker(format!("failed to spawn worker thread: {err}"))
                })?;
            workers.push(WorkerHandle {
                tx,
                range,
                scratch: Some(Vec::new()),
                handle: Some(handle),
            });
        }
        // Drop the dispatcher's completion sender so a dead pool is
        // observable as a disconnect instead of a hang.
        drop(done_tx);

        let index = Arc::new(SpatialIndex::new(config.index.cell_size));
        Ok(Self {
            config,
            boids,
            index,
            workers,
            done_rx,
            metrics: Metrics::new(),
            steps: 0,
        })
    }

    /// Advances the simulation by one step, blocking until every worker has
    /// finished its partition.
    ///
    /// If `dirty`, the spatial index is rebuilt from current positions first
    /// and every boid's velocity is recomputed from its neighbors and the
    /// `target`; otherwise positions are integrated and the index is reused.
    ///
    /// An error poisons the swarm: the step did not complete, later calls
    /// keep failing, and the only useful operation left is [`shutdown`]
    /// (which still joins cleanly).
    ///
    /// [`shutdown`]: Swarm::shutdown
    pub fn update(&mut self, dirty: bool, target: Vec2) -> Result<StepStats> {
        let start = Instant::now();
        if dirty {
            let mut index = SpatialIndex::new(self.config.index.cell_size);
            index.rebuild(&self.boids);
            self.index = Arc::new(index);
        }

        let snapshot = Arc::new(Snapshot {
            boids: self.boids.clone(),
            index: Arc::clone(&self.index),
        });
        for w in 0..self.workers.len() {
            let out = self.workers[w].scratch.take().unwrap_or_default();
            let job = StepJob {
                dirty,
                target,
                snapshot: Arc::clone(&snapshot),
                out,
            };
            if self.workers[w].tx.send(WorkerCommand::Step(job)).is_err() {
                self.reclaim_scratch();
                return Err(SwarmError::Disconnected);
            }
        }

        for _ in 0..self.workers.len() {
            let done = self.done_rx.recv().map_err(|_| SwarmError::Disconnected)?;
            let Some(out) = done.out else {
                self.reclaim_scratch();
                return Err(SwarmError::Worker(format!(
                    "worker {} panicked mid-step",
                    done.worker
                )));
            };
            let worker = &mut self.workers[done.worker];
            self.boids[worker.range.clone()].copy_from_slice(&out);
            worker.scratch = Some(out);
        }

        self.steps += 1;
        let duration = start.elapsed();
        self.metrics.record_step(duration, dirty, self.boids.len());
        Ok(StepStats {
            step: self.steps,
            dirty,
            duration,
            occupied_cells: self.index.occupied_cells(),
        })
    }

    /// Runs `steps` dirty updates against a fixed target to prime the
    /// simulation before it is first observed.
    pub fn init(&mut self, steps: usize, target: Vec2) -> Result<()> {
        for _ in 0..steps {
            self.update(true, target)?;
        }
        Ok(())
    }

    /// Current boid states, ordered by ID.
    #[must_use]
    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    /// The spatial index as of the last dirty step.
    #[must_use]
    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    #[must_use]
    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Collects buffers from completions already queued when a round fails,
    /// so shutdown finds the pool quiescent instead of racing a
    /// half-dispatched step.
    fn reclaim_scratch(&mut self) {
        while let Ok(done) = self.done_rx.try_recv() {
            if let Some(out) = done.out {
                self.workers[done.worker].scratch = Some(out);
            }
        }
    }

    /// Stops all workers and joins their threads. Called automatically on
    /// drop; safe to call more than once.
    pub fn shutdown(&mut self) {
        for worker in &self.workers {
            let _ = worker.tx.send(WorkerCommand::Shutdown);
        }
        for worker in &mut self.workers {
            if let Some(handle) = worker.handle.take() {
                if handle.join().is_err() {
                    tracing::error!("worker thread panicked before shutdown");
                }
            }
        }
    }
}

impl Drop for Swarm {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Splits `0..size` into `workers` contiguous ranges, spreading the
/// remainder over the first groups so no boid is left unassigned.
fn partition(size: usize, workers: usize) -> Vec<Range<usize>> {
    let base = size / workers;
    let remainder = size % workers;
    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for worker in 0..workers {
        let len = base + usize::from(worker < remainder);
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}

fn worker_loop(
    rx: &Receiver<WorkerCommand>,
    done: &Sender<WorkerDone>,
    worker: usize,
    range: &Range<usize>,
    rules: &RuleConfig,
) {
    while let Ok(command) = rx.recv() {
        match command {
            WorkerCommand::Step(mut job) => {
                // Catch a panicking step so the completion is always sent;
                // an unwinding worker would otherwise leave the dispatcher
                // waiting on a message that can never arrive.
                let out = panic::catch_unwind(AssertUnwindSafe(|| {
                    job.out.clear();
                    for id in range.clone() {
                        let b = &job.snapshot.boids[id];
                        job.out.push(rules::step_boid(
                            b,
                            &job.snapshot.boids,
                            &job.snapshot.index,
                            rules,
                            job.dirty,
                            job.target,
                        ));
                    }
                    job.out
                }))
                .ok();
                let panicked = out.is_none();
                if done.send(WorkerDone { worker, out }).is_err() || panicked {
                    break;
                }
            }
            WorkerCommand::Shutdown => break,
        }
    }
}
