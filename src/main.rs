use anyhow::{Context, Result};
use clap::Parser;
use murmuration_core::{init_logging, Swarm, SwarmConfig};
use std::path::Path;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Number of simulation steps to run
    #[arg(short, long, default_value_t = 1000)]
    steps: u64,

    /// Run a dirty (velocity-recomputing) step every N steps;
    /// the steps in between only integrate positions
    #[arg(short, long, default_value_t = 6)]
    dirty_every: u64,

    /// Initial dirty updates to prime the simulation before the main loop
    #[arg(short, long, default_value_t = 0)]
    init: usize,
}

fn load_config(path: &str) -> Result<SwarmConfig> {
    if !Path::new(path).exists() {
        tracing::warn!(path = path, "Config file not found, using defaults");
        return Ok(SwarmConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {path}"))?;
    SwarmConfig::from_toml(&content).with_context(|| format!("invalid config file {path}"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    anyhow::ensure!(args.dirty_every > 0, "--dirty-every must be positive");

    let config = load_config(&args.config)?;
    let target = config.spawn_center();
    let mut swarm = Swarm::new(config)?;
    tracing::info!(
        boids = swarm.boids().len(),
        workers = swarm.config().flock.workers,
        "Swarm ready"
    );

    if args.init > 0 {
        swarm.init(args.init, target)?;
        tracing::info!(steps = args.init, "Primed simulation");
    }

    for step in 0..args.steps {
        let dirty = step % args.dirty_every == 0;
        swarm.update(dirty, target)?;
    }

    let metrics = swarm.metrics();
    tracing::info!(
        steps = metrics.step_count(),
        dirty_steps = metrics.dirty_count(),
        elapsed_ms = metrics.elapsed().as_millis() as u64,
        "Simulation finished"
    );
    swarm.shutdown();
    Ok(())
}
