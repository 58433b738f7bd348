//! Runs the simulation without a display, holding a spawn trigger at one point
//! for a number of ticks and logging frame statistics.

use clap::Parser;
use quadphase::{Fp, SimConfig, Simulation, Spawn, Vec2};
use rand::{rngs::StdRng, SeedableRng};
use std::{
    error::Error,
    thread,
    time::{Duration, Instant},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "quadphase-headless", about = "Headless quadtree collision simulation")]
struct Args {
    /// Frames to run.
    #[arg(long, default_value_t = 2000)]
    frames: u64,
    /// Milliseconds between ticks.
    #[arg(long, default_value_t = 15)]
    tick_ms: u64,
    /// Frames during which the spawn trigger is held, spawning one body per frame.
    #[arg(long, default_value_t = 500)]
    hold: u64,
    /// Spawn point, x.
    #[arg(long, default_value_t = 300.0)]
    x: Fp,
    /// Spawn point, y.
    #[arg(long, default_value_t = 300.0)]
    y: Fp,
    #[arg(long, default_value_t = 600.0)]
    width: Fp,
    #[arg(long, default_value_t = 600.0)]
    height: Fp,
    /// Quadtree node capacity.
    #[arg(long, default_value_t = 3)]
    capacity: usize,
    #[arg(long, default_value_t = 10.0)]
    radius: Fp,
    /// Materialize the quadtree grid every frame.
    #[arg(long)]
    grid: bool,
    /// Seed for spawn velocities. Drawn from entropy when absent.
    #[arg(long)]
    seed: Option<u64>,
    /// Log a summary every this many frames.
    #[arg(long, default_value_t = 60)]
    report_every: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = SimConfig {
        width: args.width,
        height: args.height,
        capacity: args.capacity,
        spawn_radius: args.radius,
        ..SimConfig::default()
    };
    let mut sim = Simulation::new(config)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let tick = Duration::from_millis(args.tick_ms);
    let origin = Vec2::new(args.x, args.y);
    let mut last = Instant::now();
    let mut next = last + tick;

    for frame in 0..args.frames {
        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f64() as Fp;
        last = now;

        let spawns = if frame < args.hold {
            vec![Spawn::random(origin, sim.config().velocity_range, &mut rng)]
        } else {
            Vec::new()
        };
        let report = sim.advance_frame(dt, &spawns, args.grid)?;

        if args.report_every > 0 && frame % args.report_every == 0 {
            info!(
                frame,
                fps = ?report.fps,
                bodies = report.bodies,
                detections = report.detections,
                brute_force = report.brute_force_pairs,
                collisions = report.collisions,
                depth = report.depth,
                leaves = ?report.grid.as_ref().map(Vec::len),
                "frame"
            );
        }

        // fixed-interval ticker; frames that overrun start immediately
        let now = Instant::now();
        if next > now {
            thread::sleep(next - now);
        }
        next += tick;
    }

    info!(frames = sim.frame(), bodies = sim.bodies().len(), "done");
    Ok(())
}
