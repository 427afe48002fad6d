#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives the Torus Life simulation.
//!
//! The binary plays the role of the external scheduler and presentation
//! layer: it seeds (or loads) a grid, delivers tick commands on a real-time
//! cadence, reports the resulting events, and optionally persists a snapshot
//! when the run completes. All simulation semantics live behind the world's
//! `apply` entry point; this adapter only translates wall-clock time and
//! process arguments into commands.

use std::{
    path::PathBuf,
    thread,
    time::{Duration, Instant},
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use torus_life_core::{ClockMode, Command, Event, GridView};
use torus_life_world::{self as world, query, World};

#[derive(Debug, Parser)]
#[command(
    name = "torus-life",
    about = "Conway's Game of Life on a toroidal grid"
)]
struct Args {
    /// Number of cell columns in the grid.
    #[arg(long, default_value_t = 40)]
    width: u32,

    /// Number of cell rows in the grid.
    #[arg(long, default_value_t = 30)]
    height: u32,

    /// Probability that each cell starts alive, in 0.0..=1.0.
    #[arg(long, default_value_t = 0.2)]
    live_probability: f64,

    /// Automatic tick interval in milliseconds.
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,

    /// Number of generations to simulate before exiting.
    #[arg(long, default_value_t = 10)]
    generations: u64,

    /// Seed for the grid generator; drawn randomly when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Snapshot file to load instead of seeding a fresh grid.
    #[arg(long)]
    load: Option<PathBuf>,

    /// Directory that receives a snapshot when the run completes.
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Start with the clock paused and advance via manual steps.
    #[arg(long)]
    paused: bool,

    /// Print an ASCII rendering after every generation advance.
    #[arg(long)]
    render: bool,
}

/// Entry point for the Torus Life command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut world = World::new();
    println!("{}", query::welcome_banner(&world));

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ConfigureTickInterval {
            interval: Duration::from_millis(args.interval_ms),
        },
        &mut events,
    );

    if let Some(path) = &args.load {
        let grid = torus_life_persistence::load(path)
            .with_context(|| format!("failed to load snapshot from {}", path.display()))?;
        world::apply(&mut world, Command::ReplaceGrid { grid }, &mut events);
    } else {
        let rng_seed = args.seed.unwrap_or_else(rand::random);
        world::apply(
            &mut world,
            Command::SeedGrid {
                width: args.width,
                height: args.height,
                live_probability: args.live_probability,
                rng_seed,
            },
            &mut events,
        );
    }

    if let Some(Event::SeedRejected { reason }) = events
        .iter()
        .find(|event| matches!(event, Event::SeedRejected { .. }))
    {
        bail!("could not seed the grid: {reason}");
    }

    let start = Instant::now();
    if args.paused {
        world::apply(
            &mut world,
            Command::TogglePause {
                now: start.elapsed(),
            },
            &mut events,
        );
    }
    report_events(&world, &events, args.render);
    events.clear();

    while query::generation(&world) < args.generations {
        if query::clock_mode(&world) == ClockMode::Paused {
            world::apply(
                &mut world,
                Command::Step {
                    now: start.elapsed(),
                },
                &mut events,
            );
        } else {
            thread::sleep(query::tick_interval(&world));
            world::apply(
                &mut world,
                Command::Tick {
                    now: start.elapsed(),
                },
                &mut events,
            );
        }
        report_events(&world, &events, args.render);
        events.clear();
    }

    if let Some(dir) = &args.save_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create save directory {}", dir.display()))?;
        let path = torus_life_persistence::save_to_dir(dir, query::grid(&world))
            .with_context(|| format!("failed to save snapshot into {}", dir.display()))?;
        log::info!("saved snapshot to {}", path.display());
        println!("Saved snapshot to {}", path.display());
    }

    Ok(())
}

fn report_events(world: &World, events: &[Event], render: bool) {
    for event in events {
        match event {
            Event::GridSeeded {
                width,
                height,
                live_cells,
            } => {
                log::info!("seeded {width}x{height} grid with {live_cells} live cells");
            }
            Event::SeedRejected { reason } => {
                log::error!("seeding rejected: {reason}");
            }
            Event::TickIntervalChanged { interval } => {
                log::info!("tick interval set to {interval:?}");
            }
            Event::TickIntervalRejected { interval } => {
                log::warn!("tick interval {interval:?} rejected; keeping the previous cadence");
            }
            Event::GenerationAdvanced { generation } => {
                let view = query::grid_view(world);
                log::info!("generation {generation}: {} live cells", view.live_cells());
                if render {
                    println!("{}", render_ascii(&view));
                }
            }
            Event::ClockModeChanged { mode } => {
                log::info!("clock is now {mode:?}");
            }
            Event::GridReplaced { width, height } => {
                log::info!("installed loaded {width}x{height} grid");
            }
        }
    }
}

fn render_ascii(view: &GridView<'_>) -> String {
    let (width, height) = view.dimensions();
    let mut out = String::with_capacity((width as usize + 1) * height as usize);
    for y in 0..height {
        for x in 0..width {
            out.push(if view.alive(x, y) { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}
