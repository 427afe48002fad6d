#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Torus Life.
//!
//! The world owns the toroidal cell grid, the simulation clock, and the
//! generation counter. All mutation flows through [`apply`], which executes
//! one [`Command`] to completion and appends the resulting [`Event`] values
//! to the caller's buffer; adapters observe state exclusively through the
//! read-only [`query`] module.

use std::time::Duration;

use torus_life_core::{
    validate_live_probability, Command, Event, GridError, GridState, WELCOME_BANNER,
};
use torus_life_system_transition::next_generation;

mod clock;

use clock::SimulationClock;

const GRID_GENERATION_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

const DEFAULT_GRID_WIDTH: u32 = 40;
const DEFAULT_GRID_HEIGHT: u32 = 30;
const DEFAULT_LIVE_PROBABILITY: f64 = 0.2;
const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);

const RNG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const RNG_INCREMENT: u64 = 1_442_695_040_888_963_407;

/// Represents the authoritative Torus Life world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: GridState,
    clock: SimulationClock,
    generation: u64,
}

impl World {
    /// Creates a new world seeded with the default randomized grid.
    #[must_use]
    pub fn new() -> Self {
        let grid = seeded_grid(
            DEFAULT_GRID_WIDTH,
            DEFAULT_GRID_HEIGHT,
            DEFAULT_LIVE_PROBABILITY,
            GRID_GENERATION_SEED,
        )
        .expect("default grid configuration is valid");

        Self {
            banner: WELCOME_BANNER,
            grid,
            clock: SimulationClock::new(DEFAULT_TICK_INTERVAL),
            generation: 0,
        }
    }

    fn advance_generation(&mut self, out_events: &mut Vec<Event>) {
        self.grid = next_generation(&self.grid);
        self.generation = self.generation.saturating_add(1);
        out_events.push(Event::GenerationAdvanced {
            generation: self.generation,
        });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SeedGrid {
            width,
            height,
            live_probability,
            rng_seed,
        } => match seeded_grid(width, height, live_probability, rng_seed) {
            Ok(grid) => {
                let live_cells = grid.live_cells();
                world.grid = grid;
                world.generation = 0;
                out_events.push(Event::GridSeeded {
                    width,
                    height,
                    live_cells,
                });
            }
            Err(reason) => out_events.push(Event::SeedRejected { reason }),
        },
        Command::ConfigureTickInterval { interval } => {
            if interval.is_zero() {
                out_events.push(Event::TickIntervalRejected { interval });
            } else {
                world.clock.set_interval(interval);
                out_events.push(Event::TickIntervalChanged { interval });
            }
        }
        Command::Tick { now } => {
            if world.clock.should_advance(now) {
                world.clock.mark_advanced(now);
                world.advance_generation(out_events);
            }
        }
        Command::Step { now } => {
            world.clock.mark_advanced(now);
            world.advance_generation(out_events);
        }
        Command::TogglePause { now } => {
            let mode = world.clock.toggle(now);
            out_events.push(Event::ClockModeChanged { mode });
        }
        Command::ReplaceGrid { grid } => {
            let width = grid.width();
            let height = grid.height();
            world.grid = grid;
            world.generation = 0;
            out_events.push(Event::GridReplaced { width, height });
        }
    }
}

fn seeded_grid(
    width: u32,
    height: u32,
    live_probability: f64,
    rng_seed: u64,
) -> Result<GridState, GridError> {
    validate_live_probability(live_probability)?;
    let mut grid = GridState::new(width, height)?;

    let mut rng_state = rng_seed;
    for y in 0..height {
        for x in 0..width {
            rng_state = next_random(rng_state);
            if unit_interval(rng_state) < live_probability {
                grid.set_alive(x, y, true)?;
            }
        }
    }
    Ok(grid)
}

fn next_random(state: u64) -> u64 {
    state
        .wrapping_mul(RNG_MULTIPLIER)
        .wrapping_add(RNG_INCREMENT)
}

fn unit_interval(value: u64) -> f64 {
    // Top 53 bits map uniformly onto [0, 1).
    (value >> 11) as f64 / (1u64 << 53) as f64
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use torus_life_core::{ClockMode, GridState, GridView};

    /// Retrieves the welcome banner that adapters may display on boot.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Borrows the full grid state, primarily for persistence snapshots.
    #[must_use]
    pub fn grid(world: &World) -> &GridState {
        &world.grid
    }

    /// Exposes a read-only view of the cell grid for presentation.
    #[must_use]
    pub fn grid_view(world: &World) -> GridView<'_> {
        world.grid.view()
    }

    /// Reports whether the simulation clock is running or paused.
    #[must_use]
    pub fn clock_mode(world: &World) -> ClockMode {
        world.clock.mode()
    }

    /// Number of generations advanced since the grid was last installed.
    #[must_use]
    pub fn generation(world: &World) -> u64 {
        world.generation
    }

    /// Currently configured automatic tick interval.
    #[must_use]
    pub fn tick_interval(world: &World) -> Duration {
        world.clock.interval()
    }
}
