use std::time::Duration;

use torus_life_core::{ClockMode, Command, Event, GridError, GridState};
use torus_life_world::{self as world, query, World};

const SEED: u64 = 0x5eed_0f_11fe;

fn seeded_world(width: u32, height: u32) -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SeedGrid {
            width,
            height,
            live_probability: 0.25,
            rng_seed: SEED,
        },
        &mut events,
    );
    assert!(
        matches!(events.last(), Some(Event::GridSeeded { .. })),
        "expected the seeding command to install a grid"
    );
    world
}

fn block_grid() -> GridState {
    let mut grid = GridState::new(6, 6).expect("valid dimensions");
    for (x, y) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
        grid.set_alive(x, y, true).expect("in-bounds write");
    }
    grid
}

#[test]
fn boot_world_matches_the_original_defaults() {
    let world = World::new();
    let view = query::grid_view(&world);
    assert_eq!(view.dimensions(), (40, 30));
    assert_eq!(query::clock_mode(&world), ClockMode::Running);
    assert_eq!(query::generation(&world), 0);
    assert_eq!(query::tick_interval(&world), Duration::from_millis(1000));
}

#[test]
fn reseeding_with_the_same_seed_reproduces_the_grid() {
    let first = seeded_world(20, 15);
    let second = seeded_world(20, 15);
    assert_eq!(query::grid(&first), query::grid(&second));
}

#[test]
fn invalid_seed_requests_are_rejected_without_state_change() {
    let mut world = seeded_world(10, 10);
    let before = query::grid(&world).clone();

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SeedGrid {
            width: 0,
            height: 10,
            live_probability: 0.2,
            rng_seed: SEED,
        },
        &mut events,
    );
    assert_eq!(
        events,
        vec![Event::SeedRejected {
            reason: GridError::InvalidDimension {
                width: 0,
                height: 10
            }
        }]
    );

    events.clear();
    world::apply(
        &mut world,
        Command::SeedGrid {
            width: 10,
            height: 10,
            live_probability: 1.2,
            rng_seed: SEED,
        },
        &mut events,
    );
    assert_eq!(
        events,
        vec![Event::SeedRejected {
            reason: GridError::InvalidProbability { probability: 1.2 }
        }]
    );

    assert_eq!(query::grid(&world), &before);
}

#[test]
fn ticks_advance_only_after_one_full_interval() {
    let mut world = seeded_world(12, 12);

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::Tick {
            now: Duration::from_millis(999),
        },
        &mut events,
    );
    assert!(events.is_empty());
    assert_eq!(query::generation(&world), 0);

    world::apply(
        &mut world,
        Command::Tick {
            now: Duration::from_millis(1000),
        },
        &mut events,
    );
    assert_eq!(events, vec![Event::GenerationAdvanced { generation: 1 }]);
}

#[test]
fn paused_ticks_never_advance_but_manual_steps_do() {
    let mut world = seeded_world(12, 12);

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::TogglePause {
            now: Duration::from_millis(100),
        },
        &mut events,
    );
    assert_eq!(
        events,
        vec![Event::ClockModeChanged {
            mode: ClockMode::Paused
        }]
    );
    let paused_grid = query::grid(&world).clone();

    events.clear();
    for seconds in 1..=5 {
        world::apply(
            &mut world,
            Command::Tick {
                now: Duration::from_secs(seconds),
            },
            &mut events,
        );
    }
    assert!(events.is_empty(), "paused ticks must be no-ops");
    assert_eq!(query::grid(&world), &paused_grid);

    world::apply(
        &mut world,
        Command::Step {
            now: Duration::from_secs(6),
        },
        &mut events,
    );
    assert_eq!(events, vec![Event::GenerationAdvanced { generation: 1 }]);
    assert_eq!(query::clock_mode(&world), ClockMode::Paused);
}

#[test]
fn pause_resume_debounces_the_next_tick() {
    let mut world = seeded_world(12, 12);

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::TogglePause {
            now: Duration::from_millis(900),
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::TogglePause {
            now: Duration::from_millis(950),
        },
        &mut events,
    );
    assert_eq!(query::clock_mode(&world), ClockMode::Running);

    events.clear();
    world::apply(
        &mut world,
        Command::Tick {
            now: Duration::from_millis(1800),
        },
        &mut events,
    );
    assert!(
        events.is_empty(),
        "a tick within one interval of the toggle must not advance"
    );

    world::apply(
        &mut world,
        Command::Tick {
            now: Duration::from_millis(1950),
        },
        &mut events,
    );
    assert_eq!(events, vec![Event::GenerationAdvanced { generation: 1 }]);
}

#[test]
fn manual_steps_reset_the_automatic_cadence() {
    let mut world = seeded_world(12, 12);

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::Step {
            now: Duration::from_millis(500),
        },
        &mut events,
    );
    assert_eq!(events, vec![Event::GenerationAdvanced { generation: 1 }]);

    events.clear();
    world::apply(
        &mut world,
        Command::Tick {
            now: Duration::from_millis(1400),
        },
        &mut events,
    );
    assert!(events.is_empty(), "the interval restarts from the manual step");

    world::apply(
        &mut world,
        Command::Tick {
            now: Duration::from_millis(1500),
        },
        &mut events,
    );
    assert_eq!(events, vec![Event::GenerationAdvanced { generation: 2 }]);
}

#[test]
fn configured_interval_governs_future_ticks() {
    let mut world = seeded_world(12, 12);

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ConfigureTickInterval {
            interval: Duration::from_millis(250),
        },
        &mut events,
    );
    assert_eq!(
        events,
        vec![Event::TickIntervalChanged {
            interval: Duration::from_millis(250)
        }]
    );

    events.clear();
    world::apply(
        &mut world,
        Command::Tick {
            now: Duration::from_millis(250),
        },
        &mut events,
    );
    assert_eq!(events, vec![Event::GenerationAdvanced { generation: 1 }]);
}

#[test]
fn zero_interval_requests_are_rejected() {
    let mut world = seeded_world(12, 12);

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ConfigureTickInterval {
            interval: Duration::ZERO,
        },
        &mut events,
    );
    assert_eq!(
        events,
        vec![Event::TickIntervalRejected {
            interval: Duration::ZERO
        }]
    );
    assert_eq!(query::tick_interval(&world), Duration::from_millis(1000));
}

#[test]
fn replacing_the_grid_is_a_wholesale_swap() {
    let mut world = seeded_world(12, 12);
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::Step {
            now: Duration::from_millis(100),
        },
        &mut events,
    );
    assert_eq!(query::generation(&world), 1);

    let block = block_grid();
    events.clear();
    world::apply(
        &mut world,
        Command::ReplaceGrid {
            grid: block.clone(),
        },
        &mut events,
    );
    assert_eq!(
        events,
        vec![Event::GridReplaced {
            width: 6,
            height: 6
        }]
    );
    assert_eq!(query::grid(&world), &block);
    assert_eq!(query::generation(&world), 0);
}

#[test]
fn installed_still_life_survives_automatic_ticks() {
    let mut world = seeded_world(12, 12);
    let block = block_grid();

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ReplaceGrid {
            grid: block.clone(),
        },
        &mut events,
    );

    for seconds in 1..=4 {
        world::apply(
            &mut world,
            Command::Tick {
                now: Duration::from_secs(seconds),
            },
            &mut events,
        );
    }
    assert_eq!(query::generation(&world), 4);
    assert_eq!(query::grid(&world), &block);
}

#[test]
fn grid_dimensions_remain_stable_across_generations() {
    let mut world = seeded_world(17, 9);
    let mut events = Vec::new();
    for step in 1..=10 {
        world::apply(
            &mut world,
            Command::Step {
                now: Duration::from_millis(step * 100),
            },
            &mut events,
        );
        let view = query::grid_view(&world);
        assert_eq!(view.dimensions(), (17, 9));
    }
}
