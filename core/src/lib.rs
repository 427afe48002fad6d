#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Torus Life engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! changed. The grid itself is a fixed-size toroidal array of boolean cells;
//! [`GridState`] owns the cells and enforces the dimension invariant, while
//! [`GridView`] exposes a borrowed read-only window for systems and
//! presentation layers.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the simulation boots.
pub const WELCOME_BANNER: &str = "Welcome to Torus Life.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the grid with a freshly randomized distribution.
    SeedGrid {
        /// Number of cell columns in the new grid.
        width: u32,
        /// Number of cell rows in the new grid.
        height: u32,
        /// Probability that each cell starts alive, in `0.0..=1.0`.
        live_probability: f64,
        /// Seed for the deterministic generator that places live cells.
        rng_seed: u64,
    },
    /// Updates the cadence at which automatic generation advances occur.
    ConfigureTickInterval {
        /// Minimum simulated time required between automatic advances.
        interval: Duration,
    },
    /// Scheduler-delivered tick carrying the current monotonic time.
    Tick {
        /// Monotonic time elapsed since simulation start.
        now: Duration,
    },
    /// Manual request to advance exactly one generation.
    Step {
        /// Monotonic time elapsed since simulation start.
        now: Duration,
    },
    /// Flips the clock between running and paused.
    TogglePause {
        /// Monotonic time elapsed since simulation start.
        now: Duration,
    },
    /// Installs a fully formed grid, replacing the current one wholesale.
    ReplaceGrid {
        /// Grid that becomes the new authoritative state.
        grid: GridState,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that a randomized grid was installed.
    GridSeeded {
        /// Number of cell columns in the seeded grid.
        width: u32,
        /// Number of cell rows in the seeded grid.
        height: u32,
        /// Number of cells that started alive.
        live_cells: usize,
    },
    /// Reports that a seeding request was rejected.
    SeedRejected {
        /// Specific reason the seeding request failed.
        reason: GridError,
    },
    /// Confirms that the automatic tick cadence changed.
    TickIntervalChanged {
        /// Interval that became active after processing the command.
        interval: Duration,
    },
    /// Reports that a tick-interval request was rejected.
    TickIntervalRejected {
        /// Interval provided in the rejected request.
        interval: Duration,
    },
    /// Confirms that the grid advanced one generation.
    GenerationAdvanced {
        /// Generation index reached by the advance.
        generation: u64,
    },
    /// Announces that the simulation clock entered a new mode.
    ClockModeChanged {
        /// Mode that became active after processing commands.
        mode: ClockMode,
    },
    /// Confirms that a loaded grid replaced the previous one.
    GridReplaced {
        /// Number of cell columns in the installed grid.
        width: u32,
        /// Number of cell rows in the installed grid.
        height: u32,
    },
}

/// Describes whether the simulation clock advances generations automatically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClockMode {
    /// Automatic advances occur once per configured interval.
    Running,
    /// Automatic advances are suspended; manual steps remain permitted.
    Paused,
}

/// Errors surfaced by grid construction and cell access.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GridError {
    /// The requested grid dimensions contained a zero side.
    #[error("grid dimensions {width}x{height} must both be positive")]
    InvalidDimension {
        /// Requested number of cell columns.
        width: u32,
        /// Requested number of cell rows.
        height: u32,
    },
    /// The requested live-cell probability fell outside the unit interval.
    #[error("live probability {probability} is outside the range 0.0..=1.0")]
    InvalidProbability {
        /// Probability provided in the rejected request.
        probability: f64,
    },
    /// A cell coordinate lay outside the declared grid bounds.
    #[error("cell ({x}, {y}) lies outside the {width}x{height} grid")]
    OutOfBounds {
        /// Column index of the rejected access.
        x: u32,
        /// Row index of the rejected access.
        y: u32,
        /// Number of cell columns in the grid.
        width: u32,
        /// Number of cell rows in the grid.
        height: u32,
    },
    /// A provided cell buffer disagreed with the declared dimensions.
    #[error("cell buffer holds {actual} cells but the declared dimensions require {expected}")]
    CellCountMismatch {
        /// Cell count required by the declared dimensions.
        expected: usize,
        /// Cell count actually provided.
        actual: usize,
    },
}

/// Validates that a live-cell probability lies within the unit interval.
pub fn validate_live_probability(probability: f64) -> Result<(), GridError> {
    if (0.0..=1.0).contains(&probability) {
        Ok(())
    } else {
        Err(GridError::InvalidProbability { probability })
    }
}

/// Fixed-size toroidal grid of boolean cells stored in row-major order.
///
/// The cell buffer always holds exactly `width * height` entries; the only
/// ways to construct or reshape a grid go through validating constructors,
/// so every reachable instance satisfies the dimension invariant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridState {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl GridState {
    /// Creates a grid of the provided dimensions with every cell dead.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        let capacity = checked_capacity(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![false; capacity],
        })
    }

    /// Creates a grid from an existing row-major cell buffer.
    pub fn from_cells(width: u32, height: u32, cells: Vec<bool>) -> Result<Self, GridError> {
        let expected = checked_capacity(width, height)?;
        if cells.len() != expected {
            return Err(GridError::CellCountMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Number of cell columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of cell rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the cell at the provided coordinates is alive.
    pub fn alive(&self, x: u32, y: u32) -> Result<bool, GridError> {
        let index = self.index(x, y)?;
        Ok(self.cells[index])
    }

    /// Sets the cell at the provided coordinates to the given state.
    pub fn set_alive(&mut self, x: u32, y: u32, value: bool) -> Result<(), GridError> {
        let index = self.index(x, y)?;
        self.cells[index] = value;
        Ok(())
    }

    /// Number of cells that are currently alive.
    #[must_use]
    pub fn live_cells(&self) -> usize {
        self.cells.iter().filter(|cell| **cell).count()
    }

    /// Borrows a read-only view over the grid cells.
    #[must_use]
    pub fn view(&self) -> GridView<'_> {
        GridView {
            cells: &self.cells,
            width: self.width,
            height: self.height,
        }
    }

    fn index(&self, x: u32, y: u32) -> Result<usize, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }
}

fn checked_capacity(width: u32, height: u32) -> Result<usize, GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::InvalidDimension { width, height });
    }
    let capacity = u64::from(width) * u64::from(height);
    usize::try_from(capacity).map_err(|_| GridError::InvalidDimension { width, height })
}

/// Read-only view into the dense cell grid.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a> {
    cells: &'a [bool],
    width: u32,
    height: u32,
}

impl<'a> GridView<'a> {
    /// Reports whether the provided cell is alive.
    ///
    /// Coordinates outside the grid bounds read as dead rather than failing,
    /// so presentation layers can probe freely.
    #[must_use]
    pub fn alive(&self, x: u32, y: u32) -> bool {
        self.index(x, y).map_or(false, |index| self.cells[index])
    }

    /// Returns an iterator over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + 'a {
        self.cells.iter().copied()
    }

    /// Number of cells that are currently alive.
    #[must_use]
    pub fn live_cells(&self) -> usize {
        self.cells.iter().filter(|cell| **cell).count()
    }

    /// Provides the dimensions of the underlying grid.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            let row = usize::try_from(y).ok()?;
            let column = usize::try_from(x).ok()?;
            let width = usize::try_from(self.width).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
