//! Tick-gating state machine for automatic generation advances.

use std::time::Duration;

use torus_life_core::ClockMode;

/// Decides whether a scheduler tick is allowed to advance the simulation.
///
/// The clock owns the "is advancement currently permitted" policy while the
/// external scheduler owns the wall-clock cadence; both communicate through
/// monotonic `now` values measured from simulation start. Every advance and
/// every pause toggle resets the last-advance timestamp, so resuming after a
/// long pause never produces a burst of catch-up generations.
#[derive(Clone, Debug)]
pub(crate) struct SimulationClock {
    running: bool,
    interval: Duration,
    last_advance: Duration,
}

impl SimulationClock {
    pub(crate) const fn new(interval: Duration) -> Self {
        Self {
            running: true,
            interval,
            last_advance: Duration::ZERO,
        }
    }

    /// Flips between running and paused, returning the new mode.
    pub(crate) fn toggle(&mut self, now: Duration) -> ClockMode {
        self.running = !self.running;
        self.last_advance = now;
        self.mode()
    }

    /// Reports whether an automatic tick delivered at `now` may advance.
    pub(crate) fn should_advance(&self, now: Duration) -> bool {
        self.running && now.saturating_sub(self.last_advance) >= self.interval
    }

    /// Records that a generation advance completed at `now`.
    pub(crate) fn mark_advanced(&mut self, now: Duration) {
        self.last_advance = now;
    }

    pub(crate) fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub(crate) const fn interval(&self) -> Duration {
        self.interval
    }

    pub(crate) const fn mode(&self) -> ClockMode {
        if self.running {
            ClockMode::Running
        } else {
            ClockMode::Paused
        }
    }
}
