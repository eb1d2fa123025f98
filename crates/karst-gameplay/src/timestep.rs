//! Fixed timestep accumulation.
//!
//! Wall-clock frames arrive at whatever rate the host runs; the simulation
//! only ever steps in fixed increments. The accumulator converts elapsed
//! frame time into a whole number of pending steps, carrying the remainder.
//! Elapsed time is passed in by the caller, so two runs fed the same frame
//! durations step identically.

use tracing::debug;

/// Converts variable frame times into fixed simulation steps.
#[derive(Debug, Clone)]
pub struct FixedStep {
    /// Duration of one simulation step in milliseconds
    step_ms: f32,
    /// Unconsumed frame time
    accumulator_ms: f32,
    /// Most steps a single advance may return
    max_catch_up: u32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(1000.0 / 60.0)
    }
}

impl FixedStep {
    /// Creates a stepper with the given step duration.
    #[must_use]
    pub fn new(step_ms: f32) -> Self {
        Self {
            step_ms: step_ms.max(1.0),
            accumulator_ms: 0.0,
            max_catch_up: 10,
        }
    }

    /// Sets how many steps one advance may return before dropping time.
    #[must_use]
    pub fn with_max_catch_up(mut self, max_catch_up: u32) -> Self {
        self.max_catch_up = max_catch_up.max(1);
        self
    }

    /// Duration of one step in milliseconds.
    #[must_use]
    pub const fn step_ms(&self) -> f32 {
        self.step_ms
    }

    /// Unconsumed frame time in milliseconds.
    #[must_use]
    pub const fn accumulator_ms(&self) -> f32 {
        self.accumulator_ms
    }

    /// Feeds elapsed frame time and returns how many fixed steps to run.
    ///
    /// Non-positive or non-finite elapsed time is ignored. When a frame is so
    /// long that the cap is hit, the leftover backlog is dropped rather than
    /// carried into the next frame.
    pub fn advance(&mut self, elapsed_ms: f32) -> u32 {
        if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return 0;
        }

        self.accumulator_ms += elapsed_ms;
        let mut count = 0;
        while self.accumulator_ms >= self.step_ms && count < self.max_catch_up {
            self.accumulator_ms -= self.step_ms;
            count += 1;
        }

        // Still behind after the cap: drop the backlog
        if self.accumulator_ms > self.step_ms * 2.0 {
            debug!(
                dropped_ms = self.accumulator_ms,
                "simulation fell behind, dropping backlog"
            );
            self.accumulator_ms = 0.0;
        }

        count
    }

    /// Clears accumulated time (call after a pause or a load).
    pub fn reset(&mut self) {
        self.accumulator_ms = 0.0;
    }
}
