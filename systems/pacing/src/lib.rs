#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-interval pacing system that converts wall-clock time into steps.
//!
//! The shell folds every frame delta into the accumulator and then drains it
//! one move interval at a time, issuing one step command per drained
//! interval. Re-reading the engine's interval between drains lets a mid-burst
//! speed-up take effect immediately, and resetting whenever the round is not
//! running guarantees that no burst of steps fires right after unpausing.

use std::time::Duration;

use gridsnake_core::RoundStatus;

/// Accumulates elapsed wall-clock time toward discrete simulation steps.
#[derive(Debug, Default)]
pub struct Pacing {
    accumulator: Duration,
}

impl Pacing {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a frame delta into the accumulator.
    ///
    /// Whenever the round is not running the accumulated time is swallowed
    /// instead, so pausing never banks steps.
    pub fn observe(&mut self, status: RoundStatus, dt: Duration) {
        if status == RoundStatus::Running {
            self.accumulator = self.accumulator.saturating_add(dt);
        } else {
            self.accumulator = Duration::ZERO;
        }
    }

    /// Consumes one move interval from the accumulator.
    ///
    /// Returns `true` when enough time had accrued, in which case the caller
    /// owes the engine exactly one step. A zero interval never fires.
    pub fn consume(&mut self, move_interval: Duration) -> bool {
        if move_interval.is_zero() {
            return false;
        }
        if self.accumulator >= move_interval {
            self.accumulator -= move_interval;
            true
        } else {
            false
        }
    }
}
