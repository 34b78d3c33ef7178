//! Match clock.
//!
//! The engine never reads wall time. The host advances the clock once per
//! simulation tick with the (possibly time-scaled) step it simulated, and
//! every deadline in the rules is expressed against this clock.

use serde::{Deserialize, Serialize};

/// Simulation time for one match.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchClock {
    now: f64,
    ticks: u64,
}

impl MatchClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one tick of `dt` seconds. Negative steps are ignored.
    pub fn advance(&mut self, dt: f32) {
        if dt > 0.0 {
            self.now += f64::from(dt);
        }
        self.ticks += 1;
    }

    /// Seconds since the match container was created.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Number of ticks processed.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Absolute time `seconds` from now.
    #[must_use]
    pub fn deadline(&self, seconds: f32) -> f64 {
        self.now + f64::from(seconds)
    }

    /// Seconds elapsed since `since`, never negative.
    #[must_use]
    pub fn elapsed_since(&self, since: f64) -> f32 {
        (self.now - since).max(0.0) as f32
    }
}
