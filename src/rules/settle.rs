//! Settle detection.
//!
//! A shot is over when every ball on the table is at rest and no ball is
//! still dropping into a pocket. Two heuristics cut the wait:
//!
//! - **Pot prediction.** After `predict_after` seconds, each moving
//!   ball's straight-line path over the next `sweep_lookahead` seconds is
//!   checked against the pockets. A ball heading cleanly for a pocket
//!   holds the settle check until it stops or drops.
//! - **Time scaling.** After `accelerate_after` seconds with nothing
//!   predicted, the simulation is sped up once. It is restored when the
//!   detector resets.

use crate::balls::{BallRegistry, Table};
use crate::core::{BallId, RulesConfig};
use crate::game::{Notice, PhysicsQuery};

/// Result of one settle check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettleStatus {
    /// No shot is being watched.
    Idle,
    /// Balls are still moving.
    Moving,
    /// Waiting on a ball predicted to drop.
    Predicting(BallId),
    /// Everything is at rest.
    Settled,
}

#[derive(Clone, Debug, Default)]
pub struct SettleDetector {
    armed_at: Option<f64>,
    predicted: Option<BallId>,
    time_scaled: bool,
}

impl SettleDetector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start watching a shot that began at `now`. Re-arming a live shot
    /// keeps the original start time.
    pub fn arm(&mut self, now: f64) {
        self.armed_at.get_or_insert(now);
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    #[must_use]
    pub fn predicted(&self) -> Option<BallId> {
        self.predicted
    }

    #[must_use]
    pub fn is_time_scaled(&self) -> bool {
        self.time_scaled
    }

    /// Run one check at match time `now`.
    pub fn update(
        &mut self,
        now: f64,
        registry: &BallRegistry,
        table: &Table,
        config: &RulesConfig,
        physics: &dyn PhysicsQuery,
        notices: &mut Vec<Notice>,
    ) -> SettleStatus {
        let Some(armed_at) = self.armed_at else {
            return SettleStatus::Idle;
        };
        let elapsed = (now - armed_at) as f32;
        let epsilon = config.settle_epsilon;

        if let Some(ball) = self.predicted {
            let still_rolling = registry
                .get(ball)
                .is_some_and(|b| b.in_play && !b.is_animating() && !b.is_stationary(epsilon));
            if still_rolling {
                return SettleStatus::Predicting(ball);
            }
            self.predicted = None;
        }

        if registry.all_stationary(epsilon) {
            return SettleStatus::Settled;
        }

        if elapsed >= config.predict_after {
            if let Some(ball) = self.predict(registry, table, config, physics, notices) {
                return SettleStatus::Predicting(ball);
            }
        }

        if elapsed >= config.accelerate_after && !self.time_scaled {
            log::debug!("shot still rolling after {elapsed:.1}s, speeding up");
            self.time_scaled = true;
            notices.push(Notice::TimeScale(config.fast_time_scale));
        }

        SettleStatus::Moving
    }

    fn predict(
        &mut self,
        registry: &BallRegistry,
        table: &Table,
        config: &RulesConfig,
        physics: &dyn PhysicsQuery,
        notices: &mut Vec<Notice>,
    ) -> Option<BallId> {
        let (ball, pocket) = registry
            .in_play()
            .filter(|b| !b.is_animating() && !b.is_stationary(config.settle_epsilon))
            .find_map(|b| {
                let from = b.position;
                let to = from + b.linear_velocity * config.sweep_lookahead;
                let pocket = table.pocket_on_path(from, to, config.prediction_tolerance)?;
                physics.sweep_clear(b.id, from, to).then_some((b.id, pocket))
            })?;

        self.predicted = Some(ball);
        notices.push(Notice::AnticipatePot { ball, pocket });
        Some(ball)
    }

    /// Stop watching. Restores normal speed if it was raised.
    pub fn reset(&mut self, notices: &mut Vec<Notice>) {
        if self.time_scaled {
            notices.push(Notice::TimeScale(1.0));
        }
        *self = Self::default();
    }
}
