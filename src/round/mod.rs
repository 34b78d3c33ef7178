//! Rounds.
//!
//! A match moves through rounds: a play round, then the results round,
//! then another play round. Exactly one is active at a time and it is
//! replaced wholesale, never mutated into another kind.
//!
//! Rounds implement [`Round`]. Every handler receives the
//! [`MatchContext`] explicitly; rounds hold no reference to the match.

mod phase;
pub mod play;
mod player;
pub mod stats;
mod turn;

pub use phase::RoundPhase;
pub use play::PlayRound;
pub use player::Player;
pub use stats::{MatchSummary, StatsRound, SummaryEntry};
pub use turn::{BlackPot, PotRecord, TurnState};

use serde::{Deserialize, Serialize};

use crate::core::{BallId, ClientId, EngineError, PocketId};
use crate::game::MatchContext;

/// Which kind of round is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundKind {
    /// Waiting for enough players.
    Idle,
    Play,
    Stats,
}

/// Round lifecycle and event handlers.
///
/// Every handler defaults to doing nothing; rounds override what they
/// care about.
pub trait Round {
    fn kind(&self) -> RoundKind;

    /// Called once when the round becomes active.
    fn on_start(&mut self, _ctx: &mut MatchContext) -> Result<(), EngineError> {
        Ok(())
    }

    /// Called once when the round is replaced.
    fn on_finish(&mut self, _ctx: &mut MatchContext) {}

    /// Called every simulation tick, after ball motion is applied.
    fn on_tick(&mut self, _ctx: &mut MatchContext) {}

    /// Called once per wall-clock second.
    fn on_second(&mut self, _ctx: &mut MatchContext) {}

    fn on_ball_enter_pocket(&mut self, _ctx: &mut MatchContext, _ball: BallId, _pocket: PocketId) {}

    fn on_ball_hit_other_ball(
        &mut self,
        _ctx: &mut MatchContext,
        _a: BallId,
        _b: BallId,
        _impact_speed: f32,
    ) {
    }

    /// Called after `client` has been removed from the participant list.
    fn on_player_leave(&mut self, _ctx: &mut MatchContext, _client: ClientId) {}
}

/// The active round.
#[derive(Clone, Debug, Default)]
pub enum ActiveRound {
    #[default]
    Idle,
    Play(PlayRound),
    Stats(StatsRound),
}

impl ActiveRound {
    #[must_use]
    pub fn as_play(&self) -> Option<&PlayRound> {
        match self {
            ActiveRound::Play(round) => Some(round),
            _ => None,
        }
    }

    pub fn as_play_mut(&mut self) -> Option<&mut PlayRound> {
        match self {
            ActiveRound::Play(round) => Some(round),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_stats(&self) -> Option<&StatsRound> {
        match self {
            ActiveRound::Stats(round) => Some(round),
            _ => None,
        }
    }

    fn inner(&mut self) -> Option<&mut dyn Round> {
        match self {
            ActiveRound::Idle => None,
            ActiveRound::Play(round) => Some(round),
            ActiveRound::Stats(round) => Some(round),
        }
    }
}

impl Round for ActiveRound {
    fn kind(&self) -> RoundKind {
        match self {
            ActiveRound::Idle => RoundKind::Idle,
            ActiveRound::Play(_) => RoundKind::Play,
            ActiveRound::Stats(_) => RoundKind::Stats,
        }
    }

    fn on_start(&mut self, ctx: &mut MatchContext) -> Result<(), EngineError> {
        match self.inner() {
            Some(round) => round.on_start(ctx),
            None => Ok(()),
        }
    }

    fn on_finish(&mut self, ctx: &mut MatchContext) {
        if let Some(round) = self.inner() {
            round.on_finish(ctx);
        }
    }

    fn on_tick(&mut self, ctx: &mut MatchContext) {
        if let Some(round) = self.inner() {
            round.on_tick(ctx);
        }
    }

    fn on_second(&mut self, ctx: &mut MatchContext) {
        if let Some(round) = self.inner() {
            round.on_second(ctx);
        }
    }

    fn on_ball_enter_pocket(&mut self, ctx: &mut MatchContext, ball: BallId, pocket: PocketId) {
        if let Some(round) = self.inner() {
            round.on_ball_enter_pocket(ctx, ball, pocket);
        }
    }

    fn on_ball_hit_other_ball(
        &mut self,
        ctx: &mut MatchContext,
        a: BallId,
        b: BallId,
        impact_speed: f32,
    ) {
        if let Some(round) = self.inner() {
            round.on_ball_hit_other_ball(ctx, a, b, impact_speed);
        }
    }

    fn on_player_leave(&mut self, ctx: &mut MatchContext, client: ClientId) {
        if let Some(round) = self.inner() {
            round.on_player_leave(ctx, client);
        }
    }
}
