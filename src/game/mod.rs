//! The match container.
//!
//! `PoolGame` is the single entry point for the host. Physics events,
//! ticks, session changes and player commands all come in here and are
//! routed to the active round together with the [`MatchContext`].
//!
//! ## Example
//!
//! ```
//! use pool_rules::core::{ClientId, RulesConfig};
//! use pool_rules::game::{Participant, PoolGame};
//! use pool_rules::round::RoundKind;
//!
//! let mut game = PoolGame::new(RulesConfig::default()).unwrap();
//! game.on_player_join(Participant::new(ClientId(1), "Ada", "ada"));
//! game.on_player_join(Participant::new(ClientId(2), "Bea", "bea"));
//!
//! // Two players are enough to rack up
//! assert_eq!(game.round_kind(), RoundKind::Play);
//!
//! let shooter = game.play_round().unwrap().current_player().unwrap().client;
//! game.strike_cue_ball(shooter).unwrap();
//! ```

mod context;
mod notice;
mod participant;
mod physics;
pub mod schedule;

pub use context::MatchContext;
pub use notice::Notice;
pub use participant::Participant;
pub use physics::{OpenTable, PhysicsQuery};
pub use schedule::{DeferredAction, ScheduledAction, Scheduler};

use glam::Vec2;

use crate::balls::{BallMotion, BallRegistry};
use crate::core::{BallId, ClientId, EngineError, PocketId, RulesConfig};
use crate::rating::RatingStore;
use crate::round::{ActiveRound, PlayRound, Round, RoundKind, StatsRound};

pub struct PoolGame {
    ctx: MatchContext,
    round: ActiveRound,
}

impl PoolGame {
    pub fn new(config: RulesConfig) -> Result<Self, EngineError> {
        Ok(Self {
            ctx: MatchContext::new(config)?,
            round: ActiveRound::Idle,
        })
    }

    /// Use `store` for ratings instead of the in-memory default.
    #[must_use]
    pub fn with_rating_store(mut self, store: impl RatingStore + 'static) -> Self {
        self.ctx.rating_store = Box::new(store);
        self
    }

    /// Use `physics` for pot prediction sweeps instead of [`OpenTable`].
    #[must_use]
    pub fn with_physics(mut self, physics: impl PhysicsQuery + 'static) -> Self {
        self.ctx.physics = Box::new(physics);
        self
    }

    #[must_use]
    pub fn context(&self) -> &MatchContext {
        &self.ctx
    }

    #[must_use]
    pub fn balls(&self) -> &BallRegistry {
        &self.ctx.balls
    }

    #[must_use]
    pub fn round(&self) -> &ActiveRound {
        &self.round
    }

    #[must_use]
    pub fn round_kind(&self) -> RoundKind {
        self.round.kind()
    }

    #[must_use]
    pub fn play_round(&self) -> Option<&PlayRound> {
        self.round.as_play()
    }

    #[must_use]
    pub fn stats_round(&self) -> Option<&StatsRound> {
        self.round.as_stats()
    }

    #[must_use]
    pub fn now(&self) -> f64 {
        self.ctx.clock.now()
    }

    /// Take every notice queued since the last drain.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.ctx.notices)
    }

    /// Replace the active round. Bumps the generation, so anything the
    /// old round scheduled is dropped when it comes due.
    fn change_round(&mut self, next: ActiveRound) -> Result<(), EngineError> {
        let mut previous = std::mem::take(&mut self.round);
        previous.on_finish(&mut self.ctx);

        self.ctx.generation += 1;
        self.round = next;
        let kind = self.round.kind();
        self.ctx.notices.push(Notice::RoundChanged { round: kind });

        if let Err(e) = self.round.on_start(&mut self.ctx) {
            log::warn!("Failed to start {kind:?} round: {e}");
            self.round = ActiveRound::Idle;
            self.ctx.notices.push(Notice::RoundChanged {
                round: RoundKind::Idle,
            });
            return Err(e);
        }
        Ok(())
    }

    /// Start a new play round, replacing whatever round is active unless
    /// a match is being played.
    pub fn start_play_round(&mut self) -> Result<(), EngineError> {
        if let Some(round) = self.round.as_play() {
            if round.phase().is_live() {
                return Err(EngineError::InvalidPhase {
                    phase: round.phase().to_string(),
                });
            }
        }
        let found = self.ctx.participants.len();
        if found < 2 {
            return Err(EngineError::NotEnoughPlayers { found });
        }
        self.change_round(ActiveRound::Play(PlayRound::new()))
    }

    /// Register a session. Racks up automatically once two are waiting.
    pub fn on_player_join(&mut self, participant: Participant) {
        if self.ctx.is_present(participant.client) {
            log::debug!("{} joined twice", participant.client);
            return;
        }
        log::info!("{} joined", participant.name);
        self.ctx.participants.push(participant);

        if matches!(self.round, ActiveRound::Idle) && self.ctx.participants.len() >= 2 {
            if let Err(e) = self.start_play_round() {
                log::warn!("Could not start play round: {e}");
            }
        }
    }

    pub fn on_player_leave(&mut self, client: ClientId) {
        let before = self.ctx.participants.len();
        self.ctx.participants.retain(|p| p.client != client);
        if self.ctx.participants.len() == before {
            log::debug!("ignoring leave from unknown {client}");
            return;
        }
        self.round.on_player_leave(&mut self.ctx, client);
    }

    pub fn strike_cue_ball(&mut self, client: ClientId) -> Result<(), EngineError> {
        let round = self.round.as_play_mut().ok_or(EngineError::NoActiveRound)?;
        round.strike(&mut self.ctx, client)
    }

    pub fn place_white_ball(&mut self, client: ClientId, position: Vec2) -> Result<(), EngineError> {
        let round = self.round.as_play_mut().ok_or(EngineError::NoActiveRound)?;
        round.place_white_ball(&mut self.ctx, client, position)
    }

    pub fn on_ball_enter_pocket(&mut self, ball: BallId, pocket: PocketId) {
        self.round.on_ball_enter_pocket(&mut self.ctx, ball, pocket);
    }

    pub fn on_ball_hit_other_ball(&mut self, a: BallId, b: BallId, impact_speed: f32) {
        self.round
            .on_ball_hit_other_ball(&mut self.ctx, a, b, impact_speed);
    }

    /// Advance one simulation tick of `dt` seconds.
    ///
    /// `motions` is the physics snapshot after the step. Pot animations
    /// advance before the round runs its settle check, and deferred round
    /// changes fire last.
    pub fn on_tick(&mut self, dt: f32, motions: &[BallMotion]) {
        self.ctx.clock.advance(dt);
        for motion in motions {
            self.ctx.balls.apply_motion(motion);
        }
        let duration = self.ctx.config.pot_animation_duration;
        self.ctx.balls.advance_animations(dt, duration, &self.ctx.table);

        self.round.on_tick(&mut self.ctx);
        self.run_due_actions();
    }

    pub fn on_second(&mut self) {
        self.round.on_second(&mut self.ctx);
    }

    fn run_due_actions(&mut self) {
        let now = self.ctx.clock.now();
        for scheduled in self.ctx.scheduler.take_due(now) {
            if scheduled.generation != self.ctx.generation {
                log::debug!("dropping stale {:?}", scheduled.action);
                continue;
            }
            let next = match scheduled.action {
                DeferredAction::ShowResults(summary) => {
                    ActiveRound::Stats(StatsRound::new(summary))
                }
                DeferredAction::StartPlayRound if self.ctx.participants.len() >= 2 => {
                    ActiveRound::Play(PlayRound::new())
                }
                DeferredAction::StartPlayRound => {
                    log::info!("Not enough players for another round");
                    ActiveRound::Idle
                }
            };
            if let Err(e) = self.change_round(next) {
                log::warn!("Deferred round change failed: {e}");
            }
        }
    }
}
