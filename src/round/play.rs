//! The play round.
//!
//! `PlayRound` is the turn state machine. It seats two players, routes
//! physics events to the rule components, and finalizes each shot once
//! the table settles:
//!
//! 1. Charge `HitNothing` if the shot made no legal contact and no pot.
//! 2. Clear ball attribution and placement mode.
//! 3. If the black is off the table, the round is over.
//! 4. Otherwise the player keeps the table on a second shot, or it passes
//!    to the opponent, with placement and immunity after a foul.
//!
//! A finished round applies the rating update and schedules the switch
//! to the results round.

use glam::Vec2;

use crate::core::{BallId, ClientId, EngineError, PlayerId, PlayerMap, PocketId};
use crate::game::schedule::DeferredAction;
use crate::game::{MatchContext, Notice, Participant};
use crate::rating::EloOutcome;
use crate::rules::{
    record_contact, refresh_remaining, FoulReason, PotResolver, SettleDetector, SettleStatus,
    ShotState,
};

use super::stats::{MatchSummary, SummaryEntry};
use super::{Player, Round, RoundKind, RoundPhase, TurnState};

#[derive(Clone, Debug)]
pub struct PlayRound {
    phase: RoundPhase,
    players: Option<PlayerMap<Player>>,
    current: PlayerId,
    turn: TurnState,
    detector: SettleDetector,
    spectators: Vec<ClientId>,
}

impl Default for PlayRound {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayRound {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: RoundPhase::NotStarted,
            players: None,
            current: PlayerId::ONE,
            turn: TurnState::default(),
            detector: SettleDetector::new(),
            spectators: Vec::new(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    #[must_use]
    pub fn players(&self) -> Option<&PlayerMap<Player>> {
        self.players.as_ref()
    }

    #[must_use]
    pub fn player(&self, seat: PlayerId) -> Option<&Player> {
        self.players.as_ref().map(|p| &p[seat])
    }

    /// Seat of the player at the table, once the round has started.
    #[must_use]
    pub fn current(&self) -> Option<PlayerId> {
        self.players.as_ref().map(|_| self.current)
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.player(self.current)
    }

    #[must_use]
    pub fn seat_of(&self, client: ClientId) -> Option<PlayerId> {
        self.players.as_ref()?.find(|p| p.client == client)
    }

    #[must_use]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    #[must_use]
    pub fn spectators(&self) -> &[ClientId] {
        &self.spectators
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            RoundPhase::Finished { winner } => winner,
            _ => None,
        }
    }

    /// Pick the two seats: the previous winner stays on, everyone else is
    /// drawn at random. The previous loser sits out when there is someone
    /// else to play. `None` with fewer than two to choose from.
    fn choose_seats(ctx: &mut MatchContext) -> Option<(Participant, Participant, Vec<ClientId>)> {
        let mut pool: Vec<Participant> = ctx.participants.clone();

        if pool.len() > 2 {
            if let Some(loser) = ctx.previous_loser {
                pool.retain(|p| p.client != loser);
            }
        }

        let winner_index = ctx
            .previous_winner
            .and_then(|winner| pool.iter().position(|p| p.client == winner));
        let one_index = match winner_index {
            Some(index) => index,
            None => ctx.rng.pick_index(pool.len())?,
        };
        let one = pool.remove(one_index);

        let two_index = ctx.rng.pick_index(pool.len())?;
        let two = pool.remove(two_index);

        let spectators = ctx
            .participants
            .iter()
            .map(|p| p.client)
            .filter(|c| *c != one.client && *c != two.client)
            .collect();

        Some((one, two, spectators))
    }

    fn shot<'a>(&'a mut self, ctx: &'a mut MatchContext) -> Option<ShotState<'a>> {
        let players = self.players.as_mut()?;
        Some(ShotState {
            registry: &mut ctx.balls,
            table: &ctx.table,
            players,
            turn: &mut self.turn,
            current: self.current,
            rng: &mut ctx.rng,
            notices: &mut ctx.notices,
        })
    }

    /// Check that `client` is the player at the table during a turn.
    fn acting_seat(&self, ctx: &MatchContext, client: ClientId) -> Result<PlayerId, EngineError> {
        let Some(seat) = self.seat_of(client) else {
            return Err(if ctx.is_present(client) {
                EngineError::NotCurrentPlayer(client)
            } else {
                EngineError::UnknownClient(client)
            });
        };
        if self.phase != RoundPhase::TurnInProgress {
            return Err(EngineError::InvalidPhase {
                phase: self.phase.to_string(),
            });
        }
        if seat != self.current {
            return Err(EngineError::NotCurrentPlayer(client));
        }
        Ok(seat)
    }

    /// Strike the cue ball. Starts the shot.
    pub fn strike(&mut self, ctx: &mut MatchContext, client: ClientId) -> Result<(), EngineError> {
        let seat = self.acting_seat(ctx, client)?;
        let Some(players) = self.players.as_mut() else {
            return Err(EngineError::NoActiveRound);
        };
        let player = &mut players[seat];
        if player.has_struck_white_ball {
            return Err(EngineError::AlreadyStruck);
        }
        if player.aim_forfeited {
            return Err(EngineError::AimForfeited);
        }

        player.has_struck_white_ball = true;
        player.is_placing_white_ball = false;
        let cue = ctx.balls.cue_ball();
        ctx.balls.set_physics_enabled(cue, true);
        self.detector.arm(ctx.clock.now());

        log::debug!("{} struck the cue ball", player.name);
        Ok(())
    }

    /// Move the cue ball while in placement mode.
    pub fn place_white_ball(
        &mut self,
        ctx: &mut MatchContext,
        client: ClientId,
        position: Vec2,
    ) -> Result<(), EngineError> {
        let seat = self.acting_seat(ctx, client)?;
        let Some(players) = self.players.as_ref() else {
            return Err(EngineError::NoActiveRound);
        };
        let player = &players[seat];
        if player.has_struck_white_ball {
            return Err(EngineError::AlreadyStruck);
        }
        if !player.is_placing_white_ball {
            return Err(EngineError::NotPlacing);
        }

        let cue = ctx.balls.cue_ball();
        if !ctx.balls.place(cue, position, &ctx.table) {
            return Err(EngineError::PlacementBlocked {
                x: position.x,
                y: position.y,
            });
        }
        Ok(())
    }

    /// Open the turn for the player at the table.
    fn begin_turn(&mut self, ctx: &mut MatchContext) {
        self.phase = RoundPhase::TurnInProgress;
        self.sync_cue_physics(ctx);
        let seconds = ctx.config.shot_clock.ceil() as u32;
        ctx.notices.push(Notice::ShotClock { seconds });
    }

    fn sync_cue_physics(&self, ctx: &mut MatchContext) {
        let placing = self
            .current_player()
            .is_some_and(|p| p.is_placing_white_ball);
        let cue = ctx.balls.cue_ball();
        ctx.balls.set_physics_enabled(cue, !placing);
    }

    /// Close out the settled shot. Runs once per settle.
    fn finalize(&mut self, ctx: &mut MatchContext) {
        if self.phase != RoundPhase::TurnResolving {
            log::debug!("finalize skipped: round is {}", self.phase);
            return;
        }
        let Some(players) = self.players.as_mut() else {
            return;
        };
        let current = self.current;

        let player = &mut players[current];
        if !self.turn.touched_own_ball && !player.did_pot_ball {
            player.foul(FoulReason::HitNothing);
        }
        player.is_placing_white_ball = false;
        ctx.balls.clear_last_strikers();
        self.detector.reset(&mut ctx.notices);

        if !ctx.balls.is_in_play(ctx.balls.black_ball()) {
            let (potter, own_balls_left) = match self.turn.black_pot {
                Some(pot) => (pot.potter, pot.own_balls_left),
                None => (current, players[current].balls_remaining),
            };
            let clean = own_balls_left == 0 && !players[potter].has_fouled();
            let winner = if clean { potter } else { potter.opponent() };
            self.finish(ctx, Some(winner));
            return;
        }

        let player = &mut players[current];
        let fouled = player.foul_reason;
        if let Some(reason) = fouled {
            let message = format!("{} fouled: {}", player.name, reason);
            ctx.toast(player.client, message, "foul");
        }

        let deadline = ctx.clock.deadline(ctx.config.shot_clock);
        if player.has_second_shot {
            player.continue_turn(fouled.is_some());
            self.turn.reset_shot(deadline);
        } else {
            player.finish_turn();
            let next = current.opponent();
            players[next].start_turn(fouled.is_some());
            log::debug!("turn passes to {}", players[next].name);
            self.current = next;
            self.turn.reset_turn(deadline);
        }

        self.begin_turn(ctx);
    }

    /// End the round. With a winner, ratings are updated; without one
    /// the match was aborted and nothing is scored.
    fn finish(&mut self, ctx: &mut MatchContext, winner: Option<PlayerId>) {
        if self.phase.is_finished() {
            return;
        }
        self.phase = RoundPhase::Finished { winner };
        self.detector.reset(&mut ctx.notices);

        let summary = match (winner, self.players.as_mut()) {
            (Some(winner), Some(players)) => {
                let loser = winner.opponent();
                let (won, lost) = ctx.ratings.update(&players[winner].elo, &players[loser].elo);
                players[winner].elo = won;
                players[loser].elo = lost;

                for seat in [winner, loser] {
                    let player = &players[seat];
                    ctx.save_rating(&player.identity_key, &player.elo);
                }

                let (w, l) = (&players[winner], &players[loser]);
                log::info!("{} beat {} ({:+} / {:+})", w.name, l.name, won.delta, lost.delta);
                ctx.toast(w.client, format!("{} has won the game", w.name), "wins");
                ctx.previous_winner = Some(w.client);
                ctx.previous_loser = Some(l.client);

                MatchSummary::decided(
                    SummaryEntry::new(w, EloOutcome::Win),
                    SummaryEntry::new(l, EloOutcome::Loss),
                )
            }
            _ => {
                log::info!("Play round aborted");
                MatchSummary::aborted()
            }
        };

        let fire_at = ctx.clock.deadline(ctx.config.results_delay);
        ctx.scheduler
            .schedule(fire_at, ctx.generation, DeferredAction::ShowResults(summary));
    }
}

impl Round for PlayRound {
    fn kind(&self) -> RoundKind {
        RoundKind::Play
    }

    fn on_start(&mut self, ctx: &mut MatchContext) -> Result<(), EngineError> {
        if self.phase != RoundPhase::NotStarted {
            return Err(EngineError::InvalidPhase {
                phase: self.phase.to_string(),
            });
        }
        let found = ctx.participants.len();
        if found < 2 {
            return Err(EngineError::NotEnoughPlayers { found });
        }

        ctx.balls.respawn_all();

        let (one, two, spectators) =
            Self::choose_seats(ctx).ok_or(EngineError::NotEnoughPlayers { found })?;
        let one = Player::new(&one, ctx.load_rating(&one.identity_key));
        let two = Player::new(&two, ctx.load_rating(&two.identity_key));
        log::info!("Started play round: {} vs {}", one.name, two.name);

        let mut players = PlayerMap::from_pair(one, two);
        refresh_remaining(&ctx.balls, &mut players);

        self.current = if ctx.rng.coin_flip() {
            PlayerId::ONE
        } else {
            PlayerId::TWO
        };
        players[self.current].start_turn(false);

        self.players = Some(players);
        self.spectators = spectators;
        self.phase = RoundPhase::RacksSet;
        self.turn = TurnState::new(ctx.clock.deadline(ctx.config.shot_clock));

        self.begin_turn(ctx);
        Ok(())
    }

    fn on_finish(&mut self, ctx: &mut MatchContext) {
        log::info!("Finished play round");
        self.detector.reset(&mut ctx.notices);
        ctx.balls.finish_animations(&ctx.table);
        self.spectators.clear();
    }

    fn on_tick(&mut self, ctx: &mut MatchContext) {
        if self.phase != RoundPhase::TurnInProgress {
            return;
        }
        if !self.current_player().is_some_and(Player::is_shot_live) {
            return;
        }

        let now = ctx.clock.now();
        self.detector.arm(now);
        let status = self.detector.update(
            now,
            &ctx.balls,
            &ctx.table,
            &ctx.config,
            &*ctx.physics,
            &mut ctx.notices,
        );
        self.turn.predicted_pot_ball = self.detector.predicted();

        if status == SettleStatus::Settled {
            self.phase = RoundPhase::TurnResolving;
            self.finalize(ctx);
        }
    }

    fn on_second(&mut self, ctx: &mut MatchContext) {
        if self.phase != RoundPhase::TurnInProgress {
            return;
        }
        let now = ctx.clock.now();
        let deadline = self.turn.turn_end_time;
        let Some(player) = self.players.as_mut().map(|p| &mut p[self.current]) else {
            return;
        };
        if player.is_shot_live() {
            return;
        }

        if now >= deadline {
            log::debug!("{} ran out of time", player.name);
            player.aim_forfeited = true;
            player.is_placing_white_ball = false;
            ctx.notices.push(Notice::AimForfeited {
                client: player.client,
            });
            self.detector.arm(now);
            self.sync_cue_physics(ctx);
            return;
        }

        let seconds = (deadline - now).max(0.0).ceil() as u32;
        ctx.notices.push(Notice::ShotClock { seconds });
    }

    fn on_ball_enter_pocket(&mut self, ctx: &mut MatchContext, ball: BallId, pocket: PocketId) {
        if self.phase != RoundPhase::TurnInProgress {
            log::debug!("ignoring pot of {ball} while round is {}", self.phase);
            return;
        }
        if let Some(mut shot) = self.shot(ctx) {
            let outcome = PotResolver::resolve(&mut shot, ball, pocket);
            log::debug!("{ball} potted in {pocket}: {outcome:?}");
        }
    }

    fn on_ball_hit_other_ball(
        &mut self,
        ctx: &mut MatchContext,
        a: BallId,
        b: BallId,
        _impact_speed: f32,
    ) {
        if self.phase != RoundPhase::TurnInProgress {
            return;
        }
        if let Some(mut shot) = self.shot(ctx) {
            record_contact(&mut shot, a, b);
        }
    }

    fn on_player_leave(&mut self, ctx: &mut MatchContext, client: ClientId) {
        self.spectators.retain(|c| *c != client);
        if self.seat_of(client).is_some() && self.phase.is_live() {
            log::info!("{client} left mid-round");
            self.finish(ctx, None);
        }
    }
}
