//! Seated players.
//!
//! A `Player` exists only for the length of a play round. The session it
//! belongs to is a [`Participant`]; the seat index is a [`PlayerId`].
//!
//! [`PlayerId`]: crate::core::PlayerId

use serde::{Deserialize, Serialize};

use crate::balls::BallGroup;
use crate::core::ClientId;
use crate::game::Participant;
use crate::rating::EloScore;
use crate::rules::FoulReason;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub client: ClientId,
    pub name: String,
    pub identity_key: String,
    pub group: BallGroup,
    pub score: u32,
    /// Own-group balls still on the table, refreshed after every pot.
    pub balls_remaining: u8,
    pub has_second_shot: bool,
    pub has_struck_white_ball: bool,
    pub did_pot_ball: bool,
    pub foul_reason: Option<FoulReason>,
    pub is_placing_white_ball: bool,
    /// Contact immunity for the first shot after the opponent's foul.
    pub free_shot: bool,
    /// The shot clock ran out before the cue ball was struck.
    pub aim_forfeited: bool,
    pub elo: EloScore,
}

impl Player {
    #[must_use]
    pub fn new(participant: &Participant, elo: EloScore) -> Self {
        Self {
            client: participant.client,
            name: participant.name.clone(),
            identity_key: participant.identity_key.clone(),
            group: BallGroup::Unassigned,
            score: 0,
            balls_remaining: 0,
            has_second_shot: false,
            has_struck_white_ball: false,
            did_pot_ball: false,
            foul_reason: None,
            is_placing_white_ball: false,
            free_shot: false,
            aim_forfeited: false,
            elo,
        }
    }

    #[must_use]
    pub fn is_assigned(&self) -> bool {
        self.group.is_object_group()
    }

    /// Record a foul. The first foul of a turn stands; returns whether
    /// this one was recorded.
    pub fn foul(&mut self, reason: FoulReason) -> bool {
        if self.foul_reason.is_some() {
            return false;
        }
        log::debug!("{} fouled: {}", self.name, reason);
        self.foul_reason = Some(reason);
        true
    }

    #[must_use]
    pub fn has_fouled(&self) -> bool {
        self.foul_reason.is_some()
    }

    /// Whether the shot is being played: struck, or forfeited to the clock.
    #[must_use]
    pub fn is_shot_live(&self) -> bool {
        self.has_struck_white_ball || self.aim_forfeited
    }

    fn reset_shot(&mut self) {
        self.has_second_shot = false;
        self.has_struck_white_ball = false;
        self.did_pot_ball = false;
        self.foul_reason = None;
        self.aim_forfeited = false;
        self.free_shot = false;
        self.is_placing_white_ball = false;
    }

    /// Take the table. After the opponent's foul this also grants
    /// placement, contact immunity and a second visit.
    pub fn start_turn(&mut self, after_foul: bool) {
        self.reset_shot();
        if after_foul {
            self.is_placing_white_ball = true;
            self.free_shot = true;
            self.has_second_shot = true;
        }
    }

    /// Keep the table for another shot. A foul on the previous shot
    /// grants placement and immunity again, but not another visit.
    pub fn continue_turn(&mut self, fouled: bool) {
        self.reset_shot();
        if fouled {
            self.is_placing_white_ball = true;
            self.free_shot = true;
        }
    }

    /// Leave the table.
    pub fn finish_turn(&mut self) {
        self.reset_shot();
    }
}
