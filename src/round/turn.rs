//! Per-turn state.
//!
//! Split in two by lifetime:
//!
//! - **Shot latches**, claim immunity included, are cleared after every
//!   shot, whoever keeps the table.
//! - **Turn fields** (`pot_history`) survive while the same player keeps
//!   the table and are cleared when it passes.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::balls::BallGroup;
use crate::core::{BallId, PlayerId};

/// One resolved pot, for display and audit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotRecord {
    pub group: BallGroup,
    pub number: u8,
}

/// The black went down this shot. Who potted it and how many of their own
/// balls were still up at that moment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlackPot {
    pub potter: PlayerId,
    pub own_balls_left: u8,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnState {
    /// Shot clock deadline, in match seconds.
    pub turn_end_time: f64,
    pub predicted_pot_ball: Option<BallId>,
    pub claimed_group_this_turn: bool,
    pub pot_history: Vector<PotRecord>,
    /// Group of the first ball the cue ball touched this shot.
    pub first_contact: Option<BallGroup>,
    pub touched_own_ball: bool,
    pub black_pot: Option<BlackPot>,
}

impl TurnState {
    #[must_use]
    pub fn new(turn_end_time: f64) -> Self {
        Self {
            turn_end_time,
            ..Self::default()
        }
    }

    pub fn record_pot(&mut self, group: BallGroup, number: u8) {
        self.pot_history.push_back(PotRecord { group, number });
    }

    /// Clear the shot latches and restart the clock. Claim immunity lasts
    /// for the claiming shot only; the pot history is kept.
    pub fn reset_shot(&mut self, turn_end_time: f64) {
        self.turn_end_time = turn_end_time;
        self.predicted_pot_ball = None;
        self.claimed_group_this_turn = false;
        self.first_contact = None;
        self.touched_own_ball = false;
        self.black_pot = None;
    }

    /// Clear everything for a new player at the table.
    pub fn reset_turn(&mut self, turn_end_time: f64) {
        *self = Self::new(turn_end_time);
    }
}
