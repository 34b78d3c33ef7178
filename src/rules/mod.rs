//! Pool rules: what physical events mean.
//!
//! The rule components turn raw physics events into rule state. They
//! never own anything themselves; the play round lends them a
//! [`ShotState`] for the duration of one event.
//!
//! - `attribution`: who struck what first, and whether that was legal
//! - `pot`: the consequence of a ball entering a pocket
//! - `settle`: when the shot has finished playing out
//!
//! ## Example
//!
//! ```
//! use pool_rules::balls::{BallRegistry, Table};
//! use pool_rules::core::{ClientId, GameRng, PlayerId, PlayerMap, PocketId, TableConfig};
//! use pool_rules::game::Participant;
//! use pool_rules::rating::EloScore;
//! use pool_rules::round::{Player, TurnState};
//! use pool_rules::rules::{PotOutcome, PotResolver, ShotState};
//!
//! let table = Table::new(&TableConfig::default());
//! let mut registry = BallRegistry::new(&table, 7);
//! let mut players = PlayerMap::new(|seat| {
//!     let p = Participant::new(ClientId(seat.index() as u64), "p", "p");
//!     Player::new(&p, EloScore::default())
//! });
//! let mut turn = TurnState::new(30.0);
//! let mut rng = GameRng::new(7);
//! let mut notices = Vec::new();
//!
//! let ball = registry.by_number(3).unwrap();
//! registry.get_mut(ball).unwrap().last_striker = Some(PlayerId::ONE);
//!
//! let mut shot = ShotState {
//!     registry: &mut registry,
//!     table: &table,
//!     players: &mut players,
//!     turn: &mut turn,
//!     current: PlayerId::ONE,
//!     rng: &mut rng,
//!     notices: &mut notices,
//! };
//! let outcome = PotResolver::resolve(&mut shot, ball, PocketId(0));
//!
//! assert!(matches!(outcome, PotOutcome::Claimed { .. }));
//! assert!(turn.claimed_group_this_turn);
//! ```

pub mod attribution;
pub mod foul;
pub mod pot;
pub mod settle;

pub use attribution::{record_contact, ContactOutcome};
pub use foul::FoulReason;
pub use pot::{PotOutcome, PotResolver};
pub use settle::{SettleDetector, SettleStatus};

use crate::balls::{BallGroup, BallRegistry, Table};
use crate::core::{GameRng, PlayerId, PlayerMap};
use crate::game::Notice;
use crate::round::{Player, TurnState};

/// Mutable view of everything a rule handler may touch for one event.
pub struct ShotState<'a> {
    pub registry: &'a mut BallRegistry,
    pub table: &'a Table,
    pub players: &'a mut PlayerMap<Player>,
    pub turn: &'a mut TurnState,
    /// The player at the table.
    pub current: PlayerId,
    pub rng: &'a mut GameRng,
    pub notices: &'a mut Vec<Notice>,
}

impl ShotState<'_> {
    /// Balls a player with `group` still has to clear. An unassigned
    /// player has every object ball ahead of them.
    #[must_use]
    pub fn balls_left_for(&self, group: BallGroup) -> u8 {
        balls_left_for(self.registry, group)
    }

    /// Recount both players' remaining balls from the registry.
    pub fn refresh_remaining(&mut self) {
        refresh_remaining(self.registry, self.players);
    }
}

pub(crate) fn balls_left_for(registry: &BallRegistry, group: BallGroup) -> u8 {
    if group.is_object_group() {
        registry.remaining_in_group(group)
    } else {
        registry.remaining_in_group(BallGroup::GroupA) + registry.remaining_in_group(BallGroup::GroupB)
    }
}

pub(crate) fn refresh_remaining(registry: &BallRegistry, players: &mut PlayerMap<Player>) {
    for (_, player) in players.iter_mut() {
        player.balls_remaining = balls_left_for(registry, player.group);
    }
}
