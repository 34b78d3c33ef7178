//! Contact attribution.
//!
//! Every collision during a live shot marks both balls as struck by the
//! player at the table, so a later pot can be credited. Collisions that
//! involve the cue ball are also checked against the first-contact
//! rules:
//!
//! | Player's group | Cue ball touches | Result                                   |
//! |----------------|------------------|------------------------------------------|
//! | Unassigned     | Black            | `HitOtherBall`                           |
//! | Unassigned     | any group ball   | legal contact                            |
//! | Assigned       | own group        | legal contact                            |
//! | Assigned       | opponent group   | `HitOtherBall` unless immune             |
//! | Assigned       | Black            | `HitOtherBall` unless own group cleared  |
//!
//! Only the first cue-ball contact of a shot is judged. Later contacts
//! only move attribution.

use crate::balls::BallGroup;
use crate::core::BallId;

use super::{FoulReason, ShotState};

/// What a collision meant for the player at the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Unknown ball, or the shot is not live.
    Ignored,
    /// Two object balls touched; only attribution changed.
    Attributed,
    /// The cue ball touched something after its first contact.
    LaterContact,
    /// The cue ball's first contact was legal.
    Legal,
    /// A foul was charged (or would have been, if one was not already).
    Foul(FoulReason),
}

/// Record a collision between `a` and `b` during the current player's shot.
pub fn record_contact(shot: &mut ShotState<'_>, a: BallId, b: BallId) -> ContactOutcome {
    let current = shot.current;
    if !shot.players[current].has_struck_white_ball {
        return ContactOutcome::Ignored;
    }

    let (Some(ball_a), Some(ball_b)) = (shot.registry.get(a), shot.registry.get(b)) else {
        log::debug!("ignoring collision with unknown ball: {a} / {b}");
        return ContactOutcome::Ignored;
    };

    let contacted = match (ball_a.is_white(), ball_b.is_white()) {
        (true, false) => Some(ball_b.group),
        (false, true) => Some(ball_a.group),
        _ => None,
    };

    for id in [a, b] {
        if let Some(ball) = shot.registry.get_mut(id) {
            ball.last_striker = Some(current);
        }
    }

    let Some(contacted) = contacted else {
        return ContactOutcome::Attributed;
    };

    if shot.turn.first_contact.is_some() {
        return ContactOutcome::LaterContact;
    }
    shot.turn.first_contact = Some(contacted);
    judge_first_contact(shot, contacted)
}

fn judge_first_contact(shot: &mut ShotState<'_>, contacted: BallGroup) -> ContactOutcome {
    let player = &shot.players[shot.current];
    let own = player.group;

    let foul = if !player.is_assigned() {
        contacted == BallGroup::Black
    } else if contacted == BallGroup::Black {
        !black_is_legal(shot)
    } else if contacted == own {
        false
    } else {
        !(player.free_shot || shot.turn.claimed_group_this_turn || shot.turn.touched_own_ball)
    };

    if foul {
        return charge(shot, FoulReason::HitOtherBall);
    }

    let player = &shot.players[shot.current];
    let legal_target = !player.is_assigned() || contacted == own || contacted == BallGroup::Black;
    if legal_target && !player.has_fouled() {
        shot.turn.touched_own_ball = true;
    }
    ContactOutcome::Legal
}

/// The black may be touched once the player's group is cleared, or after
/// a legal contact this shot.
fn black_is_legal(shot: &ShotState<'_>) -> bool {
    let player = &shot.players[shot.current];
    (player.is_assigned() && player.balls_remaining == 0) || shot.turn.touched_own_ball
}

fn charge(shot: &mut ShotState<'_>, reason: FoulReason) -> ContactOutcome {
    shot.players[shot.current].foul(reason);
    ContactOutcome::Foul(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balls::{BallRegistry, Table};
    use crate::core::{ClientId, GameRng, PlayerId, PlayerMap, TableConfig};
    use crate::game::{Notice, Participant};
    use crate::rating::EloScore;
    use crate::round::{Player, TurnState};
    use crate::rules::refresh_remaining;

    struct Fixture {
        table: Table,
        registry: BallRegistry,
        players: PlayerMap<Player>,
        turn: TurnState,
        rng: GameRng,
        notices: Vec<Notice>,
    }

    impl Fixture {
        fn new() -> Self {
            let table = Table::new(&TableConfig::default());
            let registry = BallRegistry::new(&table, 7);
            let mut players = PlayerMap::new(|seat| {
                let p = Participant::new(ClientId(seat.index() as u64 + 1), "p", "p");
                Player::new(&p, EloScore::default())
            });
            players[PlayerId::ONE].has_struck_white_ball = true;
            refresh_remaining(&registry, &mut players);
            Self {
                table,
                registry,
                players,
                turn: TurnState::new(30.0),
                rng: GameRng::new(1),
                notices: Vec::new(),
            }
        }

        fn assign(&mut self, group: BallGroup) {
            self.players[PlayerId::ONE].group = group;
            self.players[PlayerId::TWO].group = group.complement();
            refresh_remaining(&self.registry, &mut self.players);
        }

        fn hit(&mut self, number: u8) -> ContactOutcome {
            let cue = self.registry.cue_ball();
            let other = self.registry.by_number(number).unwrap();
            let mut shot = ShotState {
                registry: &mut self.registry,
                table: &self.table,
                players: &mut self.players,
                turn: &mut self.turn,
                current: PlayerId::ONE,
                rng: &mut self.rng,
                notices: &mut self.notices,
            };
            record_contact(&mut shot, cue, other)
        }

        fn foul(&self) -> Option<FoulReason> {
            self.players[PlayerId::ONE].foul_reason
        }
    }

    #[test]
    fn test_ignored_before_strike() {
        let mut f = Fixture::new();
        f.players[PlayerId::ONE].has_struck_white_ball = false;

        assert_eq!(f.hit(3), ContactOutcome::Ignored);
        let ball = f.registry.by_number(3).unwrap();
        assert!(f.registry.get(ball).unwrap().last_striker.is_none());
    }

    #[test]
    fn test_sets_last_striker_on_both() {
        let mut f = Fixture::new();
        f.hit(3);

        let cue = f.registry.cue_ball();
        let ball = f.registry.by_number(3).unwrap();
        assert_eq!(f.registry.get(cue).unwrap().last_striker, Some(PlayerId::ONE));
        assert_eq!(f.registry.get(ball).unwrap().last_striker, Some(PlayerId::ONE));
    }

    #[test]
    fn test_unassigned_black_first_is_foul() {
        let mut f = Fixture::new();
        assert_eq!(f.hit(8), ContactOutcome::Foul(FoulReason::HitOtherBall));
        assert!(!f.turn.touched_own_ball);
    }

    #[test]
    fn test_unassigned_group_contact_is_legal() {
        let mut f = Fixture::new();
        assert_eq!(f.hit(12), ContactOutcome::Legal);
        assert!(f.turn.touched_own_ball);
        assert_eq!(f.players[PlayerId::ONE].group, BallGroup::Unassigned);
    }

    #[test]
    fn test_opponent_ball_first_is_foul() {
        let mut f = Fixture::new();
        f.assign(BallGroup::GroupA);

        assert_eq!(f.hit(10), ContactOutcome::Foul(FoulReason::HitOtherBall));
        assert_eq!(f.foul(), Some(FoulReason::HitOtherBall));
    }

    #[test]
    fn test_free_shot_allows_opponent_contact() {
        let mut f = Fixture::new();
        f.assign(BallGroup::GroupA);
        f.players[PlayerId::ONE].free_shot = true;

        assert_eq!(f.hit(10), ContactOutcome::Legal);
        assert!(f.foul().is_none());
        assert!(!f.turn.touched_own_ball);
    }

    #[test]
    fn test_claim_this_turn_allows_opponent_contact() {
        let mut f = Fixture::new();
        f.assign(BallGroup::GroupA);
        f.turn.claimed_group_this_turn = true;

        assert_eq!(f.hit(10), ContactOutcome::Legal);
        assert!(f.foul().is_none());
    }

    #[test]
    fn test_only_first_contact_judged() {
        let mut f = Fixture::new();
        f.assign(BallGroup::GroupA);

        assert_eq!(f.hit(2), ContactOutcome::Legal);
        assert_eq!(f.hit(11), ContactOutcome::LaterContact);
        assert!(f.foul().is_none());
        assert_eq!(f.turn.first_contact, Some(BallGroup::GroupA));
    }

    #[test]
    fn test_black_first_with_balls_left_is_foul() {
        let mut f = Fixture::new();
        f.assign(BallGroup::GroupB);

        assert_eq!(f.hit(8), ContactOutcome::Foul(FoulReason::HitOtherBall));
    }

    #[test]
    fn test_black_after_own_contact_is_legal() {
        let mut f = Fixture::new();
        f.assign(BallGroup::GroupB);

        f.hit(9);
        assert_eq!(f.hit(8), ContactOutcome::LaterContact);
        assert!(f.foul().is_none());
    }

    #[test]
    fn test_later_black_not_judged() {
        let mut f = Fixture::new();

        f.hit(3);
        assert_eq!(f.hit(8), ContactOutcome::LaterContact);
        assert!(f.foul().is_none());
    }

    #[test]
    fn test_black_after_opponent_contact_keeps_first_foul() {
        let mut f = Fixture::new();
        f.assign(BallGroup::GroupB);

        f.hit(1);
        f.hit(8);
        assert_eq!(f.foul(), Some(FoulReason::HitOtherBall));
    }

    #[test]
    fn test_black_when_cleared_is_legal() {
        let mut f = Fixture::new();
        f.assign(BallGroup::GroupA);
        f.players[PlayerId::ONE].balls_remaining = 0;

        assert_eq!(f.hit(8), ContactOutcome::Legal);
        assert!(f.turn.touched_own_ball);
    }

    #[test]
    fn test_object_ball_collision_only_attributes() {
        let mut f = Fixture::new();
        let a = f.registry.by_number(1).unwrap();
        let b = f.registry.by_number(9).unwrap();
        let mut shot = ShotState {
            registry: &mut f.registry,
            table: &f.table,
            players: &mut f.players,
            turn: &mut f.turn,
            current: PlayerId::ONE,
            rng: &mut f.rng,
            notices: &mut f.notices,
        };

        assert_eq!(record_contact(&mut shot, a, b), ContactOutcome::Attributed);
        assert!(f.turn.first_contact.is_none());
        assert_eq!(f.registry.get(b).unwrap().last_striker, Some(PlayerId::ONE));
    }
}
