//! Property tests for the turn rules.
//!
//! Random shot sequences are fed through `PoolGame` and the invariants
//! that must hold after every shot are checked.

mod common;

use std::collections::BTreeSet;

use common::*;
use pool_rules::balls::{BallGroup, BLACK_NUMBER};
use pool_rules::core::RulesConfig;
use pool_rules::game::PoolGame;
use pool_rules::round::RoundPhase;
use pool_rules::{FoulReason, PlayerId};
use proptest::prelude::*;

/// Numbers of the group balls.
fn group_ball() -> impl Strategy<Value = u8> {
    prop_oneof![1u8..=7, 9u8..=15]
}

/// Any ball the cue ball could touch.
fn object_ball() -> impl Strategy<Value = u8> {
    1u8..=15
}

/// Contacts and pots for one shot. Pots may include the cue ball.
fn shot() -> impl Strategy<Value = (Vec<u8>, Vec<u8>)> {
    (
        prop::collection::vec(object_ball(), 0..4),
        prop::collection::vec(0u8..=15, 0..3),
    )
}

fn live(game: &PoolGame) -> bool {
    game.play_round().is_some_and(|r| r.phase().is_live())
}

/// Drop balls that are already off the table; physics would never report
/// them.
fn on_table(game: &PoolGame, numbers: &[u8]) -> Vec<u8> {
    numbers
        .iter()
        .copied()
        .filter(|&n| game.balls().is_in_play(ball(game, n)))
        .collect()
}

fn groups(game: &PoolGame) -> (BallGroup, BallGroup) {
    let round = round(game);
    (
        round.player(PlayerId::ONE).unwrap().group,
        round.player(PlayerId::TWO).unwrap().group,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Groups start unassigned, are assigned as a complementary pair and
    /// never change afterwards.
    #[test]
    fn test_groups_fixed_once_assigned(
        seed in any::<u64>(),
        shots in prop::collection::vec(shot(), 1..16),
    ) {
        let mut game = two_player_game(RulesConfig::default().with_seed(seed));
        let mut assigned: Option<(BallGroup, BallGroup)> = None;

        for (contacts, pots) in shots {
            if !live(&game) {
                break;
            }
            let contacts = on_table(&game, &contacts);
            let pots = on_table(&game, &pots);
            play_shot(&mut game, &contacts, &pots);

            let now = groups(&game);
            match assigned {
                Some(fixed) => {
                    prop_assert_eq!(now, fixed);
                }
                None if now.0 == BallGroup::Unassigned => {
                    prop_assert_eq!(now.1, BallGroup::Unassigned);
                }
                None => {
                    prop_assert!(now.0.is_object_group());
                    prop_assert_eq!(now.1, now.0.complement());
                    assigned = Some(now);
                }
            }
        }
    }

    /// Pots nobody struck are never fouls. White and black come back;
    /// group balls score for their owner.
    #[test]
    fn test_unattributed_pots_never_foul(
        pots in prop::collection::vec(0u8..=15, 1..10),
    ) {
        let mut game = two_player_game(RulesConfig::default());
        let claimer = assign_groups(&mut game);
        let owner_of_a = seat(&game, claimer);

        let mut expected = [0u32; 2];
        expected[owner_of_a.index()] = player(&game, claimer).score;
        let mut potted = BTreeSet::new();

        for number in pots {
            let id = ball(&game, number);
            if game.balls().is_in_play(id) && number != 0 && number != BLACK_NUMBER
                && potted.insert(number)
            {
                let owner = if number < BLACK_NUMBER { owner_of_a } else { owner_of_a.opponent() };
                expected[owner.index()] += 1;
            }
            game.on_ball_enter_pocket(id, pool_rules::PocketId(2));
            game.on_tick(0.6, &[]);
        }

        let round = round(&game);
        for seat in PlayerId::both() {
            let p = round.player(seat).unwrap();
            prop_assert_eq!(p.foul_reason, None);
            prop_assert_eq!(p.score, expected[seat.index()]);
        }
        prop_assert!(game.balls().is_in_play(game.balls().cue_ball()));
        prop_assert!(game.balls().is_in_play(game.balls().black_ball()));
        prop_assert!(live(&game));
    }

    /// Potting opponent balls without immunity is one foul, however many
    /// go down, and every one of them scores for the owner.
    #[test]
    fn test_opponent_pots_single_foul(
        targets in prop::collection::btree_set(9u8..=15, 1..5),
    ) {
        let mut game = two_player_game(RulesConfig::default());
        let claimer = assign_groups(&mut game);
        let targets: Vec<u8> = targets.into_iter().collect();

        let mut contacts = vec![3];
        contacts.extend(&targets);
        shoot(&mut game, &contacts, &targets);

        prop_assert_eq!(player(&game, claimer).foul_reason, Some(FoulReason::PotOtherBall));
        prop_assert_eq!(player(&game, claimer).score, 1);
        prop_assert_eq!(player(&game, other(claimer)).score, targets.len() as u32);

        game.drain_notices();
        settle(&mut game);
        let fouls = foul_toasts(&game.drain_notices());
        prop_assert_eq!(fouls.len(), 1);
        prop_assert!(fouls[0].ends_with(FoulReason::PotOtherBall.message()));
        prop_assert_eq!(shooter(&game), other(claimer));
    }

    /// On the opening shot, with no black or white involved, `HitNothing`
    /// is called exactly when the cue ball touched nothing.
    #[test]
    fn test_hit_nothing_iff_no_contact(
        seed in any::<u64>(),
        contacts in prop::collection::vec(group_ball(), 0..4),
        pots in prop::collection::btree_set(group_ball(), 0..4),
    ) {
        let mut game = two_player_game(RulesConfig::default().with_seed(seed));
        game.drain_notices();
        let pots: Vec<u8> = pots.into_iter().collect();

        play_shot(&mut game, &contacts, &pots);

        let fouls = foul_toasts(&game.drain_notices());
        if contacts.is_empty() {
            prop_assert_eq!(fouls.len(), 1);
            prop_assert!(fouls[0].ends_with(FoulReason::HitNothing.message()));
        } else {
            prop_assert!(fouls.is_empty());
        }
    }

    /// Potting the black with own balls still on the table hands the game
    /// to the opponent, whatever happened before.
    #[test]
    fn test_early_black_always_loses(
        seed in any::<u64>(),
        shots in prop::collection::vec(shot(), 0..8),
        lead in prop::option::of(group_ball()),
    ) {
        let mut game = two_player_game(RulesConfig::default().with_seed(seed));
        for (contacts, pots) in shots {
            if !live(&game) {
                break;
            }
            let contacts = on_table(&game, &contacts);
            let pots = on_table(&game, &pots);
            play_shot(&mut game, &contacts, &pots);
        }
        prop_assume!(live(&game));
        prop_assume!(current(&game).balls_remaining > 0);

        let potter = round(&game).current().unwrap();
        let mut contacts = on_table(&game, &lead.into_iter().collect::<Vec<_>>());
        contacts.push(BLACK_NUMBER);
        play_shot(&mut game, &contacts, &[BLACK_NUMBER]);

        prop_assert_eq!(
            round(&game).phase(),
            RoundPhase::Finished { winner: Some(potter.opponent()) }
        );
    }
}
