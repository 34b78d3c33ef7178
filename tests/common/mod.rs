//! Shared helpers for driving a `PoolGame` through whole shots.

#![allow(dead_code)]

use pool_rules::core::{BallId, ClientId, PlayerId, PocketId, RulesConfig};
use pool_rules::game::{Notice, Participant, PoolGame};
use pool_rules::round::{PlayRound, Player};

pub const ADA: ClientId = ClientId(1);
pub const BEA: ClientId = ClientId(2);

/// A game with two players seated and the first turn open.
pub fn two_player_game(config: RulesConfig) -> PoolGame {
    let mut game = PoolGame::new(config).unwrap();
    game.on_player_join(Participant::new(ADA, "Ada", "ada"));
    game.on_player_join(Participant::new(BEA, "Bea", "bea"));
    game
}

pub fn round(game: &PoolGame) -> &PlayRound {
    game.play_round().expect("play round should be active")
}

pub fn shooter(game: &PoolGame) -> ClientId {
    round(game).current_player().unwrap().client
}

pub fn current(game: &PoolGame) -> &Player {
    round(game).current_player().unwrap()
}

pub fn player(game: &PoolGame, client: ClientId) -> &Player {
    let round = round(game);
    let seat = round.seat_of(client).unwrap();
    round.player(seat).unwrap()
}

pub fn seat(game: &PoolGame, client: ClientId) -> PlayerId {
    round(game).seat_of(client).unwrap()
}

pub fn other(client: ClientId) -> ClientId {
    if client == ADA {
        BEA
    } else {
        ADA
    }
}

pub fn ball(game: &PoolGame, number: u8) -> BallId {
    game.balls().by_number(number).unwrap()
}

/// Strike, touch `contacts` with the cue ball in order, then drop `pots`.
/// The table is left unsettled.
pub fn shoot(game: &mut PoolGame, contacts: &[u8], pots: &[u8]) {
    let client = shooter(game);
    game.strike_cue_ball(client).unwrap();

    let cue = game.balls().cue_ball();
    for &number in contacts {
        let other = ball(game, number);
        game.on_ball_hit_other_ball(cue, other, 1.5);
    }
    for &number in pots {
        let potted = ball(game, number);
        game.on_ball_enter_pocket(potted, PocketId(0));
    }
}

/// Let pot animations finish and the table come to rest.
pub fn settle(game: &mut PoolGame) {
    game.on_tick(1.0, &[]);
}

/// Play a whole shot.
pub fn play_shot(game: &mut PoolGame, contacts: &[u8], pots: &[u8]) {
    shoot(game, contacts, pots);
    settle(game);
}

/// Claim GroupA for whoever breaks, then pass the table around once so
/// that the claiming player starts a fresh turn with no immunity.
/// Returns the claiming player.
pub fn assign_groups(game: &mut PoolGame) -> ClientId {
    let claimer = shooter(game);
    play_shot(game, &[1], &[1]);
    play_shot(game, &[2], &[]);
    assert_eq!(shooter(game), other(claimer));
    play_shot(game, &[9], &[]);
    assert_eq!(shooter(game), claimer);
    claimer
}

pub fn foul_toasts(notices: &[Notice]) -> Vec<String> {
    notices
        .iter()
        .filter_map(|n| match n {
            Notice::Toast { message, icon, .. } if icon == "foul" => Some(message.clone()),
            _ => None,
        })
        .collect()
}
