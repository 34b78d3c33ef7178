//! Pot resolution.
//!
//! `PotResolver` decides what a ball entering a pocket means. The
//! decision runs top to bottom and the first matching branch wins:
//!
//! 1. **Nobody struck it.** White and black go back on the table; a group
//!    ball is credited to whoever owns that group, without blame.
//! 2. **White.** `PotWhiteBall` foul, white respawns.
//! 3. **Own group.** Score, and another shot if it is the striker's turn.
//! 4. **Black.** Always ends the round. Recorded here, decided at settle.
//! 5. **Unclaimed group ball.** The striker claims the group.
//! 6. **Opponent's group.** `PotOtherBall` foul unless immune; the owner
//!    gets the point.
//!
//! Every branch appends to the pot history, queues a pocket sound and
//! refreshes both players' remaining counts. Removal and respawn wait for
//! the pot animation to finish.

use crate::balls::BallGroup;
use crate::core::{BallId, PlayerId, PocketId};
use crate::game::Notice;

use super::{FoulReason, ShotState};
use crate::round::BlackPot;

/// What a pot resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PotOutcome {
    /// Unknown ball, or one already in flight or off the table.
    Ignored,
    /// Unattributed white or black, put back on the table.
    Respawned,
    /// Unattributed group ball. `owner` is credited if the group is taken.
    Unattributed { owner: Option<PlayerId> },
    /// The striker potted the white.
    WhitePotted { striker: PlayerId },
    /// The striker potted one of their own.
    Scored { player: PlayerId },
    /// The black went down.
    BlackPotted { potter: PlayerId, own_balls_left: u8 },
    /// The striker claimed a group.
    Claimed { player: PlayerId, group: BallGroup },
    /// The striker potted an opponent's ball.
    OpponentBall {
        striker: PlayerId,
        owner: Option<PlayerId>,
        foul: bool,
    },
}

impl PotOutcome {
    /// Whether the pot counts as legal play for the striker.
    #[must_use]
    pub fn is_legitimate(&self) -> bool {
        matches!(self, PotOutcome::Scored { .. } | PotOutcome::Claimed { .. })
    }
}

/// Resolves pocket entries against the current shot.
pub struct PotResolver;

impl PotResolver {
    /// Resolve `ball` entering `pocket`. The striker credited is the
    /// ball's `last_striker` at this moment.
    pub fn resolve(shot: &mut ShotState<'_>, ball: BallId, pocket: PocketId) -> PotOutcome {
        let Some(entry) = shot.registry.get(ball) else {
            log::debug!("ignoring pot of unknown {ball}");
            return PotOutcome::Ignored;
        };
        let group = entry.group;
        let number = entry.number;
        let striker = entry.last_striker;
        let icon = entry.icon_class();

        if !shot.registry.begin_pot(ball, pocket) {
            log::debug!("ignoring pot of {ball}: already in flight or off the table");
            return PotOutcome::Ignored;
        }

        let variant = shot.rng.variant(2);
        shot.notices.push(Notice::Sound {
            cue: format!("ball-pocket-{variant}"),
            ball,
        });
        shot.turn.record_pot(group, number);

        let outcome = match striker {
            None => Self::unattributed(shot, ball, group),
            Some(striker) => Self::attributed(shot, ball, group, striker, &icon),
        };

        shot.refresh_remaining();
        outcome
    }

    fn unattributed(shot: &mut ShotState<'_>, ball: BallId, group: BallGroup) -> PotOutcome {
        if !group.is_object_group() {
            shot.registry.respawn(ball, shot.table);
            return PotOutcome::Respawned;
        }

        let owner = shot.players.find(|p| p.group == group);
        if let Some(owner) = owner {
            let player = &mut shot.players[owner];
            player.score += 1;
            if owner == shot.current {
                player.has_second_shot = true;
            }
        }
        shot.registry.remove(ball, shot.table);
        PotOutcome::Unattributed { owner }
    }

    fn attributed(
        shot: &mut ShotState<'_>,
        ball: BallId,
        group: BallGroup,
        striker: PlayerId,
        icon: &str,
    ) -> PotOutcome {
        let striker_group = shot.players[striker].group;

        if group == BallGroup::White {
            shot.players[striker].foul(FoulReason::PotWhiteBall);
            shot.registry.respawn(ball, shot.table);
            return PotOutcome::WhitePotted { striker };
        }

        if group == striker_group {
            let is_turn = striker == shot.current;
            let player = &mut shot.players[striker];
            player.score += 1;
            player.did_pot_ball = true;
            if is_turn {
                player.has_second_shot = true;
            }
            Self::toast_potted(shot, striker, icon);
            shot.registry.remove(ball, shot.table);
            return PotOutcome::Scored { player: striker };
        }

        if group == BallGroup::Black {
            Self::toast_potted(shot, striker, icon);
            shot.registry.remove(ball, shot.table);

            let own_balls_left = shot.balls_left_for(striker_group);
            log::info!(
                "{} potted the black with {own_balls_left} of their own left",
                shot.players[striker].name
            );
            shot.turn.black_pot.get_or_insert(BlackPot {
                potter: striker,
                own_balls_left,
            });
            return PotOutcome::BlackPotted {
                potter: striker,
                own_balls_left,
            };
        }

        if striker_group == BallGroup::Unassigned {
            return Self::claim(shot, ball, group, striker, icon);
        }

        let immune = shot.turn.claimed_group_this_turn || shot.players[striker].free_shot;
        let foul = !immune && shot.players[striker].foul(FoulReason::PotOtherBall);
        if immune {
            // An excused pot still counts as contact for the striker
            shot.players[striker].did_pot_ball = true;
        }

        let owner = shot.players.find(|p| p.group == group);
        if let Some(owner) = owner {
            let player = &mut shot.players[owner];
            player.score += 1;
            if owner == shot.current {
                player.has_second_shot = true;
            }
            Self::toast_potted(shot, striker, icon);
        }
        shot.registry.remove(ball, shot.table);

        PotOutcome::OpponentBall {
            striker,
            owner,
            foul,
        }
    }

    fn claim(
        shot: &mut ShotState<'_>,
        ball: BallId,
        group: BallGroup,
        striker: PlayerId,
        icon: &str,
    ) -> PotOutcome {
        let (player, opponent) = shot.players.pair_mut(striker);
        player.group = group;
        player.score += 1;
        player.has_second_shot = true;
        player.did_pot_ball = true;
        opponent.group = group.complement();

        log::info!("{} claimed {}", player.name, group);
        let message = format!("{} has claimed {}", player.name, group);
        let client = player.client;

        shot.turn.claimed_group_this_turn = true;
        shot.notices.push(Notice::toast(client, message, icon));
        shot.registry.remove(ball, shot.table);

        PotOutcome::Claimed {
            player: striker,
            group,
        }
    }

    fn toast_potted(shot: &mut ShotState<'_>, striker: PlayerId, icon: &str) {
        let player = &shot.players[striker];
        let message = format!("{} has potted a ball", player.name);
        shot.notices.push(Notice::toast(player.client, message, icon));
    }
}
