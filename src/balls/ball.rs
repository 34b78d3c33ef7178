//! Ball entities.
//!
//! A `Ball` carries two kinds of state:
//!
//! - **Rule state**: group, number, last striker, pot animation. Only the
//!   active round changes these.
//! - **Physical mirror**: position and velocities, copied in from the
//!   physics collaborator each tick through [`BallMotion`].

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::{BallId, PlayerId, PocketId};

/// Ball category.
///
/// Balls are always `White`, `Black`, `GroupA` or `GroupB`. `Unassigned`
/// is the ownership a player has before the claiming pot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallGroup {
    White,
    Black,
    GroupA,
    GroupB,
    Unassigned,
}

impl BallGroup {
    /// GroupA or GroupB.
    #[must_use]
    pub const fn is_object_group(self) -> bool {
        matches!(self, BallGroup::GroupA | BallGroup::GroupB)
    }

    /// The other object group. Anything else maps to itself.
    #[must_use]
    pub const fn complement(self) -> Self {
        match self {
            BallGroup::GroupA => BallGroup::GroupB,
            BallGroup::GroupB => BallGroup::GroupA,
            other => other,
        }
    }

    /// Display name used in notices.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            BallGroup::White => "white",
            BallGroup::Black => "black",
            BallGroup::GroupA => "spots",
            BallGroup::GroupB => "stripes",
            BallGroup::Unassigned => "unassigned",
        }
    }
}

impl std::fmt::Display for BallGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// What happens to a ball once its pot animation completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Disposition {
    /// Take the ball out of play until the next rack.
    Remove,
    /// Put the ball back on the table at its spawn spot.
    Respawn,
}

/// A ball travelling into a pocket.
///
/// `progress` runs from 0 to 1 and is advanced once per tick. While it is
/// running the ball is neither on the table nor gone.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PotAnimation {
    pub pocket: PocketId,
    pub progress: f32,
    pub disposition: Disposition,
}

/// Per-tick motion snapshot for one ball, from the physics collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BallMotion {
    pub ball: BallId,
    pub position: Vec2,
    pub linear_velocity: Vec2,
    pub angular_velocity: Vec3,
}

impl BallMotion {
    /// A ball at rest at `position`.
    #[must_use]
    pub fn at_rest(ball: BallId, position: Vec2) -> Self {
        Self {
            ball,
            position,
            linear_velocity: Vec2::ZERO,
            angular_velocity: Vec3::ZERO,
        }
    }

    /// A ball rolling with `velocity` (angular velocity left at zero).
    #[must_use]
    pub fn rolling(ball: BallId, position: Vec2, velocity: Vec2) -> Self {
        Self {
            ball,
            position,
            linear_velocity: velocity,
            angular_velocity: Vec3::ZERO,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: BallId,
    pub group: BallGroup,
    /// Rack number: 0 for the cue ball, 8 for the black.
    pub number: u8,
    /// Seat of the player whose shot last moved this ball. Cleared when
    /// the shot resolves.
    pub last_striker: Option<PlayerId>,
    pub pot_animation: Option<PotAnimation>,
    pub pocketed_via: Option<PocketId>,
    /// Rack position, restored by a respawn.
    pub spawn: Vec2,
    pub position: Vec2,
    pub linear_velocity: Vec2,
    pub angular_velocity: Vec3,
    pub in_play: bool,
    pub physics_enabled: bool,
}

impl Ball {
    #[must_use]
    pub fn new(id: BallId, group: BallGroup, number: u8, spawn: Vec2) -> Self {
        Self {
            id,
            group,
            number,
            last_striker: None,
            pot_animation: None,
            pocketed_via: None,
            spawn,
            position: spawn,
            linear_velocity: Vec2::ZERO,
            angular_velocity: Vec3::ZERO,
            in_play: true,
            physics_enabled: true,
        }
    }

    #[must_use]
    pub fn is_white(&self) -> bool {
        self.group == BallGroup::White
    }

    #[must_use]
    pub fn is_black(&self) -> bool {
        self.group == BallGroup::Black
    }

    /// True while the ball is animating into a pocket.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.pot_animation.is_some()
    }

    /// Whether the ball still counts toward its group's remaining total.
    #[must_use]
    pub fn counts_as_remaining(&self) -> bool {
        self.in_play
            && !matches!(
                self.pot_animation,
                Some(PotAnimation {
                    disposition: Disposition::Remove,
                    ..
                })
            )
    }

    /// Linear speed in table units per second.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.linear_velocity.length()
    }

    /// Whether both linear and angular speed are below `epsilon`.
    #[must_use]
    pub fn is_stationary(&self, epsilon: f32) -> bool {
        self.linear_velocity.length() <= epsilon && self.angular_velocity.length() <= epsilon
    }

    /// Icon class the presentation layer uses for this ball.
    #[must_use]
    pub fn icon_class(&self) -> String {
        match self.group {
            BallGroup::White => "ball-white".to_string(),
            BallGroup::Black => "ball-black".to_string(),
            _ => format!("ball-{}", self.number),
        }
    }

    pub(crate) fn stop(&mut self) {
        self.linear_velocity = Vec2::ZERO;
        self.angular_velocity = Vec3::ZERO;
    }

    pub(crate) fn apply_motion(&mut self, motion: &BallMotion) {
        self.position = motion.position;
        self.linear_velocity = motion.linear_velocity;
        self.angular_velocity = motion.angular_velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_complement() {
        assert_eq!(BallGroup::GroupA.complement(), BallGroup::GroupB);
        assert_eq!(BallGroup::GroupB.complement(), BallGroup::GroupA);
        assert_eq!(BallGroup::Black.complement(), BallGroup::Black);
        assert_eq!(BallGroup::Unassigned.complement(), BallGroup::Unassigned);
    }

    #[test]
    fn test_object_groups() {
        assert!(BallGroup::GroupA.is_object_group());
        assert!(BallGroup::GroupB.is_object_group());
        assert!(!BallGroup::White.is_object_group());
        assert!(!BallGroup::Black.is_object_group());
        assert!(!BallGroup::Unassigned.is_object_group());
    }

    #[test]
    fn test_stationary() {
        let mut ball = Ball::new(BallId(1), BallGroup::GroupA, 1, Vec2::ZERO);
        assert!(ball.is_stationary(0.1));

        ball.linear_velocity = Vec2::new(0.05, 0.0);
        assert!(ball.is_stationary(0.1));

        ball.angular_velocity = Vec3::new(0.0, 0.0, 0.5);
        assert!(!ball.is_stationary(0.1));
    }

    #[test]
    fn test_counts_as_remaining() {
        let mut ball = Ball::new(BallId(3), BallGroup::GroupB, 9, Vec2::ZERO);
        assert!(ball.counts_as_remaining());

        ball.pot_animation = Some(PotAnimation {
            pocket: PocketId(0),
            progress: 0.2,
            disposition: Disposition::Respawn,
        });
        assert!(ball.counts_as_remaining());

        ball.pot_animation = Some(PotAnimation {
            pocket: PocketId(0),
            progress: 0.2,
            disposition: Disposition::Remove,
        });
        assert!(!ball.counts_as_remaining());

        ball.pot_animation = None;
        ball.in_play = false;
        assert!(!ball.counts_as_remaining());
    }

    #[test]
    fn test_icon_class() {
        assert_eq!(Ball::new(BallId(0), BallGroup::White, 0, Vec2::ZERO).icon_class(), "ball-white");
        assert_eq!(Ball::new(BallId(9), BallGroup::GroupB, 12, Vec2::ZERO).icon_class(), "ball-12");
    }
}
