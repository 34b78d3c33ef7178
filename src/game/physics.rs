//! Physics queries.
//!
//! The engine does not simulate anything. Pot prediction asks the host's
//! physics world whether a ball's straight-line path is clear through
//! this trait.

use glam::Vec2;

use crate::core::BallId;

pub trait PhysicsQuery {
    /// Whether `ball` could travel from `from` to `to` without hitting
    /// another ball or a cushion.
    fn sweep_clear(&self, ball: BallId, from: Vec2, to: Vec2) -> bool;
}

/// A query that treats every path as clear.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenTable;

impl PhysicsQuery for OpenTable {
    fn sweep_clear(&self, _ball: BallId, _from: Vec2, _to: Vec2) -> bool {
        true
    }
}

impl<F> PhysicsQuery for F
where
    F: Fn(BallId, Vec2, Vec2) -> bool,
{
    fn sweep_clear(&self, ball: BallId, from: Vec2, to: Vec2) -> bool {
        self(ball, from, to)
    }
}
