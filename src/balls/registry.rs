//! Ball registry.
//!
//! The `BallRegistry` is the authoritative set of balls for a match. It
//! lives on the match container and outlives rounds: balls are created
//! once and respawned between rounds.
//!
//! Pocketing is two-step. [`BallRegistry::begin_pot`] starts the in-flight
//! animation; [`BallRegistry::remove`] or [`BallRegistry::respawn`] then
//! only records what should happen, and the disposition is applied when
//! the animation completes in [`BallRegistry::advance_animations`].
//!
//! ```
//! use pool_rules::balls::{BallGroup, BallRegistry, Table};
//! use pool_rules::core::TableConfig;
//!
//! let table = Table::new(&TableConfig::default());
//! let registry = BallRegistry::new(&table, 7);
//!
//! assert_eq!(registry.len(), 16);
//! assert_eq!(registry.remaining_in_group(BallGroup::GroupA), 7);
//! ```

use glam::Vec2;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::ball::{Ball, BallGroup, BallMotion, Disposition, PotAnimation};
use super::rack::{ball_set, group_for_number, rack_positions, BLACK_NUMBER};
use super::table::Table;
use crate::core::{BallId, PocketId};

#[derive(Clone, Debug)]
pub struct BallRegistry {
    /// Indexed by `BallId::raw()`.
    balls: Vec<Ball>,
    by_number: FxHashMap<u8, BallId>,
    cue: BallId,
    black: BallId,
}

impl BallRegistry {
    /// Create the full ball set racked on `table`.
    #[must_use]
    pub fn new(table: &Table, balls_per_group: u8) -> Self {
        let config = table.config();
        let rack = rack_positions(config.foot_spot, config.ball_radius);

        let mut balls = Vec::new();
        let mut by_number = FxHashMap::default();

        for (index, number) in ball_set(balls_per_group).into_iter().enumerate() {
            let id = BallId::new(index as u32);
            let spawn = if number == 0 {
                config.cue_spot
            } else {
                rack[(number - 1) as usize]
            };
            balls.push(Ball::new(id, group_for_number(number), number, spawn));
            by_number.insert(number, id);
        }

        let cue = by_number[&0];
        let black = by_number[&BLACK_NUMBER];

        Self {
            balls,
            by_number,
            cue,
            black,
        }
    }

    /// Every ball, in or out of play.
    pub fn all_balls(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter()
    }

    /// Balls currently on the table or animating into a pocket.
    pub fn in_play(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter().filter(|b| b.in_play)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.balls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: BallId) -> Option<&Ball> {
        self.balls.get(id.raw() as usize)
    }

    pub fn get_mut(&mut self, id: BallId) -> Option<&mut Ball> {
        self.balls.get_mut(id.raw() as usize)
    }

    #[must_use]
    pub fn by_number(&self, number: u8) -> Option<BallId> {
        self.by_number.get(&number).copied()
    }

    #[must_use]
    pub fn cue_ball(&self) -> BallId {
        self.cue
    }

    #[must_use]
    pub fn black_ball(&self) -> BallId {
        self.black
    }

    #[must_use]
    pub fn is_in_play(&self, id: BallId) -> bool {
        self.get(id).is_some_and(|b| b.in_play)
    }

    /// Balls of `group` still on the table and not headed for removal.
    #[must_use]
    pub fn remaining_in_group(&self, group: BallGroup) -> u8 {
        self.balls
            .iter()
            .filter(|b| b.group == group && b.counts_as_remaining())
            .count() as u8
    }

    /// Whether every in-play ball is stationary and none is animating.
    #[must_use]
    pub fn all_stationary(&self, epsilon: f32) -> bool {
        self.in_play()
            .all(|b| !b.is_animating() && b.is_stationary(epsilon))
    }

    /// Copy a physics snapshot onto the ball. Ignored for balls that are
    /// out of play or already animating into a pocket.
    pub fn apply_motion(&mut self, motion: &BallMotion) {
        if let Some(ball) = self.get_mut(motion.ball) {
            if ball.in_play && !ball.is_animating() && ball.physics_enabled {
                ball.apply_motion(motion);
            }
        }
    }

    pub fn clear_last_strikers(&mut self) {
        for ball in &mut self.balls {
            ball.last_striker = None;
        }
    }

    pub fn set_physics_enabled(&mut self, id: BallId, enabled: bool) {
        if let Some(ball) = self.get_mut(id) {
            ball.physics_enabled = enabled;
            if !enabled {
                ball.stop();
            }
        }
    }

    /// Reset every ball to its rack position.
    pub fn respawn_all(&mut self) {
        for ball in &mut self.balls {
            ball.pot_animation = None;
            ball.pocketed_via = None;
            ball.last_striker = None;
            ball.in_play = true;
            ball.physics_enabled = true;
            ball.position = ball.spawn;
            ball.stop();
        }
    }

    /// Start the in-flight animation for a ball that just entered a
    /// pocket. Returns `false` if the ball is unknown, out of play or
    /// already animating; such an event must be ignored.
    pub fn begin_pot(&mut self, id: BallId, pocket: PocketId) -> bool {
        let Some(ball) = self.get_mut(id) else {
            return false;
        };
        if !ball.in_play || ball.is_animating() {
            return false;
        }

        let disposition = if ball.is_white() || ball.is_black() {
            Disposition::Respawn
        } else {
            Disposition::Remove
        };
        ball.pot_animation = Some(PotAnimation {
            pocket,
            progress: 0.0,
            disposition,
        });
        ball.pocketed_via = Some(pocket);
        ball.stop();
        true
    }

    /// Take a ball out of play, after its pot animation if one is running.
    pub fn remove(&mut self, id: BallId, table: &Table) {
        self.set_disposition(id, Disposition::Remove, table);
    }

    /// Return a ball to its spawn spot, after its pot animation if one is
    /// running.
    pub fn respawn(&mut self, id: BallId, table: &Table) {
        self.set_disposition(id, Disposition::Respawn, table);
    }

    fn set_disposition(&mut self, id: BallId, disposition: Disposition, table: &Table) {
        let Some(ball) = self.get_mut(id) else {
            return;
        };
        match ball.pot_animation.as_mut() {
            Some(animation) => animation.disposition = disposition,
            None => self.apply_disposition(id, disposition, table),
        }
    }

    /// Advance every pot animation by `dt` seconds of a `duration`-second
    /// animation. Returns the balls whose animation completed this tick.
    pub fn advance_animations(
        &mut self,
        dt: f32,
        duration: f32,
        table: &Table,
    ) -> SmallVec<[BallId; 4]> {
        let step = if duration > 0.0 { dt / duration } else { 1.0 };
        let mut completed: SmallVec<[(BallId, Disposition); 4]> = SmallVec::new();

        for ball in &mut self.balls {
            if let Some(animation) = ball.pot_animation.as_mut() {
                animation.progress = (animation.progress + step).min(1.0);
                if animation.progress >= 1.0 {
                    completed.push((ball.id, animation.disposition));
                }
            }
        }

        completed
            .into_iter()
            .map(|(id, disposition)| {
                self.apply_disposition(id, disposition, table);
                id
            })
            .collect()
    }

    /// Force-complete every running pot animation.
    pub fn finish_animations(&mut self, table: &Table) {
        let pending: SmallVec<[(BallId, Disposition); 4]> = self
            .balls
            .iter()
            .filter_map(|b| b.pot_animation.map(|a| (b.id, a.disposition)))
            .collect();

        for (id, disposition) in pending {
            self.apply_disposition(id, disposition, table);
        }
    }

    fn apply_disposition(&mut self, id: BallId, disposition: Disposition, table: &Table) {
        match disposition {
            Disposition::Remove => {
                if let Some(ball) = self.get_mut(id) {
                    ball.pot_animation = None;
                    ball.in_play = false;
                    ball.physics_enabled = false;
                    ball.stop();
                }
            }
            Disposition::Respawn => {
                let Some(spawn) = self.get(id).map(|b| b.spawn) else {
                    return;
                };
                let occupied = self.occupied_positions(id);
                let spot = table.nearest_free_spot(spawn, &occupied).unwrap_or(spawn);
                if let Some(ball) = self.get_mut(id) {
                    ball.pot_animation = None;
                    ball.in_play = true;
                    ball.physics_enabled = true;
                    ball.position = spot;
                    ball.stop();
                }
            }
        }
    }

    /// Positions of on-table balls other than `except`.
    fn occupied_positions(&self, except: BallId) -> Vec<Vec2> {
        self.balls
            .iter()
            .filter(|b| b.id != except && b.in_play && !b.is_animating())
            .map(|b| b.position)
            .collect()
    }

    /// Whether `id` could be placed at `pos`: on the playing surface and
    /// not overlapping any other ball on the table.
    #[must_use]
    pub fn is_placement_clear(&self, id: BallId, pos: Vec2, table: &Table) -> bool {
        let occupied = self.occupied_positions(id);
        table.is_spot_free(pos, &occupied)
    }

    /// Move a ball to `pos` if the placement is clear. Returns whether it
    /// moved.
    pub fn place(&mut self, id: BallId, pos: Vec2, table: &Table) -> bool {
        if !self.is_placement_clear(id, pos, table) {
            return false;
        }
        match self.get_mut(id) {
            Some(ball) if ball.in_play && !ball.is_animating() => {
                ball.position = pos;
                ball.stop();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TableConfig;

    fn setup() -> (Table, BallRegistry) {
        let table = Table::new(&TableConfig::default());
        let registry = BallRegistry::new(&table, 7);
        (table, registry)
    }

    #[test]
    fn test_new_registry() {
        let (_, registry) = setup();

        assert_eq!(registry.len(), 16);
        assert_eq!(registry.get(registry.cue_ball()).unwrap().group, BallGroup::White);
        assert_eq!(registry.get(registry.black_ball()).unwrap().number, 8);
        assert_eq!(registry.remaining_in_group(BallGroup::GroupA), 7);
        assert_eq!(registry.remaining_in_group(BallGroup::GroupB), 7);
        assert!(registry.all_stationary(0.1));
    }

    #[test]
    fn test_remove_defers_until_animation_completes() {
        let (table, mut registry) = setup();
        let ball = registry.by_number(3).unwrap();

        assert!(registry.begin_pot(ball, PocketId(0)));
        registry.remove(ball, &table);

        // Still in play while animating, but no longer counted
        assert!(registry.is_in_play(ball));
        assert_eq!(registry.remaining_in_group(BallGroup::GroupA), 6);
        assert!(!registry.all_stationary(0.1));

        let done = registry.advance_animations(0.25, 0.5, &table);
        assert!(done.is_empty());
        let done = registry.advance_animations(0.25, 0.5, &table);
        assert_eq!(done.as_slice(), &[ball]);

        assert!(!registry.is_in_play(ball));
        assert!(registry.all_stationary(0.1));
    }

    #[test]
    fn test_begin_pot_is_idempotent() {
        let (table, mut registry) = setup();
        let ball = registry.by_number(10).unwrap();

        assert!(registry.begin_pot(ball, PocketId(2)));
        assert!(!registry.begin_pot(ball, PocketId(3)));

        registry.finish_animations(&table);
        assert!(!registry.begin_pot(ball, PocketId(3)));
    }

    #[test]
    fn test_remove_without_animation_applies_immediately() {
        let (table, mut registry) = setup();
        let ball = registry.by_number(12).unwrap();

        registry.remove(ball, &table);
        assert!(!registry.is_in_play(ball));
    }

    #[test]
    fn test_respawn_white_avoids_other_balls() {
        let (table, mut registry) = setup();
        let cue = registry.cue_ball();
        let blocker = registry.by_number(2).unwrap();
        let cue_spot = table.config().cue_spot;

        // Park another ball on the cue spot
        registry.apply_motion(&BallMotion::at_rest(blocker, cue_spot));

        registry.begin_pot(cue, PocketId(1));
        registry.respawn(cue, &table);
        registry.finish_animations(&table);

        let white = registry.get(cue).unwrap();
        assert!(white.in_play);
        assert!(!table.balls_overlap(white.position, cue_spot));
    }

    #[test]
    fn test_respawn_all_restores_rack() {
        let (table, mut registry) = setup();
        let ball = registry.by_number(5).unwrap();
        registry.remove(ball, &table);
        registry.get_mut(ball).unwrap().last_striker = Some(crate::core::PlayerId::ONE);

        registry.respawn_all();

        let b = registry.get(ball).unwrap();
        assert!(b.in_play);
        assert_eq!(b.position, b.spawn);
        assert!(b.last_striker.is_none());
    }

    #[test]
    fn test_apply_motion_ignored_when_animating() {
        let (_, mut registry) = setup();
        let ball = registry.by_number(1).unwrap();
        registry.begin_pot(ball, PocketId(0));

        registry.apply_motion(&BallMotion::rolling(ball, Vec2::ZERO, Vec2::new(50.0, 0.0)));
        assert_eq!(registry.get(ball).unwrap().speed(), 0.0);
    }

    #[test]
    fn test_placement() {
        let (table, mut registry) = setup();
        let cue = registry.cue_ball();
        let apex = table.config().foot_spot;

        assert!(!registry.place(cue, apex, &table));
        assert!(!registry.place(cue, Vec2::new(0.0, 0.0), &table));

        let open = Vec2::new(150.0, 150.0);
        assert!(registry.place(cue, open, &table));
        assert_eq!(registry.get(cue).unwrap().position, open);
    }
}
