//! Table geometry: pockets, playing bounds and placement checks.

use glam::Vec2;
use smallvec::SmallVec;

use crate::core::{PocketId, TableConfig};

/// A pocket and its centre on the table top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pocket {
    pub id: PocketId,
    pub center: Vec2,
}

/// Derived table geometry.
///
/// Built once from [`TableConfig`]. Pockets are listed corners first
/// (top-left, top-right, bottom-left, bottom-right) then the two side
/// pockets (top, bottom).
#[derive(Clone, Debug)]
pub struct Table {
    config: TableConfig,
    pockets: SmallVec<[Pocket; 6]>,
}

/// Distance from `point` to the segment `p1..p2`.
#[must_use]
pub fn segment_point_distance(p1: Vec2, p2: Vec2, point: Vec2) -> f32 {
    let line = p2 - p1;
    let len_sq = line.length_squared();
    if len_sq < 0.0001 {
        return p1.distance(point);
    }
    let t = ((point - p1).dot(line) / len_sq).clamp(0.0, 1.0);
    let projection = p1 + line * t;
    projection.distance(point)
}

impl Table {
    #[must_use]
    pub fn new(config: &TableConfig) -> Self {
        let w = config.width;
        let h = config.height;
        let c = config.corner_pocket_inset;
        let s = config.side_pocket_inset;

        let centers = [
            Vec2::new(c, c),
            Vec2::new(w - c, c),
            Vec2::new(c, h - c),
            Vec2::new(w - c, h - c),
            Vec2::new(w / 2.0, s),
            Vec2::new(w / 2.0, h - s),
        ];

        let pockets = centers
            .iter()
            .enumerate()
            .map(|(i, &center)| Pocket {
                id: PocketId::new(i as u8),
                center,
            })
            .collect();

        Self {
            config: config.clone(),
            pockets,
        }
    }

    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    #[must_use]
    pub fn ball_radius(&self) -> f32 {
        self.config.ball_radius
    }

    #[must_use]
    pub fn pockets(&self) -> &[Pocket] {
        &self.pockets
    }

    #[must_use]
    pub fn pocket(&self, id: PocketId) -> Option<&Pocket> {
        self.pockets.get(id.index())
    }

    /// Inner corner of the playing surface (inside the cushions).
    #[must_use]
    pub fn play_min(&self) -> Vec2 {
        Vec2::splat(self.config.cushion)
    }

    /// Outer corner of the playing surface (inside the cushions).
    #[must_use]
    pub fn play_max(&self) -> Vec2 {
        Vec2::new(
            self.config.width - self.config.cushion,
            self.config.height - self.config.cushion,
        )
    }

    /// Whether a ball centred at `pos` lies fully on the playing surface.
    #[must_use]
    pub fn contains_ball(&self, pos: Vec2) -> bool {
        let r = self.config.ball_radius;
        let min = self.play_min() + Vec2::splat(r);
        let max = self.play_max() - Vec2::splat(r);
        pos.x >= min.x && pos.x <= max.x && pos.y >= min.y && pos.y <= max.y
    }

    /// Whether two balls centred at `a` and `b` would overlap.
    #[must_use]
    pub fn balls_overlap(&self, a: Vec2, b: Vec2) -> bool {
        a.distance(b) < self.config.ball_radius * 2.0
    }

    /// Whether a ball can sit at `pos` without touching any of `occupied`.
    pub fn is_spot_free<'a>(&self, pos: Vec2, occupied: impl IntoIterator<Item = &'a Vec2>) -> bool {
        self.contains_ball(pos) && occupied.into_iter().all(|o| !self.balls_overlap(pos, *o))
    }

    /// Nearest free spot to `preferred`, searched in rings of one ball
    /// diameter. Returns `None` if nothing on the table is free.
    #[must_use]
    pub fn nearest_free_spot(&self, preferred: Vec2, occupied: &[Vec2]) -> Option<Vec2> {
        if self.is_spot_free(preferred, occupied) {
            return Some(preferred);
        }

        let step = self.config.ball_radius * 2.0 + 1.0;
        let max_rings = ((self.config.width.max(self.config.height)) / step).ceil() as u32;

        for ring in 1..=max_rings {
            let radius = step * ring as f32;
            let samples = 8 * ring;
            for i in 0..samples {
                let angle = std::f32::consts::TAU * i as f32 / samples as f32;
                let candidate = preferred + Vec2::new(angle.cos(), angle.sin()) * radius;
                if self.is_spot_free(candidate, occupied) {
                    return Some(candidate);
                }
            }
        }
        None
    }

    /// First pocket whose capture circle (plus `tolerance`) the segment
    /// `from..to` passes through.
    #[must_use]
    pub fn pocket_on_path(&self, from: Vec2, to: Vec2, tolerance: f32) -> Option<PocketId> {
        let reach = self.config.pocket_radius + tolerance;
        self.pockets
            .iter()
            .filter(|p| segment_point_distance(from, to, p.center) <= reach)
            .min_by(|a, b| {
                from.distance_squared(a.center)
                    .total_cmp(&from.distance_squared(b.center))
            })
            .map(|p| p.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::new(&TableConfig::default())
    }

    #[test]
    fn test_six_pockets() {
        let t = table();
        assert_eq!(t.pockets().len(), 6);
        assert_eq!(t.pocket(PocketId(4)).unwrap().center, Vec2::new(500.0, 17.5));
        assert!(t.pocket(PocketId(6)).is_none());
    }

    #[test]
    fn test_segment_point_distance() {
        let d = segment_point_distance(Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(5.0, 3.0));
        assert!((d - 3.0).abs() < 1e-5);

        // Beyond the end clamps to the endpoint
        let d = segment_point_distance(Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(14.0, 3.0));
        assert!((d - 5.0).abs() < 1e-5);

        // Degenerate segment
        let d = segment_point_distance(Vec2::ONE, Vec2::ONE, Vec2::new(4.0, 5.0));
        assert!((d - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_contains_ball() {
        let t = table();
        assert!(t.contains_ball(Vec2::new(500.0, 250.0)));
        assert!(!t.contains_ball(Vec2::new(40.0, 250.0)));
        assert!(t.contains_ball(Vec2::new(47.0, 250.0)));
    }

    #[test]
    fn test_nearest_free_spot() {
        let t = table();
        let spot = Vec2::new(250.0, 250.0);

        assert_eq!(t.nearest_free_spot(spot, &[]), Some(spot));

        let found = t.nearest_free_spot(spot, &[spot]).unwrap();
        assert_ne!(found, spot);
        assert!(!t.balls_overlap(found, spot));
        assert!(t.contains_ball(found));
    }

    #[test]
    fn test_pocket_on_path() {
        let t = table();
        // Rolling straight at the top-left corner pocket
        let from = Vec2::new(200.0, 200.0);
        let to = Vec2::new(20.0, 20.0);
        assert_eq!(t.pocket_on_path(from, to, 0.0), Some(PocketId(0)));

        // Rolling along the middle of the table hits nothing
        let from = Vec2::new(300.0, 250.0);
        let to = Vec2::new(600.0, 250.0);
        assert_eq!(t.pocket_on_path(from, to, 0.0), None);
    }
}
