//! Rack layout.
//!
//! Standard eight-ball triangle, apex toward the cue ball, black in the
//! middle of the third row:
//!
//! ```text
//!  1          <- apex (row 0)
//!  9   2      <- row 1
//!  3   8  10  <- row 2
//! 11  4  5  12 <- row 3
//!  6 13 14  7 15 <- row 4
//! ```
//!
//! Numbers 1-7 are GroupA, 8 is the black, 9-15 are GroupB.

use glam::Vec2;

use super::ball::BallGroup;

/// Rack number of the black ball.
pub const BLACK_NUMBER: u8 = 8;

/// Positions for balls 1-15 (index = number - 1), rows spreading toward +x.
#[must_use]
pub fn rack_positions(apex: Vec2, ball_radius: f32) -> [Vec2; 15] {
    let gap = ball_radius * 2.0 + 1.0;
    let row_offset = gap * 0.866;

    let mut positions = [Vec2::ZERO; 15];

    // (ball_number, row, vertical_offset)
    let layout: [(u8, usize, f32); 15] = [
        (1, 0, 0.0),
        (9, 1, -0.5), (2, 1, 0.5),
        (3, 2, -1.0), (8, 2, 0.0), (10, 2, 1.0),
        (11, 3, -1.5), (4, 3, -0.5), (5, 3, 0.5), (12, 3, 1.5),
        (6, 4, -2.0), (13, 4, -1.0), (14, 4, 0.0), (7, 4, 1.0), (15, 4, 2.0),
    ];

    for (ball_num, row, v_offset) in layout {
        let x = apex.x + (row as f32) * row_offset;
        let y = apex.y + v_offset * gap;
        positions[(ball_num - 1) as usize] = Vec2::new(x, y);
    }

    positions
}

/// Group of a rack number.
#[must_use]
pub fn group_for_number(number: u8) -> BallGroup {
    match number {
        0 => BallGroup::White,
        BLACK_NUMBER => BallGroup::Black,
        1..=7 => BallGroup::GroupA,
        _ => BallGroup::GroupB,
    }
}

/// Rack numbers in play for a set with `balls_per_group` balls per group,
/// cue ball first.
#[must_use]
pub fn ball_set(balls_per_group: u8) -> Vec<u8> {
    let per_group = balls_per_group.min(7);
    let mut numbers = vec![0];
    numbers.extend(1..=per_group);
    numbers.push(BLACK_NUMBER);
    numbers.extend(9..9 + per_group);
    numbers
}
