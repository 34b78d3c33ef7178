//! Balls and the table they sit on.
//!
//! - `ball`: the ball entity, its group and its pot animation
//! - `table`: pocket layout and placement geometry
//! - `rack`: the triangle rack and which rack numbers belong to which group
//! - `registry`: the authoritative ball set for a match

pub mod ball;
pub mod rack;
pub mod registry;
pub mod table;

pub use ball::{Ball, BallGroup, BallMotion, Disposition, PotAnimation};
pub use rack::{ball_set, group_for_number, rack_positions, BLACK_NUMBER};
pub use registry::BallRegistry;
pub use table::{segment_point_distance, Pocket, Table};
