//! Player ratings.
//!
//! Elo-style pairwise ratings with rank tiers and levels, and the stores
//! that keep them between matches.
//!
//! ```
//! use pool_rules::rating::{EloScore, MemoryRatingStore, RatingStore, RatingSystem};
//!
//! let system = RatingSystem::new(32.0);
//! let (winner, loser) = system.update(&EloScore::default(), &EloScore::default());
//!
//! let mut store = MemoryRatingStore::new();
//! store.save("winner", &winner).unwrap();
//! store.save("loser", &loser).unwrap();
//!
//! assert!(store.load("winner").unwrap().unwrap().rating > loser.rating);
//! ```

mod elo;
mod error;
mod store;

pub use elo::{
    EloOutcome, EloScore, LevelProgress, PlayerRank, RatingSystem, LEVEL_SPAN, STARTING_RATING,
};
pub use error::RatingError;
pub use store::{JsonFileRatingStore, MemoryRatingStore, RatingStore};
