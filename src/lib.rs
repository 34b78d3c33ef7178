//! # pool-rules
//!
//! A rules engine for two-player eight-ball pool.
//!
//! The engine does not simulate physics or draw anything. It takes the
//! events a physics world produces (collisions, balls dropping into
//! pockets, per-tick motion) and decides what they mean: whose turn it
//! is, what was a foul, who owns which group, when the game is over and
//! how ratings move.
//!
//! ## Design Principles
//!
//! 1. **Events in, notices out**: the host feeds physics events and
//!    commands into [`PoolGame`] and drains [`Notice`]s for presentation.
//!
//! 2. **No globals**: every round handler is handed the
//!    [`MatchContext`] explicitly.
//!
//! 3. **Explicit suspension**: pot animations are per-ball progress and
//!    delayed round changes are scheduled actions carrying a generation.
//!
//! ## Modules
//!
//! - `core`: IDs, seats, RNG, configuration, clock, errors
//! - `balls`: ball entities, table geometry, the rack and the registry
//! - `rules`: contact attribution, pot resolution, settle detection
//! - `round`: play and results rounds, players and per-turn state
//! - `rating`: Elo ratings, ranks and rating stores
//! - `game`: the match container and its collaborator interfaces

pub mod core;
pub mod balls;
pub mod rules;
pub mod round;
pub mod rating;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    BallId, ClientId, PocketId, PlayerId, PlayerMap,
    GameRng,
    RulesConfig, TableConfig, MatchClock, EngineError,
};

pub use crate::balls::{Ball, BallGroup, BallMotion, BallRegistry, Table};

pub use crate::rules::{FoulReason, PotOutcome, SettleStatus};

pub use crate::round::{
    ActiveRound, MatchSummary, PlayRound, Player, Round, RoundKind, RoundPhase, StatsRound,
    TurnState,
};

pub use crate::rating::{
    EloOutcome, EloScore, JsonFileRatingStore, MemoryRatingStore, PlayerRank, RatingError,
    RatingStore, RatingSystem,
};

pub use crate::game::{
    MatchContext, Notice, OpenTable, Participant, PhysicsQuery, PoolGame,
};
