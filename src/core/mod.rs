//! Core engine types: identifiers, seats, RNG, configuration, time, errors.
//!
//! Nothing in here knows about pool rules; the rule modules build on
//! these.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod time;
pub mod error;

pub use entity::{BallId, ClientId, PocketId};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use config::{RulesConfig, TableConfig};
pub use time::MatchClock;
pub use error::EngineError;
