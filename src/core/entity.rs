//! Entity identification.
//!
//! Every object the rules care about has a small copyable identifier:
//!
//! - [`BallId`]: a ball entity, stable for the life of the match
//! - [`PocketId`]: one of the table's pockets
//! - [`ClientId`]: a connected participant (session identity)
//!
//! Balls are allocated once when the match container is built and are
//! respawned between rounds, never recreated, so a `BallId` stays valid
//! across rounds.
//!
//! ```
//! use pool_rules::core::{BallId, ClientId};
//!
//! let cue = BallId::new(0);
//! assert_eq!(cue.raw(), 0);
//! assert_eq!(format!("{}", ClientId::new(7)), "Client(7)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a ball entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BallId(pub u32);

impl BallId {
    /// Create a new ball ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for BallId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for BallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ball({})", self.0)
    }
}

/// Pocket identifier. Index into the table's pocket list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PocketId(pub u8);

impl PocketId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PocketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pocket({})", self.0)
    }
}

/// Session-level participant identity.
///
/// Assigned by the session collaborator when a participant joins. A
/// `ClientId` may refer to someone who has since disconnected; lookups
/// through [`crate::game::PoolGame`] return `None` in that case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub u64);

impl ClientId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Client({})", self.0)
    }
}
