//! Engine errors.
//!
//! Fouls are not errors; they are recorded on the player as
//! [`crate::rules::FoulReason`]. `EngineError` only covers commands from
//! the host that cannot be carried out in the current state.

use thiserror::Error;

use super::entity::ClientId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("not enough players to start a round: found {found}, need 2")]
    NotEnoughPlayers { found: usize },

    #[error("unknown client: {0}")]
    UnknownClient(ClientId),

    #[error("{0} is not the player at the table")]
    NotCurrentPlayer(ClientId),

    #[error("no play round is in progress")]
    NoActiveRound,

    #[error("command not allowed while the round is {phase}")]
    InvalidPhase { phase: String },

    #[error("the cue ball has already been struck this shot")]
    AlreadyStruck,

    #[error("the shot clock ran out; aiming is forfeited")]
    AimForfeited,

    #[error("player is not placing the cue ball")]
    NotPlacing,

    #[error("cue ball cannot be placed at ({x}, {y})")]
    PlacementBlocked { x: f32, y: f32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    /// Whether retrying the same command later could succeed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            EngineError::NotEnoughPlayers { .. } => true,
            EngineError::InvalidPhase { .. } => true,
            EngineError::PlacementBlocked { .. } => true,
            EngineError::NoActiveRound => true,
            EngineError::InvalidConfig(_) => false,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = EngineError::NotEnoughPlayers { found: 1 };
        assert_eq!(
            err.to_string(),
            "not enough players to start a round: found 1, need 2"
        );
        assert_eq!(
            EngineError::NotCurrentPlayer(ClientId(3)).to_string(),
            "Client(3) is not the player at the table"
        );
    }

    #[test]
    fn test_recoverable() {
        assert!(EngineError::PlacementBlocked { x: 0.0, y: 0.0 }.is_recoverable());
        assert!(!EngineError::InvalidConfig("x".into()).is_recoverable());
        assert!(!EngineError::AlreadyStruck.is_recoverable());
    }
}
