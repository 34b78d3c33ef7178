use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Play round lifecycle.
///
/// `NotStarted → RacksSet → TurnInProgress ⇄ TurnResolving → Finished`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    NotStarted,
    /// Balls racked and seats chosen; the first turn is about to begin.
    RacksSet,
    /// Aiming, or the shot is rolling.
    TurnInProgress,
    /// The shot settled and is being finalized.
    TurnResolving,
    /// `winner` is `None` when the match was aborted.
    Finished { winner: Option<PlayerId> },
}

impl RoundPhase {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            RoundPhase::NotStarted => "not started",
            RoundPhase::RacksSet => "racks set",
            RoundPhase::TurnInProgress => "turn in progress",
            RoundPhase::TurnResolving => "turn resolving",
            RoundPhase::Finished { .. } => "finished",
        }
    }

    /// Started and not yet finished.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(
            self,
            RoundPhase::RacksSet | RoundPhase::TurnInProgress | RoundPhase::TurnResolving
        )
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, RoundPhase::Finished { .. })
    }
}

impl std::fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
