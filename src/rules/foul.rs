//! Foul reasons.

use serde::{Deserialize, Serialize};

/// Why a player was penalised this turn.
///
/// Fouls are game outcomes, not errors. A player carries at most one per
/// turn; the first one recorded stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoulReason {
    /// The cue ball went into a pocket.
    PotWhiteBall,
    /// The cue ball's first contact was an illegal ball.
    HitOtherBall,
    /// An opponent's ball was potted without immunity.
    PotOtherBall,
    /// The shot settled without any legal contact or pot.
    HitNothing,
}

impl FoulReason {
    /// Text shown to players when the foul is called.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            FoulReason::PotWhiteBall => "potted the white ball",
            FoulReason::HitOtherBall => "hit the wrong ball first",
            FoulReason::PotOtherBall => "potted an opponent's ball",
            FoulReason::HitNothing => "didn't hit any of their own balls",
        }
    }
}

impl std::fmt::Display for FoulReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
