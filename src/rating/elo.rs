//! Elo ratings, ranks and levels.

use serde::{Deserialize, Serialize};

/// Rating a new identity starts from.
pub const STARTING_RATING: i32 = 1000;

/// Rating points per level.
pub const LEVEL_SPAN: i32 = 100;

/// Result of a match from one player's side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EloOutcome {
    Win,
    Loss,
}

impl EloOutcome {
    #[must_use]
    pub const fn score(self) -> f32 {
        match self {
            EloOutcome::Win => 1.0,
            EloOutcome::Loss => 0.0,
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            EloOutcome::Win => EloOutcome::Loss,
            EloOutcome::Loss => EloOutcome::Win,
        }
    }
}

/// Rank tier, derived from rating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlayerRank {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Grandmaster,
}

impl PlayerRank {
    #[must_use]
    pub fn for_rating(rating: i32) -> Self {
        match rating {
            i32::MIN..=1099 => PlayerRank::Bronze,
            1100..=1299 => PlayerRank::Silver,
            1300..=1499 => PlayerRank::Gold,
            1500..=1699 => PlayerRank::Platinum,
            1700..=1999 => PlayerRank::Diamond,
            _ => PlayerRank::Grandmaster,
        }
    }

    /// Lowercase name, used as a style class by the results screen.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            PlayerRank::Bronze => "bronze",
            PlayerRank::Silver => "silver",
            PlayerRank::Gold => "gold",
            PlayerRank::Platinum => "platinum",
            PlayerRank::Diamond => "diamond",
            PlayerRank::Grandmaster => "grandmaster",
        }
    }
}

/// A stored rating and the change from the last match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EloScore {
    pub rating: i32,
    pub delta: i32,
}

impl Default for EloScore {
    fn default() -> Self {
        Self {
            rating: STARTING_RATING,
            delta: 0,
        }
    }
}

impl EloScore {
    #[must_use]
    pub fn new(rating: i32) -> Self {
        Self { rating, delta: 0 }
    }

    #[must_use]
    pub fn rank(&self) -> PlayerRank {
        PlayerRank::for_rating(self.rating)
    }

    #[must_use]
    pub fn level(&self) -> i32 {
        self.rating.max(0) / LEVEL_SPAN
    }

    /// Rating at which the next level starts.
    #[must_use]
    pub fn next_level_rating(&self) -> i32 {
        (self.level() + 1) * LEVEL_SPAN
    }

    /// The score this one was before its last delta.
    #[must_use]
    pub fn previous(&self) -> Self {
        Self::new(self.rating - self.delta)
    }

    /// Expected result against `opponent`, from 0 to 1.
    #[must_use]
    pub fn expected_against(&self, opponent: &EloScore) -> f32 {
        let diff = (opponent.rating - self.rating) as f32;
        1.0 / (1.0 + 10f32.powf(diff / 400.0))
    }

    /// Progress toward the next level, for the results screen.
    #[must_use]
    pub fn progress(&self) -> LevelProgress {
        let previous = self.previous();
        let next = Self::new(previous.next_level_rating());
        LevelProgress {
            from_rank: previous.rank(),
            from_level: previous.level(),
            to_rank: next.rank(),
            to_level: next.level(),
            progress: previous.rating.max(0) % LEVEL_SPAN,
            delta: self.delta,
        }
    }
}

/// Where a rating sits between two levels, and how the last match moved
/// it. `progress` is the part of the level already earned before the
/// match, out of [`LEVEL_SPAN`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub from_rank: PlayerRank,
    pub from_level: i32,
    pub to_rank: PlayerRank,
    pub to_level: i32,
    pub progress: i32,
    pub delta: i32,
}

/// Pairwise Elo update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RatingSystem {
    k_factor: f32,
}

impl RatingSystem {
    #[must_use]
    pub fn new(k_factor: f32) -> Self {
        Self { k_factor }
    }

    #[must_use]
    pub fn k_factor(&self) -> f32 {
        self.k_factor
    }

    /// New score for a player with `score` who had `outcome` against
    /// `opponent`. A win always gains at least one point and a loss
    /// always costs at least one.
    #[must_use]
    pub fn apply(&self, score: &EloScore, opponent: &EloScore, outcome: EloOutcome) -> EloScore {
        let expected = score.expected_against(opponent);
        let change = (self.k_factor * (outcome.score() - expected)).round() as i32;
        let delta = match outcome {
            EloOutcome::Win => change.max(1),
            EloOutcome::Loss => change.min(-1),
        };
        EloScore {
            rating: score.rating + delta,
            delta,
        }
    }

    /// Updated (winner, loser) scores.
    #[must_use]
    pub fn update(&self, winner: &EloScore, loser: &EloScore) -> (EloScore, EloScore) {
        (
            self.apply(winner, loser, EloOutcome::Win),
            self.apply(loser, winner, EloOutcome::Loss),
        )
    }
}

impl Default for RatingSystem {
    fn default() -> Self {
        Self::new(32.0)
    }
}
