//! The results round.
//!
//! Shown after a play round ends. It carries the match summary (who won,
//! how ratings moved, progress toward the next level) and hands back to
//! a new play round after `stats_duration` seconds.

use serde::{Deserialize, Serialize};

use crate::core::ClientId;
use crate::game::schedule::DeferredAction;
use crate::game::MatchContext;
use crate::rating::{EloOutcome, EloScore, LevelProgress};

use super::{Player, Round, RoundKind};

/// One side of a finished match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub client: ClientId,
    pub name: String,
    pub outcome: EloOutcome,
    /// Rating after the match, with the change in `delta`.
    pub score: EloScore,
    pub progress: LevelProgress,
}

impl SummaryEntry {
    #[must_use]
    pub fn new(player: &Player, outcome: EloOutcome) -> Self {
        Self {
            client: player.client,
            name: player.name.clone(),
            outcome,
            score: player.elo,
            progress: player.elo.progress(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub winner: Option<SummaryEntry>,
    pub loser: Option<SummaryEntry>,
}

impl MatchSummary {
    #[must_use]
    pub fn decided(winner: SummaryEntry, loser: SummaryEntry) -> Self {
        Self {
            winner: Some(winner),
            loser: Some(loser),
        }
    }

    /// A match that ended without a result.
    #[must_use]
    pub fn aborted() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.winner.is_none()
    }

    /// The entry for `client`, if they played.
    #[must_use]
    pub fn entry_for(&self, client: ClientId) -> Option<&SummaryEntry> {
        [&self.winner, &self.loser]
            .into_iter()
            .flatten()
            .find(|e| e.client == client)
    }

    /// The entry for whoever `client` played against.
    #[must_use]
    pub fn opponent_of(&self, client: ClientId) -> Option<&SummaryEntry> {
        self.entry_for(client)?;
        [&self.winner, &self.loser]
            .into_iter()
            .flatten()
            .find(|e| e.client != client)
    }
}

#[derive(Clone, Debug)]
pub struct StatsRound {
    summary: MatchSummary,
    ends_at: f64,
}

impl StatsRound {
    #[must_use]
    pub fn new(summary: MatchSummary) -> Self {
        Self {
            summary,
            ends_at: 0.0,
        }
    }

    #[must_use]
    pub fn summary(&self) -> &MatchSummary {
        &self.summary
    }

    /// Seconds until the next play round, at match time `now`.
    #[must_use]
    pub fn time_left(&self, now: f64) -> f32 {
        (self.ends_at - now).max(0.0) as f32
    }
}

impl Round for StatsRound {
    fn kind(&self) -> RoundKind {
        RoundKind::Stats
    }

    fn on_start(&mut self, ctx: &mut MatchContext) -> Result<(), crate::core::EngineError> {
        self.ends_at = ctx.clock.deadline(ctx.config.stats_duration);
        ctx.scheduler
            .schedule(self.ends_at, ctx.generation, DeferredAction::StartPlayRound);
        log::info!("Started stats round");
        Ok(())
    }

    fn on_finish(&mut self, _ctx: &mut MatchContext) {
        log::info!("Finished stats round");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Participant;

    fn entry(client: u64, outcome: EloOutcome) -> SummaryEntry {
        let participant = Participant::new(ClientId(client), "p", "p");
        SummaryEntry::new(&Player::new(&participant, EloScore::default()), outcome)
    }

    #[test]
    fn test_summary_lookup() {
        let summary = MatchSummary::decided(entry(1, EloOutcome::Win), entry(2, EloOutcome::Loss));

        assert!(!summary.is_aborted());
        assert_eq!(summary.entry_for(ClientId(2)).unwrap().outcome, EloOutcome::Loss);
        assert_eq!(summary.opponent_of(ClientId(2)).unwrap().client, ClientId(1));
        assert!(summary.opponent_of(ClientId(3)).is_none());
    }

    #[test]
    fn test_aborted() {
        let summary = MatchSummary::aborted();
        assert!(summary.is_aborted());
        assert!(summary.entry_for(ClientId(1)).is_none());
    }

    #[test]
    fn test_schedules_next_round() {
        let mut ctx = MatchContext::new(crate::core::RulesConfig::default()).unwrap();
        ctx.generation = 4;
        let mut round = StatsRound::new(MatchSummary::aborted());

        round.on_start(&mut ctx).unwrap();

        assert_eq!(round.time_left(0.0), 10.0);
        let due = ctx.scheduler.take_due(10.0);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].generation, 4);
        assert_eq!(due[0].action, DeferredAction::StartPlayRound);
    }
}
