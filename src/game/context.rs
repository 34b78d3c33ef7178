//! Match-level state shared by every round.

use crate::balls::{BallRegistry, Table};
use crate::core::{ClientId, EngineError, GameRng, MatchClock, RulesConfig};
use crate::rating::{EloScore, MemoryRatingStore, RatingStore, RatingSystem};

use super::physics::{OpenTable, PhysicsQuery};
use super::schedule::Scheduler;
use super::{Notice, Participant};

/// Everything that outlives a single round.
///
/// Passed by `&mut` into every round handler. Rounds may read and write
/// any of it; they keep nothing of it themselves.
pub struct MatchContext {
    pub config: RulesConfig,
    pub table: Table,
    pub balls: BallRegistry,
    /// Connected sessions, in join order.
    pub participants: Vec<Participant>,
    pub previous_winner: Option<ClientId>,
    pub previous_loser: Option<ClientId>,
    pub rng: GameRng,
    pub clock: MatchClock,
    pub notices: Vec<Notice>,
    pub scheduler: Scheduler,
    pub physics: Box<dyn PhysicsQuery>,
    pub ratings: RatingSystem,
    pub rating_store: Box<dyn RatingStore>,
    /// Bumped every time the active round is replaced.
    pub generation: u64,
}

impl MatchContext {
    pub fn new(config: RulesConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let table = Table::new(&config.table);
        let balls = BallRegistry::new(&table, config.balls_per_group);
        Ok(Self {
            rng: GameRng::new(config.seed),
            ratings: RatingSystem::new(config.elo_k_factor),
            config,
            table,
            balls,
            participants: Vec::new(),
            previous_winner: None,
            previous_loser: None,
            clock: MatchClock::new(),
            notices: Vec::new(),
            scheduler: Scheduler::new(),
            physics: Box::new(OpenTable),
            rating_store: Box::new(MemoryRatingStore::new()),
            generation: 0,
        })
    }

    #[must_use]
    pub fn participant(&self, client: ClientId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.client == client)
    }

    #[must_use]
    pub fn is_present(&self, client: ClientId) -> bool {
        self.participant(client).is_some()
    }

    /// Stored rating for `key`. A store failure is logged and the default
    /// rating used.
    pub fn load_rating(&self, key: &str) -> EloScore {
        match self.rating_store.load(key) {
            Ok(score) => score.unwrap_or_default(),
            Err(e) => {
                log::warn!("Failed to load rating for {key}: {e}");
                EloScore::default()
            }
        }
    }

    /// Persist a rating. A store failure is logged and otherwise ignored.
    pub fn save_rating(&mut self, key: &str, score: &EloScore) {
        if let Err(e) = self.rating_store.save(key, score) {
            log::warn!("Failed to save rating for {key}: {e}");
        }
    }

    pub fn toast(&mut self, client: ClientId, message: impl Into<String>, icon: impl Into<String>) {
        self.notices.push(Notice::toast(client, message, icon));
    }
}
