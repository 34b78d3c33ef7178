//! Rating persistence.
//!
//! Ratings are the only thing the engine keeps between matches. They are
//! keyed by a participant's `identity_key`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use super::{EloScore, RatingError};

pub trait RatingStore {
    /// Stored score for `key`, or `None` if it has never been saved.
    fn load(&self, key: &str) -> Result<Option<EloScore>, RatingError>;

    fn save(&mut self, key: &str, score: &EloScore) -> Result<(), RatingError>;
}

/// Ratings held for the life of the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryRatingStore {
    scores: FxHashMap<String, EloScore>,
}

impl MemoryRatingStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl RatingStore for MemoryRatingStore {
    fn load(&self, key: &str) -> Result<Option<EloScore>, RatingError> {
        Ok(self.scores.get(key).copied())
    }

    fn save(&mut self, key: &str, score: &EloScore) -> Result<(), RatingError> {
        self.scores.insert(key.to_string(), *score);
        Ok(())
    }
}

/// Ratings kept as one JSON object, `{ key: score }`, in a single file.
///
/// The file is read on every load and rewritten on every save. A missing
/// file is an empty store.
#[derive(Clone, Debug)]
pub struct JsonFileRatingStore {
    path: PathBuf,
}

impl JsonFileRatingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<FxHashMap<String, EloScore>, RatingError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(FxHashMap::default()),
            Err(e) => Err(e.into()),
        }
    }
}

impl RatingStore for JsonFileRatingStore {
    fn load(&self, key: &str) -> Result<Option<EloScore>, RatingError> {
        Ok(self.read_all()?.get(key).copied())
    }

    fn save(&mut self, key: &str, score: &EloScore) -> Result<(), RatingError> {
        let mut scores = self.read_all()?;
        scores.insert(key.to_string(), *score);
        let json = serde_json::to_string_pretty(&scores)?;
        fs::write(&self.path, json)?;
        log::info!("Saved rating for {key} ({} entries)", scores.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryRatingStore::new();
        assert_eq!(store.load("ada").unwrap(), None);

        store.save("ada", &EloScore::new(1100)).unwrap();
        assert_eq!(store.load("ada").unwrap(), Some(EloScore::new(1100)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_json_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ratings.json");
        let mut store = JsonFileRatingStore::new(&path);

        assert_eq!(store.load("ada").unwrap(), None);

        store.save("ada", &EloScore { rating: 1016, delta: 16 }).unwrap();
        store.save("bea", &EloScore { rating: 984, delta: -16 }).unwrap();

        let reopened = JsonFileRatingStore::new(&path);
        assert_eq!(reopened.load("ada").unwrap().unwrap().rating, 1016);
        assert_eq!(reopened.load("bea").unwrap().unwrap().delta, -16);
    }

    #[test]
    fn test_json_store_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ratings.json");
        fs::write(&path, "not json").unwrap();

        let store = JsonFileRatingStore::new(&path);
        let err = store.load("ada").unwrap_err();
        assert!(matches!(err, RatingError::Serialization(_)));
        assert!(!err.is_recoverable());
    }
}
