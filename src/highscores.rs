//! Best score record
//!
//! A single number persisted under one storage key. Read when a session
//! begins, written only when a finished run beats it.

use crate::platform::{KeyValueStore, StorageError};

/// Best score across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestScore {
    pub score: u64,
}

impl BestScore {
    /// Storage key
    const STORAGE_KEY: &'static str = "throttle_up_best_score";

    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score beats the record
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.score
    }

    /// Raise the record if `score` beats it. Returns true when it did.
    pub fn record(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.score = score;
        true
    }

    /// Load the best score, falling back to zero
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<u64>() {
                Ok(score) => {
                    log::info!("Loaded best score {}", score);
                    return Self { score };
                }
                Err(_) => log::warn!("Ignoring corrupt best score {:?}", raw),
            },
            Ok(None) => log::info!("No best score found, starting fresh"),
            Err(e) => log::warn!("Could not read best score: {}", e),
        }
        Self::new()
    }

    /// Save the best score
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        store.set(Self::STORAGE_KEY, &self.score.to_string())?;
        log::info!("Best score saved ({})", self.score);
        Ok(())
    }

    /// Record a finished run and persist only if it set a new best.
    /// Returns true when the record changed.
    pub fn submit(&mut self, score: u64, store: &mut dyn KeyValueStore) -> Result<bool, StorageError> {
        if !self.record(score) {
            return Ok(false);
        }
        self.save(store)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    /// Store whose writes always fail
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }
        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write { key: key.to_string() })
        }
        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            Err(StorageError::Write { key: key.to_string() })
        }
    }

    #[test]
    fn test_record_only_raises() {
        let mut best = BestScore::new();
        assert!(!best.record(0));
        assert!(best.record(5));
        assert!(!best.record(5));
        assert!(!best.record(3));
        assert_eq!(best.score, 5);
    }

    #[test]
    fn test_submit_persists_new_best_only() {
        let mut store = MemoryStore::new();
        let mut best = BestScore::load(&store);
        assert_eq!(best.score, 0);

        assert_eq!(best.submit(7, &mut store), Ok(true));
        assert_eq!(BestScore::load(&store).score, 7);

        assert_eq!(best.submit(4, &mut store), Ok(false));
        assert_eq!(BestScore::load(&store).score, 7);
    }

    #[test]
    fn test_corrupt_value_loads_as_zero() {
        let mut store = MemoryStore::new();
        store.set(BestScore::STORAGE_KEY, "lots").unwrap();
        assert_eq!(BestScore::load(&store), BestScore::new());
    }

    #[test]
    fn test_storage_failures() {
        let mut store = ReadOnlyStore;
        assert_eq!(BestScore::load(&store).score, 0);
        let mut best = BestScore::new();
        assert!(matches!(
            best.submit(3, &mut store),
            Err(StorageError::Write { .. })
        ));
    }
}
