//! Player score with load-once, save-on-mutation persistence.

use tracing::{debug, warn};

use super::settings::SCORE_KEY;
use super::store::KeyValueStore;
use crate::core::Result;

/// Owned score counter backed by a [`KeyValueStore`].
///
/// Created with [`ScoreStore::load`] at startup and handed to the round
/// controller. [`ScoreStore::into_store`] is the matching teardown.
#[derive(Clone, Debug)]
pub struct ScoreStore<S> {
    store: S,
    current: u32,
}

impl<S: KeyValueStore> ScoreStore<S> {
    /// Read the persisted score (0 when unset).
    pub fn load(store: S) -> Self {
        let mut scores = Self { store, current: 0 };
        scores.reload();
        scores
    }

    #[must_use]
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Add `amount` and persist.
    pub fn add_score(&mut self, amount: u32) -> Result<u32> {
        self.current = self.current.saturating_add(amount);
        self.save()?;
        Ok(self.current)
    }

    /// Set the score back to zero and persist.
    pub fn reset_score(&mut self) -> Result<()> {
        self.current = 0;
        self.save()
    }

    pub fn save(&mut self) -> Result<()> {
        self.store.set_int(SCORE_KEY, i64::from(self.current));
        self.store.flush()
    }

    /// Replace the in-memory score with the persisted one.
    pub fn reload(&mut self) {
        self.current = match self.store.get_int(SCORE_KEY) {
            None => 0,
            Some(value) => u32::try_from(value).unwrap_or_else(|_| {
                warn!(value, "stored score out of range, using 0");
                0
            }),
        };
        debug!(score = self.current, "score loaded");
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Save one last time and hand back the store.
    pub fn into_store(mut self) -> Result<S> {
        self.save()?;
        Ok(self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::MemoryStore;

    #[test]
    fn test_load_defaults_to_zero() {
        let scores = ScoreStore::load(MemoryStore::new());
        assert_eq!(scores.current(), 0);
    }

    #[test]
    fn test_add_saves() {
        let mut scores = ScoreStore::load(MemoryStore::new());
        assert_eq!(scores.add_score(10).unwrap(), 10);
        assert_eq!(scores.add_score(5).unwrap(), 15);
        assert_eq!(scores.store().get_int(SCORE_KEY), Some(15));
    }

    #[test]
    fn test_reload_reads_store() {
        let mut scores = ScoreStore::load(MemoryStore::new());
        scores.add_score(10).unwrap();

        let store = scores.into_store().unwrap();
        let reloaded = ScoreStore::load(store);
        assert_eq!(reloaded.current(), 10);
    }

    #[test]
    fn test_reset() {
        let mut scores = ScoreStore::load(MemoryStore::new());
        scores.add_score(30).unwrap();
        scores.reset_score().unwrap();
        assert_eq!(scores.current(), 0);
        assert_eq!(scores.store().get_int(SCORE_KEY), Some(0));
    }

    #[test]
    fn test_negative_stored_score() {
        let mut store = MemoryStore::new();
        store.set_int(SCORE_KEY, -40);
        let scores = ScoreStore::load(store);
        assert_eq!(scores.current(), 0);
    }
}
