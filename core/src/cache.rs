//! Per-language prediction cache.
//!
//! Keeps, for every language, the last context sent to the engine and what
//! the engine answered. A lookup only hits when the new context is
//! character-for-character equal to the stored one; a miss is followed by an
//! overwrite, never a merge. Entries are created on the first engine answer
//! for a language and live as long as the cache.

use std::cell::{Cell, RefCell};

use ahash::AHashMap;

/// What the engine answered for one context.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PredictionCacheEntry {
    pub past_stream: String,
    pub predictions: Vec<String>,
}

#[derive(Debug, Default)]
pub struct PredictionCache {
    entries: RefCell<AHashMap<String, PredictionCacheEntry>>,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

impl PredictionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached predictions for `lang` if `stream` equals the stored context.
    pub fn lookup(&self, lang: &str, stream: &str) -> Option<Vec<String>> {
        let entries = self.entries.borrow();
        match entries.get(lang) {
            Some(entry) if entry.past_stream == stream => {
                self.hits.set(self.hits.get() + 1);
                Some(entry.predictions.clone())
            }
            _ => {
                self.misses.set(self.misses.get() + 1);
                None
            }
        }
    }

    /// Replace the entry for `lang` with a fresh engine answer.
    pub fn store(&self, lang: &str, stream: &str, predictions: Vec<String>) {
        self.entries.borrow_mut().insert(
            lang.to_string(),
            PredictionCacheEntry {
                past_stream: stream.to_string(),
                predictions,
            },
        );
    }

    /// Copy of the entry for `lang`, if any.
    pub fn entry(&self, lang: &str) -> Option<PredictionCacheEntry> {
        self.entries.borrow().get(lang).cloned()
    }

    /// Get cache statistics for monitoring.
    ///
    /// Returns (hits, misses) tuple.
    pub fn stats(&self) -> (usize, usize) {
        (self.hits.get(), self.misses.get())
    }

    /// Get cache hit rate as a percentage (0.0 to 100.0).
    ///
    /// Returns None if no lookups have been made yet.
    pub fn hit_rate(&self) -> Option<f32> {
        let (hits, misses) = self.stats();
        let total = hits + misses;

        if total == 0 {
            None
        } else {
            Some((hits as f32 / total as f32) * 100.0)
        }
    }

    /// Number of languages with an entry.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
