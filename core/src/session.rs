//! Pending-request bookkeeping per session.
//!
//! Every session key owns at most one pending task. Scheduling a new task for
//! a key supersedes the pending one: the old task keeps its place in the run
//! queue but its generation is no longer current, so it runs as a no-op and
//! never answers.

use ahash::AHashMap;

use crate::context::SessionKey;

/// Handle of one scheduled task.
pub type Generation = u64;

#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    pending: AHashMap<SessionKey, Generation>,
    next_generation: Generation,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a new task pending for `key`.
    ///
    /// Returns the new task's generation and the generation it superseded, if
    /// one was still pending.
    pub fn schedule(&mut self, key: SessionKey) -> (Generation, Option<Generation>) {
        self.next_generation += 1;
        let generation = self.next_generation;
        let superseded = self.pending.insert(key, generation);
        (generation, superseded)
    }

    /// Whether `generation` is still the pending task for `key`.
    pub fn is_current(&self, key: &SessionKey, generation: Generation) -> bool {
        self.pending.get(key) == Some(&generation)
    }

    /// Clear the slot of a task that ran. Returns false if the task had been
    /// superseded or cancelled in the meantime.
    pub fn complete(&mut self, key: &SessionKey, generation: Generation) -> bool {
        if self.is_current(key, generation) {
            self.pending.remove(key);
            true
        } else {
            false
        }
    }

    /// Drop the pending task for `key` without scheduling another.
    pub fn cancel(&mut self, key: &SessionKey) -> Option<Generation> {
        self.pending.remove(key)
    }

    /// Generation pending for `key`, if any.
    pub fn pending(&self, key: &SessionKey) -> Option<Generation> {
        self.pending.get(key).copied()
    }

    /// Number of keys with a pending task.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
