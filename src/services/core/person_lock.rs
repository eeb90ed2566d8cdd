//! Per-person lock registry.
//!
//! Serializes work that must not interleave for the same person (the
//! "first photo becomes active" check-and-set) while leaving different
//! people fully concurrent.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Idle entries are pruned once the registry grows past this size.
const PRUNE_THRESHOLD: usize = 256;

pub struct PersonLocks {
    locks: Mutex<HashMap<i64, Arc<AsyncMutex<()>>>>,
}

impl PersonLocks {
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for PersonLocks {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonLocks {
    /// Wait until the lock for `person_id` is free and hold it until the guard drops.
    pub async fn lock(&self, person_id: i64) -> OwnedMutexGuard<()> {
        self.entry(person_id).lock_owned().await
    }

    /// Non-blocking variant. `None` means someone else holds the person's lock.
    pub fn try_lock(&self, person_id: i64) -> Option<OwnedMutexGuard<()>> {
        self.entry(person_id).try_lock_owned().ok()
    }

    /// Number of people currently tracked by the registry.
    pub fn tracked(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    fn entry(&self, person_id: i64) -> Arc<AsyncMutex<()>> {
        let mut locks = self
            .locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if locks.len() > PRUNE_THRESHOLD {
            // Only the map holds an idle entry.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        }

        locks.entry(person_id).or_default().clone()
    }
}

#[cfg(test)]
#[path = "tests/person_lock_tests.rs"]
mod tests;
