//! In-memory outcome store for tests and embedded callers.

use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::model::Collection;
use crate::store::OutcomeStore;

/// A process-local store backed by a `Mutex<Collection>`.
///
/// Behaves exactly like the file store with respect to versioning, so
/// engine tests exercise the same conflict paths without touching disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Collection>,
}

impl MemoryStore {
    /// Create a store seeded with `collection` at version 0.
    #[must_use]
    pub fn new(mut collection: Collection) -> Self {
        collection.version = 0;
        Self {
            inner: Mutex::new(collection),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Collection> {
        // A poisoned lock means a panic mid-save; the collection itself
        // is always left whole, so recover the guard.
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl OutcomeStore for MemoryStore {
    fn load(&self) -> Result<Collection> {
        Ok(self.lock().clone())
    }

    fn save(&self, mut collection: Collection) -> Result<Collection> {
        let mut current = self.lock();
        if collection.version != current.version {
            return Err(Error::VersionConflict {
                attempted: collection.version,
                current: current.version,
            });
        }
        collection.version += 1;
        *current = collection.clone();
        Ok(collection)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
