//! JSON-file outcome store.
//!
//! # Overview
//!
//! Persists the collection as a single pretty-printed JSON document.
//! Writes go through a temp-file + rename so a crash mid-save never
//! leaves a half-written collection behind. Loads validate
//! well-formedness so corruption surfaces at the store boundary with a
//! descriptive error rather than deep inside the engine.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::Collection;
use crate::store::OutcomeStore;

/// A store backed by one JSON file on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store at `path`. The file is created lazily on first
    /// save; a missing file loads as an empty collection at version 0.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_current(&self) -> Result<Collection> {
        if !self.path.exists() {
            return Ok(Collection::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        let collection: Collection = serde_json::from_str(&raw)?;
        collection.validate()?;
        Ok(collection)
    }
}

impl OutcomeStore for JsonFileStore {
    fn load(&self) -> Result<Collection> {
        let collection = self.read_current()?;
        debug!(
            path = %self.path.display(),
            outcomes = collection.len(),
            version = collection.version,
            "loaded outcome collection"
        );
        Ok(collection)
    }

    fn save(&self, mut collection: Collection) -> Result<Collection> {
        let current = self.read_current()?;
        if collection.version != current.version {
            return Err(Error::VersionConflict {
                attempted: collection.version,
                current: current.version,
            });
        }

        collection.version += 1;
        let body = serde_json::to_string_pretty(&collection)?;

        // Temp-file-then-rename keeps the old file intact if the write dies.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &self.path)?;

        debug!(
            path = %self.path.display(),
            outcomes = collection.len(),
            version = collection.version,
            "saved outcome collection"
        );
        Ok(collection)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
