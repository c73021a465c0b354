//! Outcome store abstraction.
//!
//! # Overview
//!
//! The dependency engine holds no state of its own — every mutating
//! operation is a load → validate/mutate → save round trip against an
//! [`OutcomeStore`]. The store owns durability and the optimistic
//! concurrency check; the engine owns graph semantics.
//!
//! # Concurrency
//!
//! Saves carry the version the caller loaded. A store rejects a save
//! whose version is stale with [`crate::error::Error::VersionConflict`]
//! instead of silently letting the last writer win. Callers that hit a
//! conflict reload and retry. There is no lock held between load and
//! save — the engines are synchronous and never block.

pub mod json;
pub mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::Result;
use crate::model::Collection;

/// Load/save access to the persisted outcome collection.
///
/// Implemented for `&S` as well, so an engine can borrow a store that
/// the caller keeps inspecting.
pub trait OutcomeStore {
    /// Load the full collection, including its current version.
    ///
    /// # Errors
    ///
    /// Returns a store-specific error if the backing data cannot be
    /// read or fails [`Collection::validate`].
    fn load(&self) -> Result<Collection>;

    /// Persist `collection`, enforcing the optimistic version check.
    ///
    /// On success the stored version becomes `collection.version + 1`
    /// and the saved collection (with the bumped version) is returned.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::VersionConflict`] if
    /// `collection.version` does not match the store's current version,
    /// or a store-specific error if the write fails.
    fn save(&self, collection: Collection) -> Result<Collection>;
}

impl<S: OutcomeStore + ?Sized> OutcomeStore for &S {
    fn load(&self) -> Result<Collection> {
        (**self).load()
    }

    fn save(&self, collection: Collection) -> Result<Collection> {
        (**self).save(collection)
    }
}
