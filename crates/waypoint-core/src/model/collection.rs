//! The persisted outcome collection.
//!
//! # Overview
//!
//! A [`Collection`] is the unit of load/save for every store: the full
//! ordered list of outcomes plus an optimistic-concurrency version. The
//! stored order is load-bearing — it is the tie-break order for the
//! dependency engine's topological sort, so stores must preserve it
//! byte-for-byte across round trips.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::model::outcome::Outcome;

/// The full outcome set plus its store version.
///
/// `version` increments on every successful save. A save whose version
/// does not match the store's current version is rejected with
/// [`Error::VersionConflict`] — stale writers must reload and retry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub outcomes: Vec<Outcome>,
}

impl Collection {
    /// Build a collection from outcomes, at version 0.
    #[must_use]
    pub fn new(outcomes: Vec<Outcome>) -> Self {
        Self {
            version: 0,
            outcomes,
        }
    }

    /// Number of outcomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns `true` if the collection holds no outcomes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Look up an outcome by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Outcome> {
        self.outcomes.iter().find(|o| o.id == id)
    }

    /// Look up an outcome mutably by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Outcome> {
        self.outcomes.iter_mut().find(|o| o.id == id)
    }

    /// Returns `true` if an outcome with `id` exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Check collection well-formedness.
    ///
    /// Rejects duplicate outcome ids, self-referencing dependencies,
    /// duplicate dependency entries, and dependency ids that resolve to
    /// no outcome. Stores run this on load so a hand-edited or corrupt
    /// file fails loudly instead of confusing the engine later.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedCollection`] describing the first
    /// violation found.
    pub fn validate(&self) -> Result<()> {
        let mut ids: HashSet<&str> = HashSet::with_capacity(self.outcomes.len());
        for outcome in &self.outcomes {
            if !ids.insert(outcome.id.as_str()) {
                return Err(Error::MalformedCollection {
                    detail: format!("duplicate outcome id '{}'", outcome.id),
                });
            }
        }

        for outcome in &self.outcomes {
            let mut seen: HashSet<&str> = HashSet::with_capacity(outcome.dependencies.len());
            for dep in &outcome.dependencies {
                if dep == &outcome.id {
                    return Err(Error::MalformedCollection {
                        detail: format!("outcome '{}' depends on itself", outcome.id),
                    });
                }
                if !seen.insert(dep.as_str()) {
                    return Err(Error::MalformedCollection {
                        detail: format!(
                            "outcome '{}' lists dependency '{dep}' more than once",
                            outcome.id
                        ),
                    });
                }
                if !ids.contains(dep.as_str()) {
                    return Err(Error::MalformedCollection {
                        detail: format!(
                            "outcome '{}' depends on unknown id '{dep}'",
                            outcome.id
                        ),
                    });
                }
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
