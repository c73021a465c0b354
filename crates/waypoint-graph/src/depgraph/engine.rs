//! Dependency CRUD over a persisted outcome collection.
//!
//! # Overview
//!
//! Every operation is a fresh load → validate/mutate → save round trip
//! against the [`OutcomeStore`]; the engine keeps no graph state between
//! calls. Mutations are fail-fast: a self-dependency, a missing endpoint,
//! or a cycle-introducing edge raises a descriptive error and persists
//! nothing. Downstream consumers rely on the stored graph being a true
//! DAG, so the speculative edge in [`DependencyEngine::add_dependency`]
//! is only committed after a full topological sort succeeds.
//!
//! # Concurrency
//!
//! The load → save sequence is not transactionally isolated. The store's
//! version check turns a lost-update race into a
//! [`waypoint_core::Error::VersionConflict`] instead of silent
//! last-write-wins; callers serialize or retry.

use tracing::{debug, instrument, warn};

use waypoint_core::config::SerializeConfig;
use waypoint_core::error::{Error, Result};
use waypoint_core::model::{Collection, Outcome};
use waypoint_core::store::OutcomeStore;

use crate::depgraph::serialize::{RenderGraph, render};
use crate::depgraph::topo::{DepIndex, cycle_detail, topological_sort};

/// The enforced-acyclic dependency engine.
///
/// `from` depends on `to`: completing `to` unblocks `from`.
#[derive(Debug)]
pub struct DependencyEngine<S> {
    store: S,
    config: SerializeConfig,
}

impl<S: OutcomeStore> DependencyEngine<S> {
    /// Create an engine with default render spacing.
    pub fn new(store: S) -> Self {
        Self::with_config(store, SerializeConfig::default())
    }

    /// Create an engine with caller-supplied render spacing.
    pub const fn with_config(store: S, config: SerializeConfig) -> Self {
        Self { store, config }
    }

    /// Add `to_id` to `from_id`'s dependency list.
    ///
    /// Idempotent: if the dependency already exists the call is a no-op
    /// returning the unchanged outcome. Otherwise the edge is appended
    /// speculatively and committed only if a full topological sort still
    /// succeeds.
    ///
    /// # Errors
    ///
    /// - [`Error::OutcomeNotFound`] if either endpoint is missing.
    /// - [`Error::SelfDependency`] if `from_id == to_id`.
    /// - [`Error::CycleDetected`] (naming both endpoint titles) if the
    ///   edge would close a cycle; persisted state is left unchanged.
    #[instrument(skip(self))]
    pub fn add_dependency(&self, from_id: &str, to_id: &str) -> Result<Outcome> {
        let mut collection = self.store.load()?;

        let from_title = require(&collection, from_id)?.display_name().to_string();
        let to_title = require(&collection, to_id)?.display_name().to_string();

        if from_id == to_id {
            return Err(Error::SelfDependency {
                id: from_id.to_string(),
            });
        }

        let from = collection
            .get_mut(from_id)
            .ok_or_else(|| Error::OutcomeNotFound {
                id: from_id.to_string(),
            })?;

        if from.dependencies.iter().any(|d| d == to_id) {
            debug!(from_id, to_id, "dependency already present, no-op");
            return Ok(from.clone());
        }

        // Speculative edge: append, then prove the graph is still a DAG.
        from.dependencies.push(to_id.to_string());

        let index = DepIndex::from_collection(&collection);
        if let Err(remaining) = index.kahn() {
            let detail = cycle_detail(&collection, &index, &remaining);
            warn!(from_id, to_id, %detail, "rejected cycle-introducing dependency");
            // Nothing was saved; the loaded copy is discarded.
            return Err(Error::CycleDetected {
                from_title,
                to_title,
                detail,
            });
        }

        let updated = {
            let from = collection
                .get_mut(from_id)
                .ok_or_else(|| Error::OutcomeNotFound {
                    id: from_id.to_string(),
                })?;
            from.touch();
            from.clone()
        };

        self.store.save(collection)?;
        debug!(from_id, to_id, "dependency added");
        Ok(updated)
    }

    /// Remove `to_id` from `from_id`'s dependency list.
    ///
    /// Returns `None` if `from_id` does not exist, the unchanged outcome
    /// if the dependency was absent, and the updated (persisted) outcome
    /// if it was removed. Removal cannot introduce a cycle, so no sort
    /// runs.
    ///
    /// # Errors
    ///
    /// Propagates store load/save failures.
    #[instrument(skip(self))]
    pub fn remove_dependency(&self, from_id: &str, to_id: &str) -> Result<Option<Outcome>> {
        let mut collection = self.store.load()?;

        let Some(from) = collection.get_mut(from_id) else {
            return Ok(None);
        };

        let Some(pos) = from.dependencies.iter().position(|d| d == to_id) else {
            debug!(from_id, to_id, "dependency not present, no-op");
            return Ok(Some(from.clone()));
        };

        from.dependencies.remove(pos);
        from.touch();
        let updated = from.clone();

        self.store.save(collection)?;
        debug!(from_id, to_id, "dependency removed");
        Ok(Some(updated))
    }

    /// The outcome's own dependency ids, in stored order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutcomeNotFound`] if `id` is missing.
    pub fn dependencies_of(&self, id: &str) -> Result<Vec<String>> {
        let collection = self.store.load()?;
        Ok(require(&collection, id)?.dependencies.clone())
    }

    /// Every outcome id whose dependency list contains `id`.
    ///
    /// Full scan — reverse edges are not indexed, which is fine at the
    /// collection sizes this engine serves.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutcomeNotFound`] if `id` is missing.
    pub fn dependents_of(&self, id: &str) -> Result<Vec<String>> {
        let collection = self.store.load()?;
        require(&collection, id)?;
        Ok(collection
            .outcomes
            .iter()
            .filter(|o| o.dependencies.iter().any(|d| d == id))
            .map(|o| o.id.clone())
            .collect())
    }

    /// Dependency-first ordering of every outcome id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedCycle`] naming the implicated titles if
    /// the stored graph somehow contains a cycle.
    pub fn topological_sort(&self) -> Result<Vec<String>> {
        let collection = self.store.load()?;
        topological_sort(&collection)
    }

    /// Layered render model of the stored graph.
    ///
    /// # Errors
    ///
    /// Propagates store and sort failures.
    pub fn serialize(&self) -> Result<RenderGraph> {
        let collection = self.store.load()?;
        render(&collection, &self.config)
    }
}

fn require<'a>(collection: &'a Collection, id: &str) -> Result<&'a Outcome> {
    collection.get(id).ok_or_else(|| Error::OutcomeNotFound {
        id: id.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_core::store::MemoryStore;

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn outcome(id: &str, title: &str) -> Outcome {
        Outcome::new(id, title)
    }

    fn engine_with(ids: &[(&str, &str)]) -> DependencyEngine<MemoryStore> {
        let collection =
            Collection::new(ids.iter().map(|(id, title)| outcome(id, title)).collect());
        DependencyEngine::new(MemoryStore::new(collection))
    }

    // -----------------------------------------------------------------------
    // add_dependency
    // -----------------------------------------------------------------------

    #[test]
    fn add_dependency_persists_edge() {
        let engine = engine_with(&[("A", "Alpha"), ("B", "Beta")]);
        let updated = engine.add_dependency("A", "B").expect("add");
        assert_eq!(updated.dependencies, vec!["B"]);

        // Visible on a fresh load.
        assert_eq!(engine.dependencies_of("A").expect("deps"), vec!["B"]);
    }

    #[test]
    fn add_dependency_refreshes_updated_at() {
        let engine = engine_with(&[("A", "Alpha"), ("B", "Beta")]);
        let before = engine.store.load().expect("load").get("A").expect("A").updated_at_us;
        let updated = engine.add_dependency("A", "B").expect("add");
        assert!(updated.updated_at_us >= before);
    }

    #[test]
    fn add_missing_endpoint_fails() {
        let engine = engine_with(&[("A", "Alpha")]);
        let err = engine.add_dependency("A", "ghost").expect_err("missing to");
        assert!(matches!(err, Error::OutcomeNotFound { .. }));

        let err = engine.add_dependency("ghost", "A").expect_err("missing from");
        assert!(matches!(err, Error::OutcomeNotFound { .. }));
    }

    #[test]
    fn self_dependency_rejected_and_state_unchanged() {
        let engine = engine_with(&[("A", "Alpha")]);
        let err = engine.add_dependency("A", "A").expect_err("self dep");
        assert!(matches!(err, Error::SelfDependency { .. }));

        let coll = engine.store.load().expect("load");
        assert!(coll.get("A").expect("A").dependencies.is_empty());
        assert_eq!(coll.version, 0, "nothing was saved");
    }

    #[test]
    fn duplicate_add_is_idempotent() {
        let engine = engine_with(&[("A", "Alpha"), ("B", "Beta")]);
        engine.add_dependency("A", "B").expect("first add");
        let version_after_first = engine.store.load().expect("load").version;

        let unchanged = engine.add_dependency("A", "B").expect("second add");
        assert_eq!(unchanged.dependencies, vec!["B"], "no duplicate entry");
        assert_eq!(
            engine.store.load().expect("load").version,
            version_after_first,
            "no-op does not save"
        );
    }

    #[test]
    fn cycle_rejection_is_atomic() {
        let engine = engine_with(&[("A", "Alpha"), ("B", "Beta"), ("C", "Gamma")]);
        engine.add_dependency("A", "B").expect("A→B");
        engine.add_dependency("B", "C").expect("B→C");

        let snapshot = engine.store.load().expect("load");
        let err = engine.add_dependency("C", "A").expect_err("closes cycle");
        match &err {
            Error::CycleDetected {
                from_title,
                to_title,
                ..
            } => {
                assert_eq!(from_title, "Gamma");
                assert_eq!(to_title, "Alpha");
            }
            other => panic!("expected CycleDetected, got {other:?}"),
        }

        // Byte-for-byte unchanged persisted state.
        assert_eq!(engine.store.load().expect("reload"), snapshot);
    }

    #[test]
    fn two_node_cycle_rejected() {
        let engine = engine_with(&[("A", "Alpha"), ("B", "Beta")]);
        engine.add_dependency("A", "B").expect("A→B");
        let err = engine.add_dependency("B", "A").expect_err("mutual");
        assert!(matches!(err, Error::CycleDetected { .. }));
        assert!(
            engine
                .store
                .load()
                .expect("load")
                .get("B")
                .expect("B")
                .dependencies
                .is_empty()
        );
    }

    // -----------------------------------------------------------------------
    // remove_dependency
    // -----------------------------------------------------------------------

    #[test]
    fn remove_existing_dependency() {
        let engine = engine_with(&[("A", "Alpha"), ("B", "Beta")]);
        engine.add_dependency("A", "B").expect("add");

        let updated = engine
            .remove_dependency("A", "B")
            .expect("remove")
            .expect("A exists");
        assert!(updated.dependencies.is_empty());
        assert!(engine.dependencies_of("A").expect("deps").is_empty());
    }

    #[test]
    fn remove_absent_dependency_is_noop() {
        let engine = engine_with(&[("A", "Alpha"), ("B", "Beta")]);
        let version = engine.store.load().expect("load").version;

        let unchanged = engine
            .remove_dependency("A", "B")
            .expect("remove")
            .expect("A exists");
        assert!(unchanged.dependencies.is_empty());
        assert_eq!(
            engine.store.load().expect("load").version,
            version,
            "no-op does not save"
        );
    }

    #[test]
    fn remove_from_missing_node_returns_none() {
        let engine = engine_with(&[("A", "Alpha")]);
        assert!(engine.remove_dependency("ghost", "A").expect("ok").is_none());
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    #[test]
    fn dependents_scan_finds_reverse_edges() {
        let engine = engine_with(&[("A", "Alpha"), ("B", "Beta"), ("C", "Gamma")]);
        engine.add_dependency("A", "C").expect("A→C");
        engine.add_dependency("B", "C").expect("B→C");

        let dependents = engine.dependents_of("C").expect("dependents");
        assert_eq!(dependents, vec!["A", "B"]);
        assert!(engine.dependents_of("A").expect("dependents").is_empty());
    }

    #[test]
    fn lookups_reject_missing_ids() {
        let engine = engine_with(&[("A", "Alpha")]);
        assert!(matches!(
            engine.dependencies_of("ghost"),
            Err(Error::OutcomeNotFound { .. })
        ));
        assert!(matches!(
            engine.dependents_of("ghost"),
            Err(Error::OutcomeNotFound { .. })
        ));
    }

    // -----------------------------------------------------------------------
    // topological_sort through the engine
    // -----------------------------------------------------------------------

    #[test]
    fn sort_reflects_persisted_edges() {
        let engine = engine_with(&[("A", "Alpha"), ("B", "Beta"), ("C", "Gamma")]);
        engine.add_dependency("A", "B").expect("A→B");
        engine.add_dependency("B", "C").expect("B→C");

        let order = engine.topological_sort().expect("acyclic");
        assert_eq!(order, vec!["C", "B", "A"]);
    }
}
