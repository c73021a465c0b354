//! Kahn's algorithm over the outcome collection.
//!
//! # Overview
//!
//! Produces a dependency-first ordering: if `A` depends on `B`, `B`
//! precedes `A`. Edges in the in-degree/adjacency structures point from
//! a prerequisite to whatever depends on it, so zero-in-degree nodes are
//! the ones with no (resolvable) dependencies.
//!
//! # Determinism
//!
//! The queue is seeded in collection order and dependents are visited in
//! collection order, so ties always break the same way for the same
//! stored collection. This is the only tie-break rule in the engine.

use std::collections::VecDeque;

use waypoint_core::error::{Error, Result};
use waypoint_core::model::Collection;

use crate::intern::Interner;

/// Interned view of a collection's dependency edges.
///
/// Unresolvable dependency ids are skipped here — mutating operations
/// validate endpoint existence explicitly before this structure is built.
#[derive(Debug)]
pub(crate) struct DepIndex {
    pub(crate) interner: Interner,
    /// Per node: interned indices of its dependencies.
    pub(crate) deps: Vec<Vec<u32>>,
}

impl DepIndex {
    pub(crate) fn from_collection(collection: &Collection) -> Self {
        let interner = Interner::from_ids(collection.outcomes.iter().map(|o| o.id.as_str()));
        let deps = collection
            .outcomes
            .iter()
            .map(|o| {
                o.dependencies
                    .iter()
                    .filter_map(|dep| interner.get(dep))
                    .collect()
            })
            .collect();
        Self { interner, deps }
    }

    /// Run Kahn's algorithm.
    ///
    /// Returns the full ordering, or — when one or more cycles remain —
    /// the interned indices of every unordered node, in collection order.
    pub(crate) fn kahn(&self) -> std::result::Result<Vec<u32>, Vec<u32>> {
        let n = self.deps.len();
        let mut in_degree: Vec<usize> = vec![0; n];
        let mut dependents: Vec<Vec<u32>> = vec![Vec::new(); n];

        for (node, deps) in self.deps.iter().enumerate() {
            in_degree[node] = deps.len();
            for &dep in deps {
                dependents[dep as usize].push(u32::try_from(node).unwrap_or(u32::MAX));
            }
        }

        let mut queue: VecDeque<u32> = (0..n)
            .filter(|&i| in_degree[i] == 0)
            .map(|i| u32::try_from(i).unwrap_or(u32::MAX))
            .collect();

        let mut order = Vec::with_capacity(n);
        while let Some(node) = queue.pop_front() {
            order.push(node);
            for &dependent in &dependents[node as usize] {
                let degree = &mut in_degree[dependent as usize];
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(dependent);
                }
            }
        }

        if order.len() == n {
            Ok(order)
        } else {
            let ordered: std::collections::HashSet<u32> = order.into_iter().collect();
            Err((0..n)
                .map(|i| u32::try_from(i).unwrap_or(u32::MAX))
                .filter(|i| !ordered.contains(i))
                .collect())
        }
    }
}

/// Topologically sort the collection, dependency-first.
///
/// # Errors
///
/// Returns [`Error::UnresolvedCycle`] naming the display names of every
/// node caught in a cycle.
pub fn topological_sort(collection: &Collection) -> Result<Vec<String>> {
    let index = DepIndex::from_collection(collection);
    match index.kahn() {
        Ok(order) => Ok(order
            .into_iter()
            .map(|i| index.interner.resolve(i).to_string())
            .collect()),
        Err(remaining) => Err(Error::UnresolvedCycle {
            detail: cycle_detail(collection, &index, &remaining),
        }),
    }
}

/// Human-readable list of the nodes left unordered by a failed sort.
///
/// Uses titles where available, ids otherwise.
pub(crate) fn cycle_detail(
    collection: &Collection,
    index: &DepIndex,
    remaining: &[u32],
) -> String {
    remaining
        .iter()
        .map(|&i| {
            let id = index.interner.resolve(i);
            collection
                .get(id)
                .map_or_else(|| id.to_string(), |o| o.display_name().to_string())
        })
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
