//! String-id interning for the graph hot paths.
//!
//! Both engines key their adjacency structures by dense `u32` indices
//! instead of string ids: ids are interned once at the API boundary and
//! every sort/DFS/layering pass runs over `Vec`-indexed arrays. Interning
//! order is insertion order, which makes it the single source of
//! tie-break determinism downstream.

use std::collections::HashMap;

/// Bidirectional map between string ids and dense indices.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    ids: Vec<String>,
    index: HashMap<String, u32>,
}

impl Interner {
    /// Intern ids in iteration order, ignoring duplicates after the first.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut interner = Self::default();
        for id in ids {
            interner.intern(id.as_ref());
        }
        interner
    }

    /// Intern `id`, returning its index. Re-interning returns the
    /// existing index.
    pub fn intern(&mut self, id: &str) -> u32 {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = u32::try_from(self.ids.len()).unwrap_or(u32::MAX);
        self.ids.push(id.to_string());
        self.index.insert(id.to_string(), idx);
        idx
    }

    /// Look up the index for an id, if interned.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<u32> {
        self.index.get(id).copied()
    }

    /// Resolve an index back to its id.
    ///
    /// # Panics
    ///
    /// Panics if `idx` was not produced by this interner.
    #[must_use]
    pub fn resolve(&self, idx: u32) -> &str {
        &self.ids[idx as usize]
    }

    /// Number of distinct ids interned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if nothing has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_preserves_insertion_order() {
        let interner = Interner::from_ids(["c", "a", "b"]);
        assert_eq!(interner.len(), 3);
        assert_eq!(interner.get("c"), Some(0));
        assert_eq!(interner.get("a"), Some(1));
        assert_eq!(interner.get("b"), Some(2));
        assert_eq!(interner.resolve(1), "a");
    }

    #[test]
    fn duplicates_keep_first_index() {
        let mut interner = Interner::default();
        let first = interner.intern("x");
        let second = interner.intern("x");
        assert_eq!(first, second);
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn unknown_id_is_none() {
        let interner = Interner::from_ids(["a"]);
        assert_eq!(interner.get("missing"), None);
    }
}
