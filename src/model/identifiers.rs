//! Canonical identifiers for fabric resources.
//!
//! Desired-state snapshots and control-plane responses spell the same device
//! differently ("Leaf-1" vs "leaf-1"). Every id is canonicalized exactly once,
//! when it enters an [`IdentityIndex`], and all lookups afterwards compare
//! canonical values only.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical (case-folded, trimmed) identifier of a fabric resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalId(String);

impl CanonicalId {
    /// Canonicalize a raw device or resource id.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    /// Canonical identity of a link from its four endpoint parts.
    #[must_use]
    pub fn connection(from_device: &str, from_port: &str, to_device: &str, to_port: &str) -> Self {
        Self(super::connection_key(
            &Self::new(from_device).0,
            &Self::new(from_port).0,
            &Self::new(to_device).0,
            &Self::new(to_port).0,
        ))
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Items of one category indexed by canonical identity.
///
/// Insertion order is preserved so findings come out in input order. When
/// two items canonicalize to the same id the later one wins, and the
/// collision is counted.
#[derive(Debug)]
pub struct IdentityIndex<'a, T> {
    entries: IndexMap<CanonicalId, &'a T>,
    collisions: usize,
}

impl<'a, T> IdentityIndex<'a, T> {
    /// Build an index, canonicalizing each item's id once.
    pub fn build<I, F>(items: I, raw_id: F) -> Self
    where
        I: IntoIterator<Item = &'a T>,
        F: Fn(&'a T) -> CanonicalId,
    {
        let mut entries = IndexMap::new();
        let mut collisions = 0;
        for item in items {
            if entries.insert(raw_id(item), item).is_some() {
                collisions += 1;
            }
        }
        if collisions > 0 {
            tracing::debug!(collisions, "canonical id collisions while indexing");
        }
        Self {
            entries,
            collisions,
        }
    }

    #[must_use]
    pub fn get(&self, id: &CanonicalId) -> Option<&'a T> {
        self.entries.get(id).copied()
    }

    #[must_use]
    pub fn contains(&self, id: &CanonicalId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CanonicalId, &'a T)> {
        self.entries.iter().map(|(id, item)| (id, *item))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn collisions(&self) -> usize {
        self.collisions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_id_case_folds_and_trims() {
        assert_eq!(CanonicalId::new(" Leaf-1 "), CanonicalId::new("leaf-1"));
        assert_eq!(CanonicalId::new("SPINE-A").value(), "spine-a");
    }

    #[test]
    fn test_connection_identity_is_canonical() {
        let a = CanonicalId::connection("Leaf-1", "Eth1", "spine-1", "1");
        let b = CanonicalId::connection("leaf-1", "eth1", "SPINE-1", "1");
        assert_eq!(a, b);
        assert_eq!(a.value(), "leaf-1:eth1->spine-1:1");
    }

    #[test]
    fn test_index_preserves_order_and_counts_collisions() {
        let ids = vec!["b".to_string(), "A".to_string(), "a".to_string()];
        let index = IdentityIndex::build(&ids, |s| CanonicalId::new(s));
        assert_eq!(index.len(), 2);
        assert_eq!(index.collisions(), 1);
        let keys: Vec<_> = index.iter().map(|(id, _)| id.value().to_string()).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(index.get(&CanonicalId::new("A")).map(String::as_str), Some("a"));
    }
}
