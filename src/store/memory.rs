//! In-memory baseline store.

use super::{BaselineLoad, BaselineStore};
use crate::error::Result;
use crate::model::TopologySnapshot;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Baselines held in memory, for embedding and tests.
///
/// Counts `load` calls so callers can verify when a load was skipped.
#[derive(Debug, Default)]
pub struct MemoryBaselineStore {
    baselines: HashMap<String, std::result::Result<TopologySnapshot, String>>,
    loads: AtomicUsize,
}

impl MemoryBaselineStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a readable baseline.
    #[must_use]
    pub fn with_baseline(mut self, snapshot_id: impl Into<String>, snapshot: TopologySnapshot) -> Self {
        self.baselines.insert(snapshot_id.into(), Ok(snapshot));
        self
    }

    /// Store a baseline that exists but cannot be read.
    #[must_use]
    pub fn with_corrupt_baseline(
        mut self,
        snapshot_id: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        self.baselines.insert(snapshot_id.into(), Err(error.into()));
        self
    }

    /// Number of `load` calls served so far.
    #[must_use]
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }
}

impl BaselineStore for MemoryBaselineStore {
    fn exists(&self, snapshot_id: &str) -> Result<bool> {
        Ok(self.baselines.contains_key(snapshot_id))
    }

    fn load(&self, snapshot_id: &str) -> BaselineLoad {
        self.loads.fetch_add(1, Ordering::Relaxed);
        let source = format!("memory://{snapshot_id}");
        match self.baselines.get(snapshot_id) {
            Some(Ok(snapshot)) => BaselineLoad::loaded(snapshot.clone(), vec![source]),
            Some(Err(error)) => BaselineLoad::failed(error.clone(), vec![source]),
            None => BaselineLoad::failed(format!("no baseline stored for '{snapshot_id}'"), Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exists_and_load() {
        let store = MemoryBaselineStore::new().with_baseline("lab", TopologySnapshot::new("lab"));
        assert!(store.exists("lab").expect("exists"));
        assert!(!store.exists("prod").expect("exists"));

        let load = store.load("lab");
        assert!(load.success);
        assert_eq!(load.files_read, vec!["memory://lab".to_string()]);
        assert_eq!(store.load_count(), 1);
    }

    #[test]
    fn test_corrupt_baseline_fails_to_load() {
        let store = MemoryBaselineStore::new().with_corrupt_baseline("lab", "truncated");
        assert!(store.exists("lab").expect("exists"));
        let load = store.load("lab");
        assert!(!load.success);
        assert_eq!(load.error.as_deref(), Some("truncated"));
    }
}
