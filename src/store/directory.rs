//! Baseline store backed by a directory of snapshot files.

use super::{BaselineLoad, BaselineStore};
use crate::error::{BaselineErrorKind, FabricDriftError, Result};
use crate::parsers::parse_snapshot;
use std::path::{Path, PathBuf};

/// Extensions probed, in order, for `<dir>/<snapshot_id>.<ext>`.
const SNAPSHOT_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Reads baselines from `<dir>/<snapshot_id>.json|.yaml|.yml`.
#[derive(Debug, Clone)]
pub struct DirectoryBaselineStore {
    root: PathBuf,
}

impl DirectoryBaselineStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Snapshot ids become file names, so path separators and parent
    /// references are rejected.
    fn check_id(snapshot_id: &str) -> Result<()> {
        let invalid = snapshot_id.is_empty()
            || snapshot_id.contains(['/', '\\'])
            || snapshot_id == "."
            || snapshot_id == "..";
        if invalid {
            return Err(FabricDriftError::baseline(
                "resolving baseline path",
                BaselineErrorKind::InvalidId(snapshot_id.to_string()),
            ));
        }
        Ok(())
    }

    fn find(&self, snapshot_id: &str) -> Result<Option<PathBuf>> {
        Self::check_id(snapshot_id)?;
        Ok(SNAPSHOT_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{snapshot_id}.{ext}")))
            .find(|path| path.is_file()))
    }
}

impl BaselineStore for DirectoryBaselineStore {
    fn exists(&self, snapshot_id: &str) -> Result<bool> {
        Ok(self.find(snapshot_id)?.is_some())
    }

    fn load(&self, snapshot_id: &str) -> BaselineLoad {
        let path = match self.find(snapshot_id) {
            Ok(Some(path)) => path,
            Ok(None) => {
                return BaselineLoad::failed(
                    BaselineErrorKind::NotFound(snapshot_id.to_string()).to_string(),
                    Vec::new(),
                );
            }
            Err(e) => return BaselineLoad::failed(e.to_string(), Vec::new()),
        };

        let source = path.display().to_string();
        match parse_snapshot(&path) {
            Ok(snapshot) => {
                tracing::debug!(path = %source, devices = snapshot.device_count(), "loaded baseline");
                BaselineLoad::loaded(snapshot, vec![source])
            }
            Err(e) => {
                tracing::warn!(path = %source, "failed to load baseline: {e}");
                BaselineLoad::failed(e.to_string(), vec![source])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_path_like_ids() {
        let store = DirectoryBaselineStore::new("/tmp");
        assert!(store.exists("../etc/passwd").is_err());
        assert!(store.exists("").is_err());
        assert!(!store.load("a/b").success);
    }

    #[test]
    fn test_missing_directory_means_no_baseline() {
        let store = DirectoryBaselineStore::new("/nonexistent/fabric-drift");
        assert!(!store.exists("lab").expect("valid id"));
        let load = store.load("lab");
        assert!(!load.success);
        assert!(load.files_read.is_empty());
    }
}
