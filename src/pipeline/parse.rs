//! Input loading stage.
//!
//! Wraps the parsers with file-level context for CLI error messages.

use crate::model::TopologySnapshot;
use anyhow::{Context, Result};
use std::path::Path;

/// Parse a topology snapshot with context for error messages
pub fn load_snapshot_with_context(path: &Path, quiet: bool) -> Result<TopologySnapshot> {
    if !quiet {
        tracing::info!("Reading snapshot: {}", path.display());
    }

    let snapshot = crate::parsers::parse_snapshot(path)
        .with_context(|| format!("Failed to load snapshot: {}", path.display()))?;

    if !quiet {
        tracing::info!(
            "Parsed {} devices and {} connections",
            snapshot.device_count(),
            snapshot.connections.len()
        );
    }

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_snapshot_reports_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_snapshot_with_context(&path, true).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_snapshot_with_context(Path::new("/nonexistent/fabric.yaml"), true)
            .unwrap_err();
        assert!(err.to_string().contains("Failed to load snapshot"));
    }
}
