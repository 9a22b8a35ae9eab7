//! Collaborator contracts consumed by the drift engine.
//!
//! The engine never writes through these traits. Reads are idempotent, so
//! calls for the same snapshot id may run concurrently. Retries, timeouts
//! and authentication are the business of the implementations.

mod control_plane;
mod directory;
mod memory;

pub use control_plane::{FileControlPlaneClient, StaticControlPlaneClient};
pub use directory::DirectoryBaselineStore;
pub use memory::MemoryBaselineStore;

use crate::error::Result;
use crate::model::{ControlPlaneResponse, TopologySnapshot};
use serde::{Deserialize, Serialize};

/// Outcome of loading a persisted baseline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineLoad {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<TopologySnapshot>,
    /// Source identifiers (file paths, object keys) the store read
    #[serde(default)]
    pub files_read: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BaselineLoad {
    #[must_use]
    pub fn loaded(snapshot: TopologySnapshot, files_read: Vec<String>) -> Self {
        Self {
            success: true,
            snapshot: Some(snapshot),
            files_read,
            error: None,
        }
    }

    #[must_use]
    pub fn failed(error: impl Into<String>, files_read: Vec<String>) -> Self {
        Self {
            success: false,
            snapshot: None,
            files_read,
            error: Some(error.into()),
        }
    }

    /// Split into the snapshot and the files read, or the failure message.
    ///
    /// A load that claims success without a snapshot counts as a failure.
    pub fn into_result(self) -> std::result::Result<(TopologySnapshot, Vec<String>), String> {
        match (self.success, self.snapshot) {
            (true, Some(snapshot)) => Ok((snapshot, self.files_read)),
            (true, None) => Err("baseline store reported success without a snapshot".to_string()),
            (false, _) => Err(self
                .error
                .unwrap_or_else(|| "baseline could not be loaded".to_string())),
        }
    }
}

/// Persisted baselines, keyed by snapshot id.
pub trait BaselineStore: Send + Sync {
    /// Whether a baseline is stored for `snapshot_id`.
    fn exists(&self, snapshot_id: &str) -> Result<bool>;

    /// Load the baseline for `snapshot_id`.
    fn load(&self, snapshot_id: &str) -> BaselineLoad;
}

/// Source of observed state from a live control plane.
pub trait ControlPlaneClient: Send + Sync {
    /// Fetch the current status of every fabric resource.
    fn fetch_status(&self) -> Result<ControlPlaneResponse>;
}
