//! Snapshot comparator implementation.

use super::changes::{ConnectionChangeComputer, DeviceChangeComputer, DeviceGroup};
use super::traits::ChangeComputer;
use super::Change;
use crate::model::TopologySnapshot;

/// Compares two topology snapshots section by section.
///
/// The comparator is stateless: it holds only the fixed pipeline of change
/// computers and reads both snapshots without modifying them.
pub struct SnapshotComparator {
    computers: Vec<Box<dyn ChangeComputer>>,
}

impl SnapshotComparator {
    /// Switches, then endpoints, then connections.
    #[must_use]
    pub fn new() -> Self {
        Self {
            computers: vec![
                Box::new(DeviceChangeComputer::new(DeviceGroup::Switches)),
                Box::new(DeviceChangeComputer::new(DeviceGroup::Endpoints)),
                Box::new(ConnectionChangeComputer::new()),
            ],
        }
    }

    /// Compute every change from `baseline` to `current`.
    #[must_use]
    pub fn compare(&self, current: &TopologySnapshot, baseline: &TopologySnapshot) -> Vec<Change> {
        // Quick check: identical content fingerprints mean identical snapshots
        let fingerprint = current.content_fingerprint();
        if fingerprint != 0 && fingerprint == baseline.content_fingerprint() {
            tracing::debug!("snapshot fingerprints match, skipping comparison");
            return Vec::new();
        }

        let mut changes = Vec::new();
        for computer in &self.computers {
            let found = computer.compute(current, baseline);
            tracing::debug!(computer = computer.name(), changes = found.len(), "computed changes");
            changes.extend(found);
        }
        changes
    }
}

impl Default for SnapshotComparator {
    fn default() -> Self {
        Self::new()
    }
}

/// Compare two snapshots with the default comparator.
#[must_use]
pub fn compare_snapshots(current: &TopologySnapshot, baseline: &TopologySnapshot) -> Vec<Change> {
    SnapshotComparator::new().compare(current, baseline)
}
