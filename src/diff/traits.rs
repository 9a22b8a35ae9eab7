//! Trait definitions for diff computation strategies.

use super::Change;
use crate::model::TopologySnapshot;

/// Trait for computing one category of changes between two snapshots.
///
/// Implementors never mutate either snapshot.
pub trait ChangeComputer: Send + Sync {
    /// Compute the changes from `baseline` to `current`.
    fn compute(&self, current: &TopologySnapshot, baseline: &TopologySnapshot) -> Vec<Change>;

    /// Get the name of this change computer for logging/debugging.
    fn name(&self) -> &str;
}
