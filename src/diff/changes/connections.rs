//! Connection change computer implementation.

use crate::diff::object::{deep_equal, field_differences};
use crate::diff::traits::ChangeComputer;
use crate::diff::{Change, ChangeCategory};
use crate::model::{Connection, TopologySnapshot};
use indexmap::IndexMap;

/// Compare two connection lists.
///
/// Links are matched by their 4-tuple key, which is derived from content,
/// so reordering either list never changes the result set.
#[must_use]
pub fn compare_connection_sets(current: &[Connection], baseline: &[Connection]) -> Vec<Change> {
    let current_index: IndexMap<String, &Connection> =
        current.iter().map(|c| (c.key(), c)).collect();
    let baseline_index: IndexMap<String, &Connection> =
        baseline.iter().map(|c| (c.key(), c)).collect();

    let mut changes = Vec::new();

    for (key, connection) in &current_index {
        if !baseline_index.contains_key(key) {
            changes.push(Change::added(
                ChangeCategory::Connection,
                key.as_str(),
                connection.link_type.as_deref(),
            ));
        }
    }

    for (key, connection) in &baseline_index {
        if !current_index.contains_key(key) {
            changes.push(Change::removed(
                ChangeCategory::Connection,
                key.as_str(),
                connection.link_type.as_deref(),
            ));
        }
    }

    for (key, connection) in &current_index {
        if let Some(previous) = baseline_index.get(key) {
            let now = connection.to_value();
            let before = previous.to_value();
            if !deep_equal(&now, &before) {
                changes.push(Change::modified(
                    ChangeCategory::Connection,
                    key.as_str(),
                    field_differences(&before, &now),
                ));
            }
        }
    }

    changes
}

/// Computes link-level changes between snapshots.
#[derive(Debug, Default)]
pub struct ConnectionChangeComputer;

impl ConnectionChangeComputer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ChangeComputer for ConnectionChangeComputer {
    fn compute(&self, current: &TopologySnapshot, baseline: &TopologySnapshot) -> Vec<Change> {
        compare_connection_sets(&current.connections, &baseline.connections)
    }

    fn name(&self) -> &'static str {
        "ConnectionChangeComputer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::ChangeKind;
    use crate::model::PortRef;

    fn link(from: &str, to: &str, link_type: &str) -> Connection {
        Connection::new(PortRef::new(from, "1"), PortRef::new(to, "1"), link_type)
    }

    #[test]
    fn test_reordered_lists_have_no_changes() {
        let a = vec![
            link("leaf-1", "spine-1", "uplink"),
            link("leaf-2", "spine-1", "uplink"),
            link("server-1", "leaf-1", "access"),
        ];
        let mut b = a.clone();
        b.reverse();
        assert!(compare_connection_sets(&a, &b).is_empty());
    }

    #[test]
    fn test_link_type_change_is_modification() {
        let before = vec![link("leaf-1", "spine-1", "uplink")];
        let after = vec![link("leaf-1", "spine-1", "peer")];
        let changes = compare_connection_sets(&after, &before);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind(), ChangeKind::Modified);
        assert_eq!(changes[0].item_id(), "leaf-1:1->spine-1:1");
        assert_eq!(changes[0].details(), ["type changed".to_string()]);
    }

    #[test]
    fn test_moved_port_is_remove_plus_add() {
        let before = vec![link("leaf-1", "spine-1", "uplink")];
        let after = vec![Connection::new(
            PortRef::new("leaf-1", "2"),
            PortRef::new("spine-1", "1"),
            "uplink",
        )];
        let changes = compare_connection_sets(&after, &before);
        let kinds: Vec<_> = changes.iter().map(Change::kind).collect();
        assert_eq!(kinds, vec![ChangeKind::Added, ChangeKind::Removed]);
        assert_eq!(changes[0].description(), "connection leaf-1:2->spine-1:1 added (uplink)");
    }
}
