//! Change records produced by the snapshot comparators.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a change between baseline and current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
}

impl ChangeKind {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Modified => "modified",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Category of the changed item. Spine and leaf switches share one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeCategory {
    Switch,
    Endpoint,
    Connection,
}

impl ChangeCategory {
    /// All categories in reporting order.
    pub const ALL: [Self; 3] = [Self::Switch, Self::Endpoint, Self::Connection];

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Switch => "switch",
            Self::Endpoint => "endpoint",
            Self::Connection => "connection",
        }
    }

    #[must_use]
    pub const fn plural(&self) -> &'static str {
        match self {
            Self::Switch => "switches",
            Self::Endpoint => "endpoints",
            Self::Connection => "connections",
        }
    }
}

impl fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single difference between two snapshots.
///
/// Changes are created by the comparators and never mutated afterwards,
/// so the fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    kind: ChangeKind,
    category: ChangeCategory,
    item_id: String,
    description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    details: Vec<String>,
}

impl Change {
    /// An item present in current but not in the baseline.
    pub fn added(category: ChangeCategory, item_id: impl Into<String>, label: Option<&str>) -> Self {
        let item_id = item_id.into();
        let description = match label {
            Some(label) => format!("{category} {item_id} added ({label})"),
            None => format!("{category} {item_id} added"),
        };
        Self {
            kind: ChangeKind::Added,
            category,
            item_id,
            description,
            details: Vec::new(),
        }
    }

    /// An item present in the baseline but not in current.
    pub fn removed(
        category: ChangeCategory,
        item_id: impl Into<String>,
        label: Option<&str>,
    ) -> Self {
        let item_id = item_id.into();
        let description = match label {
            Some(label) => format!("{category} {item_id} removed (was: {label})"),
            None => format!("{category} {item_id} removed"),
        };
        Self {
            kind: ChangeKind::Removed,
            category,
            item_id,
            description,
            details: Vec::new(),
        }
    }

    /// An item present on both sides whose attributes differ.
    pub fn modified(
        category: ChangeCategory,
        item_id: impl Into<String>,
        details: Vec<String>,
    ) -> Self {
        let item_id = item_id.into();
        let description = format!("{category} {item_id} modified: {}", details.join(", "));
        Self {
            kind: ChangeKind::Modified,
            category,
            item_id,
            description,
            details,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ChangeKind {
        self.kind
    }

    #[must_use]
    pub const fn category(&self) -> ChangeCategory {
        self.category
    }

    #[must_use]
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Field differences of a modified item; empty for added/removed items.
    #[must_use]
    pub fn details(&self) -> &[String] {
        &self.details
    }
}

/// Per-category counts and descriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftCategorySummary {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub details: Vec<String>,
}

impl DriftCategorySummary {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.added + self.removed + self.modified
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_added_description_includes_label() {
        let change = Change::added(ChangeCategory::Switch, "leaf-3", Some("DS2000"));
        assert_eq!(change.description(), "switch leaf-3 added (DS2000)");
        assert!(change.details().is_empty());
    }

    #[test]
    fn test_removed_description_uses_was() {
        let change = Change::removed(ChangeCategory::Endpoint, "server-9", Some("gpu"));
        assert_eq!(change.description(), "endpoint server-9 removed (was: gpu)");
        let bare = Change::removed(ChangeCategory::Endpoint, "server-9", None);
        assert_eq!(bare.description(), "endpoint server-9 removed");
    }

    #[test]
    fn test_modified_lists_details() {
        let change = Change::modified(
            ChangeCategory::Switch,
            "leaf-1",
            vec!["model changed".to_string(), "ports changed".to_string()],
        );
        assert_eq!(change.kind(), ChangeKind::Modified);
        assert_eq!(
            change.description(),
            "switch leaf-1 modified: model changed, ports changed"
        );
    }

    #[test]
    fn test_change_serializes_camel_case() {
        let change = Change::added(ChangeCategory::Connection, "a:1->b:1", None);
        let json = serde_json::to_value(&change).expect("serializable");
        assert_eq!(json["itemId"], "a:1->b:1");
        assert_eq!(json["kind"], "added");
        assert_eq!(json["category"], "connection");
    }
}
