//! Caller-facing drift results.

use super::health::ControlPlaneHealth;
use super::outcome::FailurePolicy;
use super::severity::{HasSeverity, Severity};
use crate::diff::{Change, ChangeCategory, DriftCategorySummary};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options for local baseline comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DriftOptions {
    /// Append each change description after the summary lines
    pub include_details: bool,
    /// Check both snapshots for duplicate ids and connections first
    pub validate_snapshots: bool,
    /// How a failed check is reported
    pub on_failure: FailurePolicy,
}

impl Default for DriftOptions {
    fn default() -> Self {
        Self {
            include_details: false,
            validate_snapshots: true,
            on_failure: FailurePolicy::FailOpen,
        }
    }
}

/// Whether a persisted baseline existed for the checked snapshot.
///
/// A missing baseline is still reported as "no drift"; this marker lets a
/// caller tell that apart from a verified match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaselineState {
    Present,
    Missing,
    /// Detection failed before the baseline state was known
    Unknown,
}

/// Result of checking a snapshot against its persisted baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftStatus {
    pub has_drift: bool,
    pub drift_summary: Vec<String>,
    pub last_checked: DateTime<Utc>,
    pub affected_files: Vec<String>,
    pub baseline: BaselineState,
}

impl DriftStatus {
    /// A status that reports no drift with a single explanatory line.
    pub(crate) fn no_drift(line: impl Into<String>, baseline: BaselineState) -> Self {
        Self {
            has_drift: false,
            drift_summary: vec![line.into()],
            last_checked: Utc::now(),
            affected_files: Vec::new(),
            baseline,
        }
    }
}

/// Serialized size of each compared snapshot, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotSizeEstimates {
    pub current: usize,
    pub baseline: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    /// Wall time of the comparison alone
    pub comparison_time_ms: f64,
    pub snapshot_size_estimates: SnapshotSizeEstimates,
}

/// Full comparison of two snapshots already in hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftComparisonResult {
    pub has_drift: bool,
    pub changes: Vec<Change>,
    /// Always holds all three categories, zero-valued when untouched
    pub summary: IndexMap<ChangeCategory, DriftCategorySummary>,
    pub performance_metrics: PerformanceMetrics,
}

/// Kind of resource a control-plane finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Switch,
    Server,
    Connection,
    Configuration,
    ControlPlane,
}

impl ResourceType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Switch => "switch",
            Self::Server => "server",
            Self::Connection => "connection",
            Self::Configuration => "configuration",
            Self::ControlPlane => "controlplane",
        }
    }

    /// Path segment used in finding locators.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Switch => "switches",
            Self::Server => "servers",
            Self::Connection => "connections",
            Self::Configuration => "configuration",
            Self::ControlPlane => "controlplane",
        }
    }
}

/// One difference between desired and observed state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPlaneFinding {
    pub id: String,
    /// Locator such as `switches/leaf-1/model`
    pub path: String,
    pub resource_type: ResourceType,
    pub severity: Severity,
    pub description: String,
    pub desired_value: Value,
    pub observed_value: Value,
    pub timestamp: DateTime<Utc>,
    /// In-sync report for a matched resource; never counts as drift
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub informational: bool,
}

impl ControlPlaneFinding {
    pub fn new(
        id: impl Into<String>,
        path: impl Into<String>,
        resource_type: ResourceType,
        severity: Severity,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            resource_type,
            severity,
            description: description.into(),
            desired_value: Value::Null,
            observed_value: Value::Null,
            timestamp: Utc::now(),
            informational: false,
        }
    }

    #[must_use]
    pub fn with_values(mut self, desired: impl Into<Value>, observed: impl Into<Value>) -> Self {
        self.desired_value = desired.into();
        self.observed_value = observed.into();
        self
    }

    #[must_use]
    pub fn informational(mut self) -> Self {
        self.informational = true;
        self
    }
}

impl HasSeverity for ControlPlaneFinding {
    fn severity(&self) -> Severity {
        self.severity
    }
}

/// Result of reconciling desired state against a live control plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPlaneDriftResult {
    pub enabled: bool,
    pub has_drift: bool,
    pub items: Vec<ControlPlaneFinding>,
    pub last_checked: DateTime<Utc>,
    pub control_plane_health: ControlPlaneHealth,
    pub comparison_time_ms: f64,
}

impl ControlPlaneDriftResult {
    /// Findings that count as drift, skipping informational in-sync items.
    pub fn drift_items(&self) -> impl Iterator<Item = &ControlPlaneFinding> {
        self.items.iter().filter(|f| !f.informational)
    }

    /// Number of drift findings at `severity`.
    #[must_use]
    pub fn count_at(&self, severity: Severity) -> usize {
        self.drift_items().filter(|f| f.severity == severity).count()
    }
}
