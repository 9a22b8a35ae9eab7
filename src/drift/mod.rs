//! Drift detection against persisted baselines and live control planes.
//!
//! Two detectors share one failure taxonomy:
//!
//! - [`DriftReportBuilder`] checks a snapshot against the baseline a
//!   [`BaselineStore`](crate::store::BaselineStore) holds for it. It fails
//!   open and always returns a well-formed [`DriftStatus`].
//! - [`ControlPlaneDriftDetector`] reconciles a desired snapshot with a
//!   control plane's observed resources, assigns severities and filters by
//!   threshold. It surfaces failures as high-severity findings.
//!
//! ```
//! use fabric_drift::drift::{DriftOptions, DriftReportBuilder};
//! use fabric_drift::model::{Switch, TopologySnapshot};
//! use fabric_drift::store::MemoryBaselineStore;
//!
//! let mut baseline = TopologySnapshot::new("lab");
//! baseline.add_leaf(Switch::new("leaf-1", "DS2000", 48));
//! let mut current = baseline.clone();
//! current.add_leaf(Switch::new("leaf-2", "DS2000", 48));
//!
//! let builder = DriftReportBuilder::new(MemoryBaselineStore::new().with_baseline("lab", baseline));
//! let status = builder.detect_drift("lab", &current, &DriftOptions::default());
//! assert!(status.has_drift);
//! assert_eq!(status.drift_summary, vec!["switches: 1 added".to_string()]);
//! ```

mod control_plane;
mod health;
mod outcome;
mod report;
mod result;
mod severity;

pub use control_plane::ControlPlaneDriftDetector;
pub use health::{assess_health, ControlPlaneHealth};
pub use outcome::{DriftError, DriftOutcome, FailurePolicy, FailureReport, NO_BASELINE_LINE};
pub use report::DriftReportBuilder;
pub use result::{
    BaselineState, ControlPlaneDriftResult, ControlPlaneFinding, DriftComparisonResult,
    DriftOptions, DriftStatus, PerformanceMetrics, ResourceType, SnapshotSizeEstimates,
};
pub use severity::{filter_by_severity, HasSeverity, Severity};
