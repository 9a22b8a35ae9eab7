//! **Drift detection for network fabric topologies.**
//!
//! `fabric-drift` compares a fabric's topology (spine and leaf switches,
//! servers, and the links between their ports) against a reference and
//! reports what changed. There are two kinds of reference:
//!
//! - a **baseline**: a previously persisted snapshot of the same topology,
//!   compared structurally with [`DriftReportBuilder`];
//! - the **control plane**: observed state from a running cluster,
//!   reconciled against the desired topology with
//!   [`ControlPlaneDriftDetector`], producing severity-graded findings.
//!
//! The engine is read-only. It never mutates either side of a comparison
//! and never writes anything back to the fabric.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`TopologySnapshot`] and its device and connection types,
//!   the observed-state wire types, and [`CanonicalId`] identity matching.
//! - **[`diff`]**: deep equality, field differences, set comparison of
//!   devices and connections, and summary-line classification.
//! - **[`drift`]**: the two detectors, [`Severity`], control-plane health,
//!   and the result types. Failures inside a detector become result data;
//!   see [`drift::FailurePolicy`].
//! - **[`store`]**: the [`BaselineStore`] and [`ControlPlaneClient`]
//!   collaborator traits with in-memory and file-backed implementations.
//! - **[`config`]**: YAML configuration, presets, and validation.
//! - **[`reports`]**: JSON and summary renderers.
//!
//! ## Checking a Snapshot Against Its Baseline
//!
//! ```
//! use fabric_drift::{DriftReportBuilder, MemoryBaselineStore, Switch, TopologySnapshot};
//! use fabric_drift::drift::{BaselineState, DriftOptions};
//!
//! let mut baseline = TopologySnapshot::new("lab");
//! baseline.add_leaf(Switch::new("leaf-1", "DS3000", 48));
//!
//! let mut current = baseline.clone();
//! current.add_leaf(Switch::new("leaf-2", "DS3000", 48));
//!
//! let store = MemoryBaselineStore::new().with_baseline("lab", baseline);
//! let status = DriftReportBuilder::new(store)
//!     .detect_drift("lab", &current, &DriftOptions::default());
//!
//! assert!(status.has_drift);
//! assert_eq!(status.baseline, BaselineState::Present);
//! assert_eq!(status.drift_summary, vec!["switches: 1 added"]);
//! ```
//!
//! ## Reconciling Against the Control Plane
//!
//! ```no_run
//! use fabric_drift::config::ControlPlaneConfig;
//! use fabric_drift::store::{DirectoryBaselineStore, FileControlPlaneClient};
//! use fabric_drift::ControlPlaneDriftDetector;
//!
//! let config = ControlPlaneConfig {
//!     snapshot_id: Some("lab".to_string()),
//!     ..ControlPlaneConfig::default()
//! };
//! let detector = ControlPlaneDriftDetector::new(config, DirectoryBaselineStore::new("baselines"));
//! let client = FileControlPlaneClient::new("cluster-status.json", 5000);
//!
//! let result = detector.detect_drift_from_client(&client, None);
//! for finding in result.drift_items() {
//!     println!("[{}] {}", finding.severity, finding.description);
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Timing and ratio math casts usize to f64; all values are bounded in practice
    clippy::cast_precision_loss,
    // Doc completeness: # Errors sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Config structs legitimately use many bools for toggle flags
    clippy::struct_excessive_bools,
    // Variable names like `current`/`baseline` pairs are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod drift;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;
pub mod store;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigPreset};
pub use config::{ConfigError, Validatable};
pub use diff::{compare_snapshots, Change, ChangeCategory, ChangeKind, SnapshotComparator};
pub use drift::{
    ControlPlaneDriftDetector, ControlPlaneDriftResult, ControlPlaneFinding, DriftComparisonResult,
    DriftReportBuilder, DriftStatus, Severity,
};
pub use error::{ErrorContext, FabricDriftError, Result};
pub use model::{CanonicalId, Connection, PortRef, Server, Switch, TopologySnapshot};
pub use parsers::{parse_snapshot, parse_snapshot_str};
pub use reports::{ReportFormat, ReportGenerator};
pub use store::{BaselineStore, ControlPlaneClient, MemoryBaselineStore};
