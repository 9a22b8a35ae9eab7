//! Drift failure taxonomy and the policy that turns failures into results.
//!
//! Both detectors compute a [`DriftOutcome`] and hand it to a
//! [`FailurePolicy`]. The baseline checker fails open: every failure becomes
//! a "no drift" status carrying the reason. The control-plane detector
//! surfaces failures as high-severity findings, since a silent "no drift"
//! against a live cluster hides real problems.

use super::result::{BaselineState, ControlPlaneFinding, DriftStatus, ResourceType};
use super::severity::Severity;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Summary line reported when there is no baseline to compare against.
pub const NO_BASELINE_LINE: &str = "no baseline to compare against";

/// Why a drift detection could not produce a comparison.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriftError {
    /// Nothing to compare against. A valid terminal state, not a fault.
    #[error("no baseline stored for snapshot '{0}'")]
    NoBaseline(String),

    /// A baseline exists but could not be read or decoded
    #[error("failed to load baseline: {0}")]
    BaselineLoadFailure(String),

    /// The comparison itself could not run
    #[error("comparison failed: {0}")]
    InternalComparison(String),

    /// The control plane returned nothing or could not be reached
    #[error("control plane unavailable: {0}")]
    ControlPlaneUnavailable(String),
}

impl DriftError {
    /// The finding reported when this error is surfaced.
    #[must_use]
    pub fn to_finding(&self) -> ControlPlaneFinding {
        let (id, resource_type, description) = match self {
            Self::NoBaseline(_) | Self::BaselineLoadFailure(_) => (
                "desired-state-load-failure",
                ResourceType::Configuration,
                "failed to load desired state",
            ),
            Self::InternalComparison(_) => (
                "drift-comparison-failure",
                ResourceType::Configuration,
                "failed to compare desired and observed state",
            ),
            Self::ControlPlaneUnavailable(_) => (
                "control-plane-unavailable",
                ResourceType::ControlPlane,
                "control plane status could not be fetched",
            ),
        };
        ControlPlaneFinding::new(
            id,
            resource_type.collection(),
            resource_type,
            Severity::High,
            description,
        )
        .with_values(serde_json::Value::Null, self.to_string())
    }
}

/// Result of a detection before the failure policy is applied.
pub type DriftOutcome<T> = Result<T, DriftError>;

/// A result shape that can absorb a detection failure.
pub trait FailureReport: Sized {
    /// The failure is swallowed and reported as "no drift".
    fn suppressed(error: &DriftError) -> Self;

    /// The failure is reported as a finding.
    fn surfaced(finding: ControlPlaneFinding) -> Self;
}

/// How a detector reports a failed detection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Report "no drift" with an explanatory message
    FailOpen,
    /// Report a high-severity finding
    SurfaceAsFinding,
}

impl FailurePolicy {
    /// Unwrap a successful outcome or convert the failure per this policy.
    pub fn resolve<T: FailureReport>(self, outcome: DriftOutcome<T>) -> T {
        let error = match outcome {
            Ok(value) => return value,
            Err(error) => error,
        };
        match self {
            Self::FailOpen => {
                if !matches!(error, DriftError::NoBaseline(_)) {
                    tracing::warn!("drift detection failed, reporting no drift: {error}");
                }
                T::suppressed(&error)
            }
            Self::SurfaceAsFinding => {
                tracing::warn!("drift detection failed, surfacing as finding: {error}");
                T::surfaced(error.to_finding())
            }
        }
    }
}

impl FailureReport for DriftStatus {
    fn suppressed(error: &DriftError) -> Self {
        match error {
            DriftError::NoBaseline(_) => Self::no_drift(NO_BASELINE_LINE, BaselineState::Missing),
            other => Self::no_drift(
                format!("error detecting drift: {other}"),
                BaselineState::Unknown,
            ),
        }
    }

    fn surfaced(finding: ControlPlaneFinding) -> Self {
        let mut status = Self::no_drift(finding.description, BaselineState::Unknown);
        if let serde_json::Value::String(reason) = finding.observed_value {
            status.drift_summary.push(reason);
        }
        status.has_drift = true;
        status
    }
}

impl FailureReport for Vec<ControlPlaneFinding> {
    fn suppressed(_error: &DriftError) -> Self {
        Self::new()
    }

    fn surfaced(finding: ControlPlaneFinding) -> Self {
        vec![finding]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_open_no_baseline() {
        let status: DriftStatus =
            FailurePolicy::FailOpen.resolve(Err(DriftError::NoBaseline("lab".into())));
        assert!(!status.has_drift);
        assert_eq!(status.drift_summary, vec![NO_BASELINE_LINE.to_string()]);
        assert_eq!(status.baseline, BaselineState::Missing);
        assert!(status.affected_files.is_empty());
    }

    #[test]
    fn test_fail_open_load_failure_carries_message() {
        let status: DriftStatus = FailurePolicy::FailOpen
            .resolve(Err(DriftError::BaselineLoadFailure("truncated".into())));
        assert!(!status.has_drift);
        assert_eq!(
            status.drift_summary,
            vec!["error detecting drift: failed to load baseline: truncated".to_string()]
        );
    }

    #[test]
    fn test_surface_as_finding() {
        let items: Vec<ControlPlaneFinding> = FailurePolicy::SurfaceAsFinding
            .resolve(Err(DriftError::BaselineLoadFailure("truncated".into())));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "desired-state-load-failure");
        assert_eq!(items[0].severity, Severity::High);
        assert_eq!(items[0].resource_type, ResourceType::Configuration);
        assert_eq!(items[0].description, "failed to load desired state");
    }

    #[test]
    fn test_same_failure_differs_only_by_policy() {
        let error = DriftError::ControlPlaneUnavailable("connection refused".into());
        let open: Vec<ControlPlaneFinding> = FailurePolicy::FailOpen.resolve(Err(error.clone()));
        let loud: Vec<ControlPlaneFinding> = FailurePolicy::SurfaceAsFinding.resolve(Err(error));
        assert!(open.is_empty());
        assert_eq!(loud[0].id, "control-plane-unavailable");
    }

    #[test]
    fn test_success_passes_through() {
        let status = DriftStatus::no_drift("fine", BaselineState::Present);
        let resolved = FailurePolicy::SurfaceAsFinding.resolve(Ok(status.clone()));
        assert_eq!(resolved, status);
    }
}
