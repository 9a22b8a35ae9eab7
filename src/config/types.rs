//! Configuration types for fabric-drift operations.

use crate::drift::{DriftOptions, FailurePolicy, Severity};
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments are layered over file settings with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Local baseline comparison options
    pub drift: DriftConfig,
    /// Live control-plane reconciliation
    pub control_plane: ControlPlaneConfig,
    /// Where baselines are stored
    pub baseline: BaselineConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Append change descriptions to drift summaries.
    pub const fn include_details(mut self, include: bool) -> Self {
        self.config.drift.include_details = include;
        self
    }

    /// Snapshot id whose baseline is the desired state.
    pub fn snapshot_id(mut self, id: impl Into<String>) -> Self {
        self.config.control_plane.snapshot_id = Some(id.into());
        self
    }

    /// Minimum severity reported by the control-plane detector.
    pub const fn severity_threshold(mut self, threshold: Severity) -> Self {
        self.config.control_plane.severity_threshold = Some(threshold);
        self
    }

    /// Report matched resources as informational in-sync findings.
    pub const fn include_healthy_resources(mut self, include: bool) -> Self {
        self.config.control_plane.include_healthy_resources = include;
        self
    }

    /// How baseline checks report a failed detection.
    pub const fn drift_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.config.drift.on_failure = Some(policy);
        self
    }

    /// How the control-plane detector reports a failed detection.
    pub const fn control_plane_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.config.control_plane.on_failure = Some(policy);
        self
    }

    /// Timeout handed to control-plane clients.
    pub const fn api_timeout_ms(mut self, timeout: u64) -> Self {
        self.config.control_plane.api_timeout_ms = Some(timeout);
        self
    }

    /// Directory holding `<snapshot-id>.json|.yaml` baselines.
    pub fn baseline_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.config.baseline.dir = dir;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Exit with code 1 when drift is found.
    pub const fn fail_on_drift(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_drift = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Local baseline comparison options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DriftConfig {
    /// Append each change description after the summary lines
    pub include_details: bool,
    /// Reject snapshots with duplicate device ids or connections
    pub validate_snapshots: bool,
    /// How a failed check is reported (default: fail-open)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_failure: Option<FailurePolicy>,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            include_details: false,
            validate_snapshots: true,
            on_failure: None,
        }
    }
}

impl DriftConfig {
    /// Options passed to the baseline drift checker.
    #[must_use]
    pub const fn options(&self) -> DriftOptions {
        DriftOptions {
            include_details: self.include_details,
            validate_snapshots: self.validate_snapshots,
            on_failure: match self.on_failure {
                Some(policy) => policy,
                None => FailurePolicy::FailOpen,
            },
        }
    }
}

/// Live control-plane reconciliation settings.
///
/// Unset values fall back to `medium` and [`super::DEFAULT_API_TIMEOUT_MS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ControlPlaneConfig {
    /// Snapshot id of the desired state, loaded when none is supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_id: Option<String>,
    /// Emit informational findings for resources that match
    pub include_healthy_resources: bool,
    /// Findings below this severity are dropped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity_threshold: Option<Severity>,
    /// Timeout passed to control-plane clients; not enforced by the detector
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub api_timeout_ms: Option<u64>,
    /// How a failed detection is reported (default: surface-as-finding)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_failure: Option<FailurePolicy>,
}

impl ControlPlaneConfig {
    /// Effective severity threshold.
    #[must_use]
    pub fn threshold(&self) -> Severity {
        self.severity_threshold.unwrap_or(Severity::Medium)
    }

    /// Effective client timeout in milliseconds.
    #[must_use]
    pub fn api_timeout(&self) -> u64 {
        self.api_timeout_ms.unwrap_or(super::DEFAULT_API_TIMEOUT_MS)
    }

    /// Effective failure policy.
    #[must_use]
    pub fn failure_policy(&self) -> FailurePolicy {
        self.on_failure.unwrap_or(FailurePolicy::SurfaceAsFinding)
    }
}

/// Baseline storage location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BaselineConfig {
    /// Directory holding `<snapshot-id>.json|.yaml|.yml` files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl BaselineConfig {
    /// The configured directory, or the current directory.
    #[must_use]
    pub fn dir_or_cwd(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

/// Behavior flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if drift is detected
    pub fail_on_drift: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}
