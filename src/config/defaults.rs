//! Default configurations and presets for fabric-drift.

use super::types::{AppConfig, BehaviorConfig, ControlPlaneConfig, DriftConfig, OutputConfig};
use crate::drift::{FailurePolicy, Severity};
use crate::reports::ReportFormat;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Medium severity threshold, human-readable output
    Default,
    /// Report every finding and every change description
    Strict,
    /// JSON output that fails the pipeline on drift
    Ci,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Strict => "strict",
            Self::Ci => "ci",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "strict" | "all" => Some(Self::Strict),
            "ci" | "ci-cd" | "pipeline" => Some(Self::Ci),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Medium severity threshold with summary output",
            Self::Strict => "Low severity threshold, change details and in-sync reporting",
            Self::Ci => "JSON output, quiet, exit code 1 on drift",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Strict, Self::Ci]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Strict => Self::strict_preset(),
            ConfigPreset::Ci => Self::ci_preset(),
        }
    }

    /// Strict preset.
    ///
    /// - Keep low-severity findings
    /// - List every change description
    /// - Report in-sync resources
    /// - Report failed baseline checks as drift
    #[must_use]
    pub fn strict_preset() -> Self {
        Self {
            drift: DriftConfig {
                include_details: true,
                validate_snapshots: true,
                on_failure: Some(FailurePolicy::SurfaceAsFinding),
            },
            control_plane: ControlPlaneConfig {
                include_healthy_resources: true,
                severity_threshold: Some(Severity::Low),
                ..ControlPlaneConfig::default()
            },
            ..Self::default()
        }
    }

    /// CI pipeline preset.
    ///
    /// - JSON output for machine parsing
    /// - Fail on any drift
    #[must_use]
    pub fn ci_preset() -> Self {
        Self {
            output: OutputConfig {
                format: ReportFormat::Json,
                file: None,
                no_color: true,
            },
            behavior: BehaviorConfig {
                fail_on_drift: true,
                quiet: true,
            },
            ..Self::default()
        }
    }
}

// ============================================================================
// Default Value Constants
// ============================================================================

/// Default timeout handed to control-plane clients, in milliseconds.
pub const DEFAULT_API_TIMEOUT_MS: u64 = 5000;
