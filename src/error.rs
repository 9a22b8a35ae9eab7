//! Unified error types for fabric-drift.
//!
//! These errors describe failures at the crate's edges: reading snapshots,
//! talking to baseline stores and control-plane clients, and configuration.
//! The drift detectors never let them escape; see [`crate::drift::DriftError`]
//! for the taxonomy that the detectors turn into result data.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fabric-drift operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FabricDriftError {
    /// Errors while reading or decoding a topology snapshot
    #[error("Failed to read snapshot: {context}")]
    Snapshot {
        context: String,
        #[source]
        source: SnapshotErrorKind,
    },

    /// Errors raised by a baseline store
    #[error("Baseline store failed: {context}")]
    Baseline {
        context: String,
        #[source]
        source: BaselineErrorKind,
    },

    /// Errors raised while fetching observed state
    #[error("Control plane request failed: {context}")]
    ControlPlane {
        context: String,
        #[source]
        source: ControlPlaneErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Specific snapshot error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SnapshotErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),
}

/// Specific baseline store error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BaselineErrorKind {
    #[error("No baseline stored for snapshot '{0}'")]
    NotFound(String),

    #[error("Invalid snapshot id '{0}'")]
    InvalidId(String),
}

/// Specific control-plane error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ControlPlaneErrorKind {
    #[error("Control plane unreachable: {0}")]
    Unreachable(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for fabric-drift operations
pub type Result<T> = std::result::Result<T, FabricDriftError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl FabricDriftError {
    /// Create a snapshot error with context
    pub fn snapshot(context: impl Into<String>, source: SnapshotErrorKind) -> Self {
        Self::Snapshot {
            context: context.into(),
            source,
        }
    }

    /// Create a baseline store error with context
    pub fn baseline(context: impl Into<String>, source: BaselineErrorKind) -> Self {
        Self::Baseline {
            context: context.into(),
            source,
        }
    }

    /// Create a control-plane error with context
    pub fn control_plane(context: impl Into<String>, source: ControlPlaneErrorKind) -> Self {
        Self::ControlPlane {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for FabricDriftError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for FabricDriftError {
    fn from(err: serde_json::Error) -> Self {
        Self::snapshot(
            "JSON deserialization",
            SnapshotErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<serde_yaml_ng::Error> for FabricDriftError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        Self::snapshot(
            "YAML deserialization",
            SnapshotErrorKind::InvalidYaml(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context, so a
/// failure deep inside a store reads like
/// `"loading baseline fabric-a: reading /var/fabric/fabric-a.json: ..."`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (only evaluated on error).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<FabricDriftError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: FabricDriftError, new_ctx: &str) -> FabricDriftError {
    match err {
        FabricDriftError::Snapshot {
            context: existing,
            source,
        } => FabricDriftError::Snapshot {
            context: chain_context(new_ctx, &existing),
            source,
        },
        FabricDriftError::Baseline {
            context: existing,
            source,
        } => FabricDriftError::Baseline {
            context: chain_context(new_ctx, &existing),
            source,
        },
        FabricDriftError::ControlPlane {
            context: existing,
            source,
        } => FabricDriftError::ControlPlane {
            context: chain_context(new_ctx, &existing),
            source,
        },
        FabricDriftError::Io {
            path,
            message,
            source,
        } => FabricDriftError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
