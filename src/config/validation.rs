//! Configuration validation for fabric-drift.

use super::types::{AppConfig, BaselineConfig, ControlPlaneConfig, OutputConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.control_plane.validate());
        errors.extend(self.baseline.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for ControlPlaneConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.api_timeout_ms == Some(0) {
            errors.push(ConfigError::new(
                "control_plane.api_timeout_ms",
                "must be greater than 0",
            ));
        }
        if let Some(id) = &self.snapshot_id
            && id.trim().is_empty()
        {
            errors.push(ConfigError::new(
                "control_plane.snapshot_id",
                "must not be empty when set",
            ));
        }
        errors
    }
}

impl Validatable for BaselineConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(dir) = &self.dir
            && !dir.is_dir()
        {
            errors.push(ConfigError::new(
                "baseline.dir",
                format!("'{}' is not a directory", dir.display()),
            ));
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(file) = &self.file
            && let Some(parent) = file.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            errors.push(ConfigError::new(
                "output.file",
                format!("parent directory '{}' does not exist", parent.display()),
            ));
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_control_plane_validation() {
        let config = ControlPlaneConfig {
            api_timeout_ms: Some(0),
            snapshot_id: Some("  ".to_string()),
            ..ControlPlaneConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "control_plane.api_timeout_ms");
    }

    #[test]
    fn test_baseline_dir_must_exist() {
        let config = BaselineConfig {
            dir: Some(PathBuf::from("/nonexistent/baselines")),
        };
        assert!(!config.is_valid());

        let tmp = tempfile::TempDir::new().unwrap();
        let config = BaselineConfig {
            dir: Some(tmp.path().to_path_buf()),
        };
        assert!(config.is_valid());
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::new("output.file", "bad");
        assert_eq!(error.to_string(), "output.file: bad");
    }
}
