//! Configuration module for fabric-drift.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust
//! use fabric_drift::config::{AppConfig, ConfigPreset};
//! use fabric_drift::drift::Severity;
//!
//! let config = AppConfig::from_preset(ConfigPreset::Ci);
//! assert!(config.behavior.fail_on_drift);
//!
//! let config = AppConfig::builder()
//!     .snapshot_id("lab-fabric")
//!     .severity_threshold(Severity::High)
//!     .build();
//! assert_eq!(config.control_plane.snapshot_id.as_deref(), Some("lab-fabric"));
//! ```
//!
//! # Configuration File
//!
//! Place a `.fabric-drift.yaml` file in your project root or `~/.config/fabric-drift/`:
//!
//! ```yaml
//! control_plane:
//!   snapshot_id: lab-fabric
//!   severity_threshold: high
//! baseline:
//!   dir: ./baselines
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{ConfigPreset, DEFAULT_API_TIMEOUT_MS};
pub use types::{
    AppConfig, AppConfigBuilder, BaselineConfig, BehaviorConfig, ControlPlaneConfig, DriftConfig,
    OutputConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_full_example_config, load_config_file, load_or_default,
    user_config_dir, ConfigFileError, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.fabric-drift.yaml` config files. Editors can use it for validation
/// and autocompletion.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema().expect("schema");
        assert!(schema.contains("control_plane"));
        assert!(schema.contains("severity_threshold"));
    }
}
