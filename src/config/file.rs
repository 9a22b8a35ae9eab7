//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".fabric-drift.yaml",
    ".fabric-drift.yml",
    "fabric-drift.yaml",
    "fabric-drift.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/fabric-drift/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path
        && path.exists()
    {
        return Some(path.to_path_buf());
    }

    if let Ok(cwd) = std::env::current_dir()
        && let Some(path) = find_config_in_dir(&cwd)
    {
        return Some(path);
    }

    if let Some(git_root) = find_git_root()
        && let Some(path) = find_config_in_dir(&git_root)
    {
        return Some(path);
    }

    if let Some(config_dir) = user_config_dir()
        && let Some(path) = find_config_in_dir(&config_dir)
    {
        return Some(path);
    }

    if let Some(home) = dirs::home_dir()
        && let Some(path) = find_config_in_dir(&home)
    {
        return Some(path);
    }

    None
}

/// `~/.config/fabric-drift` or the platform equivalent.
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("fabric-drift"))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml_ng::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Optional values in `other` override when set. Flags only override
    /// when switched on, so unset CLI flags leave file settings alone.
    pub fn merge(&mut self, other: &Self) {
        let defaults = Self::default();

        if other.drift.include_details {
            self.drift.include_details = true;
        }
        if other.drift.validate_snapshots != defaults.drift.validate_snapshots {
            self.drift.validate_snapshots = other.drift.validate_snapshots;
        }
        if other.drift.on_failure.is_some() {
            self.drift.on_failure = other.drift.on_failure;
        }

        if other.control_plane.snapshot_id.is_some() {
            self.control_plane
                .snapshot_id
                .clone_from(&other.control_plane.snapshot_id);
        }
        if other.control_plane.include_healthy_resources {
            self.control_plane.include_healthy_resources = true;
        }
        if other.control_plane.severity_threshold.is_some() {
            self.control_plane.severity_threshold = other.control_plane.severity_threshold;
        }
        if other.control_plane.api_timeout_ms.is_some() {
            self.control_plane.api_timeout_ms = other.control_plane.api_timeout_ms;
        }
        if other.control_plane.on_failure.is_some() {
            self.control_plane.on_failure = other.control_plane.on_failure;
        }

        if other.baseline.dir.is_some() {
            self.baseline.dir.clone_from(&other.baseline.dir);
        }

        if other.output.format != ReportFormat::Auto {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }

        if other.behavior.fail_on_drift {
            self.behavior.fail_on_drift = true;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# fabric-drift configuration
# ===========================
#
# Place this file at:
#   - .fabric-drift.yaml in your project root
#   - ~/.config/fabric-drift/fabric-drift.yaml for global config
#
# CLI arguments always override file settings.

# Local baseline comparison
drift:
  # List each change after the per-category summary lines
  include_details: false
  # Refuse to compare snapshots with duplicate device ids or links
  validate_snapshots: true
  # Failed checks: fail-open (report no drift) or surface-as-finding
  # on_failure: fail-open

# Live control-plane reconciliation
control_plane:
  # Baseline id used as desired state when --desired is not given
  # snapshot_id: lab-fabric
  # Report matched resources as informational in-sync findings
  include_healthy_resources: false
  # Minimum severity to report: low, medium, high (default: medium)
  # severity_threshold: medium
  # Timeout handed to control-plane clients (default: 5000)
  # api_timeout_ms: 5000
  # Failed detections: surface-as-finding or fail-open
  # on_failure: surface-as-finding

# Baseline storage: directory holding <snapshot-id>.json|.yaml|.yml files.
# Defaults to the current directory.
# baseline:
#   dir: ./baselines
baseline: {}

# Output configuration
output:
  # Format: auto, json, summary
  format: auto
  # Output file path (omit for stdout)
  # file: drift.json
  no_color: false

# Behavior flags
behavior:
  # Exit with code 1 if drift is detected
  fail_on_drift: false
  # Suppress non-essential output
  quiet: false
"
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drift::Severity;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".fabric-drift.yaml");
        std::fs::write(&config_path, "behavior:\n  quiet: true\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        let yaml = r"
control_plane:
  snapshot_id: lab
  severity_threshold: high
behavior:
  fail_on_drift: true
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.control_plane.snapshot_id.as_deref(), Some("lab"));
        assert_eq!(config.control_plane.severity_threshold, Some(Severity::High));
        assert!(config.behavior.fail_on_drift);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/fabric-drift.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::builder()
            .snapshot_id("lab")
            .severity_threshold(Severity::High)
            .build();
        let overrides = AppConfig::builder()
            .fail_on_drift(true)
            .output_format(ReportFormat::Json)
            .build();

        base.merge(&overrides);
        assert_eq!(base.control_plane.snapshot_id.as_deref(), Some("lab"));
        assert_eq!(base.control_plane.threshold(), Severity::High);
        assert!(base.behavior.fail_on_drift);
        assert_eq!(base.output.format, ReportFormat::Json);
    }

    #[test]
    fn test_explicit_threshold_overrides_preset() {
        let mut config = AppConfig::from_preset(crate::config::ConfigPreset::Strict);
        assert_eq!(config.control_plane.threshold(), Severity::Low);

        let overrides = AppConfig::builder()
            .severity_threshold(Severity::Medium)
            .build();
        config.merge(&overrides);
        assert_eq!(config.control_plane.threshold(), Severity::Medium);
    }

    #[test]
    fn test_explicit_timeout_overrides_file() {
        let mut config: AppConfig =
            serde_yaml_ng::from_str("control_plane:\n  api_timeout_ms: 10000\n").unwrap();

        config.merge(&AppConfig::builder().build());
        assert_eq!(config.control_plane.api_timeout(), 10000);

        config.merge(&AppConfig::builder().api_timeout_ms(5000).build());
        assert_eq!(config.control_plane.api_timeout(), 5000);
    }

    #[test]
    fn test_full_example_config_parses() {
        let config: AppConfig =
            serde_yaml_ng::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom.yaml");
        std::fs::write(&config_path, "output:\n  no_color: true\n").unwrap();

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }
}
