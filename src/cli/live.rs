//! Live command handler.
//!
//! Implements the `live` subcommand: reconcile a desired topology against
//! observed state captured from the control plane.

use crate::config::AppConfig;
use crate::drift::ControlPlaneDriftDetector;
use crate::pipeline::{drift_exit_code, load_snapshot_with_context, output_report, DriftReport};
use crate::reports::{ReportConfig, ReportMetadata};
use crate::store::{DirectoryBaselineStore, FileControlPlaneClient};
use anyhow::Result;
use std::path::Path;

/// Run the live command, returning the desired exit code.
///
/// With no `desired` file the baseline stored under
/// `control_plane.snapshot_id` is the desired state. An unreadable response
/// is reported as a `control-plane-unavailable` finding, not an error.
pub fn run_live(
    response: &Path,
    desired: Option<&Path>,
    max_items: Option<usize>,
    config: &AppConfig,
) -> Result<i32> {
    let quiet = config.behavior.quiet;
    let desired_snapshot = desired
        .map(|path| load_snapshot_with_context(path, quiet))
        .transpose()?;

    let store = DirectoryBaselineStore::new(config.baseline.dir_or_cwd());
    let detector = ControlPlaneDriftDetector::new(config.control_plane.clone(), store);
    let client = FileControlPlaneClient::new(response, config.control_plane.api_timeout());
    let result = detector.detect_drift_from_client(&client, desired_snapshot.as_ref());

    let report_config = ReportConfig {
        max_items,
        metadata: ReportMetadata {
            snapshot_id: config.control_plane.snapshot_id.clone(),
            current_path: desired.map(|p| p.display().to_string()),
            response_path: Some(response.display().to_string()),
            ..ReportMetadata::default()
        },
        ..ReportConfig::default()
    };
    let has_drift = output_report(
        DriftReport::ControlPlane(&result),
        &config.output,
        &report_config,
        quiet,
    )?;

    Ok(drift_exit_code(has_drift, config.behavior.fail_on_drift))
}
