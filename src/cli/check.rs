//! Check command handler.
//!
//! Implements the `check` subcommand: compare a snapshot against the
//! baseline stored for its id.

use crate::config::AppConfig;
use crate::drift::DriftReportBuilder;
use crate::pipeline::{drift_exit_code, load_snapshot_with_context, output_report, DriftReport};
use crate::reports::{ReportConfig, ReportMetadata};
use crate::store::DirectoryBaselineStore;
use anyhow::Result;
use std::path::Path;

/// Run the check command, returning the desired exit code.
///
/// Baseline problems never fail the command; they are reported in the
/// status. Only an unreadable current snapshot is an error.
pub fn run_check(snapshot_id: &str, current: &Path, config: &AppConfig) -> Result<i32> {
    let quiet = config.behavior.quiet;
    let snapshot = load_snapshot_with_context(current, quiet)?;

    let store = DirectoryBaselineStore::new(config.baseline.dir_or_cwd());
    let builder = DriftReportBuilder::new(store);
    let status = builder.detect_drift(snapshot_id, &snapshot, &config.drift.options());

    let report_config = ReportConfig {
        metadata: ReportMetadata {
            snapshot_id: Some(snapshot_id.to_string()),
            current_path: Some(current.display().to_string()),
            ..ReportMetadata::default()
        },
        ..ReportConfig::default()
    };
    let has_drift = output_report(
        DriftReport::Status(&status),
        &config.output,
        &report_config,
        quiet,
    )?;

    Ok(drift_exit_code(has_drift, config.behavior.fail_on_drift))
}
