//! Report command handler.
//!
//! Implements the `report` subcommand: a full comparison of two snapshot
//! files with per-category counts and timing.

use crate::config::AppConfig;
use crate::drift::DriftReportBuilder;
use crate::pipeline::{drift_exit_code, load_snapshot_with_context, output_report, DriftReport};
use crate::reports::{ReportConfig, ReportMetadata};
use crate::store::MemoryBaselineStore;
use anyhow::Result;
use std::path::Path;

/// Run the report command, returning the desired exit code.
pub fn run_report(
    baseline: &Path,
    current: &Path,
    max_items: Option<usize>,
    config: &AppConfig,
) -> Result<i32> {
    let quiet = config.behavior.quiet;
    let baseline_snapshot = load_snapshot_with_context(baseline, quiet)?;
    let current_snapshot = load_snapshot_with_context(current, quiet)?;

    // Both sides are already in hand, so the store is never consulted.
    let builder = DriftReportBuilder::new(MemoryBaselineStore::new());
    let result = builder.generate_drift_report(
        &current_snapshot,
        &baseline_snapshot,
        &config.drift.options(),
    );

    if !quiet {
        tracing::info!(
            "Compared snapshots in {:.2} ms: {} changes",
            result.performance_metrics.comparison_time_ms,
            result.changes.len()
        );
    }

    let report_config = ReportConfig {
        max_items,
        metadata: ReportMetadata {
            baseline_path: Some(baseline.display().to_string()),
            current_path: Some(current.display().to_string()),
            ..ReportMetadata::default()
        },
        ..ReportConfig::default()
    };
    let has_drift = output_report(
        DriftReport::Comparison(&result),
        &config.output,
        &report_config,
        quiet,
    )?;

    Ok(drift_exit_code(has_drift, config.behavior.fail_on_drift))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Server, TopologySnapshot};
    use crate::pipeline::exit_codes;
    use crate::reports::ReportFormat;
    use tempfile::TempDir;

    #[test]
    fn test_report_counts_by_category() {
        let tmp = TempDir::new().unwrap();
        let baseline = tmp.path().join("baseline.yaml");
        let current = tmp.path().join("current.yaml");

        let mut old = TopologySnapshot::new("lab");
        old.add_server(Server::new("srv-1", "compute", 2));
        let mut new = old.clone();
        new.add_server(Server::new("srv-2", "storage", 2));
        std::fs::write(&baseline, serde_yaml_ng::to_string(&old).unwrap()).unwrap();
        std::fs::write(&current, serde_yaml_ng::to_string(&new).unwrap()).unwrap();

        let out = tmp.path().join("report.json");
        let config = AppConfig::builder()
            .output_format(ReportFormat::Json)
            .output_file(Some(out.clone()))
            .fail_on_drift(true)
            .quiet(true)
            .build();

        let code = run_report(&baseline, &current, None, &config).unwrap();
        assert_eq!(code, exit_codes::DRIFT_DETECTED);

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(written["metadata"]["kind"], "snapshot-comparison");
        assert_eq!(written["result"]["summary"]["endpoint"]["added"], 1);
        assert_eq!(written["result"]["summary"]["switch"]["added"], 0);
    }
}
