//! Report output stage.
//!
//! Renders a detection result with the configured reporter and writes it
//! to stdout or a file.

use crate::config::OutputConfig;
use crate::drift::{ControlPlaneDriftResult, DriftComparisonResult, DriftStatus};
use crate::reports::{create_reporter_with_options, ReportConfig, ReportGenerator};
use anyhow::Result;

use super::{auto_detect_format, should_use_color, write_output, OutputTarget};

/// A finished detection result, ready to be rendered.
#[derive(Debug, Clone, Copy)]
pub enum DriftReport<'a> {
    /// Snapshot checked against its stored baseline
    Status(&'a DriftStatus),
    /// Two snapshots compared directly
    Comparison(&'a DriftComparisonResult),
    /// Desired topology reconciled against the control plane
    ControlPlane(&'a ControlPlaneDriftResult),
}

impl DriftReport<'_> {
    /// Whether the wrapped result reports drift
    #[must_use]
    pub const fn has_drift(&self) -> bool {
        match self {
            Self::Status(status) => status.has_drift,
            Self::Comparison(result) => result.has_drift,
            Self::ControlPlane(result) => result.has_drift,
        }
    }

    fn render(
        &self,
        reporter: &dyn ReportGenerator,
        config: &ReportConfig,
    ) -> Result<String, crate::reports::ReportError> {
        match self {
            Self::Status(status) => reporter.generate_status_report(status, config),
            Self::Comparison(result) => reporter.generate_comparison_report(result, config),
            Self::ControlPlane(result) => reporter.generate_control_plane_report(result, config),
        }
    }
}

/// Output a drift report to the configured destination.
///
/// Returns whether the report carries drift.
pub fn output_report(
    report: DriftReport<'_>,
    output: &OutputConfig,
    report_config: &ReportConfig,
    quiet: bool,
) -> Result<bool> {
    let target = OutputTarget::from_option(output.file.clone());
    let format = auto_detect_format(output.format);
    let use_color = should_use_color(output.no_color, &target);

    tracing::debug!(%format, use_color, "rendering report");
    let reporter = create_reporter_with_options(format, use_color);
    let content = report.render(reporter.as_ref(), report_config)?;

    write_output(&content, &target, quiet)?;
    Ok(report.has_drift())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drift::BaselineState;
    use crate::reports::ReportFormat;
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn test_json_report_to_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("status.json");
        let status = DriftStatus {
            has_drift: true,
            drift_summary: vec!["switches: 1 added".to_string()],
            last_checked: Utc::now(),
            affected_files: vec!["lab.json".to_string()],
            baseline: BaselineState::Present,
        };
        let output = OutputConfig {
            format: ReportFormat::Json,
            file: Some(path.clone()),
            no_color: true,
        };

        let has_drift =
            output_report(DriftReport::Status(&status), &output, &ReportConfig::default(), true)
                .unwrap();
        assert!(has_drift);

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written["result"]["driftSummary"][0], "switches: 1 added");
    }
}
