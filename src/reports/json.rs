//! JSON report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator, ReportMetadata};
use crate::drift::{ControlPlaneDriftResult, DriftComparisonResult, DriftStatus};
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn render<T: Serialize>(
        &self,
        kind: &'static str,
        result: &T,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let report = JsonReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: "fabric-drift",
                    version: env!("CARGO_PKG_VERSION"),
                },
                kind,
                title: config.title.as_deref(),
                generated_at: Utc::now().to_rfc3339(),
                sources: &config.metadata,
            },
            result,
        };
        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        json.map_err(|e| ReportError::SerializationError(e.to_string()))
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_status_report(
        &self,
        status: &DriftStatus,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        self.render("baseline-check", status, config)
    }

    fn generate_comparison_report(
        &self,
        result: &DriftComparisonResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        self.render("snapshot-comparison", result, config)
    }

    fn generate_control_plane_report(
        &self,
        result: &ControlPlaneDriftResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        self.render("control-plane", result, config)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// ============================================================================
// JSON report structures
// ============================================================================

#[derive(Serialize)]
struct JsonReport<'a, T> {
    metadata: JsonReportMetadata<'a>,
    result: &'a T,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReportMetadata<'a> {
    tool: ToolInfo,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    generated_at: String,
    sources: &'a ReportMetadata,
}

#[derive(Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drift::{BaselineState, DriftStatus};

    fn status() -> DriftStatus {
        DriftStatus {
            has_drift: true,
            drift_summary: vec!["switches: 1 added".to_string()],
            last_checked: Utc::now(),
            affected_files: vec!["baselines/lab.json".to_string()],
            baseline: BaselineState::Present,
        }
    }

    #[test]
    fn test_status_report_shape() {
        let config = ReportConfig {
            metadata: ReportMetadata {
                snapshot_id: Some("lab".to_string()),
                ..ReportMetadata::default()
            },
            ..ReportConfig::default()
        };
        let output = JsonReporter::new()
            .generate_status_report(&status(), &config)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["metadata"]["tool"]["name"], "fabric-drift");
        assert_eq!(value["metadata"]["kind"], "baseline-check");
        assert_eq!(value["metadata"]["sources"]["snapshotId"], "lab");
        assert_eq!(value["result"]["hasDrift"], true);
        assert_eq!(value["result"]["affectedFiles"][0], "baselines/lab.json");
    }

    #[test]
    fn test_compact_output() {
        let output = JsonReporter::new()
            .pretty(false)
            .generate_status_report(&status(), &ReportConfig::default())
            .unwrap();
        assert!(!output.contains('\n'));
    }
}
