//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::ChangeKind;
use crate::drift::{
    BaselineState, ControlPlaneDriftResult, ControlPlaneHealth, DriftComparisonResult,
    DriftStatus, Severity,
};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn header(&self, lines: &mut Vec<String>, default_title: &str, config: &ReportConfig) {
        let title = config.title.as_deref().unwrap_or(default_title);
        lines.push(self.color(title, "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
    }

    fn verdict(&self, has_drift: bool) -> String {
        if has_drift {
            self.color("DRIFT DETECTED", "red")
        } else {
            self.color("in sync", "green")
        }
    }

    fn severity_label(&self, severity: Severity) -> String {
        let color = match severity {
            Severity::High => "red",
            Severity::Medium => "yellow",
            Severity::Low => "dim",
        };
        self.color(&format!("[{severity}]"), color)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_status_report(
        &self,
        status: &DriftStatus,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        self.header(&mut lines, "Fabric Drift Check", config);

        if let Some(id) = &config.metadata.snapshot_id {
            lines.push(format!("{}  {id}", self.color("Snapshot:", "cyan")));
        }
        let baseline = match status.baseline {
            BaselineState::Present => status.affected_files.join(", "),
            BaselineState::Missing => self.color("none (ungoverned)", "yellow"),
            BaselineState::Unknown => self.color("unknown", "yellow"),
        };
        lines.push(format!("{}  {baseline}", self.color("Baseline:", "cyan")));
        lines.push(format!("{}    {}", self.color("Status:", "cyan"), self.verdict(status.has_drift)));
        lines.push(String::new());

        for line in &status.drift_summary {
            lines.push(format!("  {line}"));
        }
        lines.push(String::new());
        lines.push(self.color(
            &format!("Checked at {}", status.last_checked.to_rfc3339()),
            "dim",
        ));

        Ok(lines.join("\n"))
    }

    fn generate_comparison_report(
        &self,
        result: &DriftComparisonResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        self.header(&mut lines, "Fabric Snapshot Comparison", config);

        if let (Some(baseline), Some(current)) =
            (&config.metadata.baseline_path, &config.metadata.current_path)
        {
            lines.push(format!("{}  {baseline} → {current}", self.color("Files:", "cyan")));
        }
        lines.push(format!("{}  {}", self.color("Status:", "cyan"), self.verdict(result.has_drift)));
        lines.push(String::new());

        lines.push(self.color("Changes:", "bold"));
        for (category, summary) in &result.summary {
            if summary.is_empty() {
                continue;
            }
            lines.push(format!(
                "  {:<12} {} {} {}",
                category.plural(),
                self.color(&format!("+{}", summary.added), "green"),
                self.color(&format!("-{}", summary.removed), "red"),
                self.color(&format!("~{}", summary.modified), "yellow"),
            ));
        }
        if !result.has_drift {
            lines.push(format!("  {}", self.color("none", "dim")));
        }

        let limit = config.item_limit(result.changes.len());
        if limit > 0 {
            lines.push(String::new());
            for change in result.changes.iter().take(limit) {
                let marker = match change.kind() {
                    ChangeKind::Added => self.color("+", "green"),
                    ChangeKind::Removed => self.color("-", "red"),
                    ChangeKind::Modified => self.color("~", "yellow"),
                };
                lines.push(format!("  {marker} {}", change.description()));
            }
            if limit < result.changes.len() {
                lines.push(self.color(
                    &format!("  ... and {} more", result.changes.len() - limit),
                    "dim",
                ));
            }
        }

        let metrics = &result.performance_metrics;
        lines.push(String::new());
        lines.push(self.color(
            &format!(
                "Compared in {:.2} ms ({} → {} bytes)",
                metrics.comparison_time_ms,
                metrics.snapshot_size_estimates.baseline,
                metrics.snapshot_size_estimates.current
            ),
            "dim",
        ));

        Ok(lines.join("\n"))
    }

    fn generate_control_plane_report(
        &self,
        result: &ControlPlaneDriftResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        self.header(&mut lines, "Control Plane Drift", config);

        let health_color = match result.control_plane_health {
            ControlPlaneHealth::Healthy => "green",
            ControlPlaneHealth::Degraded => "yellow",
            ControlPlaneHealth::Unavailable => "red",
        };
        lines.push(format!(
            "{}  {}",
            self.color("Health:", "cyan"),
            self.color(result.control_plane_health.as_str(), health_color)
        ));
        lines.push(format!("{}  {}", self.color("Status:", "cyan"), self.verdict(result.has_drift)));
        lines.push(format!(
            "{}  {} high, {} medium, {} low",
            self.color("Findings:", "cyan"),
            result.count_at(Severity::High),
            result.count_at(Severity::Medium),
            result.count_at(Severity::Low),
        ));
        lines.push(String::new());

        let drift: Vec<_> = result.drift_items().collect();
        let limit = config.item_limit(drift.len());
        for finding in drift.iter().take(limit) {
            lines.push(format!(
                "  {} {}  {}",
                self.severity_label(finding.severity),
                finding.description,
                self.color(&finding.path, "dim"),
            ));
        }
        if limit < drift.len() {
            lines.push(self.color(&format!("  ... and {} more", drift.len() - limit), "dim"));
        }

        let in_sync = result.items.len() - drift.len();
        if in_sync > 0 {
            lines.push(self.color(&format!("  {in_sync} resources in sync"), "green"));
        }

        lines.push(String::new());
        lines.push(self.color(
            &format!("Reconciled in {:.2} ms", result.comparison_time_ms),
            "dim",
        ));

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drift::{ControlPlaneFinding, ResourceType};
    use chrono::Utc;

    #[test]
    fn test_missing_baseline_rendering() {
        let status = DriftStatus {
            has_drift: false,
            drift_summary: vec!["no baseline to compare against".to_string()],
            last_checked: Utc::now(),
            affected_files: Vec::new(),
            baseline: BaselineState::Missing,
        };
        let output = SummaryReporter::new()
            .no_color()
            .generate_status_report(&status, &ReportConfig::default())
            .unwrap();
        assert!(output.contains("none (ungoverned)"));
        assert!(output.contains("  no baseline to compare against"));
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_control_plane_rendering_limits_items() {
        let finding = |id: &str| {
            ControlPlaneFinding::new(
                id,
                format!("switches/{id}"),
                ResourceType::Switch,
                Severity::High,
                format!("switch {id} is missing from the control plane"),
            )
        };
        let result = ControlPlaneDriftResult {
            enabled: true,
            has_drift: true,
            items: vec![finding("leaf-1"), finding("leaf-2"), finding("leaf-3")],
            last_checked: Utc::now(),
            control_plane_health: ControlPlaneHealth::Degraded,
            comparison_time_ms: 0.4,
        };
        let config = ReportConfig {
            max_items: Some(2),
            ..ReportConfig::default()
        };
        let output = SummaryReporter::new()
            .no_color()
            .generate_control_plane_report(&result, &config)
            .unwrap();
        assert!(output.contains("Health:  degraded"));
        assert!(output.contains("3 high, 0 medium, 0 low"));
        assert!(output.contains("... and 1 more"));
    }
}
