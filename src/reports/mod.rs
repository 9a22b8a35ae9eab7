//! Report generation for drift results.
//!
//! Two output formats cover the three result types:
//! - JSON: Structured data for programmatic integration
//! - Summary: Compact shell-friendly output

mod json;
mod summary;
mod types;

pub use json::JsonReporter;
pub use summary::SummaryReporter;
pub use types::{ReportConfig, ReportFormat, ReportMetadata};

use crate::drift::{ControlPlaneDriftResult, DriftComparisonResult, DriftStatus};
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Report on a snapshot checked against its stored baseline
    fn generate_status_report(
        &self,
        status: &DriftStatus,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Report on a comparison of two snapshots
    fn generate_comparison_report(
        &self,
        result: &DriftComparisonResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Report on a control-plane reconciliation
    fn generate_control_plane_report(
        &self,
        result: &ControlPlaneDriftResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Auto | ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}
