//! Pipeline orchestration shared by the CLI command handlers.
//!
//! Handlers load inputs, run a detector, then hand the result to
//! [`output_report`], which resolves the format, renders and writes it.

mod output;
mod parse;
mod report_stage;

pub use output::{auto_detect_format, should_use_color, write_output, OutputTarget};
pub use parse::load_snapshot_with_context;
pub use report_stage::{output_report, DriftReport};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// No drift detected (or drift without --fail-on-drift)
    pub const SUCCESS: i32 = 0;
    /// Drift was detected and --fail-on-drift is set
    pub const DRIFT_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

/// Exit code for a finished detection.
///
/// Fail-open results carry `has_drift == false` and so never fail a build.
#[must_use]
pub const fn drift_exit_code(has_drift: bool, fail_on_drift: bool) -> i32 {
    if has_drift && fail_on_drift {
        exit_codes::DRIFT_DETECTED
    } else {
        exit_codes::SUCCESS
    }
}
