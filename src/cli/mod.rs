//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand
//! and returns the process exit code.

mod check;
mod live;
mod report;

pub use check::run_check;
pub use live::run_live;
pub use report::run_report;

// Re-export config types used by handlers
pub use crate::config::AppConfig;
