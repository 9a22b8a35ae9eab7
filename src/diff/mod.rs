//! Structural diff engine for topology snapshots.
//!
//! # Architecture
//!
//! - [`object`]: structural equality ([`deep_equal`]) and field-level
//!   differences ([`field_differences`]) over JSON-shaped values
//! - [`ChangeComputer`]: trait for computing one section's changes, with
//!   implementations in the [`changes`] module
//! - [`SnapshotComparator`]: runs the computers for switches, endpoints and
//!   connections in that fixed order
//! - [`classifier`]: per-category counts and human-readable summary lines
//!
//! # Example
//!
//! ```ignore
//! use fabric_drift::diff::{build_summary_lines, compare_snapshots};
//!
//! let changes = compare_snapshots(&current, &baseline);
//! for line in build_summary_lines(&changes) {
//!     println!("{line}");
//! }
//! ```

pub mod changes;
pub mod classifier;
mod engine;
pub mod object;
mod result;
pub mod traits;

pub use changes::{compare_connection_sets, compare_device_sets};
pub use classifier::{build_summary_lines, summarize, summarize_by_category, NO_DRIFT_LINE};
pub use engine::{compare_snapshots, SnapshotComparator};
pub use object::{deep_equal, field_differences};
pub use result::{Change, ChangeCategory, ChangeKind, DriftCategorySummary};
pub use traits::ChangeComputer;
