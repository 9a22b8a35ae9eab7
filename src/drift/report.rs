//! Drift checks of a current snapshot against its persisted baseline.

use super::outcome::{DriftError, DriftOutcome, FailurePolicy};
use super::result::{
    BaselineState, DriftComparisonResult, DriftOptions, DriftStatus, PerformanceMetrics,
    SnapshotSizeEstimates,
};
use crate::diff::{build_summary_lines, summarize_by_category, SnapshotComparator};
use crate::model::TopologySnapshot;
use crate::store::BaselineStore;
use chrono::Utc;
use std::time::Instant;

/// Checks snapshots against baselines held by a [`BaselineStore`].
///
/// [`detect_drift`](Self::detect_drift) never fails: a missing baseline,
/// an unreadable one, or a broken comparison all come back as a
/// "no drift" status whose summary says why.
pub struct DriftReportBuilder<S> {
    store: S,
    comparator: SnapshotComparator,
}

impl<S: BaselineStore> DriftReportBuilder<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            comparator: SnapshotComparator::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Compare `current` against the baseline stored for `snapshot_id`.
    pub fn detect_drift(
        &self,
        snapshot_id: &str,
        current: &TopologySnapshot,
        options: &DriftOptions,
    ) -> DriftStatus {
        tracing::debug!(snapshot_id, devices = current.device_count(), "checking for drift");
        options
            .on_failure
            .resolve(self.try_detect_drift(snapshot_id, current, options))
    }

    fn try_detect_drift(
        &self,
        snapshot_id: &str,
        current: &TopologySnapshot,
        options: &DriftOptions,
    ) -> DriftOutcome<DriftStatus> {
        let exists = self
            .store
            .exists(snapshot_id)
            .map_err(|e| DriftError::BaselineLoadFailure(e.to_string()))?;
        if !exists {
            return Err(DriftError::NoBaseline(snapshot_id.to_string()));
        }

        let (baseline, files_read) = self
            .store
            .load(snapshot_id)
            .into_result()
            .map_err(DriftError::BaselineLoadFailure)?;

        if options.validate_snapshots {
            check_comparable(current, &baseline)?;
        }

        let changes = self.comparator.compare(current, &baseline);
        let has_drift = !changes.is_empty();
        let mut drift_summary = build_summary_lines(&changes);
        if options.include_details {
            drift_summary.extend(changes.iter().map(|c| c.description().to_string()));
        }

        if has_drift {
            tracing::info!(snapshot_id, changes = changes.len(), "drift detected");
        }

        Ok(DriftStatus {
            has_drift,
            drift_summary,
            last_checked: Utc::now(),
            affected_files: files_read,
            baseline: BaselineState::Present,
        })
    }

    /// Full comparison of two snapshots already in hand.
    ///
    /// Does not touch the baseline store. Identity violations are logged
    /// and the comparison proceeds with later duplicates winning.
    pub fn generate_drift_report(
        &self,
        current: &TopologySnapshot,
        baseline: &TopologySnapshot,
        options: &DriftOptions,
    ) -> DriftComparisonResult {
        if options.validate_snapshots
            && let Err(e) = check_comparable(current, baseline)
        {
            tracing::warn!("comparing snapshots with identity violations: {e}");
        }

        let start = Instant::now();
        let changes = self.comparator.compare(current, baseline);
        let comparison_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        let snapshot_size_estimates = SnapshotSizeEstimates {
            current: estimate_size(current),
            baseline: estimate_size(baseline),
        };

        DriftComparisonResult {
            has_drift: !changes.is_empty(),
            summary: summarize_by_category(&changes),
            changes,
            performance_metrics: PerformanceMetrics {
                comparison_time_ms,
                snapshot_size_estimates,
            },
        }
    }
}

/// Both snapshots must satisfy the identity invariants to be compared.
fn check_comparable(current: &TopologySnapshot, baseline: &TopologySnapshot) -> DriftOutcome<()> {
    for (side, snapshot) in [("current", current), ("baseline", baseline)] {
        if let Some(violation) = snapshot.validate().first() {
            return Err(DriftError::InternalComparison(format!(
                "{side} snapshot has {violation}"
            )));
        }
    }
    Ok(())
}

fn estimate_size(snapshot: &TopologySnapshot) -> usize {
    snapshot.serialized_size().unwrap_or_else(|e| {
        tracing::debug!("snapshot size estimate unavailable: {e}");
        0
    })
}
