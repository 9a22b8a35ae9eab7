//! Aggregation of changes into counts and summary lines.

use super::{Change, ChangeCategory, ChangeKind, DriftCategorySummary};
use indexmap::IndexMap;

/// Sentinel summary line when there are no changes.
pub const NO_DRIFT_LINE: &str = "no drift — topology matches baseline";

/// Count the changes of a single category by kind.
///
/// `details` holds every change description in input order.
#[must_use]
pub fn summarize(changes: &[Change]) -> DriftCategorySummary {
    let mut summary = DriftCategorySummary::default();
    for change in changes {
        match change.kind() {
            ChangeKind::Added => summary.added += 1,
            ChangeKind::Removed => summary.removed += 1,
            ChangeKind::Modified => summary.modified += 1,
        }
        summary.details.push(change.description().to_string());
    }
    summary
}

/// Summaries for every category, in reporting order.
///
/// Categories without changes are present with zero counts.
#[must_use]
pub fn summarize_by_category(changes: &[Change]) -> IndexMap<ChangeCategory, DriftCategorySummary> {
    ChangeCategory::ALL
        .iter()
        .map(|category| {
            let in_category: Vec<Change> = changes
                .iter()
                .filter(|c| c.category() == *category)
                .cloned()
                .collect();
            (*category, summarize(&in_category))
        })
        .collect()
}

/// One line per touched category, e.g. `"switches: 1 added, 2 modified"`.
///
/// Zero-valued terms are omitted. With no changes at all the result is the
/// single [`NO_DRIFT_LINE`].
#[must_use]
pub fn build_summary_lines(changes: &[Change]) -> Vec<String> {
    if changes.is_empty() {
        return vec![NO_DRIFT_LINE.to_string()];
    }

    summarize_by_category(changes)
        .iter()
        .filter(|(_, summary)| !summary.is_empty())
        .map(|(category, summary)| format!("{}: {}", category.plural(), count_terms(summary)))
        .collect()
}

fn count_terms(summary: &DriftCategorySummary) -> String {
    [
        (summary.added, ChangeKind::Added),
        (summary.removed, ChangeKind::Removed),
        (summary.modified, ChangeKind::Modified),
    ]
    .iter()
    .filter(|(count, _)| *count > 0)
    .map(|(count, kind)| format!("{count} {kind}"))
    .collect::<Vec<_>>()
    .join(", ")
}
