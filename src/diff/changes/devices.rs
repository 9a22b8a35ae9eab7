//! Device change computer implementation.

use crate::diff::object::{deep_equal, field_differences};
use crate::diff::traits::ChangeComputer;
use crate::diff::{Change, ChangeCategory};
use crate::model::{DeviceRecord, Identified, TopologySnapshot};
use indexmap::IndexMap;

/// Compare two device collections of one category.
///
/// Devices are matched by `id`. Results come out as added, then removed,
/// then modified, each in input order. Callers must only rely on set
/// membership, not on ordering.
#[must_use]
pub fn compare_device_sets(
    current: &[DeviceRecord<'_>],
    baseline: &[DeviceRecord<'_>],
    category: ChangeCategory,
) -> Vec<Change> {
    let current_index: IndexMap<&str, &DeviceRecord<'_>> =
        current.iter().map(|record| (record.id(), record)).collect();
    let baseline_index: IndexMap<&str, &DeviceRecord<'_>> =
        baseline.iter().map(|record| (record.id(), record)).collect();

    let mut changes = Vec::new();

    for (id, record) in &current_index {
        if !baseline_index.contains_key(id) {
            changes.push(Change::added(category, *id, record.label()));
        }
    }

    for (id, record) in &baseline_index {
        if !current_index.contains_key(id) {
            changes.push(Change::removed(category, *id, record.label()));
        }
    }

    for (id, record) in &current_index {
        if let Some(previous) = baseline_index.get(id) {
            let now = record.to_value();
            let before = previous.to_value();
            if !deep_equal(&now, &before) {
                changes.push(Change::modified(
                    category,
                    *id,
                    field_differences(&before, &now),
                ));
            }
        }
    }

    changes
}

/// Which device collections a [`DeviceChangeComputer`] looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceGroup {
    /// Spine and leaf switches together
    Switches,
    /// Endpoint servers
    Endpoints,
}

/// Computes device-level changes between snapshots.
pub struct DeviceChangeComputer {
    group: DeviceGroup,
}

impl DeviceChangeComputer {
    #[must_use]
    pub const fn new(group: DeviceGroup) -> Self {
        Self { group }
    }

    #[must_use]
    pub const fn category(&self) -> ChangeCategory {
        match self.group {
            DeviceGroup::Switches => ChangeCategory::Switch,
            DeviceGroup::Endpoints => ChangeCategory::Endpoint,
        }
    }
}

impl ChangeComputer for DeviceChangeComputer {
    fn compute(&self, current: &TopologySnapshot, baseline: &TopologySnapshot) -> Vec<Change> {
        let (now, before) = match self.group {
            DeviceGroup::Switches => (current.switch_records(), baseline.switch_records()),
            DeviceGroup::Endpoints => (current.server_records(), baseline.server_records()),
        };
        compare_device_sets(&now, &before, self.category())
    }

    fn name(&self) -> &'static str {
        match self.group {
            DeviceGroup::Switches => "SwitchChangeComputer",
            DeviceGroup::Endpoints => "EndpointChangeComputer",
        }
    }
}
