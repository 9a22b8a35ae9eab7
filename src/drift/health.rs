//! Control-plane health inference.

use crate::model::{ConditionStatus, ControlPlaneResponse};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fraction of `False` conditions above which the plane counts as degraded.
const DEGRADED_FALSE_RATIO: f64 = 0.5;

/// Overall health of a control plane, inferred from its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPlaneHealth {
    Healthy,
    Degraded,
    Unavailable,
}

impl ControlPlaneHealth {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
            Self::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for ControlPlaneHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Infer health from a control-plane response.
///
/// No resources at all means `Unavailable`. More than half of all status
/// conditions reporting `False` means `Degraded`. A response without any
/// conditions is `Healthy`.
#[must_use]
pub fn assess_health(response: &ControlPlaneResponse) -> ControlPlaneHealth {
    if response.resource_count() == 0 {
        return ControlPlaneHealth::Unavailable;
    }

    let (total, failing) = response.conditions().fold((0usize, 0usize), |(total, failing), c| {
        let failing = failing + usize::from(c.status == ConditionStatus::False);
        (total + 1, failing)
    });
    if total == 0 {
        return ControlPlaneHealth::Healthy;
    }

    #[allow(clippy::cast_precision_loss)]
    let ratio = failing as f64 / total as f64;
    if ratio > DEGRADED_FALSE_RATIO {
        ControlPlaneHealth::Degraded
    } else {
        ControlPlaneHealth::Healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, Resource, SwitchSpec, SwitchStatus};

    fn switch_with(conditions: Vec<Condition>) -> Resource<SwitchSpec, SwitchStatus> {
        Resource::new(
            "leaf-1",
            SwitchSpec::default(),
            SwitchStatus {
                conditions,
                ..SwitchStatus::default()
            },
        )
    }

    fn conditions(false_count: usize, true_count: usize) -> Vec<Condition> {
        std::iter::repeat_n(ConditionStatus::False, false_count)
            .chain(std::iter::repeat_n(ConditionStatus::True, true_count))
            .map(|status| Condition::new("Ready", status))
            .collect()
    }

    #[test]
    fn test_empty_response_is_unavailable() {
        assert_eq!(
            assess_health(&ControlPlaneResponse::default()),
            ControlPlaneHealth::Unavailable
        );
    }

    #[test]
    fn test_majority_false_is_degraded() {
        let mut response = ControlPlaneResponse::default();
        response.items.switches.push(switch_with(conditions(6, 4)));
        assert_eq!(assess_health(&response), ControlPlaneHealth::Degraded);
    }

    #[test]
    fn test_exactly_half_false_is_healthy() {
        let mut response = ControlPlaneResponse::default();
        response.items.switches.push(switch_with(conditions(5, 5)));
        assert_eq!(assess_health(&response), ControlPlaneHealth::Healthy);
    }

    #[test]
    fn test_unknown_conditions_do_not_degrade() {
        let mut response = ControlPlaneResponse::default();
        response.items.switches.push(switch_with(vec![
            Condition::new("Ready", ConditionStatus::Unknown),
            Condition::new("Ready", ConditionStatus::Unknown),
            Condition::new("Ready", ConditionStatus::False),
        ]));
        assert_eq!(assess_health(&response), ControlPlaneHealth::Healthy);
    }

    #[test]
    fn test_resources_without_conditions_are_healthy() {
        let mut response = ControlPlaneResponse::default();
        response.items.switches.push(switch_with(Vec::new()));
        assert_eq!(assess_health(&response), ControlPlaneHealth::Healthy);
    }
}
