//! Finding severity and threshold filtering.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a control-plane finding, ordered `Low < Medium < High`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown severity '{other}' (expected low, medium or high)")),
        }
    }
}

/// Anything carrying a severity can be filtered by threshold.
pub trait HasSeverity {
    fn severity(&self) -> Severity;
}

/// Keep items at or above `threshold`, preserving order.
///
/// A `Low` threshold keeps everything.
pub fn filter_by_severity<T: HasSeverity>(items: Vec<T>, threshold: Severity) -> Vec<T> {
    if threshold == Severity::Low {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.severity() >= threshold)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    impl HasSeverity for Severity {
        fn severity(&self) -> Severity {
            *self
        }
    }

    #[test]
    fn test_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
    }

    #[test]
    fn test_filter_medium_keeps_medium_and_high() {
        let kept = filter_by_severity(
            vec![Severity::Low, Severity::Medium, Severity::High],
            Severity::Medium,
        );
        assert_eq!(kept, vec![Severity::Medium, Severity::High]);
    }

    #[test]
    fn test_filter_low_is_noop() {
        let items = vec![Severity::High, Severity::Low];
        assert_eq!(filter_by_severity(items.clone(), Severity::Low), items);
    }

    #[test]
    fn test_parse() {
        assert_eq!("HIGH".parse::<Severity>(), Ok(Severity::High));
        assert!("critical".parse::<Severity>().is_err());
        assert_eq!(
            serde_json::to_string(&Severity::Medium).expect("serialize"),
            "\"medium\""
        );
    }
}
