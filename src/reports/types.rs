//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Auto-detect: summary for terminals and pipes alike
    #[default]
    Auto,
    /// Structured JSON output
    Json,
    /// Brief human-readable summary
    Summary,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Json => write!(f, "json"),
            Self::Summary => write!(f, "summary"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Title for the report
    pub title: Option<String>,
    /// Maximum findings or changes listed per section
    pub max_items: Option<usize>,
    /// Additional metadata to include
    pub metadata: ReportMetadata,
}

impl ReportConfig {
    /// Items to list out of `total`, honoring `max_items`.
    #[must_use]
    pub fn item_limit(&self, total: usize) -> usize {
        self.max_items.map_or(total, |max| max.min(total))
    }
}

/// Metadata included in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    /// Snapshot id checked against its baseline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_id: Option<String>,
    /// Current or desired snapshot path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_path: Option<String>,
    /// Baseline snapshot path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_path: Option<String>,
    /// Captured control-plane response path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_limit() {
        let config = ReportConfig {
            max_items: Some(3),
            ..ReportConfig::default()
        };
        assert_eq!(config.item_limit(10), 3);
        assert_eq!(config.item_limit(2), 2);
        assert_eq!(ReportConfig::default().item_limit(7), 7);
    }

    #[test]
    fn test_format_names() {
        assert_eq!(ReportFormat::Summary.to_string(), "summary");
        let parsed: ReportFormat = serde_yaml_ng::from_str("json").expect("yaml");
        assert_eq!(parsed, ReportFormat::Json);
    }
}
