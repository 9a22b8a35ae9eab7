//! Document format detection for snapshot and control-plane files.

use std::path::Path;

/// Serialization format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Get the human-readable name for this format.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }

    /// Format implied by a file extension, if any.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Sniff the format from content.
    ///
    /// JSON documents start with `{` or `[` after whitespace; anything else is
    /// treated as YAML, which is a superset of JSON anyway.
    #[must_use]
    pub fn detect(content: &str) -> Self {
        match content.trim_start().chars().next() {
            Some('{' | '[') => Self::Json,
            _ => Self::Yaml,
        }
    }

    /// Extension wins over sniffing.
    #[must_use]
    pub fn resolve(path: Option<&Path>, content: &str) -> Self {
        path.and_then(Self::from_path)
            .unwrap_or_else(|| Self::detect(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.json")), Some(DocumentFormat::Json));
        assert_eq!(DocumentFormat::from_path(Path::new("a.YML")), Some(DocumentFormat::Yaml));
        assert_eq!(DocumentFormat::from_path(Path::new("a.txt")), None);
    }

    #[test]
    fn test_detect_from_content() {
        assert_eq!(DocumentFormat::detect("  {\"devices\": {}}"), DocumentFormat::Json);
        assert_eq!(DocumentFormat::detect("devices:\n  spines: []"), DocumentFormat::Yaml);
    }

    #[test]
    fn test_extension_wins() {
        assert_eq!(
            DocumentFormat::resolve(Some(Path::new("x.yaml")), "{}"),
            DocumentFormat::Yaml
        );
    }
}
