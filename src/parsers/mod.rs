//! Readers for topology snapshots and captured control-plane responses.
//!
//! Both document kinds may be JSON or YAML. The format comes from the file
//! extension when there is one and from the content otherwise.
//!
//! ```no_run
//! use fabric_drift::parsers::parse_snapshot;
//! use std::path::Path;
//!
//! let snapshot = parse_snapshot(Path::new("fabric.yaml")).unwrap();
//! println!("{} devices", snapshot.device_count());
//! ```

mod detection;

pub use detection::DocumentFormat;

use crate::error::{ErrorContext, FabricDriftError, Result};
use crate::model::{ControlPlaneResponse, TopologySnapshot};
use serde::de::DeserializeOwned;
use std::path::Path;

fn parse_document<T: DeserializeOwned>(content: &str, format: DocumentFormat) -> Result<T> {
    match format {
        DocumentFormat::Json => Ok(serde_json::from_str(content)?),
        DocumentFormat::Yaml => Ok(serde_yaml_ng::from_str(content)?),
    }
}

fn read_document<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content =
        std::fs::read_to_string(path).map_err(|e| FabricDriftError::io(path, e))?;
    let format = DocumentFormat::resolve(Some(path), &content);
    tracing::debug!(path = %path.display(), format = format.name(), "reading {what}");
    parse_document(&content, format)
        .with_context(|| format!("parsing {what} from {}", path.display()))
}

/// Parse a snapshot from a string, sniffing the format.
pub fn parse_snapshot_str(content: &str) -> Result<TopologySnapshot> {
    parse_document(content, DocumentFormat::detect(content))
}

/// Read and parse a snapshot file.
pub fn parse_snapshot(path: &Path) -> Result<TopologySnapshot> {
    read_document(path, "snapshot")
}

/// Parse a captured control-plane response from a string.
pub fn parse_control_plane_response_str(content: &str) -> Result<ControlPlaneResponse> {
    parse_document(content, DocumentFormat::detect(content))
}

/// Read and parse a captured control-plane response file.
pub fn parse_control_plane_response(path: &Path) -> Result<ControlPlaneResponse> {
    read_document(path, "control plane response")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_snapshot() {
        let yaml = r"
metadata:
  topologyName: lab
devices:
  spines:
    - id: spine-1
      model: DS3000
      ports: 64
  leaves:
    - id: leaf-1
      model: DS2000
      ports: 48
      rack: r12
connections:
  - from: { device: leaf-1, port: 49 }
    to: { device: spine-1, port: 1 }
    type: uplink
";
        let snapshot = parse_snapshot_str(yaml).expect("valid yaml snapshot");
        assert_eq!(snapshot.metadata.topology_name.as_deref(), Some("lab"));
        assert_eq!(snapshot.device_count(), 2);
        assert_eq!(snapshot.connections[0].key(), "leaf-1:49->spine-1:1");
        assert!(snapshot.devices.leaves[0].attributes.contains_key("rack"));
    }

    #[test]
    fn test_parse_json_snapshot() {
        let json = r#"{"devices":{"servers":[{"id":"server-1","type":"gpu","connections":2}]}}"#;
        let snapshot = parse_snapshot_str(json).expect("valid json snapshot");
        assert_eq!(snapshot.devices.servers[0].kind.as_deref(), Some("gpu"));
    }

    #[test]
    fn test_malformed_snapshot_is_error() {
        assert!(parse_snapshot_str("{\"devices\": ").is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = parse_snapshot(Path::new("/nonexistent/fabric.json")).unwrap_err();
        assert!(matches!(err, FabricDriftError::Io { .. }));
    }
}
