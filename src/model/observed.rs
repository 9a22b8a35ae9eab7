//! Observed-state resources as reported by a live control plane.
//!
//! The wire shape follows Kubernetes custom resources: every item carries
//! `metadata.name`, a `spec`, and a `status` with a list of conditions.

use super::snapshot::port_string;
use serde::{Deserialize, Serialize};

/// Full status response of a control plane.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPlaneResponse {
    #[serde(default)]
    pub items: ControlPlaneItems,
}

/// The three observed resource lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPlaneItems {
    #[serde(default)]
    pub switches: Vec<Resource<SwitchSpec, SwitchStatus>>,
    #[serde(default)]
    pub servers: Vec<Resource<ServerSpec, ServerStatus>>,
    #[serde(default)]
    pub connections: Vec<Resource<ConnectionSpec, ConnectionStatus>>,
}

impl ControlPlaneResponse {
    /// Number of resources across all three lists.
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.items.switches.len() + self.items.servers.len() + self.items.connections.len()
    }

    /// Every status condition of every resource, in list order.
    pub fn conditions(&self) -> impl Iterator<Item = &Condition> {
        self.items
            .switches
            .iter()
            .flat_map(|r| r.status.conditions.iter())
            .chain(
                self.items
                    .servers
                    .iter()
                    .flat_map(|r| r.status.conditions.iter()),
            )
            .chain(
                self.items
                    .connections
                    .iter()
                    .flat_map(|r| r.status.conditions.iter()),
            )
    }
}

/// A single observed resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource<S, T> {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: S,
    #[serde(default)]
    pub status: T,
}

impl<S, T> Resource<S, T> {
    pub fn new(name: impl Into<String>, spec: S, status: T) -> Self {
        Self {
            metadata: ObjectMeta { name: name.into() },
            spec,
            status,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub name: String,
}

/// A status condition with a tri-state truth value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub kind: String,
    pub status: ConditionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Condition {
    pub fn new(kind: impl Into<String>, status: ConditionStatus) -> Self {
        Self {
            kind: kind.into(),
            status,
            reason: None,
            message: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

// ============================================================================
// Switch
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchStatus {
    /// "healthy", "degraded", "failed", ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<String>,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

// ============================================================================
// Server
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSpec {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatus {
    /// "connected", "degraded", "disconnected", ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connectivity: Option<String>,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

// ============================================================================
// Connection
// ============================================================================

/// Port binding of an observed link end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortBinding {
    pub device: String,
    #[serde(deserialize_with = "port_string")]
    pub port: String,
}

impl PortBinding {
    pub fn new(device: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            port: port.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSpec {
    pub source: PortBinding,
    pub destination: PortBinding,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatus {
    /// "up", "degraded", "down", ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_status: Option<String>,
    #[serde(default)]
    pub error_count: u64,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_crd_shaped_response() {
        let json = r#"{
            "items": {
                "switches": [{
                    "metadata": {"name": "Leaf-1"},
                    "spec": {"model": "DS2000", "ports": 48},
                    "status": {"health": "healthy", "conditions": [{"type": "Ready", "status": "True"}]}
                }],
                "connections": [{
                    "metadata": {"name": "leaf-1-spine-1"},
                    "spec": {"source": {"device": "leaf-1", "port": 1}, "destination": {"device": "spine-1", "port": "1"}},
                    "status": {"linkStatus": "up", "errorCount": 3}
                }]
            }
        }"#;
        let response: ControlPlaneResponse = serde_json::from_str(json).expect("valid response");
        assert_eq!(response.resource_count(), 2);
        assert_eq!(response.items.switches[0].name(), "Leaf-1");
        assert_eq!(response.items.connections[0].spec.source.port, "1");
        assert_eq!(response.items.connections[0].status.error_count, 3);
        assert_eq!(response.conditions().count(), 1);
    }

    #[test]
    fn test_empty_response_has_no_resources() {
        let response: ControlPlaneResponse = serde_json::from_str("{}").expect("valid response");
        assert_eq!(response.resource_count(), 0);
    }
}
