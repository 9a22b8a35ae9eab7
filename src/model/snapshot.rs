//! Desired-state topology snapshot structures.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use xxhash_rust::xxh3::xxh3_64;

/// A point-in-time representation of a fabric topology.
///
/// Snapshots are plain trees built from serde data, so every value reachable
/// from a snapshot is finite and acyclic. The comparators rely on that.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologySnapshot {
    /// Generation metadata
    #[serde(default)]
    pub metadata: SnapshotMetadata,
    /// Device collections
    #[serde(default)]
    pub devices: Devices,
    /// Links between device ports
    #[serde(default)]
    pub connections: Vec<Connection>,
}

/// Snapshot generation metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topology_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_count: Option<usize>,
}

/// The three device collections of a fabric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Devices {
    #[serde(default)]
    pub spines: Vec<Switch>,
    #[serde(default)]
    pub leaves: Vec<Switch>,
    #[serde(default)]
    pub servers: Vec<Server>,
}

/// A spine or leaf switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Switch {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<u32>,
    /// Any further category-specific attributes, in document order
    #[serde(flatten)]
    pub attributes: IndexMap<String, Value>,
}

impl Switch {
    pub fn new(id: impl Into<String>, model: impl Into<String>, ports: u32) -> Self {
        Self {
            id: id.into(),
            model: Some(model.into()),
            ports: Some(ports),
            attributes: IndexMap::new(),
        }
    }

    fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("id".to_string(), Value::String(self.id.clone()));
        if let Some(model) = &self.model {
            map.insert("model".to_string(), Value::String(model.clone()));
        }
        if let Some(ports) = self.ports {
            map.insert("ports".to_string(), Value::from(ports));
        }
        extend_attributes(&mut map, &self.attributes);
        Value::Object(map)
    }
}

/// An endpoint server attached to the fabric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<u32>,
    #[serde(flatten)]
    pub attributes: IndexMap<String, Value>,
}

impl Server {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, connections: u32) -> Self {
        Self {
            id: id.into(),
            kind: Some(kind.into()),
            connections: Some(connections),
            attributes: IndexMap::new(),
        }
    }

    fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("id".to_string(), Value::String(self.id.clone()));
        if let Some(kind) = &self.kind {
            map.insert("type".to_string(), Value::String(kind.clone()));
        }
        if let Some(connections) = self.connections {
            map.insert("connections".to_string(), Value::from(connections));
        }
        extend_attributes(&mut map, &self.attributes);
        Value::Object(map)
    }
}

fn extend_attributes(map: &mut Map<String, Value>, attributes: &IndexMap<String, Value>) {
    for (key, value) in attributes {
        map.insert(key.clone(), value.clone());
    }
}

/// One side of a link: a device and one of its ports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortRef {
    pub device: String,
    #[serde(deserialize_with = "port_string")]
    pub port: String,
}

impl PortRef {
    pub fn new(device: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            port: port.into(),
        }
    }
}

impl fmt::Display for PortRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.device, self.port)
    }
}

/// Ports appear as either names ("eth1/1") or bare numbers in topology files.
pub(crate) fn port_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PortValue {
        Text(String),
        Number(i64),
    }

    Ok(match PortValue::deserialize(deserializer)? {
        PortValue::Text(text) => text,
        PortValue::Number(number) => number.to_string(),
    })
}

/// A link between two device ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub from: PortRef,
    pub to: PortRef,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    #[serde(flatten)]
    pub attributes: IndexMap<String, Value>,
}

impl Connection {
    pub fn new(from: PortRef, to: PortRef, link_type: impl Into<String>) -> Self {
        Self {
            from,
            to,
            link_type: Some(link_type.into()),
            attributes: IndexMap::new(),
        }
    }

    /// Identity of the link: `"{fromDevice}:{fromPort}->{toDevice}:{toPort}"`.
    #[must_use]
    pub fn key(&self) -> String {
        connection_key(&self.from.device, &self.from.port, &self.to.device, &self.to.port)
    }

    pub(crate) fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("from".to_string(), port_value(&self.from));
        map.insert("to".to_string(), port_value(&self.to));
        if let Some(link_type) = &self.link_type {
            map.insert("type".to_string(), Value::String(link_type.clone()));
        }
        extend_attributes(&mut map, &self.attributes);
        Value::Object(map)
    }
}

fn port_value(port: &PortRef) -> Value {
    let mut map = Map::new();
    map.insert("device".to_string(), Value::String(port.device.clone()));
    map.insert("port".to_string(), Value::String(port.port.clone()));
    Value::Object(map)
}

/// Build the identity string of a link from its four endpoint parts.
#[must_use]
pub fn connection_key(from_device: &str, from_port: &str, to_device: &str, to_port: &str) -> String {
    format!("{from_device}:{from_port}->{to_device}:{to_port}")
}

// ============================================================================
// Device records
// ============================================================================

/// Shared identity capability of every device record.
pub trait Identified {
    /// Unique id within the record's category
    fn id(&self) -> &str;

    /// Short human label (switch model, server type) used in descriptions
    fn label(&self) -> Option<&str> {
        None
    }
}

impl Identified for Switch {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> Option<&str> {
        self.model.as_deref()
    }
}

impl Identified for Server {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> Option<&str> {
        self.kind.as_deref()
    }
}

/// A borrowed view over any device of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceRecord<'a> {
    Spine(&'a Switch),
    Leaf(&'a Switch),
    Server(&'a Server),
}

/// Category of a device record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    Spine,
    Leaf,
    Server,
}

impl DeviceKind {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Spine => "spine",
            Self::Leaf => "leaf",
            Self::Server => "server",
        }
    }
}

impl DeviceRecord<'_> {
    #[must_use]
    pub const fn kind(&self) -> DeviceKind {
        match self {
            Self::Spine(_) => DeviceKind::Spine,
            Self::Leaf(_) => DeviceKind::Leaf,
            Self::Server(_) => DeviceKind::Server,
        }
    }

    /// Structural form of the record used for attribute comparison.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Spine(switch) | Self::Leaf(switch) => switch.to_value(),
            Self::Server(server) => server.to_value(),
        }
    }
}

impl Identified for DeviceRecord<'_> {
    fn id(&self) -> &str {
        match self {
            Self::Spine(switch) | Self::Leaf(switch) => switch.id(),
            Self::Server(server) => server.id(),
        }
    }

    fn label(&self) -> Option<&str> {
        match self {
            Self::Spine(switch) | Self::Leaf(switch) => switch.label(),
            Self::Server(server) => server.label(),
        }
    }
}

// ============================================================================
// Snapshot helpers
// ============================================================================

/// A broken identity invariant found by [`TopologySnapshot::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotViolation {
    DuplicateDevice { kind: DeviceKind, id: String },
    DuplicateConnection(String),
}

impl fmt::Display for SnapshotViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateDevice { kind, id } => write!(f, "duplicate {} id '{id}'", kind.name()),
            Self::DuplicateConnection(key) => write!(f, "duplicate connection '{key}'"),
        }
    }
}

impl TopologySnapshot {
    /// Create an empty snapshot for the named topology.
    #[must_use]
    pub fn new(topology_name: impl Into<String>) -> Self {
        Self {
            metadata: SnapshotMetadata {
                generated_at: Some(Utc::now()),
                topology_name: Some(topology_name.into()),
                device_count: Some(0),
            },
            ..Self::default()
        }
    }

    pub fn add_spine(&mut self, switch: Switch) {
        self.devices.spines.push(switch);
        self.refresh_device_count();
    }

    pub fn add_leaf(&mut self, switch: Switch) {
        self.devices.leaves.push(switch);
        self.refresh_device_count();
    }

    pub fn add_server(&mut self, server: Server) {
        self.devices.servers.push(server);
        self.refresh_device_count();
    }

    pub fn add_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    fn refresh_device_count(&mut self) {
        self.metadata.device_count = Some(self.device_count());
    }

    /// Total number of devices across all three collections
    #[must_use]
    pub fn device_count(&self) -> usize {
        self.devices.spines.len() + self.devices.leaves.len() + self.devices.servers.len()
    }

    /// Spine records followed by leaf records, in document order.
    #[must_use]
    pub fn switch_records(&self) -> Vec<DeviceRecord<'_>> {
        self.devices
            .spines
            .iter()
            .map(DeviceRecord::Spine)
            .chain(self.devices.leaves.iter().map(DeviceRecord::Leaf))
            .collect()
    }

    #[must_use]
    pub fn server_records(&self) -> Vec<DeviceRecord<'_>> {
        self.devices.servers.iter().map(DeviceRecord::Server).collect()
    }

    /// Check the identity invariants: device ids unique per category and
    /// connection 4-tuples unique.
    #[must_use]
    pub fn validate(&self) -> Vec<SnapshotViolation> {
        let mut violations = Vec::new();

        for records in [
            self.devices.spines.iter().map(DeviceRecord::Spine).collect::<Vec<_>>(),
            self.devices.leaves.iter().map(DeviceRecord::Leaf).collect(),
            self.server_records(),
        ] {
            let mut seen = HashSet::new();
            for record in &records {
                if !seen.insert(record.id()) {
                    violations.push(SnapshotViolation::DuplicateDevice {
                        kind: record.kind(),
                        id: record.id().to_string(),
                    });
                }
            }
        }

        let mut seen = HashSet::new();
        for connection in &self.connections {
            let key = connection.key();
            if seen.contains(&key) {
                violations.push(SnapshotViolation::DuplicateConnection(key));
            } else {
                seen.insert(key);
            }
        }

        violations
    }

    /// Hash of the device and connection content, ignoring metadata.
    ///
    /// Returns 0 when the content cannot be serialized; callers treat 0 as
    /// "unknown" and never as a match.
    #[must_use]
    pub fn content_fingerprint(&self) -> u64 {
        let mut hasher_input = Vec::new();
        match (
            serde_json::to_vec(&self.devices),
            serde_json::to_vec(&self.connections),
        ) {
            (Ok(devices), Ok(connections)) => {
                hasher_input.extend(devices);
                hasher_input.extend(connections);
                xxh3_64(&hasher_input)
            }
            _ => 0,
        }
    }

    /// Approximate size of the snapshot as compact JSON, in bytes.
    pub fn serialized_size(&self) -> Result<usize, serde_json::Error> {
        serde_json::to_vec(self).map(|bytes| bytes.len())
    }
}
