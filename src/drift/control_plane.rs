//! Reconciliation of desired state against a live control plane.

use super::health::{assess_health, ControlPlaneHealth};
use super::outcome::{DriftError, DriftOutcome};
use super::result::{ControlPlaneDriftResult, ControlPlaneFinding, ResourceType};
use super::severity::{filter_by_severity, Severity};
use crate::config::ControlPlaneConfig;
use crate::model::{
    CanonicalId, Connection, ConnectionSpec, ConnectionStatus, ControlPlaneResponse, IdentityIndex,
    Resource, Server, ServerSpec, ServerStatus, Switch, SwitchSpec, SwitchStatus, TopologySnapshot,
};
use crate::store::{BaselineStore, ControlPlaneClient};
use chrono::Utc;
use serde_json::{json, Value};
use std::borrow::Cow;
use std::time::Instant;

/// Error counts above this are high severity.
const HIGH_ERROR_COUNT: u64 = 10;

/// Compares a desired-state snapshot with what a control plane reports.
///
/// Identities are canonicalized once when each side is indexed, so
/// `Leaf-1` in the snapshot matches `leaf-1` on the control plane.
/// Failures to obtain either side are reported as high-severity findings
/// unless the configured failure policy fails open.
pub struct ControlPlaneDriftDetector<S> {
    config: ControlPlaneConfig,
    store: S,
}

impl<S: BaselineStore> ControlPlaneDriftDetector<S> {
    /// `store` supplies the desired state when none is passed in.
    pub fn new(config: ControlPlaneConfig, store: S) -> Self {
        Self { config, store }
    }

    #[must_use]
    pub fn config(&self) -> &ControlPlaneConfig {
        &self.config
    }

    /// Reconcile `response` against `desired`, or against the baseline
    /// stored under the configured snapshot id.
    pub fn detect_drift(
        &self,
        response: &ControlPlaneResponse,
        desired: Option<&TopologySnapshot>,
    ) -> ControlPlaneDriftResult {
        let desired = self.resolve_desired(desired);

        let start = Instant::now();
        let outcome = desired.map(|desired| self.reconcile(response, &desired));
        let items = self.config.failure_policy().resolve(outcome);
        let control_plane_health = assess_health(response);
        let comparison_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        let result = ControlPlaneDriftResult {
            enabled: true,
            has_drift: items.iter().any(|f| !f.informational),
            items,
            last_checked: Utc::now(),
            control_plane_health,
            comparison_time_ms,
        };
        if result.has_drift {
            tracing::info!(
                findings = result.drift_items().count(),
                health = %result.control_plane_health,
                "control plane drift detected"
            );
        }
        result
    }

    /// Fetch observed state from `client`, then reconcile.
    ///
    /// A failed fetch is reported as a `control-plane-unavailable` finding.
    pub fn detect_drift_from_client<C: ControlPlaneClient + ?Sized>(
        &self,
        client: &C,
        desired: Option<&TopologySnapshot>,
    ) -> ControlPlaneDriftResult {
        match client.fetch_status() {
            Ok(response) => self.detect_drift(&response, desired),
            Err(e) => {
                let outcome: DriftOutcome<Vec<ControlPlaneFinding>> =
                    Err(DriftError::ControlPlaneUnavailable(e.to_string()));
                let items = self.config.failure_policy().resolve(outcome);
                ControlPlaneDriftResult {
                    enabled: true,
                    has_drift: !items.is_empty(),
                    items,
                    last_checked: Utc::now(),
                    control_plane_health: ControlPlaneHealth::Unavailable,
                    comparison_time_ms: 0.0,
                }
            }
        }
    }

    fn resolve_desired<'a>(
        &self,
        desired: Option<&'a TopologySnapshot>,
    ) -> DriftOutcome<Cow<'a, TopologySnapshot>> {
        if let Some(desired) = desired {
            return Ok(Cow::Borrowed(desired));
        }

        let snapshot_id = self
            .config
            .snapshot_id
            .as_deref()
            .ok_or_else(|| DriftError::NoBaseline("no snapshot id configured".to_string()))?;
        let exists = self
            .store
            .exists(snapshot_id)
            .map_err(|e| DriftError::BaselineLoadFailure(e.to_string()))?;
        if !exists {
            return Err(DriftError::NoBaseline(snapshot_id.to_string()));
        }
        let (snapshot, _) = self
            .store
            .load(snapshot_id)
            .into_result()
            .map_err(DriftError::BaselineLoadFailure)?;
        Ok(Cow::Owned(snapshot))
    }

    /// Compare every category, then apply the severity threshold.
    ///
    /// In-sync findings are informational and kept regardless of threshold,
    /// after the drift findings.
    fn reconcile(
        &self,
        response: &ControlPlaneResponse,
        desired: &TopologySnapshot,
    ) -> Vec<ControlPlaneFinding> {
        let mut findings = Findings::new(self.config.include_healthy_resources);
        compare_switches(desired, response, &mut findings);
        compare_servers(desired, response, &mut findings);
        compare_connections(desired, response, &mut findings);

        tracing::debug!(
            drift = findings.drift.len(),
            in_sync = findings.in_sync.len(),
            threshold = %self.config.threshold(),
            "reconciled desired and observed state"
        );

        let mut items = filter_by_severity(findings.drift, self.config.threshold());
        items.extend(findings.in_sync);
        items
    }
}

/// Findings collected during one reconciliation.
struct Findings {
    drift: Vec<ControlPlaneFinding>,
    in_sync: Vec<ControlPlaneFinding>,
    include_healthy: bool,
}

impl Findings {
    fn new(include_healthy: bool) -> Self {
        Self {
            drift: Vec::new(),
            in_sync: Vec::new(),
            include_healthy,
        }
    }

    fn push(&mut self, finding: ControlPlaneFinding) {
        self.drift.push(finding);
    }

    /// Run `check` for a matched pair and record an in-sync item if it
    /// found nothing.
    fn matched(&mut self, resource_type: ResourceType, id: &CanonicalId, check: impl FnOnce(&mut Self)) {
        let before = self.drift.len();
        check(self);
        if self.include_healthy && self.drift.len() == before {
            self.in_sync.push(
                ControlPlaneFinding::new(
                    format!("in-sync-{}-{id}", resource_type.as_str()),
                    format!("{}/{id}", resource_type.collection()),
                    resource_type,
                    Severity::Low,
                    format!("{} {id} matches desired state", resource_type.as_str()),
                )
                .informational(),
            );
        }
    }

    fn missing(&mut self, resource_type: ResourceType, id: &CanonicalId, desired: Value, severity: Severity) {
        self.push(
            ControlPlaneFinding::new(
                format!("missing-{}-{id}", resource_type.as_str()),
                format!("{}/{id}", resource_type.collection()),
                resource_type,
                severity,
                format!("{} {id} is missing from the control plane", resource_type.as_str()),
            )
            .with_values(desired, Value::Null),
        );
    }

    fn unexpected(
        &mut self,
        resource_type: ResourceType,
        id: &CanonicalId,
        observed: Value,
        severity: Severity,
    ) {
        self.push(
            ControlPlaneFinding::new(
                format!("unexpected-{}-{id}", resource_type.as_str()),
                format!("{}/{id}", resource_type.collection()),
                resource_type,
                severity,
                format!(
                    "{} {id} is reported by the control plane but not in the desired state",
                    resource_type.as_str()
                ),
            )
            .with_values(Value::Null, observed),
        );
    }
}

/// Finding payload for `item`; `null` when it cannot be serialized.
fn as_value<T: serde::Serialize>(item: &T) -> Value {
    serde_json::to_value(item).unwrap_or_else(|e| {
        tracing::warn!("finding value could not be serialized: {e}");
        Value::Null
    })
}

/// Severity of an observed state that differs from `ok`: `high` when it
/// equals `critical`, otherwise `medium`. `None` when the state is `ok`.
fn state_severity(observed: &str, ok: &str, critical: &str) -> Option<Severity> {
    if observed.eq_ignore_ascii_case(ok) {
        None
    } else if observed.eq_ignore_ascii_case(critical) {
        Some(Severity::High)
    } else {
        Some(Severity::Medium)
    }
}

// ============================================================================
// Switches
// ============================================================================

fn compare_switches(desired: &TopologySnapshot, response: &ControlPlaneResponse, findings: &mut Findings) {
    let wanted: IdentityIndex<'_, Switch> = IdentityIndex::build(
        desired.devices.spines.iter().chain(&desired.devices.leaves),
        |s| CanonicalId::new(&s.id),
    );
    let observed = IdentityIndex::build(&response.items.switches, |r| CanonicalId::new(r.name()));

    for (id, want) in wanted.iter() {
        match observed.get(id) {
            Some(got) => findings.matched(ResourceType::Switch, id, |f| check_switch(id, want, got, f)),
            None => findings.missing(ResourceType::Switch, id, as_value(want), Severity::High),
        }
    }
    for (id, got) in observed.iter() {
        if !wanted.contains(id) {
            findings.unexpected(ResourceType::Switch, id, as_value(got), Severity::Medium);
        }
    }
}

fn check_switch(
    id: &CanonicalId,
    want: &Switch,
    got: &Resource<SwitchSpec, SwitchStatus>,
    findings: &mut Findings,
) {
    if let Some(model) = &want.model
        && got.spec.model.as_deref() != Some(model.as_str())
    {
        findings.push(
            ControlPlaneFinding::new(
                format!("switch-model-{id}"),
                format!("switches/{id}/model"),
                ResourceType::Switch,
                Severity::High,
                format!(
                    "switch {id} model mismatch: desired {model}, observed {}",
                    got.spec.model.as_deref().unwrap_or("none")
                ),
            )
            .with_values(model.as_str(), json!(got.spec.model)),
        );
    }

    if let Some(ports) = want.ports
        && got.spec.ports != Some(ports)
    {
        findings.push(
            ControlPlaneFinding::new(
                format!("switch-ports-{id}"),
                format!("switches/{id}/ports"),
                ResourceType::Switch,
                Severity::Medium,
                format!(
                    "switch {id} port count mismatch: desired {ports}, observed {}",
                    got.spec
                        .ports
                        .map_or_else(|| "none".to_string(), |p| p.to_string())
                ),
            )
            .with_values(ports, json!(got.spec.ports)),
        );
    }

    if let Some(health) = got.status.health.as_deref()
        && let Some(severity) = state_severity(health, "healthy", "failed")
    {
        findings.push(
            ControlPlaneFinding::new(
                format!("switch-health-{id}"),
                format!("switches/{id}/health"),
                ResourceType::Switch,
                severity,
                format!("switch {id} health is {health}"),
            )
            .with_values("healthy", health),
        );
    }
}

// ============================================================================
// Servers
// ============================================================================

fn compare_servers(desired: &TopologySnapshot, response: &ControlPlaneResponse, findings: &mut Findings) {
    let wanted: IdentityIndex<'_, Server> =
        IdentityIndex::build(&desired.devices.servers, |s| CanonicalId::new(&s.id));
    let observed = IdentityIndex::build(&response.items.servers, |r| CanonicalId::new(r.name()));

    for (id, want) in wanted.iter() {
        match observed.get(id) {
            Some(got) => findings.matched(ResourceType::Server, id, |f| check_server(id, got, f)),
            None => findings.missing(ResourceType::Server, id, as_value(want), Severity::High),
        }
    }
    for (id, got) in observed.iter() {
        if !wanted.contains(id) {
            findings.unexpected(ResourceType::Server, id, as_value(got), Severity::Low);
        }
    }
}

fn check_server(id: &CanonicalId, got: &Resource<ServerSpec, ServerStatus>, findings: &mut Findings) {
    if let Some(connectivity) = got.status.connectivity.as_deref()
        && let Some(severity) = state_severity(connectivity, "connected", "disconnected")
    {
        findings.push(
            ControlPlaneFinding::new(
                format!("server-connectivity-{id}"),
                format!("servers/{id}/connectivity"),
                ResourceType::Server,
                severity,
                format!("server {id} connectivity is {connectivity}"),
            )
            .with_values("connected", connectivity),
        );
    }
}

// ============================================================================
// Connections
// ============================================================================

fn desired_connection_id(c: &Connection) -> CanonicalId {
    CanonicalId::connection(&c.from.device, &c.from.port, &c.to.device, &c.to.port)
}

fn observed_connection_id(r: &Resource<ConnectionSpec, ConnectionStatus>) -> CanonicalId {
    let spec = &r.spec;
    CanonicalId::connection(
        &spec.source.device,
        &spec.source.port,
        &spec.destination.device,
        &spec.destination.port,
    )
}

fn compare_connections(
    desired: &TopologySnapshot,
    response: &ControlPlaneResponse,
    findings: &mut Findings,
) {
    let wanted = IdentityIndex::build(&desired.connections, desired_connection_id);
    let observed = IdentityIndex::build(&response.items.connections, observed_connection_id);

    for (id, want) in wanted.iter() {
        match observed.get(id) {
            Some(got) => findings.matched(ResourceType::Connection, id, |f| check_connection(id, got, f)),
            None => findings.missing(ResourceType::Connection, id, as_value(want), Severity::High),
        }
    }
    for (id, got) in observed.iter() {
        if !wanted.contains(id) {
            findings.unexpected(ResourceType::Connection, id, as_value(got), Severity::Medium);
        }
    }
}

fn check_connection(
    id: &CanonicalId,
    got: &Resource<ConnectionSpec, ConnectionStatus>,
    findings: &mut Findings,
) {
    if let Some(link_status) = got.status.link_status.as_deref()
        && let Some(severity) = state_severity(link_status, "up", "down")
    {
        findings.push(
            ControlPlaneFinding::new(
                format!("connection-status-{id}"),
                format!("connections/{id}/linkStatus"),
                ResourceType::Connection,
                severity,
                format!("connection {id} link status is {link_status}"),
            )
            .with_values("up", link_status),
        );
    }

    let errors = got.status.error_count;
    if errors > 0 {
        let severity = if errors > HIGH_ERROR_COUNT {
            Severity::High
        } else {
            Severity::Low
        };
        findings.push(
            ControlPlaneFinding::new(
                format!("connection-errors-{id}"),
                format!("connections/{id}/errorCount"),
                ResourceType::Connection,
                severity,
                format!("connection {id} reports {errors} errors"),
            )
            .with_values(0, errors),
        );
    }
}
