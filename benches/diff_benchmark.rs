//! Performance benchmarks for snapshot comparison.
//!
//! Run with: cargo bench --bench diff_benchmark

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fabric_drift::config::ControlPlaneConfig;
use fabric_drift::diff::compare_snapshots;
use fabric_drift::drift::{ControlPlaneDriftDetector, DriftOptions, DriftReportBuilder};
use fabric_drift::model::{
    ConnectionSpec, ConnectionStatus, ControlPlaneResponse, PortBinding, Resource, ServerSpec,
    ServerStatus, SwitchSpec, SwitchStatus,
};
use fabric_drift::store::MemoryBaselineStore;
use fabric_drift::{Connection, PortRef, Server, Switch, TopologySnapshot};
use std::hint::black_box;

/// Generate a spine-leaf fabric with `leaves` leaves and 8 servers per leaf.
fn generate_fabric(leaves: usize) -> TopologySnapshot {
    let mut snapshot = TopologySnapshot::new("bench");
    for s in 0..4 {
        snapshot.add_spine(Switch::new(format!("spine-{s}"), "DS4000", 64));
    }
    for l in 0..leaves {
        snapshot.add_leaf(Switch::new(format!("leaf-{l}"), "DS3000", 48));
        for s in 0..4 {
            snapshot.add_connection(Connection::new(
                PortRef::new(format!("spine-{s}"), l.to_string()),
                PortRef::new(format!("leaf-{l}"), (49 + s).to_string()),
                "fabric",
            ));
        }
        for p in 0..8 {
            let server = format!("srv-{l}-{p}");
            snapshot.add_server(Server::new(server.clone(), "compute", 1));
            snapshot.add_connection(Connection::new(
                PortRef::new(format!("leaf-{l}"), p.to_string()),
                PortRef::new(server, "eth0"),
                "unbundled",
            ));
        }
    }
    snapshot
}

/// A copy of `snapshot` with roughly `change_percent` of its leaves altered.
fn with_changes(snapshot: &TopologySnapshot, change_percent: f64) -> TopologySnapshot {
    let mut changed = snapshot.clone();
    let count = (changed.devices.leaves.len() as f64 * change_percent / 100.0) as usize;
    for leaf in changed.devices.leaves.iter_mut().take(count) {
        leaf.ports = Some(64);
    }
    changed.devices.servers.truncate(changed.devices.servers.len() - count);
    changed
}

/// Observed state matching `snapshot` exactly.
fn observed_state(snapshot: &TopologySnapshot) -> ControlPlaneResponse {
    let mut response = ControlPlaneResponse::default();
    for switch in snapshot.devices.spines.iter().chain(&snapshot.devices.leaves) {
        response.items.switches.push(Resource::new(
            switch.id.clone(),
            SwitchSpec {
                model: switch.model.clone(),
                ports: switch.ports,
            },
            SwitchStatus {
                health: Some("healthy".to_string()),
                conditions: Vec::new(),
            },
        ));
    }
    for server in &snapshot.devices.servers {
        response.items.servers.push(Resource::new(
            server.id.clone(),
            ServerSpec {
                kind: server.kind.clone(),
            },
            ServerStatus {
                connectivity: Some("connected".to_string()),
                conditions: Vec::new(),
            },
        ));
    }
    for connection in &snapshot.connections {
        response.items.connections.push(Resource::new(
            connection.key(),
            ConnectionSpec {
                source: PortBinding::new(&connection.from.device, &connection.from.port),
                destination: PortBinding::new(&connection.to.device, &connection.to.port),
                link_type: connection.link_type.clone(),
            },
            ConnectionStatus {
                link_status: Some("up".to_string()),
                error_count: 0,
                conditions: Vec::new(),
            },
        ));
    }
    response
}

fn bench_compare_identical(c: &mut Criterion) {
    let snapshot = generate_fabric(64);
    let copy = snapshot.clone();

    c.bench_function("compare_identical_64_leaves", |b| {
        b.iter(|| black_box(compare_snapshots(black_box(&copy), black_box(&snapshot))));
    });
}

fn bench_compare_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_scaling");

    for leaves in [16, 64, 128, 256] {
        let baseline = generate_fabric(leaves);
        let current = with_changes(&baseline, 10.0);

        group.bench_with_input(BenchmarkId::new("changed_10pct", leaves), &leaves, |b, _| {
            b.iter(|| black_box(compare_snapshots(black_box(&current), black_box(&baseline))));
        });
    }

    group.finish();
}

fn bench_drift_report(c: &mut Criterion) {
    let baseline = generate_fabric(128);
    let current = with_changes(&baseline, 10.0);
    let builder = DriftReportBuilder::new(MemoryBaselineStore::new());
    let options = DriftOptions::default();

    c.bench_function("generate_drift_report_128_leaves", |b| {
        b.iter(|| {
            black_box(builder.generate_drift_report(
                black_box(&current),
                black_box(&baseline),
                &options,
            ))
        });
    });
}

fn bench_control_plane(c: &mut Criterion) {
    let desired = generate_fabric(128);
    let response = observed_state(&with_changes(&desired, 10.0));
    let detector = ControlPlaneDriftDetector::new(ControlPlaneConfig::default(), MemoryBaselineStore::new());

    c.bench_function("control_plane_128_leaves", |b| {
        b.iter(|| black_box(detector.detect_drift(black_box(&response), Some(&desired))));
    });
}

criterion_group!(
    benches,
    bench_compare_identical,
    bench_compare_scaling,
    bench_drift_report,
    bench_control_plane
);
criterion_main!(benches);
