//! Property-based tests for snapshot comparison.
//!
//! Comparison results must not depend on the order items appear in, and a
//! snapshot compared with itself must report nothing. Spine and leaf ids are
//! drawn from overlapping alphabets so some snapshots reuse an id across
//! both roles.

use fabric_drift::diff::{
    build_summary_lines, compare_snapshots, deep_equal, field_differences, ChangeKind, NO_DRIFT_LINE,
};
use fabric_drift::{Change, Connection, PortRef, Server, Switch, TopologySnapshot};
use proptest::prelude::*;
use proptest::collection::{btree_map, btree_set};
use proptest::sample::select;

fn snapshot_strategy() -> impl Strategy<Value = TopologySnapshot> {
    (
        btree_map(
            "(spine|leaf)-[0-9a-c]{1,2}",
            (select(vec!["DS4000", "DS5000"]), 32u32..128),
            0..4,
        ),
        btree_map(
            "leaf-[0-9a-c]{1,2}",
            (select(vec!["DS2000", "DS3000"]), 16u32..64),
            0..8,
        ),
        btree_map(
            "srv-[a-z0-9]{1,4}",
            (select(vec!["compute", "storage"]), 1u32..4),
            0..8,
        ),
        btree_set((0u8..4, 0u8..8, 0u8..4), 0..10),
    )
        .prop_map(|(spines, leaves, servers, links)| {
            let mut snapshot = TopologySnapshot::new("prop");
            for (id, (model, ports)) in spines {
                snapshot.add_spine(Switch::new(id, model, ports));
            }
            for (id, (model, ports)) in leaves {
                snapshot.add_leaf(Switch::new(id, model, ports));
            }
            for (id, (kind, connections)) in servers {
                snapshot.add_server(Server::new(id, kind, connections));
            }
            for (leaf, port, server) in links {
                snapshot.add_connection(Connection::new(
                    PortRef::new(format!("leaf-{leaf}"), port.to_string()),
                    PortRef::new(format!("srv-{server}"), "eth0"),
                    "unbundled",
                ));
            }
            snapshot
        })
}

/// `snapshot` with every collection independently reordered.
fn shuffled(snapshot: TopologySnapshot) -> impl Strategy<Value = TopologySnapshot> {
    (
        Just(snapshot.devices.spines.clone()).prop_shuffle(),
        Just(snapshot.devices.leaves.clone()).prop_shuffle(),
        Just(snapshot.devices.servers.clone()).prop_shuffle(),
        Just(snapshot.connections.clone()).prop_shuffle(),
    )
        .prop_map(move |(spines, leaves, servers, connections)| {
            let mut copy = snapshot.clone();
            copy.devices.spines = spines;
            copy.devices.leaves = leaves;
            copy.devices.servers = servers;
            copy.connections = connections;
            copy
        })
}

fn sorted_descriptions(changes: &[Change]) -> Vec<String> {
    let mut descriptions: Vec<String> = changes.iter().map(|c| c.description().to_string()).collect();
    descriptions.sort();
    descriptions
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn self_comparison_is_empty(snapshot in snapshot_strategy()) {
        let changes = compare_snapshots(&snapshot, &snapshot);
        prop_assert!(changes.is_empty());
        prop_assert_eq!(build_summary_lines(&changes), vec![NO_DRIFT_LINE.to_string()]);
    }

    #[test]
    fn reordering_is_not_drift(
        (original, reordered) in snapshot_strategy()
            .prop_flat_map(|s| (Just(s.clone()), shuffled(s)))
    ) {
        prop_assert!(compare_snapshots(&reordered, &original).is_empty());
    }

    #[test]
    fn switch_role_is_not_identity(snapshot in snapshot_strategy()) {
        let mut merged = snapshot.clone();
        let leaves = std::mem::take(&mut merged.devices.leaves);
        merged.devices.spines.extend(leaves);

        let changes = compare_snapshots(&merged, &snapshot);
        prop_assert!(changes.is_empty(), "unexpected changes: {:?}", changes);
    }

    #[test]
    fn changes_are_order_independent(
        (baseline, current, reordered) in (snapshot_strategy(), snapshot_strategy())
            .prop_flat_map(|(b, c)| (Just(b), Just(c.clone()), shuffled(c)))
    ) {
        let direct = compare_snapshots(&current, &baseline);
        let permuted = compare_snapshots(&reordered, &baseline);
        prop_assert_eq!(sorted_descriptions(&direct), sorted_descriptions(&permuted));
    }

    #[test]
    fn swapping_sides_swaps_added_and_removed(
        baseline in snapshot_strategy(),
        current in snapshot_strategy(),
    ) {
        let forward = compare_snapshots(&current, &baseline);
        let backward = compare_snapshots(&baseline, &current);
        let count = |changes: &[Change], kind| changes.iter().filter(|c| c.kind() == kind).count();

        prop_assert_eq!(count(&forward, ChangeKind::Added), count(&backward, ChangeKind::Removed));
        prop_assert_eq!(count(&forward, ChangeKind::Removed), count(&backward, ChangeKind::Added));
        prop_assert_eq!(count(&forward, ChangeKind::Modified), count(&backward, ChangeKind::Modified));
    }

    #[test]
    fn deep_equal_is_reflexive(snapshot in snapshot_strategy()) {
        let value = serde_json::to_value(&snapshot).unwrap();
        prop_assert!(deep_equal(&value, &value));
        prop_assert!(field_differences(&value, &value).is_empty());
    }
}

#[test]
fn shared_spine_leaf_id_resolves_to_leaf() {
    let mut baseline = TopologySnapshot::new("collision");
    baseline.add_spine(Switch::new("sw-1", "DS4000", 64));
    baseline.add_spine(Switch::new("spine-2", "DS4000", 64));
    baseline.add_leaf(Switch::new("sw-1", "DS2000", 48));

    let mut current = baseline.clone();
    current.devices.spines.reverse();
    assert!(compare_snapshots(&current, &baseline).is_empty());

    current.devices.leaves[0] = Switch::new("sw-1", "DS3000", 48);
    let changes = compare_snapshots(&current, &baseline);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].kind(), ChangeKind::Modified);
    assert_eq!(changes[0].item_id(), "sw-1");
}
