use embargo::{
    DeadlineBucket, PublishingTopology, SnapshotError, StreamRecord, TopologyConfig,
    TopologySnapshot,
};
use serde_json::{json, Value};

const T0: i64 = 1_700_000_000_000;

fn rfc3339(at_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(at_ms)
        .unwrap()
        .to_rfc3339()
}

fn private_until(title: &str, at_ms: i64) -> Value {
    json!({
        "title": title,
        "publishing": {"private": true, "until": rfc3339(at_ms)}
    })
}

fn seeded_topology() -> PublishingTopology {
    let mut topology = PublishingTopology::new(TopologyConfig::default()).unwrap();
    topology.apply(
        StreamRecord::new("A", private_until("a", T0 + 4_000)),
        T0,
    );
    topology.apply(
        StreamRecord::new("B", private_until("b", T0 + 4_000)),
        T0,
    );
    topology.apply(
        StreamRecord::new("C", json!({"title": "public", "publishing": {"private": false}})),
        T0,
    );
    topology
}

#[test]
fn snapshot_roundtrips_through_json() {
    let topology = seeded_topology();
    let snapshot = topology.snapshot();
    let payload = snapshot.to_json().unwrap();
    let recovered = TopologySnapshot::from_json(&payload).unwrap();
    assert_eq!(recovered, snapshot);
    assert_eq!(
        recovered.deadlines,
        vec![DeadlineBucket {
            at_ms: T0 + 4_000,
            keys: vec!["A".to_string(), "B".to_string()],
        }]
    );
    assert_eq!(recovered.lookup.len(), 3);
}

#[test]
fn restore_rebuilds_both_deadline_indexes() {
    let snapshot = seeded_topology().snapshot();
    let restored = PublishingTopology::restore(TopologyConfig::default(), &snapshot).unwrap();

    assert_eq!(restored.deadlines().deadline_for("A"), Some(T0 + 4_000));
    assert_eq!(restored.deadlines().deadline_for("B"), Some(T0 + 4_000));
    assert_eq!(restored.deadlines().deadline_for("C"), None);
    assert_eq!(
        restored.deadlines().bucket(T0 + 4_000),
        Some(["A".to_string(), "B".to_string()].as_slice())
    );
    assert_eq!(restored.lookup().len(), 3);
}

#[test]
fn first_scan_after_restore_catches_up_elapsed_deadlines() {
    let snapshot = seeded_topology().snapshot();
    let mut restored = PublishingTopology::restore(TopologyConfig::default(), &snapshot).unwrap();

    let outputs = restored.run_scan(T0 + 60_000);
    assert_eq!(
        outputs,
        vec![
            StreamRecord::new("A", private_until("a", T0 + 4_000)),
            StreamRecord::new("B", private_until("b", T0 + 4_000)),
        ]
    );
    assert!(restored.deadlines().is_empty());
}

#[test]
fn restore_rejects_a_key_in_two_buckets() {
    let snapshot = TopologySnapshot {
        lookup: Default::default(),
        deadlines: vec![
            DeadlineBucket {
                at_ms: 1_000,
                keys: vec!["A".to_string()],
            },
            DeadlineBucket {
                at_ms: 2_000,
                keys: vec!["A".to_string()],
            },
        ],
    };
    let error = PublishingTopology::restore(TopologyConfig::default(), &snapshot).unwrap_err();
    assert!(matches!(error, SnapshotError::DuplicateKey { key } if key == "A"));
}

#[test]
fn restore_rejects_empty_buckets() {
    let snapshot = TopologySnapshot {
        lookup: Default::default(),
        deadlines: vec![DeadlineBucket {
            at_ms: 7_000,
            keys: Vec::new(),
        }],
    };
    let error = PublishingTopology::restore(TopologyConfig::default(), &snapshot).unwrap_err();
    assert!(matches!(error, SnapshotError::EmptyBucket { at_ms: 7_000 }));
}

#[test]
fn snapshot_survives_a_file_roundtrip() {
    let topology = seeded_topology();
    let payload = topology.snapshot().to_json().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("topology-state.json");
    std::fs::write(&path, &payload).unwrap();

    let recovered = TopologySnapshot::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let restored = PublishingTopology::restore(TopologyConfig::default(), &recovered).unwrap();
    assert_eq!(restored.deadlines().deadline_for("A"), Some(T0 + 4_000));
    assert!(restored.lookup().contains("C"));
}
