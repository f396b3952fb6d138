//! Transactional Execution Tests
//!
//! One transaction per group, in order, stopping at the first failure.

use crate::*;
use kvbatch::{batch_get, batch_put, build_put_ops, execute_batches};

// =============================================================================
// SUCCESS PATH
// =============================================================================

#[test]
fn test_every_group_committed_once() {
    let store = FlakyStore::new();
    let input = kvs(300);

    batch_put(&store, &input, &BatchConfig::default()).unwrap();

    assert_eq!(store.submitted(), vec![128, 128, 44]);
    assert_eq!(store.inner.len(), 300);
    assert_eq!(store.inner.revision(), 3);
}

#[test]
fn test_group_is_atomic_revision() {
    let store = MemoryStore::new();
    let input = kvs(130);
    batch_put(&store, &input, &BatchConfig::default()).unwrap();

    let entries = batch_get(&store, &latest_reads(&input), &BatchConfig::default()).unwrap();
    let revisions: Vec<Revision> = entries.iter().map(|e| e.as_ref().unwrap().mod_revision).collect();

    assert!(revisions[..128].iter().all(|r| *r == 1));
    assert!(revisions[128..].iter().all(|r| *r == 2));
}

#[test]
fn test_duplicate_keys_last_write_wins() {
    let store = MemoryStore::new();
    let input = vec![
        KeyValue::new("dup", "first"),
        KeyValue::new("other", "x"),
        KeyValue::new("dup", "second"),
    ];

    batch_put(&store, &input, &BatchConfig::default().with_max_txn_ops(2)).unwrap();

    let entry = store.get("dup", None).unwrap().unwrap();
    assert_eq!(entry.value, "second");
    assert_eq!(entry.version, 2);
}

// =============================================================================
// FAILURE PATH
// =============================================================================

#[test]
fn test_second_of_three_groups_fails() {
    let store = FlakyStore::new().fail_txn(1);
    let input = kvs(30);
    let groups = build_put_ops(&input, 10).unwrap();
    assert_eq!(groups.len(), 3);

    let err = execute_batches(&store, &groups).unwrap_err();

    // The second group's error, verbatim
    match &err {
        Error::Commit(msg) => assert_eq!(msg, "etcdserver: txn 1 aborted"),
        other => panic!("unexpected error: {:?}", other),
    }
    // First group observably committed
    for kv in &input[..10] {
        assert_eq!(store.get(&kv.key, None).unwrap().unwrap().value, kv.value);
    }
    // Nothing from the second or third
    for kv in &input[10..] {
        assert!(store.get(&kv.key, None).unwrap().is_none());
    }
    // Third group never submitted
    assert_eq!(store.submitted(), vec![10, 10]);
}

#[test]
fn test_first_group_failure_writes_nothing() {
    let store = FlakyStore::new().fail_txn(0);

    let err = batch_put(&store, &kvs(200), &BatchConfig::default()).unwrap_err();

    assert!(err.is_store_error());
    assert!(store.inner.is_empty());
    assert_eq!(store.submitted().len(), 1);
}

#[test]
fn test_cap_above_store_limit_rejected_by_store() {
    let store = MemoryStore::with_max_txn_ops(64);

    let err = batch_put(&store, &kvs(100), &BatchConfig::default()).unwrap_err();

    assert!(matches!(err, Error::TooManyOps { ops: 100, limit: 64 }));
    assert!(store.is_empty());
}
