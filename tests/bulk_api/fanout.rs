//! Concurrent Fan-out Tests
//!
//! The pool must finish every put before returning and report failures
//! instead of aborting.

use crate::*;
use kvbatch::concurrent_put;

#[test]
fn test_everything_visible_on_return() {
    let store = MemoryStore::new();
    let input = kvs(1000);

    concurrent_put(&store, &input, &BatchConfig::default()).unwrap();

    let entries = kvbatch::batch_get(&store, &latest_reads(&input), &BatchConfig::default()).unwrap();
    assert!(entries.iter().zip(&input).all(|(e, kv)| {
        e.as_ref().map(|e| e.value.as_str()) == Some(kv.value.as_str())
    }));
}

#[test]
fn test_single_worker() {
    let store = MemoryStore::new();
    let config = BatchConfig::default().with_fanout_workers(1);

    concurrent_put(&store, &kvs(25), &config).unwrap();

    assert_eq!(store.len(), 25);
    assert_eq!(store.revision(), 25);
}

#[test]
fn test_failed_keys_reported_rest_written() {
    let store = FlakyStore::new().fail_key("k00003").fail_key("k00011");
    let input = kvs(20);

    let err = concurrent_put(&store, &input, &BatchConfig::default()).unwrap_err();

    match err {
        Error::Aggregate(agg) => {
            assert_eq!(agg.total(), 20);
            assert_eq!(agg.failed_keys().collect::<Vec<_>>(), vec!["k00003", "k00011"]);
            assert_eq!(agg.failures()[0].index, 3);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(store.inner.len(), 18);
    assert!(store.get("k00003", None).unwrap().is_none());
}
