//! BulkClient Facade Tests

use crate::*;

#[test]
fn test_in_memory_demo_data() {
    let bulk = BulkClient::in_memory();

    let summary = bulk.put_demo_data().unwrap();

    // 1000 keys at 128 per txn
    assert_eq!(summary.groups, 8);
    assert_eq!(summary.ops, kvbatch::DEMO_NUM);
    assert_eq!(bulk.client().len(), 1000);

    let entry = bulk
        .batch_get(&[KeyRevision::latest("foo/000999")])
        .unwrap()
        .remove(0)
        .unwrap();
    assert_eq!(entry.value, "value-999");
    assert_eq!(entry.mod_revision, 8);
}

#[test]
fn test_builder_validates() {
    let err = BulkClientBuilder::new()
        .max_txn_ops(0)
        .build(MemoryStore::new())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn test_builder_with_config_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_txn_ops = 10").unwrap();
    let config = BatchConfig::load(file.path()).unwrap();

    let bulk = BulkClientBuilder::new()
        .config(config)
        .build(FlakyStore::new())
        .unwrap();
    bulk.batch_put(&kvs(25)).unwrap();

    assert_eq!(bulk.client().submitted(), vec![10, 10, 5]);
}

#[test]
fn test_three_write_paths_agree() {
    let input = kvs(77);

    let batch = BulkClient::in_memory();
    batch.batch_put(&input).unwrap();
    let looped = BulkClient::in_memory();
    looped.loop_put(&input).unwrap();
    let fanned = BulkClient::in_memory();
    fanned.concurrent_put(&input).unwrap();

    let reads = latest_reads(&input);
    let values = |bulk: &BulkClient<MemoryStore>| -> Vec<Option<String>> {
        bulk.batch_get(&reads)
            .unwrap()
            .into_iter()
            .map(|e| e.map(|e| e.value))
            .collect()
    };

    let expected: Vec<Option<String>> = input.iter().map(|kv| Some(kv.value.clone())).collect();
    assert_eq!(values(&batch), expected);
    assert_eq!(values(&looped), expected);
    assert_eq!(values(&fanned), expected);

    // Only the batched path shares revisions across keys
    assert_eq!(batch.client().revision(), 1);
    assert_eq!(looped.client().revision(), 77);
}

#[test]
fn test_trait_object_client() {
    let client: Box<dyn KvClient> = Box::new(MemoryStore::new());
    let bulk = BulkClient::new(client);
    bulk.batch_put(&kvs(3)).unwrap();
    let found = bulk.batch_get(&[KeyRevision::latest("k00002")]).unwrap();
    assert!(found[0].is_some());
}

#[test]
fn test_shared_arc_client() {
    use std::sync::Arc;

    let store = Arc::new(MemoryStore::new());
    let bulk = BulkClient::new(Arc::clone(&store));
    let input = kvs(300);

    bulk.concurrent_put(&input).unwrap();
    bulk.batch_put(&input[..10]).unwrap();

    // Writes through the facade are visible through the other handle
    assert_eq!(store.len(), 300);
    assert_eq!(store.stats().puts, 310);
    let found = bulk.batch_get(&latest_reads(&input)).unwrap();
    assert!(found.iter().all(Option::is_some));
}
