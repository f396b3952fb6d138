//! Bulk API Test Suite
//!
//! End-to-end checks of the public kvbatch surface against `MemoryStore`,
//! plus fault-injecting store wrappers for the failure paths.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test bulk_api
//!
//! # Partitioning tests only
//! cargo test --test bulk_api partitioning::
//! ```

use std::collections::HashSet;

use kvbatch::prelude::*;
use kvbatch::{Error, TxnResponse};
use parking_lot::Mutex;

// Test modules
pub mod client;
pub mod fanout;
pub mod partitioning;
pub mod transactions;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// `n` distinct pairs `k00000 -> v0`, `k00001 -> v1`, ...
pub fn kvs(n: usize) -> Vec<KeyValue> {
    (0..n)
        .map(|i| KeyValue::new(format!("k{:05}", i), format!("v{}", i)))
        .collect()
}

/// Latest-value reads for every key in `kvs`
pub fn latest_reads(kvs: &[KeyValue]) -> Vec<KeyRevision> {
    kvs.iter().map(|kv| KeyRevision::latest(kv.key.clone())).collect()
}

/// Store wrapper that fails chosen transactions and chosen keys
///
/// Every submitted transaction is recorded (op count), including the ones
/// that fail.
pub struct FlakyStore {
    pub inner: MemoryStore,
    failing_txns: HashSet<usize>,
    failing_keys: HashSet<String>,
    pub submitted: Mutex<Vec<usize>>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            failing_txns: HashSet::new(),
            failing_keys: HashSet::new(),
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Fail the transaction submitted at position `index` (0-based)
    pub fn fail_txn(mut self, index: usize) -> Self {
        self.failing_txns.insert(index);
        self
    }

    /// Fail plain puts of `key`
    pub fn fail_key(mut self, key: &str) -> Self {
        self.failing_keys.insert(key.to_string());
        self
    }

    pub fn submitted(&self) -> Vec<usize> {
        self.submitted.lock().clone()
    }
}

impl KvClient for FlakyStore {
    fn put(&self, key: &str, value: &str) -> kvbatch::Result<Revision> {
        if self.failing_keys.contains(key) {
            return Err(Error::Transport(format!("connection reset writing {}", key)));
        }
        self.inner.put(key, value)
    }

    fn get(&self, key: &str, revision: Option<Revision>) -> kvbatch::Result<Option<KvEntry>> {
        self.inner.get(key, revision)
    }

    fn txn(&self, ops: &[Op]) -> kvbatch::Result<TxnResponse> {
        let index = {
            let mut submitted = self.submitted.lock();
            submitted.push(ops.len());
            submitted.len() - 1
        };
        if self.failing_txns.contains(&index) {
            return Err(Error::Commit(format!("etcdserver: txn {} aborted", index)));
        }
        self.inner.txn(ops)
    }
}
