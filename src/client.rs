//! Main entry point for kvbatch.
//!
//! This module provides [`BulkClient`], which binds a store client to a
//! [`BatchConfig`] and exposes every bulk operation as a method.

use crate::demo::{demo_data, DEMO_KEY, DEMO_NUM};
use crate::error::Result;
use kvbatch_batch::BatchSummary;
use kvbatch_core::{BatchConfig, KeyRevision, KeyValue, KvEntry};
use kvbatch_store::{KvClient, MemoryStore};

/// Bulk key-value helper over a store client.
///
/// # Example
///
/// ```
/// use kvbatch::prelude::*;
///
/// let bulk = BulkClient::in_memory();
///
/// let kvs: Vec<KeyValue> = (0..300)
///     .map(|i| KeyValue::new(format!("user/{}", i), "active"))
///     .collect();
///
/// // Three transactions of at most 128 puts
/// let summary = bulk.batch_put(&kvs)?;
/// assert_eq!(summary.groups, 3);
///
/// let found = bulk.batch_get(&[KeyRevision::latest("user/42")])?;
/// assert_eq!(found[0].as_ref().map(|e| e.value.as_str()), Some("active"));
/// # Ok::<(), kvbatch::Error>(())
/// ```
pub struct BulkClient<C> {
    client: C,
    config: BatchConfig,
}

impl<C: KvClient> BulkClient<C> {
    /// Wrap `client` with the default configuration.
    pub fn new(client: C) -> Self {
        Self {
            client,
            config: BatchConfig::default(),
        }
    }

    /// The wrapped store client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Active configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Write `kvs` one plain put at a time, stopping at the first error.
    pub fn loop_put(&self, kvs: &[KeyValue]) -> Result<()> {
        kvbatch_batch::loop_put(&self.client, kvs)
    }

    /// Write `kvs` in transactions of at most `max_txn_ops` puts.
    ///
    /// Transactions run in order. The first failed commit aborts the rest and
    /// is returned; earlier transactions stay committed.
    pub fn batch_put(&self, kvs: &[KeyValue]) -> Result<BatchSummary> {
        kvbatch_batch::batch_put(&self.client, kvs, &self.config)
    }

    /// Read `key_revs` in transactions of at most `max_txn_ops` gets.
    ///
    /// Results follow input order.
    pub fn batch_get(&self, key_revs: &[KeyRevision]) -> Result<Vec<Option<KvEntry>>> {
        kvbatch_batch::batch_get(&self.client, key_revs, &self.config)
    }

    /// Write `kvs` with up to `fanout_workers` independent puts in flight.
    ///
    /// Waits for every put; failures come back together as
    /// [`Error::Aggregate`](crate::Error::Aggregate).
    pub fn concurrent_put(&self, kvs: &[KeyValue]) -> Result<()> {
        kvbatch_batch::concurrent_put(&self.client, kvs, &self.config)
    }

    /// Load the default demo data set (`foo/000000` .. `foo/000999`).
    pub fn put_demo_data(&self) -> Result<BatchSummary> {
        self.batch_put(&demo_data(DEMO_KEY, DEMO_NUM))
    }
}

impl BulkClient<MemoryStore> {
    /// Create a client over a fresh [`MemoryStore`].
    ///
    /// The store enforces the same transaction cap as the default config.
    pub fn in_memory() -> Self {
        let config = BatchConfig::default();
        Self {
            client: MemoryStore::with_max_txn_ops(config.max_txn_ops),
            config,
        }
    }
}

impl<C> std::fmt::Debug for BulkClient<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BulkClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`BulkClient`] configuration.
///
/// # Example
///
/// ```
/// use kvbatch::prelude::*;
///
/// let bulk = BulkClientBuilder::new()
///     .max_txn_ops(64)
///     .fanout_workers(8)
///     .build(MemoryStore::with_max_txn_ops(64))?;
/// assert_eq!(bulk.config().max_txn_ops, 64);
/// # Ok::<(), kvbatch::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct BulkClientBuilder {
    config: BatchConfig,
}

impl BulkClientBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: BatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the per-transaction operation cap.
    ///
    /// Should match the store's own limit (etcd `--max-txn-ops`).
    pub fn max_txn_ops(mut self, max_txn_ops: usize) -> Self {
        self.config = self.config.with_max_txn_ops(max_txn_ops);
        self
    }

    /// Set the fan-out pool width.
    pub fn fanout_workers(mut self, fanout_workers: usize) -> Self {
        self.config = self.config.with_fanout_workers(fanout_workers);
        self
    }

    /// Validate the configuration and bind it to `client`.
    pub fn build<C: KvClient>(self, client: C) -> Result<BulkClient<C>> {
        self.config.validate()?;
        Ok(BulkClient {
            client,
            config: self.config,
        })
    }
}
