//! # kvbatch
//!
//! Bulk writes and reads over etcd-style key-value stores.
//!
//! Stores cap how many operations one transaction may carry (etcd defaults to
//! 128). kvbatch splits arbitrarily large key-value sets into groups under
//! that cap, preserving order, and commits each group as one atomic
//! transaction.
//!
//! ## Quick Start
//!
//! ```
//! use kvbatch::prelude::*;
//!
//! let bulk = BulkClient::in_memory();
//!
//! let kvs = kvbatch::demo_data("foo", 130);
//! let summary = bulk.batch_put(&kvs)?;
//! assert_eq!(summary.groups, 2); // 128 + 2
//!
//! let reads = [KeyRevision::latest("foo/000129"), KeyRevision::new("foo/000129", 1)];
//! let entries = bulk.batch_get(&reads)?;
//! assert!(entries[0].is_some());
//! assert!(entries[1].is_none()); // written by the second transaction
//! # Ok::<(), kvbatch::Error>(())
//! ```
//!
//! ## Write paths
//!
//! - [`BulkClient::batch_put`] - transactional groups, sequential, first error wins
//! - [`BulkClient::loop_put`] - one plain put per key, in order
//! - [`BulkClient::concurrent_put`] - bounded worker pool, failures aggregated
//!
//! ## Crates
//!
//! - `kvbatch-core` - data model, errors, configuration
//! - `kvbatch-store` - [`KvClient`] trait and [`MemoryStore`]
//! - `kvbatch-batch` - partitioner, executor and fan-out pool

#![warn(missing_docs)]

mod client;
mod demo;
mod error;

pub mod prelude;

// Re-export main entry points
pub use client::{BulkClient, BulkClientBuilder};
pub use demo::{demo_data, DEMO_KEY, DEMO_NUM};
pub use error::{AggregateError, Error, KeyFailure, Result};

// Re-export the layers
pub use kvbatch_batch::{
    batch_get, batch_put, build_get_ops, build_put_ops, concurrent_put, execute_batches,
    group_count, loop_put, partition, BatchSummary, OperationGroup,
};
pub use kvbatch_core::{
    BatchConfig, KeyRevision, KeyValue, KvEntry, Op, OpResponse, Revision, ToOp, TxnResponse,
    DEFAULT_FANOUT_WORKERS, DEFAULT_MAX_TXN_OPS,
};
pub use kvbatch_store::{KvClient, MemoryStore, StoreStats};
