//! Bulk operation layer for kvbatch
//!
//! This crate turns arbitrarily long key-value sets into work a store will
//! accept:
//! - [`partition`]: order-preserving split into groups no larger than the
//!   store's per-transaction operation cap
//! - [`execute_batches`]: one atomic transaction per group, sequentially,
//!   stopping at the first failed commit
//! - [`batch_put`] / [`batch_get`]: partition and execute in one call
//! - [`loop_put`]: one plain put per key, in order
//! - [`concurrent_put`]: bounded worker pool with aggregated failures

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod executor;
pub mod fanout;
pub mod partition;

pub use executor::{batch_get, batch_put, execute_batches, loop_put, BatchSummary};
pub use fanout::concurrent_put;
pub use partition::{build_get_ops, build_put_ops, group_count, partition, OperationGroup};
