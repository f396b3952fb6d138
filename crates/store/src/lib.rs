//! Store boundary for kvbatch
//!
//! This crate defines what the bulk helpers need from a key-value store:
//! - [`KvClient`]: single put, single (optionally revision-pinned) get, and
//!   an atomic multi-operation transaction
//! - [`MemoryStore`]: an in-process implementation with etcd revision
//!   semantics and a per-transaction operation cap
//!
//! Any real store client (an etcd v3 client, for example) plugs in by
//! implementing [`KvClient`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;

pub use memory::{MemoryStore, StoreStats};

use kvbatch_core::{KvEntry, Op, Result, Revision, TxnResponse};

/// Client side of a strongly-consistent key-value store
///
/// Implementations must be shareable across threads; the concurrent put path
/// calls [`KvClient::put`] from several workers at once.
pub trait KvClient: Send + Sync {
    /// Write a single key outside any explicit transaction.
    ///
    /// Returns the revision the write landed at.
    fn put(&self, key: &str, value: &str) -> Result<Revision>;

    /// Read a single key, at `revision` when given, otherwise the latest.
    ///
    /// Returns `None` if the key did not exist at that revision.
    fn get(&self, key: &str, revision: Option<Revision>) -> Result<Option<KvEntry>>;

    /// Apply `ops` as one atomic transaction, in order.
    ///
    /// Either every op takes effect or none does. The response holds one
    /// entry per op.
    fn txn(&self, ops: &[Op]) -> Result<TxnResponse>;
}

impl<C: KvClient + ?Sized> KvClient for &C {
    fn put(&self, key: &str, value: &str) -> Result<Revision> {
        (**self).put(key, value)
    }

    fn get(&self, key: &str, revision: Option<Revision>) -> Result<Option<KvEntry>> {
        (**self).get(key, revision)
    }

    fn txn(&self, ops: &[Op]) -> Result<TxnResponse> {
        (**self).txn(ops)
    }
}

impl<C: KvClient + ?Sized> KvClient for Box<C> {
    fn put(&self, key: &str, value: &str) -> Result<Revision> {
        (**self).put(key, value)
    }

    fn get(&self, key: &str, revision: Option<Revision>) -> Result<Option<KvEntry>> {
        (**self).get(key, revision)
    }

    fn txn(&self, ops: &[Op]) -> Result<TxnResponse> {
        (**self).txn(ops)
    }
}

impl<C: KvClient + ?Sized> KvClient for std::sync::Arc<C> {
    fn put(&self, key: &str, value: &str) -> Result<Revision> {
        (**self).put(key, value)
    }

    fn get(&self, key: &str, revision: Option<Revision>) -> Result<Option<KvEntry>> {
        (**self).get(key, revision)
    }

    fn txn(&self, ops: &[Op]) -> Result<TxnResponse> {
        (**self).txn(ops)
    }
}
