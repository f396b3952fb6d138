//! In-process revisioned key-value store
//!
//! `MemoryStore` follows the etcd v3 revision model closely enough to stand
//! in for a real cluster in tests and demos:
//!
//! - One global revision, bumped once per transaction that writes. Every put
//!   in the transaction lands at that same revision.
//! - Per key: `create_revision`, `mod_revision` and `version` (write count).
//! - Full history is kept, so reads can be pinned to any past revision.
//! - Transactions larger than `max_txn_ops` are rejected whole.
//!
//! # Thread Safety
//!
//! State lives behind a single `RwLock`. A transaction validates every op and
//! applies them under the write lock, so no reader ever sees half of one.

use std::collections::BTreeMap;

use kvbatch_core::{
    Error, KvEntry, Op, OpResponse, Result, Revision, TxnResponse, DEFAULT_MAX_TXN_OPS,
};
use parking_lot::RwLock;
use tracing::{trace, warn};

use crate::KvClient;

/// One historical value of a key
#[derive(Debug, Clone)]
struct Record {
    mod_revision: Revision,
    value: String,
    version: i64,
}

#[derive(Debug, Default)]
struct State {
    revision: Revision,
    /// Per-key history, ascending by `mod_revision`
    keys: BTreeMap<String, Vec<Record>>,
    txns_committed: u64,
    txns_rejected: u64,
    puts: u64,
}

impl State {
    fn apply_put(&mut self, key: &str, value: &str, revision: Revision) {
        self.puts += 1;
        let history = self.keys.entry(key.to_string()).or_default();
        if let Some(last) = history.last_mut() {
            // Same key written twice in one transaction: last write wins
            if last.mod_revision == revision {
                last.value = value.to_string();
                last.version += 1;
                return;
            }
        }
        let version = history.last().map_or(1, |r| r.version + 1);
        history.push(Record {
            mod_revision: revision,
            value: value.to_string(),
            version,
        });
    }

    fn entry_at(&self, key: &str, revision: Revision) -> Option<KvEntry> {
        let history = self.keys.get(key)?;
        let idx = history.partition_point(|r| r.mod_revision <= revision);
        let record = history.get(idx.checked_sub(1)?)?;
        Some(KvEntry {
            key: key.to_string(),
            value: record.value.clone(),
            create_revision: history[0].mod_revision,
            mod_revision: record.mod_revision,
            version: record.version,
        })
    }

    fn check_revision(&self, requested: Revision) -> Result<()> {
        if requested > self.revision {
            return Err(Error::FutureRevision {
                requested,
                current: self.revision,
            });
        }
        Ok(())
    }
}

/// Point-in-time counters of a [`MemoryStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    /// Current revision
    pub revision: Revision,
    /// Distinct keys ever written
    pub keys: usize,
    /// Transactions committed, including implicit single-put ones
    pub txns_committed: u64,
    /// Transactions rejected before applying anything
    pub txns_rejected: u64,
    /// Individual put operations applied
    pub puts: u64,
}

/// In-memory store with etcd-style revisions
///
/// # Example
///
/// ```
/// use kvbatch_core::Op;
/// use kvbatch_store::{KvClient, MemoryStore};
///
/// let store = MemoryStore::new();
/// let resp = store.txn(&[Op::put("a", "1"), Op::put("b", "2")]).unwrap();
/// assert_eq!(resp.revision, 1);
/// assert_eq!(store.get("b", None).unwrap().unwrap().value, "2");
/// ```
pub struct MemoryStore {
    state: RwLock<State>,
    max_txn_ops: usize,
}

impl MemoryStore {
    /// Create an empty store with etcd's default transaction cap
    pub fn new() -> Self {
        Self::with_max_txn_ops(DEFAULT_MAX_TXN_OPS)
    }

    /// Create an empty store that rejects transactions over `max_txn_ops`
    pub fn with_max_txn_ops(max_txn_ops: usize) -> Self {
        Self {
            state: RwLock::new(State::default()),
            max_txn_ops,
        }
    }

    /// Transaction cap this store enforces
    pub fn max_txn_ops(&self) -> usize {
        self.max_txn_ops
    }

    /// Current revision
    pub fn revision(&self) -> Revision {
        self.state.read().revision
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.state.read().keys.len()
    }

    /// Check if nothing was ever written
    pub fn is_empty(&self) -> bool {
        self.state.read().keys.is_empty()
    }

    /// Snapshot of the store counters
    pub fn stats(&self) -> StoreStats {
        let state = self.state.read();
        StoreStats {
            revision: state.revision,
            keys: state.keys.len(),
            txns_committed: state.txns_committed,
            txns_rejected: state.txns_rejected,
            puts: state.puts,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        f.debug_struct("MemoryStore")
            .field("revision", &stats.revision)
            .field("keys", &stats.keys)
            .field("max_txn_ops", &self.max_txn_ops)
            .finish()
    }
}

/// Revisions `<= 0` read the latest state, as in etcd.
fn pinned(revision: Option<Revision>) -> Option<Revision> {
    revision.filter(|rev| *rev > 0)
}

impl KvClient for MemoryStore {
    fn put(&self, key: &str, value: &str) -> Result<Revision> {
        let resp = self.txn(&[Op::put(key, value)])?;
        Ok(resp.revision)
    }

    fn get(&self, key: &str, revision: Option<Revision>) -> Result<Option<KvEntry>> {
        let state = self.state.read();
        let at = match pinned(revision) {
            Some(rev) => {
                state.check_revision(rev)?;
                rev
            }
            None => state.revision,
        };
        Ok(state.entry_at(key, at))
    }

    fn txn(&self, ops: &[Op]) -> Result<TxnResponse> {
        let mut state = self.state.write();

        if ops.len() > self.max_txn_ops {
            state.txns_rejected += 1;
            warn!(ops = ops.len(), limit = self.max_txn_ops, "rejecting oversized txn");
            return Err(Error::TooManyOps {
                ops: ops.len(),
                limit: self.max_txn_ops,
            });
        }

        // Validate everything before touching state
        for op in ops {
            if let Some(rev) = pinned(op.revision()) {
                if let Err(e) = state.check_revision(rev) {
                    state.txns_rejected += 1;
                    return Err(e);
                }
            }
        }

        let txn_revision = if ops.iter().any(Op::is_write) {
            state.revision + 1
        } else {
            state.revision
        };

        let mut responses = Vec::with_capacity(ops.len());
        for op in ops {
            match op {
                Op::Put { key, value } => {
                    state.apply_put(key, value, txn_revision);
                    responses.push(OpResponse::Put {
                        revision: txn_revision,
                    });
                }
                Op::Get { key, revision } => {
                    let at = pinned(*revision).unwrap_or(txn_revision);
                    responses.push(OpResponse::Get {
                        entry: state.entry_at(key, at),
                    });
                }
            }
        }

        state.revision = txn_revision;
        state.txns_committed += 1;
        trace!(ops = ops.len(), revision = txn_revision, "txn committed");

        Ok(TxnResponse {
            revision: txn_revision,
            responses,
        })
    }
}
