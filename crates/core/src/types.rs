//! Core data model
//!
//! This module defines the values that flow between callers, the
//! partitioner and the store:
//! - [`KeyValue`]: one write unit
//! - [`KeyRevision`]: one read unit, optionally pinned to a revision
//! - [`Op`]: the store operation an input item maps to
//! - [`KvEntry`], [`OpResponse`], [`TxnResponse`]: store replies

use serde::{Deserialize, Serialize};

/// Store revision number
///
/// Revisions are assigned by the store and increase by one per committed
/// write transaction. Zero means "no revision" (nothing written yet).
pub type Revision = i64;

/// A single key-value pair to write
///
/// No uniqueness is enforced: duplicate keys simply produce repeated puts,
/// and the last one in input order wins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyValue {
    /// Key to write
    pub key: String,
    /// Value to store under `key`
    pub value: String,
}

impl KeyValue {
    /// Create a new key-value pair
    ///
    /// # Examples
    ///
    /// ```
    /// use kvbatch_core::KeyValue;
    ///
    /// let kv = KeyValue::new("foo", "bar");
    /// assert_eq!(kv.key, "foo");
    /// ```
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for KeyValue {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// A key to read, optionally at a historical revision
///
/// A `mod_revision` greater than zero pins the read to that revision.
/// Zero (or a negative value) reads the latest value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyRevision {
    /// Key to read
    pub key: String,
    /// Revision to read at; `<= 0` means latest
    pub mod_revision: Revision,
}

impl KeyRevision {
    /// Create a read unit with an explicit revision
    pub fn new(key: impl Into<String>, mod_revision: Revision) -> Self {
        Self {
            key: key.into(),
            mod_revision,
        }
    }

    /// Read the latest value of `key`
    pub fn latest(key: impl Into<String>) -> Self {
        Self::new(key, 0)
    }

    /// The revision this read is pinned to, if any
    ///
    /// # Examples
    ///
    /// ```
    /// use kvbatch_core::KeyRevision;
    ///
    /// assert_eq!(KeyRevision::new("k", 0).pinned_revision(), None);
    /// assert_eq!(KeyRevision::new("k", 5).pinned_revision(), Some(5));
    /// ```
    pub fn pinned_revision(&self) -> Option<Revision> {
        (self.mod_revision > 0).then_some(self.mod_revision)
    }
}

/// A single operation inside a store transaction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    /// Write `value` under `key`
    Put {
        /// Key to write
        key: String,
        /// Value to write
        value: String,
    },
    /// Read `key`, at `revision` when set, otherwise the latest value
    Get {
        /// Key to read
        key: String,
        /// Pinned revision
        revision: Option<Revision>,
    },
}

impl Op {
    /// Build a put operation
    pub fn put(key: impl Into<String>, value: impl Into<String>) -> Self {
        Op::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Build an unpinned get operation
    pub fn get(key: impl Into<String>) -> Self {
        Op::Get {
            key: key.into(),
            revision: None,
        }
    }

    /// Build a get operation pinned to `revision`
    pub fn get_at(key: impl Into<String>, revision: Revision) -> Self {
        Op::Get {
            key: key.into(),
            revision: Some(revision),
        }
    }

    /// Key this operation touches
    pub fn key(&self) -> &str {
        match self {
            Op::Put { key, .. } | Op::Get { key, .. } => key,
        }
    }

    /// Revision a read is pinned to, `None` for writes and latest reads
    pub fn revision(&self) -> Option<Revision> {
        match self {
            Op::Get { revision, .. } => *revision,
            Op::Put { .. } => None,
        }
    }

    /// Whether this operation mutates the store
    pub fn is_write(&self) -> bool {
        matches!(self, Op::Put { .. })
    }
}

/// Conversion of an input item into the one operation it stands for
pub trait ToOp {
    /// Build the store operation for this item
    fn to_op(&self) -> Op;
}

impl ToOp for KeyValue {
    fn to_op(&self) -> Op {
        Op::put(self.key.clone(), self.value.clone())
    }
}

impl ToOp for KeyRevision {
    fn to_op(&self) -> Op {
        match self.pinned_revision() {
            Some(rev) => Op::get_at(self.key.clone(), rev),
            None => Op::get(self.key.clone()),
        }
    }
}

impl ToOp for Op {
    fn to_op(&self) -> Op {
        self.clone()
    }
}

/// A stored key as returned by a read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvEntry {
    /// The key
    pub key: String,
    /// Value visible at the read revision
    pub value: String,
    /// Revision of the first write to this key
    pub create_revision: Revision,
    /// Revision of the write that produced `value`
    pub mod_revision: Revision,
    /// Number of writes to this key up to and including `mod_revision`
    pub version: i64,
}

/// Result of one operation inside a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpResponse {
    /// A put landed at `revision`
    Put {
        /// Revision assigned to the write
        revision: Revision,
    },
    /// A get completed; `None` if the key did not exist at the read revision
    Get {
        /// Entry found, if any
        entry: Option<KvEntry>,
    },
}

/// Result of a committed transaction
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TxnResponse {
    /// Store revision after the commit
    pub revision: Revision,
    /// One response per submitted op, in submission order
    pub responses: Vec<OpResponse>,
}

impl TxnResponse {
    /// Entries returned by the get operations, in order
    ///
    /// Put responses are skipped.
    pub fn entries(&self) -> impl Iterator<Item = Option<&KvEntry>> + '_ {
        self.responses.iter().filter_map(|r| match r {
            OpResponse::Get { entry } => Some(entry.as_ref()),
            OpResponse::Put { .. } => None,
        })
    }
}
