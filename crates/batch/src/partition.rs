//! Order-preserving partitioning into transaction-sized groups
//!
//! A store caps how many operations a single transaction may carry. The
//! partitioner walks the input once, filling a group until it reaches the
//! cap, then seals it and starts the next one. The last group holds the
//! remainder.
//!
//! For any non-empty input and cap `M`:
//! - every group holds between 1 and `M` operations
//! - groups follow input order
//! - concatenating the groups yields exactly the input operations
//!
//! ```text
//! 130 items, M = 128  →  [128] [2]
//! 256 items, M = 128  →  [128] [128]
//! ```

use std::ops::Deref;

use kvbatch_core::{Error, KeyRevision, KeyValue, Op, Result, ToOp};

/// An ordered, non-empty run of operations submitted as one transaction
///
/// Only the partitioner creates groups; once emitted they are read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationGroup {
    ops: Vec<Op>,
}

impl OperationGroup {
    /// Operations in submission order
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Take the operations out of the group
    pub fn into_ops(self) -> Vec<Op> {
        self.ops
    }

    /// Number of writes in the group
    pub fn write_count(&self) -> usize {
        self.ops.iter().filter(|op| op.is_write()).count()
    }
}

impl Deref for OperationGroup {
    type Target = [Op];

    fn deref(&self) -> &[Op] {
        &self.ops
    }
}

impl<'a> IntoIterator for &'a OperationGroup {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

/// Number of groups `len` items split into under `max_group_size`
pub fn group_count(len: usize, max_group_size: usize) -> usize {
    if max_group_size == 0 {
        return 0;
    }
    len / max_group_size + usize::from(len % max_group_size != 0)
}

/// Split `items` into groups of at most `max_group_size` operations.
///
/// Each item becomes exactly one operation via [`ToOp`].
///
/// # Errors
///
/// - [`Error::EmptyInput`] if `items` is empty
/// - [`Error::InvalidConfig`] if `max_group_size` is zero
///
/// # Example
///
/// ```
/// use kvbatch_batch::partition;
/// use kvbatch_core::KeyValue;
///
/// let kvs: Vec<_> = (0..130).map(|i| KeyValue::new(format!("k{}", i), "v")).collect();
/// let groups = partition(&kvs, 128).unwrap();
/// assert_eq!(groups.iter().map(|g| g.len()).collect::<Vec<_>>(), vec![128, 2]);
/// ```
pub fn partition<T: ToOp>(items: &[T], max_group_size: usize) -> Result<Vec<OperationGroup>> {
    if items.is_empty() {
        return Err(Error::EmptyInput("no operations to partition".to_string()));
    }
    if max_group_size == 0 {
        return Err(Error::InvalidConfig(
            "max group size must be greater than zero".to_string(),
        ));
    }

    let mut groups: Vec<OperationGroup> =
        Vec::with_capacity(group_count(items.len(), max_group_size));
    let mut current: Vec<Op> = Vec::with_capacity(max_group_size.min(items.len()));

    for item in items {
        if current.len() == max_group_size {
            let remaining = items.len() - groups.len() * max_group_size - current.len();
            groups.push(OperationGroup {
                ops: std::mem::replace(
                    &mut current,
                    Vec::with_capacity(max_group_size.min(remaining)),
                ),
            });
        }
        current.push(item.to_op());
    }
    if !current.is_empty() {
        groups.push(OperationGroup { ops: current });
    }

    Ok(groups)
}

/// Build grouped put operations for `kvs`.
pub fn build_put_ops(kvs: &[KeyValue], max_group_size: usize) -> Result<Vec<OperationGroup>> {
    partition(kvs, max_group_size)
}

/// Build grouped get operations for `key_revs`.
///
/// Entries with a positive `mod_revision` become reads pinned to it.
pub fn build_get_ops(
    key_revs: &[KeyRevision],
    max_group_size: usize,
) -> Result<Vec<OperationGroup>> {
    partition(key_revs, max_group_size)
}
