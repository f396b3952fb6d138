//! Sequential transactional execution of operation groups
//!
//! Each group produced by the partitioner is submitted as one atomic
//! transaction, strictly in order, one at a time.
//!
//! ## Failure semantics
//!
//! ```text
//! group 0 ── commit ok ──► stays committed
//! group 1 ── commit err ─► error returned verbatim
//! group 2 ── never submitted
//! ```
//!
//! Atomicity holds within a group only. Nothing is rolled back when a later
//! group fails.

use kvbatch_core::{
    BatchConfig, Error, KeyRevision, KeyValue, KvEntry, Op, Result, Revision, TxnResponse,
};
use kvbatch_store::KvClient;
use tracing::{debug, info, warn};

use crate::partition::{build_get_ops, build_put_ops, OperationGroup};

/// Outcome of a fully committed batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Transactions committed
    pub groups: usize,
    /// Operations submitted across all transactions
    pub ops: usize,
    /// Store revision after the last commit; 0 if nothing was submitted
    pub revision: Revision,
}

/// Submit each group as one transaction, in order.
///
/// Stops at the first failed commit and returns its error unchanged. Groups
/// before it remain committed; groups after it are not submitted.
pub fn execute_batches<C>(client: &C, groups: &[OperationGroup]) -> Result<()>
where
    C: KvClient + ?Sized,
{
    run_groups(client, groups, |_| Ok(()))?;
    Ok(())
}

fn run_groups<C, F>(client: &C, groups: &[OperationGroup], mut on_commit: F) -> Result<BatchSummary>
where
    C: KvClient + ?Sized,
    F: FnMut(TxnResponse) -> Result<()>,
{
    let mut summary = BatchSummary::default();

    for (index, group) in groups.iter().enumerate() {
        let resp = match client.txn(group.ops()) {
            Ok(resp) => resp,
            Err(e) => {
                warn!(
                    group = index,
                    groups = groups.len(),
                    first_key = group.ops().first().map(Op::key).unwrap_or_default(),
                    committed = summary.groups,
                    error = %e,
                    "txn commit failed, skipping remaining groups"
                );
                return Err(e);
            }
        };

        debug!(
            group = index,
            ops = group.len(),
            writes = group.write_count(),
            revision = resp.revision,
            "group committed"
        );
        summary.groups += 1;
        summary.ops += group.len();
        summary.revision = resp.revision;
        on_commit(resp)?;
    }

    Ok(summary)
}

/// Write `kvs` in transactions of at most `config.max_txn_ops` puts.
///
/// Empty input is a successful no-op.
pub fn batch_put<C>(client: &C, kvs: &[KeyValue], config: &BatchConfig) -> Result<BatchSummary>
where
    C: KvClient + ?Sized,
{
    if kvs.is_empty() {
        return Ok(BatchSummary::default());
    }

    let groups = build_put_ops(kvs, config.max_txn_ops)?;
    info!(keys = kvs.len(), groups = groups.len(), "batch put");

    run_groups(client, &groups, |_| Ok(()))
}

/// Read `key_revs` in transactions of at most `config.max_txn_ops` gets.
///
/// Returns one slot per input item, in input order; `None` marks a key that
/// did not exist at the requested revision. Empty input yields an empty
/// result.
pub fn batch_get<C>(
    client: &C,
    key_revs: &[KeyRevision],
    config: &BatchConfig,
) -> Result<Vec<Option<KvEntry>>>
where
    C: KvClient + ?Sized,
{
    if key_revs.is_empty() {
        return Ok(Vec::new());
    }

    let groups = build_get_ops(key_revs, config.max_txn_ops)?;
    debug!(keys = key_revs.len(), groups = groups.len(), "batch get");

    let mut entries = Vec::with_capacity(key_revs.len());
    run_groups(client, &groups, |resp| {
        if resp.entries().count() != resp.responses.len() {
            return Err(Error::Internal(
                "store answered a get with a put response".to_string(),
            ));
        }
        entries.extend(resp.entries().map(|entry| entry.cloned()));
        Ok(())
    })?;

    if entries.len() != key_revs.len() {
        return Err(Error::Internal(format!(
            "store returned {} responses for {} reads",
            entries.len(),
            key_revs.len()
        )));
    }

    Ok(entries)
}

/// Write `kvs` one plain put at a time, in order.
///
/// No transaction groups the writes; a failure leaves every earlier key
/// written and returns the error.
pub fn loop_put<C>(client: &C, kvs: &[KeyValue]) -> Result<()>
where
    C: KvClient + ?Sized,
{
    for (index, kv) in kvs.iter().enumerate() {
        if let Err(e) = client.put(&kv.key, &kv.value) {
            warn!(index, key = %kv.key, error = %e, "put failed");
            return Err(e);
        }
    }
    debug!(keys = kvs.len(), "loop put done");
    Ok(())
}
