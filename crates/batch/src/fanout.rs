//! Concurrent fan-out of independent puts
//!
//! A bounded pool of scoped worker threads drains a shared queue of input
//! indices, issuing one plain put per key. The call returns only after every
//! worker has been joined, so "done" means every put has actually finished.
//!
//! A failing key never aborts the run. Each failure is recorded and the whole
//! set is returned as one [`AggregateError`] once the pool has drained; the
//! caller decides whether any single key matters. A put that panics counts
//! as a failure of that key and its worker keeps draining the queue.
//!
//! Puts issued here are independent: there is no transaction around them and
//! no ordering between keys.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use kvbatch_core::{AggregateError, BatchConfig, Error, KeyFailure, KeyValue, Result};
use kvbatch_store::KvClient;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

/// Hands out input indices to workers, each exactly once
struct TaskQueue {
    next: AtomicUsize,
    len: usize,
}

impl TaskQueue {
    fn new(len: usize) -> Self {
        Self {
            next: AtomicUsize::new(0),
            len,
        }
    }

    fn pop(&self) -> Option<usize> {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        (index < self.len).then_some(index)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

/// Write `kvs` with up to `config.fanout_workers` puts in flight.
///
/// Blocks until every put has completed. Returns
/// [`Error::Aggregate`] listing each failed key in input order if any put
/// failed; all other keys are written regardless.
///
/// # Errors
///
/// - [`Error::InvalidConfig`] if `config` does not validate
/// - [`Error::Aggregate`] if one or more puts failed or panicked; a panicked
///   put is listed with [`Error::Internal`]
/// - [`Error::Internal`] if a worker thread itself died
pub fn concurrent_put<C>(client: &C, kvs: &[KeyValue], config: &BatchConfig) -> Result<()>
where
    C: KvClient + ?Sized,
{
    config.validate()?;
    if kvs.is_empty() {
        return Ok(());
    }

    let workers = config.fanout_workers.min(kvs.len());
    let queue = TaskQueue::new(kvs.len());
    let failures = Mutex::new(Vec::new());
    debug!(keys = kvs.len(), workers, "starting fan-out");

    let panicked = thread::scope(|scope| {
        let queue = &queue;
        let failures = &failures;

        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                scope.spawn(move || {
                    let mut written = 0usize;
                    while let Some(index) = queue.pop() {
                        let kv = &kvs[index];
                        let put = AssertUnwindSafe(|| client.put(&kv.key, &kv.value));
                        let outcome = panic::catch_unwind(put).unwrap_or_else(|payload| {
                            let msg = panic_message(payload.as_ref());
                            Err(Error::Internal(format!("put panicked: {}", msg)))
                        });
                        match outcome {
                            Ok(_) => written += 1,
                            Err(error) => {
                                debug!(worker, key = %kv.key, error = %error, "put failed");
                                failures.lock().push(KeyFailure {
                                    index,
                                    key: kv.key.clone(),
                                    error,
                                });
                            }
                        }
                    }
                    debug!(worker, written, "worker drained");
                })
            })
            .collect();

        // Joining every handle is the completion barrier
        handles
            .into_iter()
            .map(|handle| handle.join())
            .filter(|joined| joined.is_err())
            .count()
    });

    if panicked > 0 {
        return Err(Error::Internal(format!(
            "{} of {} fan-out workers panicked",
            panicked, workers
        )));
    }

    let failures = failures.into_inner();
    if failures.is_empty() {
        info!(keys = kvs.len(), workers, "fan-out put complete");
        return Ok(());
    }

    warn!(
        failed = failures.len(),
        keys = kvs.len(),
        "fan-out put finished with failures"
    );
    Err(AggregateError::new(kvs.len(), failures).into())
}
