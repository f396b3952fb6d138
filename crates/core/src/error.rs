//! Unified error types for kvbatch.
//!
//! Errors fall into three groups:
//! - caller-contract errors (empty input, bad configuration)
//! - store errors (rejected or failed transactions), passed through verbatim
//! - aggregated per-key failures from the concurrent fan-out path

use std::fmt;

use thiserror::Error;

use crate::types::Revision;

/// All kvbatch errors.
#[derive(Debug, Error)]
pub enum Error {
    /// An operation that needs at least one item received none
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Configuration values out of range or unparseable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A transaction carried more operations than the store accepts
    #[error("too many operations in txn request: {ops} > {limit}")]
    TooManyOps {
        /// Operations submitted
        ops: usize,
        /// Store limit
        limit: usize,
    },

    /// A read was pinned to a revision the store has not reached
    #[error("required revision {requested} is a future revision (current {current})")]
    FutureRevision {
        /// Revision asked for
        requested: Revision,
        /// Current store revision
        current: Revision,
    },

    /// The store refused to commit a transaction
    #[error("commit failed: {0}")]
    Commit(String),

    /// The store could not be reached or the request was lost
    #[error("transport error: {0}")]
    Transport(String),

    /// One or more operations of a concurrent submission failed
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error (bug or invariant violation)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for kvbatch operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if the caller broke the calling contract.
    ///
    /// These never succeed when repeated with the same arguments.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Error::EmptyInput(_) | Error::InvalidConfig(_))
    }

    /// Check if the error came back from the store.
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            Error::TooManyOps { .. }
                | Error::FutureRevision { .. }
                | Error::Commit(_)
                | Error::Transport(_)
        )
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::InvalidConfig(e.to_string())
    }
}

/// Failure of a single key during a concurrent submission
#[derive(Debug)]
pub struct KeyFailure {
    /// Position of the item in the caller's input
    pub index: usize,
    /// Key that failed
    pub key: String,
    /// Error the store returned for it
    pub error: Error,
}

/// Per-key failures collected from a concurrent submission
///
/// Failures are kept in input order. Keys not listed were written.
#[derive(Debug)]
pub struct AggregateError {
    total: usize,
    failures: Vec<KeyFailure>,
}

impl AggregateError {
    /// Build from the failures of a run over `total` items
    pub fn new(total: usize, mut failures: Vec<KeyFailure>) -> Self {
        failures.sort_by_key(|f| f.index);
        Self { total, failures }
    }

    /// Number of items submitted
    pub fn total(&self) -> usize {
        self.total
    }

    /// Failed items, in input order
    pub fn failures(&self) -> &[KeyFailure] {
        &self.failures
    }

    /// Keys that failed, in input order
    pub fn failed_keys(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|f| f.key.as_str())
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} operations failed",
            self.failures.len(),
            self.total
        )?;
        if let Some(first) = self.failures.first() {
            write!(f, " (first: key={} error={})", first.key, first.error)?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateError {}
