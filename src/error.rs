//! Error types for kvbatch.
//!
//! All layers share one error enum, defined in `kvbatch-core` and re-exported
//! here so callers need a single import.
//!
//! - Caller-contract errors ([`Error::EmptyInput`], [`Error::InvalidConfig`])
//!   never succeed on retry with the same arguments.
//! - Store errors ([`Error::Commit`], [`Error::Transport`],
//!   [`Error::TooManyOps`], [`Error::FutureRevision`]) are passed through
//!   exactly as the store reported them.
//! - [`Error::Aggregate`] carries every per-key failure of a concurrent put.

pub use kvbatch_core::error::{AggregateError, Error, KeyFailure, Result};
