//! Core types for kvbatch
//!
//! This crate defines the vocabulary shared by every layer:
//! - [`KeyValue`] / [`KeyRevision`]: write and read units supplied by callers
//! - [`Op`]: a single store operation inside a transaction
//! - [`KvEntry`] / [`TxnResponse`]: what the store hands back
//! - [`Error`]: the canonical error type
//! - [`BatchConfig`]: per-transaction op cap and fan-out width

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod types;

pub use config::{BatchConfig, DEFAULT_FANOUT_WORKERS, DEFAULT_MAX_TXN_OPS};
pub use error::{AggregateError, Error, KeyFailure, Result};
pub use types::{KeyRevision, KeyValue, KvEntry, Op, OpResponse, Revision, ToOp, TxnResponse};
