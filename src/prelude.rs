//! Convenient imports for kvbatch.
//!
//! ```
//! use kvbatch::prelude::*;
//!
//! let bulk = BulkClient::in_memory();
//! bulk.batch_put(&[KeyValue::new("key", "value")])?;
//! # Ok::<(), kvbatch::Error>(())
//! ```

// Main entry point
pub use crate::client::{BulkClient, BulkClientBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Store boundary
pub use kvbatch_store::{KvClient, MemoryStore};

// Core types
pub use kvbatch_core::{BatchConfig, KeyRevision, KeyValue, KvEntry, Op, Revision};

// Batch results
pub use kvbatch_batch::BatchSummary;
