//! Batching configuration
//!
//! [`BatchConfig`] carries the two knobs of the bulk helpers: how many
//! operations one transaction may hold, and how many workers the concurrent
//! path may run at once. Both can be read from TOML:
//!
//! ```toml
//! max_txn_ops = 128
//! fanout_workers = 20
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// etcd's default `--max-txn-ops`
pub const DEFAULT_MAX_TXN_OPS: usize = 128;

/// Default width of the concurrent put pool
pub const DEFAULT_FANOUT_WORKERS: usize = 20;

/// Limits used when splitting and submitting bulk operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    /// Maximum operations per transaction; should track the store's limit
    pub max_txn_ops: usize,
    /// Maximum concurrent puts in the fan-out path
    pub fanout_workers: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_txn_ops: DEFAULT_MAX_TXN_OPS,
            fanout_workers: DEFAULT_FANOUT_WORKERS,
        }
    }
}

impl BatchConfig {
    /// Set the per-transaction operation cap.
    pub fn with_max_txn_ops(mut self, max_txn_ops: usize) -> Self {
        self.max_txn_ops = max_txn_ops;
        self
    }

    /// Set the fan-out pool width.
    pub fn with_fanout_workers(mut self, fanout_workers: usize) -> Self {
        self.fanout_workers = fanout_workers;
        self
    }

    /// Parse and validate a TOML document.
    ///
    /// Missing fields take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Check that every limit is usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_txn_ops == 0 {
            return Err(Error::InvalidConfig(
                "max_txn_ops must be greater than zero".to_string(),
            ));
        }
        if self.fanout_workers == 0 {
            return Err(Error::InvalidConfig(
                "fanout_workers must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
