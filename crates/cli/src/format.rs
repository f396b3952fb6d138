//! Output formatting for human and JSON modes.

use serde_json::json;

use crate::parse::WriteMode;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// What `kvbatch demo` did.
#[derive(Debug, Clone)]
pub struct DemoReport {
    pub mode: WriteMode,
    pub prefix: String,
    pub keys: usize,
    pub max_txn_ops: usize,
    pub txns: u64,
    pub revision: i64,
    pub verified: usize,
    pub elapsed_ms: u128,
}

/// What `kvbatch plan` computed.
#[derive(Debug, Clone)]
pub struct PlanReport {
    pub count: usize,
    pub max_txn_ops: usize,
    pub group_sizes: Vec<usize>,
}

pub fn format_demo(report: &DemoReport, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => json!({
            "mode": report.mode.as_str(),
            "prefix": report.prefix,
            "keys": report.keys,
            "max_txn_ops": report.max_txn_ops,
            "txns": report.txns,
            "revision": report.revision,
            "verified": report.verified,
            "elapsed_ms": report.elapsed_ms as u64,
        })
        .to_string(),
        OutputMode::Human => format!(
            "wrote {} keys under \"{}\" ({} mode)\n\
             transactions: {} (max {} ops each)\n\
             revision:     {}\n\
             verified:     {}/{}\n\
             elapsed:      {} ms",
            report.keys,
            report.prefix,
            report.mode.as_str(),
            report.txns,
            report.max_txn_ops,
            report.revision,
            report.verified,
            report.keys,
            report.elapsed_ms
        ),
    }
}

pub fn format_plan(report: &PlanReport, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => json!({
            "count": report.count,
            "max_txn_ops": report.max_txn_ops,
            "groups": report.group_sizes.len(),
            "group_sizes": report.group_sizes,
        })
        .to_string(),
        OutputMode::Human => {
            let mut out = format!(
                "{} operations, max {} per txn -> {} txn(s)",
                report.count,
                report.max_txn_ops,
                report.group_sizes.len()
            );
            for (i, size) in report.group_sizes.iter().enumerate() {
                out.push_str(&format!("\n  txn {:>4}: {}", i, size));
            }
            out
        }
    }
}

pub fn format_error(err: &str, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => json!({ "error": err }).to_string(),
        OutputMode::Human => format!("(error) {}", err),
    }
}
