//! kvbatch CLI: load and plan bulk key-value writes.
//!
//! - `kvbatch demo`: write demo data into an in-memory store using one of the
//!   write paths, then read it back in batches and verify it
//! - `kvbatch plan --count N`: show the transaction groups N operations split
//!   into
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `info`).

mod commands;
mod format;
mod parse;

use std::process;
use std::time::Instant;

use anyhow::Context;
use kvbatch::prelude::*;
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use format::{format_demo, format_error, format_plan, DemoReport, OutputMode, PlanReport};
use parse::{load_config, matches_to_action, CliAction, WriteMode};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();

    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let result = load_config(&matches)
        .and_then(|config| matches_to_action(&matches).map(|action| (config, action)))
        .map_err(anyhow::Error::msg)
        .and_then(|(config, action)| run(action, config, output_mode));

    match result {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("{}", format_error(&format!("{:#}", e), output_mode));
            process::exit(1);
        }
    }
}

fn run(action: CliAction, config: BatchConfig, mode: OutputMode) -> anyhow::Result<String> {
    match action {
        CliAction::Demo {
            prefix,
            count,
            mode: write_mode,
        } => {
            let report = run_demo(&prefix, count, write_mode, config)?;
            Ok(format_demo(&report, mode))
        }
        CliAction::Plan { count } => {
            let report = run_plan(count, config)?;
            Ok(format_plan(&report, mode))
        }
    }
}

fn run_demo(
    prefix: &str,
    count: usize,
    write_mode: WriteMode,
    config: BatchConfig,
) -> anyhow::Result<DemoReport> {
    let bulk = BulkClientBuilder::new()
        .config(config)
        .build(MemoryStore::with_max_txn_ops(config.max_txn_ops))?;
    let kvs = kvbatch::demo_data(prefix, count);

    let started = Instant::now();
    match write_mode {
        WriteMode::Batch => {
            bulk.batch_put(&kvs).context("batch put failed")?;
        }
        WriteMode::Loop => bulk.loop_put(&kvs).context("loop put failed")?,
        WriteMode::Concurrent => bulk
            .concurrent_put(&kvs)
            .context("concurrent put failed")?,
    }
    let elapsed_ms = started.elapsed().as_millis();

    let reads: Vec<KeyRevision> = kvs
        .iter()
        .map(|kv| KeyRevision::latest(kv.key.clone()))
        .collect();
    let entries = bulk.batch_get(&reads).context("read-back failed")?;
    let verified = entries
        .iter()
        .zip(&kvs)
        .filter(|(entry, kv)| entry.as_ref().map(|e| &e.value) == Some(&kv.value))
        .count();

    let stats = bulk.client().stats();
    tracing::info!(keys = count, verified, revision = stats.revision, "demo finished");

    Ok(DemoReport {
        mode: write_mode,
        prefix: prefix.to_string(),
        keys: count,
        max_txn_ops: config.max_txn_ops,
        txns: stats.txns_committed,
        revision: stats.revision,
        verified,
        elapsed_ms,
    })
}

fn run_plan(count: usize, config: BatchConfig) -> anyhow::Result<PlanReport> {
    let kvs = kvbatch::demo_data("plan", count);
    let groups = kvbatch::build_put_ops(&kvs, config.max_txn_ops)?;
    Ok(PlanReport {
        count,
        max_txn_ops: config.max_txn_ops,
        group_sizes: groups.iter().map(|g| g.len()).collect(),
    })
}
