//! ArgMatches → CliAction conversion.
//!
//! Resolves the effective [`BatchConfig`] (file, then flag overrides) and
//! translates the chosen subcommand into a [`CliAction`].

use clap::ArgMatches;
use kvbatch::BatchConfig;

/// How the demo writes its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Transactions of at most `max_txn_ops` puts
    Batch,
    /// One plain put per key
    Loop,
    /// Bounded pool of concurrent puts
    Concurrent,
}

impl WriteMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteMode::Batch => "batch",
            WriteMode::Loop => "loop",
            WriteMode::Concurrent => "concurrent",
        }
    }
}

/// The result of parsing the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    Demo {
        prefix: String,
        count: usize,
        mode: WriteMode,
    },
    Plan {
        count: usize,
    },
}

fn parse_count(raw: &str, what: &str) -> Result<usize, String> {
    raw.parse::<usize>()
        .map_err(|e| format!("Invalid {}: {} ({})", what, raw, e))
}

/// Build the effective configuration.
///
/// Starts from `--config` (or defaults), applies `--max-txn-ops` and
/// `--workers`, then validates.
pub fn load_config(matches: &ArgMatches) -> Result<BatchConfig, String> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => BatchConfig::load(path)
            .map_err(|e| format!("Failed to load config {}: {}", path, e))?,
        None => BatchConfig::default(),
    };

    if let Some(raw) = matches.get_one::<String>("max-txn-ops") {
        config = config.with_max_txn_ops(parse_count(raw, "max-txn-ops")?);
    }
    if let Some(raw) = matches.get_one::<String>("workers") {
        config = config.with_fanout_workers(parse_count(raw, "workers")?);
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

/// Convert clap ArgMatches into a CliAction.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    let (sub_name, sub_matches) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    match sub_name {
        "demo" => parse_demo(sub_matches),
        "plan" => {
            let raw = sub_matches
                .get_one::<String>("count")
                .ok_or("Missing count")?;
            Ok(CliAction::Plan {
                count: parse_count(raw, "count")?,
            })
        }
        other => Err(format!("Unknown command: {}", other)),
    }
}

fn parse_demo(matches: &ArgMatches) -> Result<CliAction, String> {
    let count = matches
        .get_one::<String>("count")
        .map(|raw| parse_count(raw, "count"))
        .transpose()?
        .unwrap_or(kvbatch::DEMO_NUM);
    let prefix = matches
        .get_one::<String>("prefix")
        .cloned()
        .unwrap_or_else(|| kvbatch::DEMO_KEY.to_string());
    let mode = match matches.get_one::<String>("mode").map(String::as_str) {
        Some("loop") => WriteMode::Loop,
        Some("concurrent") => WriteMode::Concurrent,
        Some("batch") | None => WriteMode::Batch,
        Some(other) => return Err(format!("Unknown mode: {}", other)),
    };

    Ok(CliAction::Demo {
        prefix,
        count,
        mode,
    })
}
