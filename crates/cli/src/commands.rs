//! clap command tree for the `kvbatch` binary.

use clap::{Arg, ArgAction, Command};

/// Build the top-level command.
pub fn build_cli() -> Command {
    Command::new("kvbatch")
        .about("Load and plan transaction-sized bulk key-value writes")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_name("FILE")
                .help("TOML file with max_txn_ops / fanout_workers"),
        )
        .arg(
            Arg::new("max-txn-ops")
                .long("max-txn-ops")
                .global(true)
                .value_name("N")
                .help("Operations per transaction (overrides config)"),
        )
        .arg(
            Arg::new("workers")
                .long("workers")
                .short('w')
                .global(true)
                .value_name("N")
                .help("Concurrent puts in concurrent mode (overrides config)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print results as JSON"),
        )
        .subcommand(
            Command::new("demo")
                .about("Write demo data into an in-memory store and read it back")
                .arg(
                    Arg::new("count")
                        .long("count")
                        .short('n')
                        .value_name("N")
                        .default_value("1000"),
                )
                .arg(
                    Arg::new("prefix")
                        .long("prefix")
                        .value_name("PREFIX")
                        .default_value("foo"),
                )
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .short('m')
                        .value_parser(["batch", "loop", "concurrent"])
                        .default_value("batch"),
                ),
        )
        .subcommand(
            Command::new("plan")
                .about("Show how many operations each transaction would carry")
                .arg(
                    Arg::new("count")
                        .long("count")
                        .short('n')
                        .value_name("N")
                        .required(true),
                ),
        )
}
