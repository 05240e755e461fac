//! scipdex: load SCIP code indexes into a searchable SQLite store
//!
//! Usage:
//!   scipdex populate [path]      Load <path>/index.scip into the store
//!   scipdex populate --incremental  Upsert without wiping prior data
//!   scipdex search <regex>       Find symbols matching a pattern
//!   scipdex refs <symbol>        List every occurrence of a symbol
//!   scipdex def <symbol>         Find a symbol's definition
//!   scipdex stats                Show index statistics
//!   scipdex status [path]        Show store statistics
//!   scipdex grep <query>         Full-text search over file contents

use std::env;

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use scipdex::cli::{
    def_command, grep_command, populate_command, refs_command, search_command, stats_command,
    status_command,
};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    match args[1].as_str() {
        "populate" => {
            let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
            let incremental = args.iter().any(|a| a == "--incremental");
            setup_logging(verbose);

            let path = args[2..]
                .iter()
                .find(|a| !a.starts_with('-'))
                .map(|s| s.as_str())
                .unwrap_or(".");
            populate_command(path, incremental)?;
        }
        "search" => {
            let Some(pattern) = positional(&args) else {
                eprintln!("Usage: scipdex search <regex> [--json]");
                return Ok(());
            };
            search_command(".", pattern, json_flag(&args))?;
        }
        "refs" => {
            let Some(symbol) = positional(&args) else {
                eprintln!("Usage: scipdex refs <symbol> [--json]");
                return Ok(());
            };
            refs_command(".", symbol, json_flag(&args))?;
        }
        "def" => {
            let Some(symbol) = positional(&args) else {
                eprintln!("Usage: scipdex def <symbol> [--json]");
                return Ok(());
            };
            def_command(".", symbol, json_flag(&args))?;
        }
        "stats" => {
            stats_command(".")?;
        }
        "status" => {
            let path = args.get(2).map(|s| s.as_str()).unwrap_or(".");
            status_command(path)?;
        }
        "grep" => {
            let Some(query) = positional(&args) else {
                eprintln!("Usage: scipdex grep <query>");
                return Ok(());
            };
            grep_command(".", query)?;
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "--version" | "-V" | "version" => {
            print_version();
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
        }
    }

    Ok(())
}

fn positional(args: &[String]) -> Option<&str> {
    args[2..]
        .iter()
        .find(|a| !a.starts_with('-'))
        .map(|s| s.as_str())
}

fn json_flag(args: &[String]) -> bool {
    args.iter().any(|a| a == "--json")
}

fn print_usage() {
    println!(
        r#"scipdex: load SCIP code indexes into a searchable SQLite store

USAGE:
    scipdex <COMMAND> [OPTIONS]

COMMANDS:
    populate [path]        Load <path>/index.scip into <path>/.scipdex/index.db
        --incremental      Upsert by key instead of wiping prior data
        --verbose, -v      Enable debug logging
    search <regex>         Find symbols whose identifier matches a pattern
    refs <symbol>          List every occurrence of an exact identifier
    def <symbol>           Find a symbol's definition occurrence
    stats                  Show in-memory index statistics
    status [path]          Show relational store statistics
    grep <query>           Full-text search over stored file contents
    help                   Show this help message

The search, refs, def, and stats commands add --json for machine output.

EXAMPLES:
    scipdex populate                     # Load ./index.scip
    scipdex populate ~/projects/crm -v   # Load with debug logging
    scipdex search 'dataProvider'        # Pattern search
    scipdex def 'scip-typescript npm crm 1.0.0 src/deals.ts/closeDeal().'
    scipdex grep 'soft delete'           # Keyword search over file contents
"#
    );
}

fn print_version() {
    println!("scipdex {}", env!("CARGO_PKG_VERSION"));
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}
