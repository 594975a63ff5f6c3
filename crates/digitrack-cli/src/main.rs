//! digitrack - catalog and digitization tracker for a library archive.
//!
//! Parses structured file names, records works in a local SQLite catalog
//! and bulk-imports catalog rows from CSV and spreadsheet files.

mod cli;
mod commands;
mod logging;
mod output;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = commands::resolve_config(&cli)?;

    logging::init(&config.log_level, cli.log_json)?;

    commands::run(cli, config)
}
