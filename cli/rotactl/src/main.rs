//! rota - CLI for the roster assignment engine.
//!
//! Reads roster snapshots from local files, runs one assignment pass and
//! prints the result. Works entirely offline.

use anyhow::Result;
use clap::Parser;

mod commands;
mod config;
mod error;
mod logging;
mod output;
mod request;

use commands::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init();

    if let Err(e) = cli.run() {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
