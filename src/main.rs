//! # scour command-line entry point
//!
//! ```bash
//! scour inspect --table public.customers
//! scour outliers --file customers.csv --json
//! scour clean --table customers --recipe customers.recipe.json --backup before.csv
//! ```
//!
//! Every subcommand is async underneath (database access), so `main` builds a
//! Tokio runtime and blocks on the selected command.

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout)] // Allow println! in main binary

mod cli;

use clap::Parser as _;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = cli::Cli::parse();

    // Set RUST_LOG=debug to see detailed logs
    scour::logging::init()?;

    tokio::runtime::Runtime::new()?.block_on(cli::run_command(cli.command))?;
    Ok(())
}
