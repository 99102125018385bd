mod agents;
mod cli;
mod config;
mod error;
mod store;
mod utils;
mod version;
mod workflow;

use clap::{CommandFactory, Parser};
use cli::Cli;
use colored::Colorize;
use error::SyncError;
use std::path::Path;
use std::process;

fn main() {
    let cli = Cli::parse();

    let result = workflow::execute_sync(
        &cli.path,
        &cli.new_version,
        cli.config.as_deref().map(Path::new),
        cli.verbose,
    );

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if matches!(e, SyncError::InvalidFormat(_)) {
            eprintln!("Expected format: X.Y.Z (e.g., 1.0.0)");
            eprintln!("{}", Cli::command().render_usage());
        }
        process::exit(1);
    }
}
