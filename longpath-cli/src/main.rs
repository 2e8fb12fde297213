//! Main entry point for the longpath CLI.
//!
//! This is the command-line interface for the longpath library.
//! It provides commands for working with extended-length paths:
//! - `normalize`: Print the canonical form of a path
//! - `regular`: Print the regular form of a canonical path
//! - `mkdir`: Create a directory tree
//! - `short` / `long`: Convert between 8.3 and long names

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Route library records to stderr at the requested verbosity
    if let Err(e) = longpath::init_logger(cli.verbose, cli.quiet).install() {
        eprintln!("Warning: failed to install logger: {e}");
    }

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        quiet: cli.quiet,
        config_file: cli.config,
        volumes: cli.map_volume,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Normalize(cmd) => cmd.execute(&global),
        cli::Command::Regular(cmd) => cmd.execute(&global),
        cli::Command::Mkdir(cmd) => cmd.execute(&global),
        cli::Command::Short(cmd) => cmd.execute(&global),
        cli::Command::Long(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
