//! Library exports for longpath-cli.
//!
//! This module exports the CLI structure so it can be rendered into man pages
//! and completion scripts.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
