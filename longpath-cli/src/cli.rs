//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, LongCommand, MkdirCommand, NormalizeCommand, RegularCommand, ShortCommand,
};
use clap::{Parser, Subcommand};
use longpath::config::{EnvironmentConfig, VolumeMapping};
use std::path::PathBuf;

/// Canonicalize Windows paths and create directory trees.
#[derive(Parser)]
#[command(name = "longpath")]
#[command(
    version,
    about = "Canonicalize extended-length paths and create directory trees",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Load configuration from this file
    #[arg(long, value_name = "PATH", global = true, env = "LONGPATH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Map a drive or share onto a host directory (repeatable)
    #[arg(
        long = "map-volume",
        value_name = "ROOT=DIR",
        global = true,
        value_parser = parse_map_volume
    )]
    pub map_volume: Vec<VolumeMapping>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the canonical extended-length form of a path
    Normalize(NormalizeCommand),

    /// Print the regular form of a canonical path
    Regular(RegularCommand),

    /// Create a directory and every missing parent
    Mkdir(MkdirCommand),

    /// Print the 8.3 short form of an existing path
    Short(ShortCommand),

    /// Print the long form of an existing path
    Long(LongCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}

fn parse_map_volume(s: &str) -> Result<VolumeMapping, String> {
    EnvironmentConfig::parse_volume("--map-volume", s).map_err(|e| e.to_string())
}
