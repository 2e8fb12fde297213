//! Build script for longpath-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("longpath")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Canonicalize extended-length paths and create directory trees")
        .long_about(
            "Command-line tool for canonicalizing Windows paths into their \
             extended-length form and creating multi-level directory trees",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Load configuration from this file")
                .value_name("PATH")
                .global(true)
                .env("LONGPATH_CONFIG"),
        )
        .arg(
            Arg::new("map-volume")
                .long("map-volume")
                .help("Map a drive or share onto a host directory (repeatable)")
                .value_name("ROOT=DIR")
                .global(true)
                .action(ArgAction::Append),
        )
        .subcommands(vec![
            Command::new("normalize")
                .about("Print the canonical extended-length form of a path")
                .long_about("Resolve a path and add the extended-length prefix"),
            Command::new("regular")
                .about("Print the regular form of a canonical path")
                .long_about("Strip the extended-length prefix from a path"),
            Command::new("mkdir")
                .about("Create a directory and every missing parent")
                .long_about(
                    "Create a directory tree, optionally from a template, with access control \
                     or compression applied to every new level",
                ),
            Command::new("short")
                .about("Print the 8.3 short form of an existing path")
                .long_about("Query the short name of every component of an existing path"),
            Command::new("long")
                .about("Print the long form of an existing path")
                .long_about("Expand the short names of an existing path"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("longpath.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
