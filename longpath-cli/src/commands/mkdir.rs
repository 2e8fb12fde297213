//! Mkdir command implementation.
//!
//! This module implements the `mkdir` command, which creates a directory and
//! every missing parent, optionally from a template, with access control or
//! with compression.

use crate::error::CliError;
use crate::utils::{load_configuration, open_file_system, GlobalOptions};
use clap::Args;
use longpath::{AccessControl, CanonicalPath, DirectoryTreeBuilder, PathFormat};
use serde::Serialize;

/// Create a directory and every missing parent.
#[derive(Args)]
pub struct MkdirCommand {
    /// Directory to create
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Copy attributes from this directory onto every new level
    #[arg(long, value_name = "DIR")]
    pub template: Option<String>,

    /// Compress every new level
    #[arg(long)]
    pub compress: bool,

    /// Permission bits for new levels, in octal (host backend)
    #[arg(long, value_name = "MODE", value_parser = parse_mode)]
    pub mode: Option<u32>,

    /// Security descriptor for new levels, in SDDL form
    #[arg(long, value_name = "SDDL")]
    pub sddl: Option<String>,

    /// How much normalization the input needs (default: from configuration)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<PathFormat>,

    /// Resolve relative paths against this directory
    #[arg(long, value_name = "DIR", env = "LONGPATH_BASE_DIR")]
    pub base: Option<String>,

    /// Show the levels that would be created without creating them
    #[arg(long)]
    pub dry_run: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// The outcome of a `mkdir` run, as printed with `--json`.
#[derive(Debug, Serialize)]
struct MkdirReport {
    path: String,
    canonical: String,
    created: Vec<String>,
    dry_run: bool,
}

impl MkdirReport {
    fn new<'a>(
        target: &CanonicalPath,
        levels: impl IntoIterator<Item = &'a CanonicalPath>,
        dry_run: bool,
    ) -> Self {
        Self {
            path: target.to_regular(),
            canonical: target.to_string(),
            created: levels.into_iter().map(CanonicalPath::to_regular).collect(),
            dry_run,
        }
    }
}

impl MkdirCommand {
    /// Execute the mkdir command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let fs = open_file_system(&config);

        let mut canonicalizer = config.canonicalizer();
        if let Some(base) = self.base.clone() {
            canonicalizer = canonicalizer.with_base_dir(base);
        }
        let builder = DirectoryTreeBuilder::new(&*fs).with_canonicalizer(canonicalizer);

        let mut options = config.create_options();
        if let Some(format) = self.format {
            options = options.with_format(format);
        }
        if self.compress {
            options = options.with_compression(true);
        }
        if let Some(template) = self.template.clone() {
            options = options.with_template(template);
        }
        if let Some(access) = self.access_control() {
            options = options.with_access_control(access);
        }

        let report = if self.dry_run {
            let plan = builder.plan(&self.path, &options)?;
            if !global.quiet && !self.json {
                eprintln!("Dry run: would {}", plan.description());
            }
            MkdirReport::new(plan.target(), plan.levels(), true)
        } else {
            let handle = builder.create_all(&self.path, &options)?;
            if !handle.was_created() && !global.quiet && !self.json {
                eprintln!("Directory already exists: {}", handle.regular_path());
            }
            MkdirReport::new(handle.path(), handle.created_levels(), false)
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            for level in &report.created {
                println!("{level}");
            }
        }
        Ok(())
    }

    fn access_control(&self) -> Option<AccessControl> {
        if self.mode.is_none() && self.sddl.is_none() {
            return None;
        }

        let mut access = AccessControl::new();
        if let Some(mode) = self.mode {
            access = access.with_mode(mode);
        }
        if let Some(ref sddl) = self.sddl {
            access = access.with_sddl(sddl.clone());
        }
        Some(access)
    }
}

fn parse_mode(s: &str) -> Result<u32, String> {
    let digits = s.trim_start_matches("0o");
    u32::from_str_radix(digits, 8)
        .ok()
        .filter(|mode| *mode <= 0o7777)
        .ok_or_else(|| format!("invalid mode '{s}' (expected octal such as 755)"))
}
