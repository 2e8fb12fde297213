//! Normalize command implementation.
//!
//! This module implements the `normalize` command, which prints the canonical
//! extended-length form of a path.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;
use longpath::PathFormat;

/// Print the canonical form of a path.
#[derive(Args)]
pub struct NormalizeCommand {
    /// Path to normalize
    #[arg(value_name = "PATH")]
    pub path: String,

    /// How much normalization the input needs (default: from configuration)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<PathFormat>,

    /// Resolve relative paths against this directory
    #[arg(long, value_name = "DIR", env = "LONGPATH_BASE_DIR")]
    pub base: Option<String>,

    /// Reject illegal path characters
    #[arg(long)]
    pub check_chars: bool,

    /// Print the result without the extended-length prefix
    #[arg(long)]
    pub regular: bool,
}

impl NormalizeCommand {
    /// Execute the normalize command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;

        let mut canonicalizer = config.canonicalizer();
        if let Some(base) = self.base {
            canonicalizer = canonicalizer.with_base_dir(base);
        }
        if self.check_chars {
            canonicalizer = canonicalizer.with_invalid_char_check(true);
        }

        let format = self.format.unwrap_or_else(|| config.format());
        let canonical = canonicalizer.normalize(&self.path, format)?;

        if self.regular {
            println!("{}", canonical.to_regular());
        } else {
            println!("{canonical}");
        }
        Ok(())
    }
}
