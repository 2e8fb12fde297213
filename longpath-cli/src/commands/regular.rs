//! Command to print the regular form of a path.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;

/// Print a path without its extended-length prefix.
#[derive(Args)]
pub struct RegularCommand {
    /// Path to convert
    #[arg(value_name = "PATH")]
    pub path: String,
}

impl RegularCommand {
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        println!("{}", longpath::to_regular_form(&self.path)?);
        Ok(())
    }
}
