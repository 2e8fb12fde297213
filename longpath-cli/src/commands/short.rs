//! Command to print the 8.3 short form of an existing path.

use crate::error::CliError;
use crate::utils::{load_configuration, open_file_system, GlobalOptions};
use clap::Args;

/// Print the short form of an existing path.
#[derive(Args)]
pub struct ShortCommand {
    /// Existing path to convert
    #[arg(value_name = "PATH")]
    pub path: String,
}

impl ShortCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let fs = open_file_system(&config);

        let short = config.canonicalizer().to_short_form(&*fs, &self.path)?;
        println!("{short}");
        Ok(())
    }
}
