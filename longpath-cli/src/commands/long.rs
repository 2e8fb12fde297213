//! Command to print the long form of an existing path.

use crate::error::CliError;
use crate::utils::{load_configuration, open_file_system, GlobalOptions};
use clap::Args;

/// Print the long form of an existing path.
#[derive(Args)]
pub struct LongCommand {
    /// Existing path to convert
    #[arg(value_name = "PATH")]
    pub path: String,
}

impl LongCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let fs = open_file_system(&config);

        let long = config.canonicalizer().to_long_form(&*fs, &self.path, None)?;
        println!("{long}");
        Ok(())
    }
}
