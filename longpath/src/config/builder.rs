//! Layered configuration construction.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds the effective configuration from every source.
///
/// # Examples
///
/// ```
/// use longpath::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config { compress: Some(true), ..Default::default() })
///     .build()
///     .unwrap();
/// assert_eq!(config.compress, Some(true));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    skip_files: bool,
    skip_env: bool,
    user_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// A builder reading every source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Don't read any configuration file.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignore `LONGPATH_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Read the user configuration from `dir` instead of `~/.longpath`.
    #[must_use]
    pub fn with_user_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.user_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Also read `path`, above the user configuration.
    #[must_use]
    pub fn with_config_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Programmatic overrides with the highest precedence.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Merge every source and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an environment
    /// variable is malformed, or the merged configuration is invalid.
    pub fn build(self) -> Result<Config> {
        let mut config = if self.skip_files {
            Config::default()
        } else {
            let sources =
                ConfigLoader::load_all(self.user_dir.as_deref(), self.config_file.as_deref())?;
            ConfigMerger::merge(sources)
        };

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}
