//! Configuration file discovery and loading.
//!
//! This module locates the user configuration file and loads explicit
//! configuration files with their precedence.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Directory under the home directory holding the user configuration.
pub const USER_CONFIG_DIR: &str = ".longpath";

/// File name of the user configuration.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Configuration source with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration from files.
///
/// # Examples
///
/// ```no_run
/// use longpath::config::ConfigLoader;
///
/// let sources = ConfigLoader::load_all(None, None).unwrap();
/// println!("Found {} configuration sources", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the user configuration and an optional explicit file.
    ///
    /// Sources are returned lowest precedence first:
    /// 1. User config at `~/.longpath/config.yaml`, or `{user_dir}/config.yaml`
    ///    when `user_dir` is given (precedence 1, skipped when missing)
    /// 2. The explicit `config_file` (precedence 2, must exist)
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, or if the home
    /// directory is needed but cannot be determined.
    pub fn load_all(user_dir: Option<&Path>, config_file: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        if let Some(user_config) = Self::load_user_config(user_dir)? {
            sources.push(user_config);
        }

        if let Some(path) = config_file {
            sources.push(ConfigSource {
                path: path.to_path_buf(),
                precedence: 2,
                config: Self::load_file(path)?,
            });
        }

        sources.sort_by_key(|s| s.precedence);
        Ok(sources)
    }

    fn load_user_config(user_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let config_path = match user_dir {
            Some(dir) => dir.join(CONFIG_FILE_NAME),
            None => Self::user_config_path()?,
        };

        if !config_path.exists() {
            log::trace!("no user config at '{}'", config_path.display());
            return Ok(None);
        }

        let config = Self::load_file(&config_path)?;
        Ok(Some(ConfigSource {
            path: config_path,
            precedence: 1,
            config,
        }))
    }

    /// Load and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the file if it cannot be read, and
    /// [`Error::Configuration`] if the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::Validation {
            field: path.display().to_string(),
            message: format!("Failed to read configuration file: {e}"),
        })?;

        log::debug!("loading configuration from '{}'", path.display());
        let config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// The default user configuration path, `~/.longpath/config.yaml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn user_config_path() -> Result<PathBuf> {
        let home = home::home_dir().ok_or_else(|| Error::Validation {
            field: "home".into(),
            message: "Cannot determine the home directory".into(),
        })?;
        Ok(home.join(USER_CONFIG_DIR).join(CONFIG_FILE_NAME))
    }
}
