//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading and backend selection.

use crate::error::CliError;
use longpath::config::VolumeMapping;
use longpath::native::default_file_system;
use longpath::{Config, ConfigBuilder, NativeFileSystem};
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Explicit configuration file.
    pub config_file: Option<PathBuf>,

    /// Volume mappings given on the command line.
    pub volumes: Vec<VolumeMapping>,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. The `--config` file, then the user config file
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();

    if let Some(ref path) = global.config_file {
        builder = builder.with_config_file(path);
    }

    if !global.volumes.is_empty() {
        builder = builder.with_config(Config {
            volumes: Some(global.volumes.clone()),
            ..Default::default()
        });
    }

    builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// The backend commands run against.
///
/// A configuration with volume mappings gets a host backend addressing those
/// mappings; otherwise the platform default is used.
pub fn open_file_system(config: &Config) -> Box<dyn NativeFileSystem> {
    if config.volumes.as_ref().is_some_and(|v| !v.is_empty()) {
        log::debug!("using host backend with mapped volumes");
        Box::new(config.host_file_system())
    } else {
        default_file_system()
    }
}
