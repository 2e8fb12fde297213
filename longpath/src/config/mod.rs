//! Configuration system for longpath.
//!
//! This module provides layered configuration with support for:
//! - YAML configuration files (user config and an explicit file)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of the merged result
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`LONGPATH_*`)
//! 3. An explicit configuration file (via `ConfigBuilder::with_config_file`)
//! 4. User config (`~/.longpath/config.yaml`)
//! 5. Built-in defaults
//!
//! # Examples
//!
//! ```
//! use longpath::config::{Config, ConfigBuilder, VolumeMapping};
//!
//! let custom = Config {
//!     volumes: Some(vec![VolumeMapping {
//!         root: "C:".to_string(),
//!         host: std::env::temp_dir(),
//!     }]),
//!     ..Default::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! assert!(config.host_file_system().is_mapped());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, VolumeMapping};
pub use validator::ConfigValidator;
