//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `LONGPATH_*` environment variables that
//! override configuration file values.

use std::env;
use std::path::PathBuf;

use crate::config::schema::{Config, VolumeMapping};
use crate::error::{Error, Result};
use crate::path::PathFormat;

/// Handles environment variable overrides for configuration.
///
/// | Variable                    | Field                          |
/// |-----------------------------|--------------------------------|
/// | `LONGPATH_FORMAT`           | `format`                       |
/// | `LONGPATH_COMPRESS`         | `compress`                     |
/// | `LONGPATH_CHECK_CHARS`      | `check_invalid_chars`          |
/// | `LONGPATH_BASE_DIR`         | `base_dir`                     |
/// | `LONGPATH_BUFFER_CAPACITY`  | `path_buffer.initial_capacity` |
/// | `LONGPATH_BUFFER_ATTEMPTS`  | `path_buffer.max_attempts`     |
/// | `LONGPATH_VOLUMES`          | `volumes`, as `C=/dir;\\srv\share=/dir2` |
///
/// # Examples
///
/// ```no_run
/// use longpath::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., unknown format, non-numeric capacity, invalid boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(format) = env::var("LONGPATH_FORMAT") {
            config.format = Some(format.parse::<PathFormat>().map_err(|_| Error::Validation {
                field: "LONGPATH_FORMAT".into(),
                message: format!(
                    "Invalid format '{format}' (expected relative-path, full-path or long-full-path)"
                ),
            })?);
        }

        if let Ok(val) = env::var("LONGPATH_COMPRESS") {
            config.compress = Some(Self::parse_bool("LONGPATH_COMPRESS", &val)?);
        }

        if let Ok(val) = env::var("LONGPATH_CHECK_CHARS") {
            config.check_invalid_chars = Some(Self::parse_bool("LONGPATH_CHECK_CHARS", &val)?);
        }

        if let Ok(base) = env::var("LONGPATH_BASE_DIR") {
            config.base_dir = Some(base);
        }

        Self::apply_buffer_overrides(config)?;

        if let Ok(volumes) = env::var("LONGPATH_VOLUMES") {
            let mappings = Self::parse_volumes(&volumes)?;
            match &mut config.volumes {
                Some(existing) => existing.extend(mappings),
                None => config.volumes = Some(mappings),
            }
        }

        Ok(())
    }

    fn apply_buffer_overrides(config: &mut Config) -> Result<()> {
        let mut policy = config.path_buffer.unwrap_or_default();
        let mut modified = false;

        if let Ok(capacity) = env::var("LONGPATH_BUFFER_CAPACITY") {
            policy.initial_capacity = Self::parse_count("LONGPATH_BUFFER_CAPACITY", &capacity)?;
            modified = true;
        }

        if let Ok(attempts) = env::var("LONGPATH_BUFFER_ATTEMPTS") {
            policy.max_attempts = Self::parse_count("LONGPATH_BUFFER_ATTEMPTS", &attempts)?;
            modified = true;
        }

        if modified {
            config.path_buffer = Some(policy);
        }
        Ok(())
    }

    fn parse_count(field: &str, s: &str) -> Result<usize> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: "Must be a positive integer".into(),
        })
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    /// Parse `ROOT=DIR` pairs separated by semicolons.
    ///
    /// A bare drive letter is accepted as a root and gets its colon added.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a pair without a root or directory.
    pub fn parse_volumes(s: &str) -> Result<Vec<VolumeMapping>> {
        let mut mappings = Vec::new();

        for part in s.split(';') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            mappings.push(Self::parse_volume("LONGPATH_VOLUMES", part)?);
        }

        Ok(mappings)
    }

    /// Parse a single `ROOT=DIR` pair, reporting problems against `field`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the pair is malformed.
    pub fn parse_volume(field: &str, s: &str) -> Result<VolumeMapping> {
        let (root, host) = s.split_once('=').ok_or_else(|| Error::Validation {
            field: field.into(),
            message: format!("Invalid volume mapping '{s}' (expected ROOT=DIR)"),
        })?;

        let root = root.trim();
        let host = host.trim();
        if root.is_empty() || host.is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: format!("Invalid volume mapping '{s}' (expected ROOT=DIR)"),
            });
        }

        let root = if root.len() == 1 && root.as_bytes()[0].is_ascii_alphabetic() {
            format!("{root}:")
        } else {
            root.to_string()
        };
        Ok(VolumeMapping {
            root,
            host: PathBuf::from(host),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            "LONGPATH_FORMAT",
            "LONGPATH_COMPRESS",
            "LONGPATH_CHECK_CHARS",
            "LONGPATH_BASE_DIR",
            "LONGPATH_BUFFER_CAPACITY",
            "LONGPATH_BUFFER_ATTEMPTS",
            "LONGPATH_VOLUMES",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_parse_bool_variants() {
        assert!(EnvironmentConfig::parse_bool("test", "YES").unwrap());
        assert!(!EnvironmentConfig::parse_bool("test", "off").unwrap());
        assert!(EnvironmentConfig::parse_bool("test", "maybe").is_err());
    }

    #[test]
    fn test_parse_volumes() {
        let mappings = EnvironmentConfig::parse_volumes(r"C=/srv/c; \\srv\share=/srv/share ;").unwrap();
        assert_eq!(mappings.len(), 2);
        assert_eq!(mappings[0].root, "C:");
        assert_eq!(mappings[0].host, PathBuf::from("/srv/c"));
        assert_eq!(mappings[1].root, r"\\srv\share");
    }

    #[test]
    fn test_parse_volumes_empty() {
        assert!(EnvironmentConfig::parse_volumes("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_volume_invalid() {
        assert!(EnvironmentConfig::parse_volumes("C:/srv/c").is_err());
        assert!(EnvironmentConfig::parse_volumes("=/srv/c").is_err());
        assert!(EnvironmentConfig::parse_volumes("D=").is_err());
    }

    #[test]
    #[serial]
    fn test_apply_overrides_no_env_vars() {
        clear_env();
        let mut config = Config::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_apply_overrides() {
        clear_env();
        env::set_var("LONGPATH_FORMAT", "full");
        env::set_var("LONGPATH_COMPRESS", "1");
        env::set_var("LONGPATH_BUFFER_ATTEMPTS", "7");
        env::set_var("LONGPATH_VOLUMES", "E=/mnt/e");

        let mut config = Config {
            volumes: Some(vec![VolumeMapping {
                root: "C:".into(),
                host: PathBuf::from("/mnt/c"),
            }]),
            ..Default::default()
        };
        let result = EnvironmentConfig::apply_overrides(&mut config);
        clear_env();
        result.unwrap();

        assert_eq!(config.format, Some(PathFormat::FullPath));
        assert_eq!(config.compress, Some(true));
        let policy = config.path_buffer.unwrap();
        assert_eq!(policy.max_attempts, 7);
        assert_eq!(policy.initial_capacity, 260);
        assert_eq!(config.volumes.map(|v| v.len()), Some(2));
    }

    #[test]
    #[serial]
    fn test_apply_overrides_invalid_format() {
        clear_env();
        env::set_var("LONGPATH_FORMAT", "sideways");
        let result = EnvironmentConfig::apply_overrides(&mut Config::default());
        clear_env();
        assert!(matches!(result, Err(Error::Validation { field, .. }) if field == "LONGPATH_FORMAT"));
    }

    #[test]
    #[serial]
    fn test_apply_overrides_invalid_count() {
        clear_env();
        env::set_var("LONGPATH_BUFFER_CAPACITY", "-3");
        let result = EnvironmentConfig::apply_overrides(&mut Config::default());
        clear_env();
        assert!(result.is_err());
    }
}
