//! Configuration validation.

use crate::config::schema::{Config, VolumeMapping};
use crate::error::{Error, Result};
use crate::path::prefix::{self, PrefixKind};
use crate::path::PathBufferPolicy;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use longpath::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first invalid field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref policy) = config.path_buffer {
            Self::validate_buffer_policy(policy)?;
        }

        if let Some(ref base) = config.base_dir {
            Self::validate_base_dir(base)?;
        }

        if let Some(ref volumes) = config.volumes {
            for volume in volumes {
                Self::validate_volume(volume)?;
            }
        }

        Ok(())
    }

    fn validate_buffer_policy(policy: &PathBufferPolicy) -> Result<()> {
        if policy.initial_capacity == 0 {
            return Err(Error::Validation {
                field: "path_buffer.initial_capacity".into(),
                message: "Capacity must be greater than 0".into(),
            });
        }
        if policy.max_attempts == 0 {
            return Err(Error::Validation {
                field: "path_buffer.max_attempts".into(),
                message: "At least one attempt is required".into(),
            });
        }
        Ok(())
    }

    fn validate_base_dir(base: &str) -> Result<()> {
        let regular = base.replace('/', "\\");
        if prefix::is_drive_rooted(&regular) || PrefixKind::of(&regular) == PrefixKind::Unc {
            return Ok(());
        }
        Err(Error::Validation {
            field: "base_dir".into(),
            message: format!("'{base}' is neither drive-rooted nor a network share"),
        })
    }

    /// A mapped root is a drive (`C:`) or a share (`\\server\share`).
    fn validate_volume(volume: &VolumeMapping) -> Result<()> {
        if !Self::is_mappable_root(&volume.root) {
            return Err(Error::Validation {
                field: "volumes.root".into(),
                message: format!(
                    "'{}' is not a drive (C:) or a network share (\\\\server\\share)",
                    volume.root
                ),
            });
        }
        if volume.host.as_os_str().is_empty() {
            return Err(Error::Validation {
                field: "volumes.host".into(),
                message: format!("No host directory for '{}'", volume.root),
            });
        }
        Ok(())
    }

    pub(crate) fn is_mappable_root(root: &str) -> bool {
        let root = root.trim_end_matches(prefix::is_separator);
        let bytes = root.as_bytes();
        if bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
            return true;
        }

        let Some(rest) = root.strip_prefix(r"\\") else {
            return false;
        };
        let parts: Vec<&str> = rest.split(prefix::is_separator).collect();
        parts.len() == 2
            && parts
                .iter()
                .all(|part| !part.is_empty() && !matches!(*part, "?" | "." | "UNC"))
    }
}
