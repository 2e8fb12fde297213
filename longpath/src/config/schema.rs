//! Configuration schema definitions.
//!
//! This module defines the configuration structure for longpath: how paths are
//! canonicalized by default, how creation calls behave, and which Windows
//! roots are mapped onto host directories.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::create::CreateOptions;
use crate::native::HostFileSystem;
use crate::path::{PathBufferPolicy, PathCanonicalizer, PathFormat};

/// Complete configuration structure.
///
/// Every field is optional so configurations from several sources can be
/// layered on top of each other.
///
/// # Examples
///
/// ```
/// use longpath::config::{Config, VolumeMapping};
/// use longpath::path::PathFormat;
///
/// let config = Config {
///     format: Some(PathFormat::FullPath),
///     volumes: Some(vec![VolumeMapping {
///         root: "C:".to_string(),
///         host: "/srv/c".into(),
///     }]),
///     ..Default::default()
/// };
/// assert_eq!(config.create_options().format, PathFormat::FullPath);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default path format hint for inputs.
    pub format: Option<PathFormat>,

    /// Compress newly created directories.
    pub compress: Option<bool>,

    /// Reject illegal path characters before resolving.
    pub check_invalid_chars: Option<bool>,

    /// Directory relative paths resolve against instead of the current directory.
    pub base_dir: Option<String>,

    /// Buffer sizing for short/long name queries.
    pub path_buffer: Option<PathBufferPolicy>,

    /// Windows roots mapped onto host directories.
    #[serde(default)]
    pub volumes: Option<Vec<VolumeMapping>>,
}

/// A drive or share mapped onto a host directory.
///
/// # Examples
///
/// ```
/// use longpath::config::VolumeMapping;
///
/// let mapping: VolumeMapping = serde_yaml::from_str("root: '\\\\srv\\share'\nhost: /mnt/share").unwrap();
/// assert_eq!(mapping.root, r"\\srv\share");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct VolumeMapping {
    /// A drive (`C:`) or share (`\\server\share`).
    pub root: String,
    /// The host directory standing in for the root.
    pub host: PathBuf,
}

impl Config {
    /// The configured format, or the default.
    #[must_use]
    pub fn format(&self) -> PathFormat {
        self.format.unwrap_or_default()
    }

    /// A canonicalizer carrying the configured settings.
    #[must_use]
    pub fn canonicalizer(&self) -> PathCanonicalizer {
        let mut canonicalizer = PathCanonicalizer::new()
            .with_buffer_policy(self.path_buffer.unwrap_or_default())
            .with_invalid_char_check(self.check_invalid_chars.unwrap_or(false));
        if let Some(base) = &self.base_dir {
            canonicalizer = canonicalizer.with_base_dir(base.clone());
        }
        canonicalizer
    }

    /// Creation options carrying the configured defaults.
    #[must_use]
    pub fn create_options(&self) -> CreateOptions {
        CreateOptions::new()
            .with_format(self.format())
            .with_compression(self.compress.unwrap_or(false))
    }

    /// A host backend with every configured volume mapped.
    #[must_use]
    pub fn host_file_system(&self) -> HostFileSystem {
        self.volumes
            .iter()
            .flatten()
            .fold(HostFileSystem::new(), |fs, volume| {
                fs.with_mapping(&volume.root, volume.host.clone())
            })
    }
}
