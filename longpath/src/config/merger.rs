//! Configuration merging logic.
//!
//! This module implements hierarchical merging of configuration sources,
//! where higher-precedence sources override lower-precedence ones.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configurations with precedence rules.
///
/// # Examples
///
/// ```
/// use longpath::config::{Config, ConfigMerger};
///
/// let mut result = Config { compress: Some(false), ..Default::default() };
/// let high = Config { compress: Some(true), ..Default::default() };
///
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.compress, Some(true));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - Buffer policy: atomic replacement
    /// - Volumes: accumulated, a later mapping of the same root wins
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.format.is_some() {
            target.format = source.format;
        }

        if source.compress.is_some() {
            target.compress = source.compress;
        }

        if source.check_invalid_chars.is_some() {
            target.check_invalid_chars = source.check_invalid_chars;
        }

        if source.base_dir.is_some() {
            target.base_dir.clone_from(&source.base_dir);
        }

        if source.path_buffer.is_some() {
            target.path_buffer = source.path_buffer;
        }

        if let Some(ref source_volumes) = source.volumes {
            let volumes = target.volumes.get_or_insert_with(Vec::new);
            for volume in source_volumes {
                volumes.retain(|v| !v.root.eq_ignore_ascii_case(&volume.root));
                volumes.push(volume.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::VolumeMapping;
    use crate::path::{PathBufferPolicy, PathFormat};
    use std::path::PathBuf;

    fn make_source(precedence: u8, config: Config) -> ConfigSource {
        ConfigSource {
            path: PathBuf::from(format!("config-{precedence}.yaml")),
            precedence,
            config,
        }
    }

    fn volume(root: &str, host: &str) -> VolumeMapping {
        VolumeMapping {
            root: root.to_string(),
            host: PathBuf::from(host),
        }
    }

    #[test]
    fn test_merge_overwrites() {
        let low = Config {
            format: Some(PathFormat::FullPath),
            compress: Some(true),
            ..Default::default()
        };
        let high = Config {
            format: Some(PathFormat::LongFullPath),
            ..Default::default()
        };

        let merged = ConfigMerger::merge(vec![make_source(1, low), make_source(2, high)]);
        assert_eq!(merged.format, Some(PathFormat::LongFullPath));
        assert_eq!(merged.compress, Some(true));
    }

    #[test]
    fn test_merge_buffer_policy_replaced() {
        let mut target = Config {
            path_buffer: Some(PathBufferPolicy {
                initial_capacity: 10,
                max_attempts: 9,
            }),
            ..Default::default()
        };
        let source = Config {
            path_buffer: Some(PathBufferPolicy::default()),
            ..Default::default()
        };
        ConfigMerger::merge_into(&mut target, &source);
        assert_eq!(target.path_buffer, Some(PathBufferPolicy::default()));
    }

    #[test]
    fn test_merge_volumes_accumulate() {
        let mut target = Config {
            volumes: Some(vec![volume("C:", "/a"), volume("D:", "/d")]),
            ..Default::default()
        };
        let source = Config {
            volumes: Some(vec![volume("c:", "/b")]),
            ..Default::default()
        };
        ConfigMerger::merge_into(&mut target, &source);
        assert_eq!(target.volumes, Some(vec![volume("D:", "/d"), volume("c:", "/b")]));
    }

    #[test]
    fn test_merge_none_values_dont_overwrite() {
        let mut target = Config {
            base_dir: Some(r"C:\work".to_string()),
            ..Default::default()
        };
        ConfigMerger::merge_into(&mut target, &Config::default());
        assert_eq!(target.base_dir.as_deref(), Some(r"C:\work"));
        assert!(target.volumes.is_none());
    }
}
