//! Core types for path canonicalization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::path::prefix::{self, PrefixKind, DIRECTORY_SEPARATOR};
use crate::path::regular;

/// How much work the canonicalizer has to do on a caller-supplied path.
///
/// The hint is a guarantee made by the caller. A wrong hint is a caller
/// error: beyond a few safety checks (empty input, a non-absolute result, a
/// bare drive designator) the canonicalizer trusts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathFormat {
    /// The path may be relative and may contain `.`/`..` segments, forward
    /// slashes and repeated separators. Full normalization is performed.
    #[default]
    RelativePath,
    /// The path is absolute and only needs the extended-length prefix.
    FullPath,
    /// The path is already canonical.
    LongFullPath,
}

impl PathFormat {
    /// All formats, in increasing order of trust.
    pub const ALL: [Self; 3] = [Self::RelativePath, Self::FullPath, Self::LongFullPath];

    /// The configuration spelling of this format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RelativePath => "relative-path",
            Self::FullPath => "full-path",
            Self::LongFullPath => "long-full-path",
        }
    }
}

impl fmt::Display for PathFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PathFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "relative-path" | "relative" => Ok(Self::RelativePath),
            "full-path" | "full" => Ok(Self::FullPath),
            "long-full-path" | "long" => Ok(Self::LongFullPath),
            _ => Err(Error::Validation {
                field: "format".to_string(),
                message: format!(
                    "unknown path format '{s}', expected relative-path, full-path or long-full-path"
                ),
            }),
        }
    }
}

/// Post-processing options applied by full-path resolution.
///
/// # Examples
///
/// ```
/// use longpath::path::FullPathOptions;
///
/// let options = FullPathOptions::canonical().with_invalid_char_check(true);
/// assert!(options.trim_end);
/// assert!(options.remove_trailing_separator);
/// assert!(options.check_invalid_chars);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FullPathOptions {
    /// Remove trailing whitespace.
    pub trim_end: bool,
    /// Remove trailing separators that are not part of the root.
    pub remove_trailing_separator: bool,
    /// Ensure the result ends with a separator.
    pub add_trailing_separator: bool,
    /// Reject `< > " |`, control characters, and `?`/`*` outside a prefix.
    pub check_invalid_chars: bool,
    /// Add the extended-length prefix to the result.
    pub as_long_path: bool,
}

impl FullPathOptions {
    /// The options used to produce canonical paths.
    #[must_use]
    pub const fn canonical() -> Self {
        Self {
            trim_end: true,
            remove_trailing_separator: true,
            add_trailing_separator: false,
            check_invalid_chars: false,
            as_long_path: true,
        }
    }

    /// Enable or disable the invalid-character check.
    #[must_use]
    pub const fn with_invalid_char_check(mut self, check: bool) -> Self {
        self.check_invalid_chars = check;
        self
    }

    /// Request a trailing separator instead of removing one.
    #[must_use]
    pub const fn with_trailing_separator(mut self) -> Self {
        self.add_trailing_separator = true;
        self.remove_trailing_separator = false;
        self
    }

    /// Enable or disable the extended-length prefix.
    #[must_use]
    pub const fn with_long_path(mut self, long: bool) -> Self {
        self.as_long_path = long;
        self
    }
}

/// An absolute path in canonical form.
///
/// A canonical path carries exactly one recognized prefix class (or none, for
/// a plain drive-rooted path), never ends with a separator unless it is a bare
/// root, and is never empty. It is the only form handed to native calls.
///
/// # Examples
///
/// ```
/// use longpath::path::{normalize, PathFormat};
///
/// let path = normalize(r"C:\work\data\", PathFormat::FullPath, None).unwrap();
/// assert_eq!(path.as_str(), r"\\?\C:\work\data");
/// assert_eq!(path.to_regular(), r"C:\work\data");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalPath {
    path: String,
}

impl CanonicalPath {
    /// Wraps an already normalized path, enforcing the canonical invariants.
    ///
    /// Trailing separators beyond the root are removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty or whitespace-only path
    /// and [`Error::Unsupported`] for a path that is not absolute or that uses
    /// the plain UNC form.
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let mut path = path.into();
        if path.trim().is_empty() {
            return Err(Error::InvalidArgument {
                path,
                reason: "path is empty or whitespace".to_string(),
            });
        }

        let kind = PrefixKind::of(&path);
        let absolute = match kind {
            PrefixKind::None => prefix::is_drive_rooted(&path),
            PrefixKind::Unc => false,
            _ => true,
        };
        if !absolute {
            let reason = if kind == PrefixKind::Unc {
                "network paths must carry the extended-length UNC prefix"
            } else {
                "path is not absolute"
            };
            return Err(Error::Unsupported {
                path: regular::clean_error_path(&path),
                reason: reason.to_string(),
            });
        }

        let root = prefix::root_length(&path);
        while path.len() > root && path.ends_with(prefix::is_separator) {
            path.pop();
        }
        Ok(Self { path })
    }

    /// The canonical string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Consumes the path and returns the canonical string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.path
    }

    /// The prefix class of this path.
    #[must_use]
    pub fn prefix(&self) -> PrefixKind {
        PrefixKind::of(&self.path)
    }

    /// The byte length of the root portion.
    #[must_use]
    pub fn root_length(&self) -> usize {
        prefix::root_length(&self.path)
    }

    /// Returns `true` if this path names only a root (`\\?\C:\`, a share).
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.path.len() <= self.root_length()
    }

    /// The regular (unprefixed) form of this path.
    #[must_use]
    pub fn to_regular(&self) -> String {
        regular::regular_form(&self.path)
    }

    /// Returns the parent directory, or `None` for a root.
    ///
    /// # Examples
    ///
    /// ```
    /// use longpath::path::CanonicalPath;
    ///
    /// let path = CanonicalPath::new(r"\\?\C:\a\b").unwrap();
    /// let parent = path.parent().unwrap();
    /// assert_eq!(parent.as_str(), r"\\?\C:\a");
    /// assert_eq!(parent.parent().unwrap().as_str(), r"\\?\C:\");
    /// assert!(parent.parent().unwrap().parent().is_none());
    /// ```
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let root = self.root_length();
        if self.path.len() <= root {
            return None;
        }
        let end = self.path[root..]
            .rfind(DIRECTORY_SEPARATOR)
            .map_or(root, |index| root + index);
        Some(Self {
            path: self.path[..end.max(root)].to_string(),
        })
    }

    /// Every level below the root, root-most first and this path last.
    ///
    /// # Examples
    ///
    /// ```
    /// use longpath::path::CanonicalPath;
    ///
    /// let path = CanonicalPath::new(r"\\?\UNC\server\share\a\b").unwrap();
    /// let levels: Vec<_> = path.levels().iter().map(|l| l.as_str().to_string()).collect();
    /// assert_eq!(levels, vec![
    ///     r"\\?\UNC\server\share\a".to_string(),
    ///     r"\\?\UNC\server\share\a\b".to_string(),
    /// ]);
    /// ```
    #[must_use]
    pub fn levels(&self) -> Vec<Self> {
        let root = self.root_length();
        if self.path.len() <= root {
            return Vec::new();
        }
        let mut levels: Vec<Self> = self.path[root..]
            .match_indices(DIRECTORY_SEPARATOR)
            .filter(|(index, _)| *index > 0)
            .map(|(index, _)| Self {
                path: self.path[..root + index].to_string(),
            })
            .collect();
        levels.push(self.clone());
        levels
    }

    /// The last component, or `None` for a root.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }
        let tail = &self.path[self.root_length()..];
        tail.rsplit(DIRECTORY_SEPARATOR).next()
    }

    /// Appends a single component.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `component` is empty or contains
    /// a separator.
    pub fn join(&self, component: &str) -> Result<Self> {
        if component.trim().is_empty() || component.contains(prefix::is_separator) {
            return Err(Error::InvalidArgument {
                path: component.to_string(),
                reason: "expected a single path component".to_string(),
            });
        }
        let mut path = self.path.clone();
        if !path.ends_with(DIRECTORY_SEPARATOR) {
            path.push(DIRECTORY_SEPARATOR);
        }
        path.push_str(component);
        Ok(Self { path })
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl AsRef<str> for CanonicalPath {
    fn as_ref(&self) -> &str {
        &self.path
    }
}

impl FromStr for CanonicalPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("relative-path".parse::<PathFormat>().unwrap(), PathFormat::RelativePath);
        assert_eq!("FULL_PATH".parse::<PathFormat>().unwrap(), PathFormat::FullPath);
        assert_eq!("long".parse::<PathFormat>().unwrap(), PathFormat::LongFullPath);
        assert!("posix".parse::<PathFormat>().is_err());
    }

    #[test]
    fn test_format_display_matches_parse() {
        for format in PathFormat::ALL {
            assert_eq!(format.to_string().parse::<PathFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_format_serde() {
        let yaml = serde_yaml::to_string(&PathFormat::LongFullPath).unwrap();
        assert_eq!(yaml.trim(), "long-full-path");
        let parsed: PathFormat = serde_yaml::from_str("full-path").unwrap();
        assert_eq!(parsed, PathFormat::FullPath);
    }

    #[test]
    fn test_canonical_rejects_empty() {
        assert!(CanonicalPath::new("").unwrap_err().is_invalid_argument());
        assert!(CanonicalPath::new(" \t").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_canonical_rejects_non_absolute() {
        assert!(CanonicalPath::new(r"a\b").unwrap_err().is_unsupported());
        assert!(CanonicalPath::new("C:").unwrap_err().is_unsupported());
        assert!(CanonicalPath::new(r"\a").unwrap_err().is_unsupported());
        assert!(CanonicalPath::new(r"\\server\share").unwrap_err().is_unsupported());
    }

    #[test]
    fn test_canonical_trims_separators_beyond_root() {
        assert_eq!(CanonicalPath::new(r"\\?\C:\a\\").unwrap().as_str(), r"\\?\C:\a");
        assert_eq!(CanonicalPath::new(r"\\?\C:\").unwrap().as_str(), r"\\?\C:\");
        assert_eq!(
            CanonicalPath::new(r"\\?\UNC\s\sh\").unwrap().as_str(),
            r"\\?\UNC\s\sh"
        );
    }

    #[test]
    fn test_roots() {
        assert!(CanonicalPath::new(r"\\?\C:\").unwrap().is_root());
        assert!(CanonicalPath::new(r"C:\").unwrap().is_root());
        assert!(CanonicalPath::new(r"\\?\UNC\s\sh").unwrap().is_root());
        assert!(!CanonicalPath::new(r"\\?\C:\a").unwrap().is_root());
    }

    #[test]
    fn test_parent_of_unc_level_is_share() {
        let path = CanonicalPath::new(r"\\?\UNC\s\sh\a").unwrap();
        assert_eq!(path.parent().unwrap().as_str(), r"\\?\UNC\s\sh");
        assert!(path.parent().unwrap().parent().is_none());
    }

    #[test]
    fn test_levels_of_drive_path() {
        let path = CanonicalPath::new(r"\\?\C:\a\b\c").unwrap();
        let levels: Vec<String> = path.levels().into_iter().map(CanonicalPath::into_string).collect();
        assert_eq!(levels, vec![r"\\?\C:\a", r"\\?\C:\a\b", r"\\?\C:\a\b\c"]);
        assert!(CanonicalPath::new(r"\\?\C:\").unwrap().levels().is_empty());
    }

    #[test]
    fn test_levels_of_volume_path() {
        let path = CanonicalPath::new(r"\\?\Volume{abc}\x\y").unwrap();
        let levels: Vec<String> = path.levels().into_iter().map(CanonicalPath::into_string).collect();
        assert_eq!(levels, vec![r"\\?\Volume{abc}\x", r"\\?\Volume{abc}\x\y"]);
    }

    #[test]
    fn test_file_name_and_join() {
        let path = CanonicalPath::new(r"\\?\C:\a").unwrap();
        assert_eq!(path.file_name(), Some("a"));
        let joined = path.join("b").unwrap();
        assert_eq!(joined.as_str(), r"\\?\C:\a\b");
        assert_eq!(
            CanonicalPath::new(r"\\?\C:\").unwrap().join("x").unwrap().as_str(),
            r"\\?\C:\x"
        );
        assert!(path.join(r"b\c").is_err());
        assert!(path.join("").is_err());
    }

    #[test]
    fn test_to_regular() {
        let path = CanonicalPath::new(r"\\?\UNC\s\sh\a").unwrap();
        assert_eq!(path.to_regular(), r"\\s\sh\a");
    }
}
