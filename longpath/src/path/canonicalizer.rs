//! Path canonicalization with a configurable base directory.
//!
//! This module provides the `PathCanonicalizer` type, which bundles the
//! settings every canonicalization needs: where relative paths are resolved,
//! whether illegal characters are rejected, and how name queries size their
//! buffers.

use crate::error::Result;
use crate::native::{NativeFileSystem, Transaction};
use crate::path::normalize::{check_invalid_characters, get_full_path, normalize};
use crate::path::short_long::{convert_short_long, PathBufferPolicy};
use crate::path::types::{CanonicalPath, FullPathOptions, PathFormat};

/// Canonicalizes caller-supplied paths.
///
/// # Examples
///
/// ```
/// use longpath::path::{PathCanonicalizer, PathFormat};
///
/// let canonicalizer = PathCanonicalizer::new().with_base_dir(r"D:\projects");
/// let path = canonicalizer.normalize(r"app\src", PathFormat::RelativePath).unwrap();
/// assert_eq!(path.as_str(), r"\\?\D:\projects\app\src");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathCanonicalizer {
    /// Directory relative paths are resolved against; the process current
    /// directory when unset.
    base_dir: Option<String>,
    /// Buffer sizing for short/long name queries.
    buffer: PathBufferPolicy,
    /// Reject illegal characters before resolving.
    check_invalid_chars: bool,
}

impl PathCanonicalizer {
    /// Create a canonicalizer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `base` instead of the current directory.
    #[must_use]
    pub fn with_base_dir(mut self, base: impl Into<String>) -> Self {
        self.base_dir = Some(base.into());
        self
    }

    /// Configure buffer sizing for short/long name queries.
    #[must_use]
    pub fn with_buffer_policy(mut self, policy: PathBufferPolicy) -> Self {
        self.buffer = policy;
        self
    }

    /// Configure whether illegal characters are rejected.
    #[must_use]
    pub fn with_invalid_char_check(mut self, check: bool) -> Self {
        self.check_invalid_chars = check;
        self
    }

    /// The configured base directory.
    #[must_use]
    pub fn base_dir(&self) -> Option<&str> {
        self.base_dir.as_deref()
    }

    /// The configured buffer policy.
    #[must_use]
    pub fn buffer_policy(&self) -> PathBufferPolicy {
        self.buffer
    }

    /// Normalize `path` according to `format`.
    ///
    /// # Errors
    ///
    /// See [`normalize`](crate::path::normalize()); additionally returns
    /// [`Error::InvalidArgument`](crate::Error::InvalidArgument) for illegal
    /// characters when the check is enabled.
    pub fn normalize(&self, path: &str, format: PathFormat) -> Result<CanonicalPath> {
        if self.check_invalid_chars && format != PathFormat::LongFullPath {
            check_invalid_characters(path)?;
        }
        normalize(path, format, self.base_dir())
    }

    /// Resolve `path` to a full path with explicit options.
    ///
    /// # Errors
    ///
    /// See [`get_full_path`](crate::path::get_full_path).
    pub fn full_path(&self, path: &str, options: FullPathOptions) -> Result<String> {
        let options = if self.check_invalid_chars {
            options.with_invalid_char_check(true)
        } else {
            options
        };
        get_full_path(path, self.base_dir(), options)
    }

    /// The 8.3 short form of an existing path, in regular form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) if the path does not
    /// exist, or the classified native error of the query.
    pub fn to_short_form<F: NativeFileSystem + ?Sized>(&self, fs: &F, path: &str) -> Result<String> {
        let canonical = self.normalize(path, PathFormat::RelativePath)?;
        convert_short_long(fs, &canonical, true, None, self.buffer)
    }

    /// The long form of an existing path, in regular form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) if the path does not
    /// exist, [`Error::Unsupported`](crate::Error::Unsupported) for a
    /// transaction the backend cannot honor, or the classified native error of
    /// the query.
    pub fn to_long_form<F: NativeFileSystem + ?Sized>(
        &self,
        fs: &F,
        path: &str,
        transaction: Option<&Transaction>,
    ) -> Result<String> {
        let canonical = self.normalize(path, PathFormat::RelativePath)?;
        convert_short_long(fs, &canonical, false, transaction, self.buffer)
    }
}
