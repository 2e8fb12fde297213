//! Error types for the longpath library.
//!
//! Every native failure is classified exactly once, at the point where it
//! happens, into one of the variants below. Paths carried by errors are always
//! in their clean regular form (see [`crate::path::clean_error_path`]) and name
//! the specific segment responsible for the failure.

use thiserror::Error;

use crate::native::NativeError;

/// Result type alias for operations that may fail with a longpath error.
///
/// # Examples
///
/// ```
/// use longpath::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(260)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the longpath library.
#[derive(Debug, Error)]
pub enum Error {
    /// The path argument is empty, whitespace-only or malformed.
    #[error("invalid path argument '{path}': {reason}")]
    InvalidArgument {
        /// The offending path, as supplied.
        path: String,
        /// The reason the path was rejected.
        reason: String,
    },

    /// The path shape or the requested operation cannot be represented on this host.
    #[error("unsupported path '{path}': {reason}")]
    Unsupported {
        /// The offending path.
        path: String,
        /// The reason the request is unsupported.
        reason: String,
    },

    /// A path that must exist was not found.
    #[error("path not found: {path}")]
    NotFound {
        /// The path that was not found.
        path: String,
    },

    /// A non-directory object occupies a path segment that must be a directory.
    #[error("cannot create '{path}': a file with that name already exists")]
    AlreadyExists {
        /// The blocked path segment.
        path: String,
    },

    /// The network name of a UNC path could not be found.
    #[error("network name not found: {path}")]
    NetworkNameNotFound {
        /// The path whose share could not be reached.
        path: String,
    },

    /// Access was denied. The path is the parent of the inaccessible segment.
    #[error("access denied: {path}")]
    AccessDenied {
        /// The location the caller has to fix permissions on.
        path: String,
    },

    /// An uncategorized native failure.
    #[error("native error {code} on '{path}'")]
    Native {
        /// The raw native error code.
        code: u32,
        /// The path the failing native call was made on.
        path: String,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred outside of a classified native call.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

impl Error {
    /// Builds the generic passthrough variant from a native failure.
    #[must_use]
    pub fn native(err: NativeError, path: impl Into<String>) -> Self {
        Self::Native {
            code: err.code(),
            path: path.into(),
        }
    }

    /// Returns the path this error refers to, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use longpath::Error;
    ///
    /// let err = Error::NotFound { path: r"C:\missing".to_string() };
    /// assert_eq!(err.path(), Some(r"C:\missing"));
    /// ```
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::InvalidArgument { path, .. }
            | Self::Unsupported { path, .. }
            | Self::NotFound { path }
            | Self::AlreadyExists { path }
            | Self::NetworkNameNotFound { path }
            | Self::AccessDenied { path }
            | Self::Native { path, .. } => Some(path),
            Self::Configuration(_) | Self::Io(_) | Self::Validation { .. } => None,
        }
    }

    /// Check if error indicates a path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use longpath::Error;
    ///
    /// let err = Error::NotFound { path: r"C:\nonexistent".to_string() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error is an "already exists" conflict.
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// Check if error is permission-related.
    ///
    /// # Examples
    ///
    /// ```
    /// use longpath::Error;
    ///
    /// let err = Error::AccessDenied { path: r"C:\restricted".to_string() };
    /// assert!(err.is_access_denied());
    /// ```
    #[must_use]
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied { .. })
    }

    /// Check if error reports an unsupported path shape or host capability.
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// Check if error reports an invalid argument.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}
