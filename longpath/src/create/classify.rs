//! Classification of native failures.
//!
//! Each native failure is turned into an [`Error`] exactly once, by the code
//! that observed it. Creation failures get their own rules because the segment
//! an error names depends on where in the tree the failure happened.

use crate::error::Error;
use crate::native::{codes, NativeError, NativeFileSystem, Transaction};
use crate::path::{clean_error_path, CanonicalPath};
use crate::probe::{EntryState, ExistenceProber};

/// What to do after a level failed to be created.
#[derive(Debug)]
pub(crate) enum CreationFailure {
    /// The level exists as a directory after all; carry on.
    Benign,
    /// Abort with this error.
    Fatal(Error),
}

/// Classifies a failure outside of the creation loop.
pub(crate) fn native_failure(err: NativeError, path: &str) -> Error {
    let path = clean_error_path(path);
    match err.code() {
        codes::ERROR_FILE_NOT_FOUND | codes::ERROR_PATH_NOT_FOUND => Error::NotFound { path },
        codes::ERROR_ACCESS_DENIED => Error::AccessDenied { path },
        codes::ERROR_BAD_NET_NAME | codes::ERROR_BAD_NETPATH => Error::NetworkNameNotFound { path },
        codes::ERROR_NOT_SUPPORTED => Error::Unsupported {
            path,
            reason: "the filesystem does not support this operation".to_string(),
        },
        code => Error::Native { code, path },
    }
}

/// Classifies a failed compression toggle on a freshly created level.
pub(crate) fn compression_failure(err: NativeError, level: &CanonicalPath) -> Error {
    match err.code() {
        codes::ERROR_ACCESS_DENIED => Error::AccessDenied {
            path: clean_error_path(level.as_str()),
        },
        codes::ERROR_NOT_SUPPORTED => Error::Unsupported {
            path: clean_error_path(level.as_str()),
            reason: "the volume does not support compression".to_string(),
        },
        code => Error::Native {
            code,
            path: clean_error_path(level.as_str()),
        },
    }
}

/// Classifies a failed creation of `level` while building `target`.
///
/// "Already exists" is re-checked: a directory at `level` means another
/// process won the race and is benign. Anything else at the target means a
/// file is in the way; at an intermediate level the path to the target is
/// broken.
pub(crate) fn creation_failure<F: NativeFileSystem + ?Sized>(
    err: NativeError,
    level: &CanonicalPath,
    target: &CanonicalPath,
    prober: &ExistenceProber<'_, F>,
    transaction: Option<&Transaction>,
) -> CreationFailure {
    let error = match err.code() {
        codes::ERROR_ALREADY_EXISTS => match prober.probe(level, transaction) {
            EntryState::Directory => {
                log::debug!("'{level}' was created concurrently, continuing");
                return CreationFailure::Benign;
            }
            _ if level == target => Error::AlreadyExists {
                path: clean_error_path(target.as_str()),
            },
            _ => Error::NotFound {
                path: clean_error_path(level.as_str()),
            },
        },
        codes::ERROR_BAD_NET_NAME | codes::ERROR_BAD_NETPATH => Error::NetworkNameNotFound {
            path: clean_error_path(target.as_str()),
        },
        codes::ERROR_DIRECTORY => Error::Unsupported {
            path: clean_error_path(target.as_str()),
            reason: "a colon is only valid after a drive letter".to_string(),
        },
        codes::ERROR_ACCESS_DENIED => {
            let blocked = level.parent().unwrap_or_else(|| level.clone());
            Error::AccessDenied {
                path: clean_error_path(blocked.as_str()),
            }
        }
        codes::ERROR_FILE_NOT_FOUND | codes::ERROR_PATH_NOT_FOUND => Error::NotFound {
            path: clean_error_path(level.as_str()),
        },
        codes::ERROR_NOT_SUPPORTED => Error::Unsupported {
            path: clean_error_path(level.as_str()),
            reason: "the filesystem does not support this operation".to_string(),
        },
        code => Error::Native {
            code,
            path: clean_error_path(level.as_str()),
        },
    };
    log::debug!("creating '{level}' failed ({err}): {error}");
    CreationFailure::Fatal(error)
}
