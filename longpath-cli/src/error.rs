//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer,
//! wrapping library errors and providing appropriate exit codes.

use longpath::Error as LibError;
use std::fmt;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// I/O error.
    Io(std::io::Error),

    /// Configuration error.
    Config(String),

    /// Output could not be serialized.
    Output(serde_json::Error),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 2: Invalid path argument (clap also exits with 2 on usage errors)
    /// - 3: Path or network name not found
    /// - 4: A file occupies a directory level
    /// - 5: Access denied
    /// - 6: Unsupported path or operation
    /// - 7: Configuration error
    /// - 8: Other native or I/O failure
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Library(lib_err) => match lib_err {
                LibError::InvalidArgument { .. } => 2,
                LibError::NotFound { .. } | LibError::NetworkNameNotFound { .. } => 3,
                LibError::AlreadyExists { .. } => 4,
                LibError::AccessDenied { .. } => 5,
                LibError::Unsupported { .. } => 6,
                LibError::Configuration(_) | LibError::Validation { .. } => 7,
                LibError::Native { .. } | LibError::Io(_) => 8,
            },
            CliError::Config(_) => 7,
            CliError::Io(_) | CliError::Output(_) => 8,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::Output(e) => write!(f, "Failed to format output: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::Output(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        CliError::Library(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e)
    }
}
