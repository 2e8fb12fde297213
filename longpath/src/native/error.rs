//! Native error codes.

use std::fmt;

/// Win32 error codes the library classifies.
pub mod codes {
    /// The system cannot find the file specified.
    pub const ERROR_FILE_NOT_FOUND: u32 = 2;
    /// The system cannot find the path specified.
    pub const ERROR_PATH_NOT_FOUND: u32 = 3;
    /// Access is denied.
    pub const ERROR_ACCESS_DENIED: u32 = 5;
    /// The system cannot find the drive specified.
    pub const ERROR_INVALID_DRIVE: u32 = 15;
    /// A device attached to the system is not functioning.
    pub const ERROR_GEN_FAILURE: u32 = 31;
    /// The request is not supported.
    pub const ERROR_NOT_SUPPORTED: u32 = 50;
    /// The network path was not found.
    pub const ERROR_BAD_NETPATH: u32 = 53;
    /// The network name cannot be found.
    pub const ERROR_BAD_NET_NAME: u32 = 67;
    /// The data area passed to a system call is too small.
    pub const ERROR_INSUFFICIENT_BUFFER: u32 = 122;
    /// The filename, directory name, or volume label syntax is incorrect.
    pub const ERROR_INVALID_NAME: u32 = 123;
    /// Cannot create a file when that file already exists.
    pub const ERROR_ALREADY_EXISTS: u32 = 183;
    /// The directory name is invalid.
    pub const ERROR_DIRECTORY: u32 = 267;
}

/// A failed native call, identified by its Win32 error code.
///
/// # Examples
///
/// ```
/// use longpath::native::{codes, NativeError};
///
/// let err = NativeError::new(codes::ERROR_ACCESS_DENIED);
/// assert_eq!(err.code(), 5);
/// assert!(err.is(codes::ERROR_ACCESS_DENIED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeError {
    code: u32,
}

impl NativeError {
    /// Wraps a raw error code.
    #[must_use]
    pub const fn new(code: u32) -> Self {
        Self { code }
    }

    /// The raw error code.
    #[must_use]
    pub const fn code(self) -> u32 {
        self.code
    }

    /// Returns `true` if this error carries `code`.
    #[must_use]
    pub const fn is(self, code: u32) -> bool {
        self.code == code
    }

    /// Returns `true` for the codes that mean "nothing is there".
    #[must_use]
    pub const fn is_not_found(self) -> bool {
        matches!(
            self.code,
            codes::ERROR_FILE_NOT_FOUND | codes::ERROR_PATH_NOT_FOUND
        )
    }

    /// Translates a `std::io::Error` raised by the host filesystem.
    ///
    /// On Windows the OS code is used as is. Elsewhere the error kind is
    /// mapped onto the closest Win32 code.
    #[must_use]
    pub fn from_io(err: &std::io::Error) -> Self {
        use std::io::ErrorKind;

        #[cfg(windows)]
        let os_code = err.raw_os_error();
        #[cfg(not(windows))]
        let os_code: Option<i32> = None;
        if let Some(code) = os_code {
            return Self::new(code.unsigned_abs());
        }

        let code = match err.kind() {
            ErrorKind::NotFound | ErrorKind::NotADirectory => codes::ERROR_PATH_NOT_FOUND,
            ErrorKind::AlreadyExists => codes::ERROR_ALREADY_EXISTS,
            ErrorKind::PermissionDenied | ErrorKind::ReadOnlyFilesystem => {
                codes::ERROR_ACCESS_DENIED
            }
            ErrorKind::Unsupported => codes::ERROR_NOT_SUPPORTED,
            ErrorKind::InvalidInput => codes::ERROR_INVALID_NAME,
            _ => codes::ERROR_GEN_FAILURE,
        };
        Self::new(code)
    }
}

impl fmt::Display for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "native error {}", self.code)
    }
}

impl std::error::Error for NativeError {}
