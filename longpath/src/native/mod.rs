//! The native filesystem primitives the library is built on.
//!
//! Everything that touches a real (or simulated) filesystem goes through the
//! [`NativeFileSystem`] trait. Implementations receive canonical path strings
//! and report failures as raw Win32 codes ([`NativeError`]); classification
//! into [`crate::Error`] happens in the callers, exactly once.
//!
//! Three backends are provided:
//!
//! - [`WindowsFileSystem`] (Windows only) calls the Win32 API directly.
//! - [`HostFileSystem`] uses `std::fs`, optionally mapping drive letters and
//!   network shares onto host directories.
//! - [`MemoryFileSystem`] is an in-memory, case-insensitive tree with
//!   short-name aliases, transaction bookkeeping and failure injection.

mod error;
mod host;
mod memory;
mod security;
#[cfg(windows)]
mod windows;

pub use error::{codes, NativeError};
pub use host::HostFileSystem;
pub use memory::{MemoryFileSystem, NativeCall};
pub use security::{AccessControl, NativeSecurity};
#[cfg(windows)]
pub use windows::WindowsFileSystem;

/// An externally owned transaction.
///
/// The library never opens, commits or rolls back a transaction. It only
/// reads the raw handle to bind native calls to it.
///
/// # Examples
///
/// ```
/// use longpath::native::Transaction;
///
/// let tx = Transaction::from_raw(0x1f4);
/// assert_eq!(tx.as_raw(), 0x1f4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transaction {
    raw: usize,
}

impl Transaction {
    /// Wraps a raw transaction handle owned by the caller.
    #[must_use]
    pub const fn from_raw(raw: usize) -> Self {
        Self { raw }
    }

    /// The raw handle.
    #[must_use]
    pub const fn as_raw(self) -> usize {
        self.raw
    }
}

/// What a backend supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Transaction-aware creation, probes and long-name queries.
    pub transactions: bool,
    /// Creation that copies the attributes of a template directory.
    pub templates: bool,
}

/// The kind of an existing filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A directory.
    Directory,
    /// Anything that is not a directory.
    File,
}

/// Which name a path-name query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameForm {
    /// The 8.3 short name.
    Short,
    /// The full long name.
    Long,
}

/// Outcome of a path-name query into a caller-provided buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameQuery {
    /// The name was written; the value is its length in UTF-16 units.
    Complete(usize),
    /// The buffer is too small; the value is the required capacity,
    /// including the terminating null.
    BufferTooSmall(usize),
}

/// Native filesystem primitives, operating on canonical path strings.
pub trait NativeFileSystem {
    /// What this backend supports.
    fn capabilities(&self) -> Capabilities;

    /// The kind of the entry at `path`, or `None` if nothing is there.
    ///
    /// # Errors
    ///
    /// Returns the native error for failures other than "not found".
    fn entry_kind(
        &self,
        path: &str,
        transaction: Option<&Transaction>,
    ) -> Result<Option<EntryKind>, NativeError>;

    /// Creates a single directory.
    ///
    /// # Errors
    ///
    /// Returns the native error if the directory could not be created.
    fn create_directory(
        &self,
        path: &str,
        security: Option<&NativeSecurity>,
    ) -> Result<(), NativeError>;

    /// Creates a single directory with the attributes of `template`.
    ///
    /// # Errors
    ///
    /// Returns the native error if the directory could not be created.
    fn create_directory_from_template(
        &self,
        template: &str,
        path: &str,
        security: Option<&NativeSecurity>,
    ) -> Result<(), NativeError>;

    /// Creates a single directory as part of `transaction`.
    ///
    /// # Errors
    ///
    /// Returns the native error if the directory could not be created.
    fn create_directory_transacted(
        &self,
        template: Option<&str>,
        path: &str,
        security: Option<&NativeSecurity>,
        transaction: &Transaction,
    ) -> Result<(), NativeError>;

    /// Enables or disables compression on an existing entry.
    ///
    /// # Errors
    ///
    /// Returns the native error if the compression state could not be changed.
    fn set_compression(
        &self,
        path: &str,
        enabled: bool,
        transaction: Option<&Transaction>,
    ) -> Result<(), NativeError>;

    /// Writes the short or long name of an existing entry into `buffer`.
    ///
    /// # Errors
    ///
    /// Returns the native error if the name could not be retrieved.
    fn path_name(
        &self,
        form: NameForm,
        path: &str,
        buffer: &mut [u16],
        transaction: Option<&Transaction>,
    ) -> Result<NameQuery, NativeError>;
}

/// The backend for the current platform.
///
/// On Windows this is [`WindowsFileSystem`]; elsewhere it is an unmapped
/// [`HostFileSystem`], which reports every path as unsupported until drives
/// or shares are mapped onto host directories.
#[must_use]
pub fn default_file_system() -> Box<dyn NativeFileSystem> {
    #[cfg(windows)]
    {
        Box::new(WindowsFileSystem::new())
    }
    #[cfg(not(windows))]
    {
        Box::new(HostFileSystem::new())
    }
}

/// Copies `name` into a caller buffer following the size protocol of the
/// Win32 path-name queries.
pub(crate) fn fill_name_buffer(name: &str, buffer: &mut [u16]) -> NameQuery {
    let encoded: Vec<u16> = name.encode_utf16().collect();
    if encoded.len() + 1 > buffer.len() {
        return NameQuery::BufferTooSmall(encoded.len() + 1);
    }
    buffer[..encoded.len()].copy_from_slice(&encoded);
    buffer[encoded.len()] = 0;
    NameQuery::Complete(encoded.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_name_buffer_reports_required_size() {
        let mut small = [0u16; 4];
        assert_eq!(fill_name_buffer(r"C:\abc", &mut small), NameQuery::BufferTooSmall(7));

        let mut exact = [0u16; 7];
        assert_eq!(fill_name_buffer(r"C:\abc", &mut exact), NameQuery::Complete(6));
        assert_eq!(String::from_utf16(&exact[..6]).unwrap(), r"C:\abc");
        assert_eq!(exact[6], 0);
    }

    #[test]
    fn test_transaction_roundtrip() {
        let tx = Transaction::from_raw(42);
        assert_eq!(tx, Transaction::from_raw(tx.as_raw()));
    }

    #[test]
    fn test_default_capabilities() {
        let caps = Capabilities::default();
        assert!(!caps.transactions);
        assert!(!caps.templates);
    }
}
