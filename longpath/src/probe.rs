//! Existence probing.
//!
//! The prober answers one question: what is at this canonical path right now?
//! It never fails for "not there". Native failures other than malformed input
//! are treated as absence, since the creation that follows reports the real
//! cause with a classified error.

use crate::error::Result;
use crate::native::{EntryKind, NativeFileSystem, Transaction};
use crate::path::CanonicalPath;

/// What a probe found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryState {
    /// A directory.
    Directory,
    /// A non-directory entry.
    File,
    /// Nothing.
    Missing,
}

impl EntryState {
    /// Returns `true` if something exists.
    #[must_use]
    pub const fn exists(self) -> bool {
        !matches!(self, Self::Missing)
    }
}

impl From<Option<EntryKind>> for EntryState {
    fn from(kind: Option<EntryKind>) -> Self {
        match kind {
            Some(EntryKind::Directory) => Self::Directory,
            Some(EntryKind::File) => Self::File,
            None => Self::Missing,
        }
    }
}

/// Probes canonical paths through a [`NativeFileSystem`].
///
/// # Examples
///
/// ```
/// use longpath::native::MemoryFileSystem;
/// use longpath::probe::{EntryState, ExistenceProber};
///
/// let fs = MemoryFileSystem::new().with_volume('C');
/// fs.add_file(r"C:\notes.txt").unwrap();
///
/// let prober = ExistenceProber::new(&fs);
/// assert!(prober.exists(r"\\?\C:\notes.txt", false, None).unwrap());
/// assert!(!prober.exists(r"\\?\C:\notes.txt", true, None).unwrap());
/// assert_eq!(prober.probe_path(r"\\?\C:\", None).unwrap(), EntryState::Directory);
/// ```
#[derive(Debug)]
pub struct ExistenceProber<'a, F: NativeFileSystem + ?Sized> {
    fs: &'a F,
}

impl<'a, F: NativeFileSystem + ?Sized> ExistenceProber<'a, F> {
    /// A prober over `fs`.
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    /// Probes a canonical path.
    pub fn probe(&self, path: &CanonicalPath, transaction: Option<&Transaction>) -> EntryState {
        match self.fs.entry_kind(path.as_str(), transaction) {
            Ok(kind) => {
                let state = EntryState::from(kind);
                log::trace!("probe '{path}': {state:?}");
                state
            }
            Err(err) => {
                log::debug!("probe '{path}' failed ({err}), treating as missing");
                EntryState::Missing
            }
        }
    }

    /// Probes a path string that is expected to be canonical.
    ///
    /// # Errors
    ///
    /// Returns an error only for malformed input: an empty or non-absolute
    /// path.
    pub fn probe_path(&self, path: &str, transaction: Option<&Transaction>) -> Result<EntryState> {
        let path = CanonicalPath::new(path)?;
        Ok(self.probe(&path, transaction))
    }

    /// Returns `true` if `path` exists, and is a directory when
    /// `expect_directory` is set.
    ///
    /// # Errors
    ///
    /// Returns an error only for malformed input.
    pub fn exists(
        &self,
        path: &str,
        expect_directory: bool,
        transaction: Option<&Transaction>,
    ) -> Result<bool> {
        let state = self.probe_path(path, transaction)?;
        Ok(match state {
            EntryState::Directory => true,
            EntryState::File => !expect_directory,
            EntryState::Missing => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::{MemoryFileSystem, NativeCall};

    fn fs() -> MemoryFileSystem {
        let fs = MemoryFileSystem::new().with_volume('C');
        fs.add_directory(r"C:\dir").unwrap();
        fs.add_file(r"C:\dir\file").unwrap();
        fs
    }

    #[test]
    fn test_probe_states() {
        let fs = fs();
        let prober = ExistenceProber::new(&fs);
        assert_eq!(prober.probe_path(r"\\?\C:\dir", None).unwrap(), EntryState::Directory);
        assert_eq!(prober.probe_path(r"\\?\C:\dir\file", None).unwrap(), EntryState::File);
        assert_eq!(prober.probe_path(r"\\?\C:\nope", None).unwrap(), EntryState::Missing);
    }

    #[test]
    fn test_exists_expect_directory() {
        let fs = fs();
        let prober = ExistenceProber::new(&fs);
        assert!(prober.exists(r"\\?\C:\dir", true, None).unwrap());
        assert!(prober.exists(r"\\?\C:\dir\file", false, None).unwrap());
        assert!(!prober.exists(r"\\?\C:\dir\file", true, None).unwrap());
        assert!(!prober.exists(r"\\?\C:\nope", false, None).unwrap());
    }

    #[test]
    fn test_native_failures_are_missing() {
        let fs = fs();
        let prober = ExistenceProber::new(&fs);
        assert_eq!(prober.probe_path(r"\\?\Z:\x", None).unwrap(), EntryState::Missing);
        let tx = Transaction::from_raw(3);
        assert_eq!(prober.probe_path(r"\\?\C:\dir", Some(&tx)).unwrap(), EntryState::Missing);
    }

    #[test]
    fn test_malformed_input_fails() {
        let fs = fs();
        let prober = ExistenceProber::new(&fs);
        assert!(prober.exists("", false, None).unwrap_err().is_invalid_argument());
        assert!(prober.exists(r"relative\path", false, None).is_err());
    }

    #[test]
    fn test_probe_binds_transaction() {
        let fs = fs().with_transactions(true);
        let tx = Transaction::from_raw(11);
        let prober = ExistenceProber::new(&fs);
        assert!(prober.exists(r"\\?\C:\dir", true, Some(&tx)).unwrap());
        assert_eq!(
            fs.calls().last(),
            Some(&NativeCall::EntryKind {
                path: r"\\?\C:\dir".to_string(),
                transaction: Some(tx),
            })
        );
    }

    #[test]
    fn test_works_through_trait_objects() {
        let fs = fs();
        let dynamic: &dyn NativeFileSystem = &fs;
        let prober = ExistenceProber::new(dynamic);
        assert!(prober.exists(r"\\?\C:\dir", true, None).unwrap());
    }
}
