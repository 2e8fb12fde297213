//! The result of a creation call.

use std::fmt;

use crate::native::Transaction;
use crate::path::CanonicalPath;

/// A directory that exists after a successful creation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryHandle {
    path: CanonicalPath,
    created: Vec<CanonicalPath>,
    transaction: Option<Transaction>,
}

impl DirectoryHandle {
    pub(crate) fn new(
        path: CanonicalPath,
        created: Vec<CanonicalPath>,
        transaction: Option<Transaction>,
    ) -> Self {
        Self {
            path,
            created,
            transaction,
        }
    }

    /// The canonical path of the directory.
    #[must_use]
    pub fn path(&self) -> &CanonicalPath {
        &self.path
    }

    /// The directory in regular form.
    #[must_use]
    pub fn regular_path(&self) -> String {
        self.path.to_regular()
    }

    /// The levels this call created, root-most first.
    ///
    /// Levels created concurrently by someone else are not included.
    #[must_use]
    pub fn created_levels(&self) -> &[CanonicalPath] {
        &self.created
    }

    /// Returns `true` if this call created at least one level.
    #[must_use]
    pub fn was_created(&self) -> bool {
        !self.created.is_empty()
    }

    /// The transaction the levels were created in, if any.
    #[must_use]
    pub fn transaction(&self) -> Option<Transaction> {
        self.transaction
    }
}

impl fmt::Display for DirectoryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}
