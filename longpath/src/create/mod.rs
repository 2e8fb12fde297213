//! Multi-level directory creation.
//!
//! Creating a directory is split into two phases, the same way every call
//! runs:
//! 1. **Planning**: the target is canonicalized, the creation variant is
//!    resolved against the backend's capabilities, and the missing levels are
//!    collected by probing from the target towards the root
//! 2. **Execution**: the missing levels are created root-most first, each
//!    failure classified once at the level it happened
//!
//! Planning never creates anything, so [`DirectoryTreeBuilder::plan`] doubles
//! as a dry run.
//!
//! # Examples
//!
//! ```
//! use longpath::create::{create_all, CreateOptions};
//! use longpath::native::MemoryFileSystem;
//!
//! let fs = MemoryFileSystem::new().with_volume('C');
//! fs.add_directory(r"C:\a").unwrap();
//!
//! let handle = create_all(&fs, r"C:\a\b\c", &CreateOptions::new()).unwrap();
//! let created: Vec<String> = handle.created_levels().iter().map(|l| l.to_regular()).collect();
//! assert_eq!(created, vec![r"C:\a\b", r"C:\a\b\c"]);
//!
//! // A second call finds everything in place.
//! let again = create_all(&fs, r"C:\a\b\c", &CreateOptions::new()).unwrap();
//! assert!(!again.was_created());
//! ```

mod builder;
mod capability;
pub(crate) mod classify;
mod handle;
mod options;
mod plan;

pub use builder::DirectoryTreeBuilder;
pub use capability::CreateVariant;
pub use handle::DirectoryHandle;
pub use options::CreateOptions;
pub use plan::DirectoryCreationPlan;

use crate::error::Result;
use crate::native::NativeFileSystem;

/// Creates `path` and every missing ancestor with default canonicalization.
///
/// Relative paths resolve against the process current directory.
///
/// # Errors
///
/// See [`DirectoryTreeBuilder::create_all`].
pub fn create_all<F: NativeFileSystem + ?Sized>(
    fs: &F,
    path: &str,
    options: &CreateOptions,
) -> Result<DirectoryHandle> {
    DirectoryTreeBuilder::new(fs).create_all(path, options)
}
