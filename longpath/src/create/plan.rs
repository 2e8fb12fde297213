//! The plan of directories a creation call has to make.

use crate::error::{Error, Result};
use crate::native::{NativeFileSystem, Transaction};
use crate::path::{clean_error_path, CanonicalPath};
use crate::probe::{EntryState, ExistenceProber};

/// The missing levels of a target path, in creation order.
///
/// A plan is built once per call by walking from the target towards the root
/// and is consumed destructively: iterating it yields the root-most missing
/// level first and the target last.
///
/// # Examples
///
/// ```
/// use longpath::create::DirectoryCreationPlan;
/// use longpath::native::MemoryFileSystem;
/// use longpath::path::CanonicalPath;
/// use longpath::probe::ExistenceProber;
///
/// let fs = MemoryFileSystem::new().with_volume('C');
/// fs.add_directory(r"C:\a").unwrap();
///
/// let target = CanonicalPath::new(r"\\?\C:\a\b\c").unwrap();
/// let plan = DirectoryCreationPlan::build(&ExistenceProber::new(&fs), &target, None).unwrap();
/// let levels: Vec<String> = plan.map(|level| level.to_regular()).collect();
/// assert_eq!(levels, vec![r"C:\a\b", r"C:\a\b\c"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryCreationPlan {
    target: CanonicalPath,
    /// Leaf first, so popping yields the root-most level.
    stack: Vec<CanonicalPath>,
}

impl DirectoryCreationPlan {
    /// Walks from `target` towards its root, collecting missing levels.
    ///
    /// The walk stops at the first level that exists as a directory; the root
    /// itself is never probed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyExists`] naming the first level, leaf-most
    /// first, that exists as something other than a directory.
    pub fn build<F: NativeFileSystem + ?Sized>(
        prober: &ExistenceProber<'_, F>,
        target: &CanonicalPath,
        transaction: Option<&Transaction>,
    ) -> Result<Self> {
        let mut stack = Vec::new();
        for level in target.levels().into_iter().rev() {
            match prober.probe(&level, transaction) {
                EntryState::Directory => break,
                EntryState::File => {
                    return Err(Error::AlreadyExists {
                        path: clean_error_path(level.as_str()),
                    });
                }
                EntryState::Missing => stack.push(level),
            }
        }

        let plan = Self {
            target: target.clone(),
            stack,
        };
        log::debug!("{}", plan.description());
        Ok(plan)
    }

    /// The target the plan leads to.
    #[must_use]
    pub fn target(&self) -> &CanonicalPath {
        &self.target
    }

    /// The remaining levels, root-most first.
    pub fn levels(&self) -> impl Iterator<Item = &CanonicalPath> {
        self.stack.iter().rev()
    }

    /// Returns the number of levels left to create.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Returns `true` if there is nothing left to create.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Returns a human-readable description of this plan.
    #[must_use]
    pub fn description(&self) -> String {
        match self.stack.len() {
            0 => format!("nothing to create for {}", self.target.to_regular()),
            1 => format!("create 1 level for {}", self.target.to_regular()),
            n => format!("create {n} levels for {}", self.target.to_regular()),
        }
    }
}

impl Iterator for DirectoryCreationPlan {
    type Item = CanonicalPath;

    fn next(&mut self) -> Option<Self::Item> {
        self.stack.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), Some(self.stack.len()))
    }
}

impl ExactSizeIterator for DirectoryCreationPlan {}
