//! Options for directory-tree creation.

use crate::native::{AccessControl, Transaction};
use crate::path::PathFormat;

/// Options for [`DirectoryTreeBuilder::create_all`](crate::create::DirectoryTreeBuilder::create_all).
///
/// # Examples
///
/// ```
/// use longpath::create::CreateOptions;
/// use longpath::native::Transaction;
/// use longpath::path::PathFormat;
///
/// let options = CreateOptions::new()
///     .with_template(r"C:\templates\project")
///     .with_compression(true)
///     .with_transaction(Transaction::from_raw(0x2c))
///     .with_format(PathFormat::FullPath);
/// assert!(options.compress);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOptions {
    /// A directory whose attributes are copied onto every new level.
    pub template: Option<String>,
    /// Security applied to every new level.
    pub access_control: Option<AccessControl>,
    /// Turn on compression for every new level.
    pub compress: bool,
    /// An externally owned transaction to create the levels in.
    pub transaction: Option<Transaction>,
    /// What the caller guarantees about the target and template paths.
    pub format: PathFormat,
}

impl CreateOptions {
    /// Plain creation of a relative or absolute path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the template directory.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Set the access control for new levels.
    #[must_use]
    pub fn with_access_control(mut self, access_control: AccessControl) -> Self {
        self.access_control = Some(access_control);
        self
    }

    /// Enable or disable compression of new levels.
    #[must_use]
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Create the levels inside `transaction`.
    #[must_use]
    pub fn with_transaction(mut self, transaction: Transaction) -> Self {
        self.transaction = Some(transaction);
        self
    }

    /// Set the path format hint.
    #[must_use]
    pub fn with_format(mut self, format: PathFormat) -> Self {
        self.format = format;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CreateOptions::new();
        assert!(options.template.is_none());
        assert!(options.access_control.is_none());
        assert!(!options.compress);
        assert!(options.transaction.is_none());
        assert_eq!(options.format, PathFormat::RelativePath);
    }

    #[test]
    fn test_access_control_builder() {
        let options = CreateOptions::new().with_access_control(AccessControl::new().with_mode(0o755));
        assert_eq!(options.access_control.and_then(|a| a.mode()), Some(0o755));
    }
}
