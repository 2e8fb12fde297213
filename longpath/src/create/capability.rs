//! Selection of the native creation primitive.

use std::fmt;

use crate::error::{Error, Result};
use crate::native::{Capabilities, NativeError, NativeFileSystem, NativeSecurity, Transaction};
use crate::path::{clean_error_path, CanonicalPath};

/// The creation primitive used for every level of one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreateVariant {
    /// Plain creation.
    Plain,
    /// Creation copying the attributes of a template directory.
    Template,
    /// Creation bound to a transaction, with or without a template.
    Transacted,
}

impl fmt::Display for CreateVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Plain => "plain",
            Self::Template => "template",
            Self::Transacted => "transacted",
        })
    }
}

impl CreateVariant {
    /// Picks the variant for a request, given what the backend supports.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] naming `target` when a transaction or a
    /// template is requested and the backend cannot honor it.
    ///
    /// # Examples
    ///
    /// ```
    /// use longpath::create::CreateVariant;
    /// use longpath::native::Capabilities;
    /// use longpath::path::CanonicalPath;
    ///
    /// let target = CanonicalPath::new(r"\\?\C:\a").unwrap();
    /// let caps = Capabilities { transactions: false, templates: true };
    /// assert_eq!(CreateVariant::select(caps, true, false, &target).unwrap(), CreateVariant::Template);
    /// assert!(CreateVariant::select(caps, false, true, &target).is_err());
    /// ```
    pub fn select(
        capabilities: Capabilities,
        has_template: bool,
        has_transaction: bool,
        target: &CanonicalPath,
    ) -> Result<Self> {
        if has_transaction {
            if !capabilities.transactions {
                return Err(unsupported(target, "transactions are not supported by this filesystem"));
            }
            return Ok(Self::Transacted);
        }
        if has_template {
            if !capabilities.templates {
                return Err(unsupported(target, "template directories are not supported by this filesystem"));
            }
            return Ok(Self::Template);
        }
        Ok(Self::Plain)
    }
}

fn unsupported(target: &CanonicalPath, reason: &str) -> Error {
    Error::Unsupported {
        path: clean_error_path(target.as_str()),
        reason: reason.to_string(),
    }
}

/// A variant bound to the arguments it needs.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Primitive<'a> {
    Plain,
    Template(&'a CanonicalPath),
    Transacted {
        template: Option<&'a CanonicalPath>,
        transaction: &'a Transaction,
    },
}

impl<'a> Primitive<'a> {
    /// Resolves the variant once for a whole call.
    pub(crate) fn bind(
        capabilities: Capabilities,
        template: Option<&'a CanonicalPath>,
        transaction: Option<&'a Transaction>,
        target: &CanonicalPath,
    ) -> Result<Self> {
        let variant = CreateVariant::select(capabilities, template.is_some(), transaction.is_some(), target)?;
        Ok(match (variant, template, transaction) {
            (CreateVariant::Transacted, template, Some(transaction)) => Self::Transacted {
                template,
                transaction,
            },
            (CreateVariant::Template, Some(template), _) => Self::Template(template),
            _ => Self::Plain,
        })
    }

    pub(crate) fn variant(self) -> CreateVariant {
        match self {
            Self::Plain => CreateVariant::Plain,
            Self::Template(_) => CreateVariant::Template,
            Self::Transacted { .. } => CreateVariant::Transacted,
        }
    }

    /// Creates one level.
    pub(crate) fn create<F: NativeFileSystem + ?Sized>(
        self,
        fs: &F,
        level: &CanonicalPath,
        security: Option<&NativeSecurity>,
    ) -> std::result::Result<(), NativeError> {
        log::trace!("{} create '{level}'", self.variant());
        match self {
            Self::Plain => fs.create_directory(level.as_str(), security),
            Self::Template(template) => {
                fs.create_directory_from_template(template.as_str(), level.as_str(), security)
            }
            Self::Transacted {
                template,
                transaction,
            } => fs.create_directory_transacted(
                template.map(CanonicalPath::as_str),
                level.as_str(),
                security,
                transaction,
            ),
        }
    }

    /// The transaction probes and compression are bound to.
    pub(crate) fn transaction(self) -> Option<&'a Transaction> {
        match self {
            Self::Transacted { transaction, .. } => Some(transaction),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> CanonicalPath {
        CanonicalPath::new(r"\\?\C:\a").unwrap()
    }

    const ALL: Capabilities = Capabilities {
        transactions: true,
        templates: true,
    };

    #[test]
    fn test_variant_selection() {
        let t = target();
        assert_eq!(CreateVariant::select(ALL, false, false, &t).unwrap(), CreateVariant::Plain);
        assert_eq!(CreateVariant::select(ALL, true, false, &t).unwrap(), CreateVariant::Template);
        assert_eq!(CreateVariant::select(ALL, false, true, &t).unwrap(), CreateVariant::Transacted);
        assert_eq!(CreateVariant::select(ALL, true, true, &t).unwrap(), CreateVariant::Transacted);
    }

    #[test]
    fn test_unsupported_requests() {
        let t = target();
        let none = Capabilities::default();
        let err = CreateVariant::select(none, false, true, &t).unwrap_err();
        assert!(err.is_unsupported());
        assert_eq!(err.path(), Some(r"C:\a"));
        assert!(CreateVariant::select(none, true, false, &t).unwrap_err().is_unsupported());
        assert_eq!(CreateVariant::select(none, false, false, &t).unwrap(), CreateVariant::Plain);
    }

    #[test]
    fn test_bind_keeps_template_for_transactions() {
        let t = target();
        let template = CanonicalPath::new(r"\\?\C:\tpl").unwrap();
        let tx = Transaction::from_raw(1);
        let primitive = Primitive::bind(ALL, Some(&template), Some(&tx), &t).unwrap();
        assert_eq!(primitive.variant(), CreateVariant::Transacted);
        assert!(matches!(
            primitive,
            Primitive::Transacted { template: Some(_), .. }
        ));
        assert_eq!(primitive.transaction(), Some(&tx));
    }
}
