//! Multi-level directory creation.

use crate::create::capability::Primitive;
use crate::create::classify::{self, CreationFailure};
use crate::create::handle::DirectoryHandle;
use crate::create::options::CreateOptions;
use crate::create::plan::DirectoryCreationPlan;
use crate::error::{Error, Result};
use crate::native::{NativeFileSystem, NativeSecurity};
use crate::path::{clean_error_path, CanonicalPath, PathCanonicalizer};
use crate::probe::{EntryState, ExistenceProber};

/// Creates a directory together with every missing ancestor.
///
/// # Examples
///
/// ```
/// use longpath::create::{CreateOptions, DirectoryTreeBuilder};
/// use longpath::native::MemoryFileSystem;
/// use longpath::path::PathCanonicalizer;
///
/// let fs = MemoryFileSystem::new().with_volume('C');
/// let builder = DirectoryTreeBuilder::new(&fs)
///     .with_canonicalizer(PathCanonicalizer::new().with_base_dir(r"C:\work"));
///
/// let handle = builder.create_all(r"build\out", &CreateOptions::new()).unwrap();
/// assert_eq!(handle.regular_path(), r"C:\work\build\out");
/// assert_eq!(handle.created_levels().len(), 3);
/// assert!(fs.is_directory(r"C:\work\build\out"));
/// ```
#[derive(Debug)]
pub struct DirectoryTreeBuilder<'a, F: NativeFileSystem + ?Sized> {
    fs: &'a F,
    canonicalizer: PathCanonicalizer,
}

impl<'a, F: NativeFileSystem + ?Sized> DirectoryTreeBuilder<'a, F> {
    /// A builder creating directories through `fs`.
    pub fn new(fs: &'a F) -> Self {
        Self {
            fs,
            canonicalizer: PathCanonicalizer::new(),
        }
    }

    /// Use `canonicalizer` for the target and template paths.
    #[must_use]
    pub fn with_canonicalizer(mut self, canonicalizer: PathCanonicalizer) -> Self {
        self.canonicalizer = canonicalizer;
        self
    }

    /// The canonicalizer in use.
    pub fn canonicalizer(&self) -> &PathCanonicalizer {
        &self.canonicalizer
    }

    /// Computes what [`create_all`](Self::create_all) would create, without
    /// creating anything.
    ///
    /// # Errors
    ///
    /// Fails for the same reasons `create_all` fails before its first
    /// creation call.
    pub fn plan(&self, target: &str, options: &CreateOptions) -> Result<DirectoryCreationPlan> {
        let (target, template) = self.canonicalize(target, options)?;
        let primitive = Primitive::bind(
            self.fs.capabilities(),
            template.as_ref(),
            options.transaction.as_ref(),
            &target,
        )?;
        let prober = ExistenceProber::new(self.fs);
        if target.is_root() {
            check_root(&prober, &target, primitive)?;
        }
        DirectoryCreationPlan::build(&prober, &target, primitive.transaction())
    }

    /// Creates `target` and every missing ancestor, root-most first.
    ///
    /// Creating a directory that already exists succeeds without any creation
    /// call. Levels created before a failure are left in place.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] or [`Error::Unsupported`] if a path cannot
    ///   be canonicalized
    /// - [`Error::Unsupported`] if a transaction or template is requested on a
    ///   backend without support, before any native call
    /// - [`Error::AlreadyExists`] if a file occupies the target or an ancestor
    /// - [`Error::NotFound`], [`Error::AccessDenied`],
    ///   [`Error::NetworkNameNotFound`] or [`Error::Native`] for a failed level
    pub fn create_all(&self, target: &str, options: &CreateOptions) -> Result<DirectoryHandle> {
        let (target, template) = self.canonicalize(target, options)?;
        let primitive = Primitive::bind(
            self.fs.capabilities(),
            template.as_ref(),
            options.transaction.as_ref(),
            &target,
        )?;
        let transaction = primitive.transaction();
        let prober = ExistenceProber::new(self.fs);

        if target.is_root() {
            check_root(&prober, &target, primitive)?;
            return Ok(DirectoryHandle::new(target, Vec::new(), options.transaction));
        }

        let plan = DirectoryCreationPlan::build(&prober, &target, transaction)?;
        if plan.is_empty() {
            log::debug!("'{target}' already exists");
            return Ok(DirectoryHandle::new(target, Vec::new(), options.transaction));
        }

        let security = options
            .access_control
            .as_ref()
            .map(NativeSecurity::acquire)
            .transpose()?;

        let mut created = Vec::with_capacity(plan.len());
        for level in plan {
            if let Err(err) = primitive.create(self.fs, &level, security.as_ref()) {
                match classify::creation_failure(err, &level, &target, &prober, transaction) {
                    CreationFailure::Benign => continue,
                    CreationFailure::Fatal(error) => return Err(error),
                }
            }
            log::debug!("created '{level}'");

            if options.compress {
                self.fs
                    .set_compression(level.as_str(), true, transaction)
                    .map_err(|err| classify::compression_failure(err, &level))?;
            }
            created.push(level);
        }

        log::info!(
            "created {} level(s) of '{}' ({})",
            created.len(),
            target.to_regular(),
            primitive.variant()
        );
        Ok(DirectoryHandle::new(target, created, options.transaction))
    }

    fn canonicalize(
        &self,
        target: &str,
        options: &CreateOptions,
    ) -> Result<(CanonicalPath, Option<CanonicalPath>)> {
        let target = self.canonicalizer.normalize(target, options.format)?;
        let template = options
            .template
            .as_deref()
            .map(|template| self.canonicalizer.normalize(template, options.format))
            .transpose()?;
        Ok((target, template))
    }
}

/// A root is never created; it either exists or the call fails.
fn check_root<F: NativeFileSystem + ?Sized>(
    prober: &ExistenceProber<'_, F>,
    root: &CanonicalPath,
    primitive: Primitive<'_>,
) -> Result<()> {
    match prober.probe(root, primitive.transaction()) {
        EntryState::Directory => Ok(()),
        EntryState::File | EntryState::Missing => Err(Error::NotFound {
            path: clean_error_path(root.as_str()),
        }),
    }
}
