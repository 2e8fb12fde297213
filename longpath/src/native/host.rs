//! A backend on top of `std::fs`.
//!
//! Drive letters and network shares can be mapped onto host directories, so
//! canonical Windows paths can be exercised on any platform. On Windows,
//! unmapped paths are handed to the OS as they are; elsewhere they are
//! reported as unsupported.

use std::fs;
use std::path::{Path, PathBuf};

use crate::native::{
    codes, fill_name_buffer, Capabilities, EntryKind, NameForm, NameQuery, NativeError,
    NativeFileSystem, NativeSecurity, Transaction,
};
use crate::path::prefix::{self, PrefixKind};
use crate::path::regular::regular_form;

/// A root mapped onto a host directory.
#[derive(Debug, Clone)]
struct Mapping {
    root_key: String,
    host: PathBuf,
}

/// A filesystem backed by the host's `std::fs`.
///
/// # Examples
///
/// ```no_run
/// use longpath::native::HostFileSystem;
///
/// let fs = HostFileSystem::new()
///     .with_volume('C', "/srv/drive-c")
///     .with_share("server", "share", "/srv/share");
/// ```
#[derive(Debug, Clone, Default)]
pub struct HostFileSystem {
    mappings: Vec<Mapping>,
}

impl HostFileSystem {
    /// A backend without any mappings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps the volume `letter:\` onto the host directory `host`.
    #[must_use]
    pub fn with_volume(self, letter: char, host: impl Into<PathBuf>) -> Self {
        self.with_mapping(&format!("{letter}:"), host)
    }

    /// Maps the share `\\server\share` onto the host directory `host`.
    #[must_use]
    pub fn with_share(self, server: &str, share: &str, host: impl Into<PathBuf>) -> Self {
        self.with_mapping(&format!(r"\\{server}\{share}"), host)
    }

    /// Maps a root (`C:` or `\\server\share`) onto the host directory `host`.
    ///
    /// A later mapping of the same root replaces the earlier one.
    #[must_use]
    pub fn with_mapping(mut self, root: &str, host: impl Into<PathBuf>) -> Self {
        let root_key = root_key(root);
        self.mappings.retain(|m| m.root_key != root_key);
        self.mappings.push(Mapping {
            root_key,
            host: host.into(),
        });
        self
    }

    /// Returns `true` if at least one root is mapped.
    #[must_use]
    pub fn is_mapped(&self) -> bool {
        !self.mappings.is_empty()
    }

    /// Translates a canonical path into the host path it denotes.
    ///
    /// # Errors
    ///
    /// Returns `ERROR_BAD_NET_NAME` for an unmapped share and
    /// `ERROR_NOT_SUPPORTED` for any other path the host cannot address.
    pub fn host_path(&self, path: &str) -> Result<PathBuf, NativeError> {
        let regular = regular_form(path);
        let root_len = prefix::root_length(&regular);
        let key = root_key(&regular[..root_len]);

        if let Some(mapping) = self.mappings.iter().find(|m| m.root_key == key) {
            let mut host = mapping.host.clone();
            for component in regular[root_len..].split(prefix::is_separator) {
                match component {
                    "" | "." => {}
                    ".." => return Err(NativeError::new(codes::ERROR_INVALID_NAME)),
                    name => host.push(name),
                }
            }
            return Ok(host);
        }

        if cfg!(windows) {
            Ok(PathBuf::from(path))
        } else if PrefixKind::of(&regular).is_network(&regular) {
            Err(NativeError::new(codes::ERROR_BAD_NET_NAME))
        } else {
            Err(NativeError::new(codes::ERROR_NOT_SUPPORTED))
        }
    }

    fn create(&self, path: &str, security: Option<&NativeSecurity>) -> Result<PathBuf, NativeError> {
        let host = self.host_path(path)?;
        dir_builder(security)
            .create(&host)
            .map_err(|err| NativeError::from_io(&err))?;
        log::trace!("host: created '{}'", host.display());
        Ok(host)
    }
}

#[cfg(unix)]
fn dir_builder(security: Option<&NativeSecurity>) -> fs::DirBuilder {
    use std::os::unix::fs::DirBuilderExt;

    let mut builder = fs::DirBuilder::new();
    if let Some(mode) = security.and_then(NativeSecurity::mode) {
        builder.mode(mode);
    }
    builder
}

#[cfg(not(unix))]
fn dir_builder(_security: Option<&NativeSecurity>) -> fs::DirBuilder {
    fs::DirBuilder::new()
}

fn root_key(root: &str) -> String {
    root.trim_end_matches(prefix::is_separator).to_lowercase()
}

fn metadata_kind(host: &Path) -> Result<Option<EntryKind>, NativeError> {
    match fs::metadata(host) {
        Ok(metadata) if metadata.is_dir() => Ok(Some(EntryKind::Directory)),
        Ok(_) => Ok(Some(EntryKind::File)),
        Err(err) => {
            let native = NativeError::from_io(&err);
            if native.is_not_found() {
                Ok(None)
            } else {
                Err(native)
            }
        }
    }
}

impl NativeFileSystem for HostFileSystem {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            transactions: false,
            templates: true,
        }
    }

    fn entry_kind(
        &self,
        path: &str,
        transaction: Option<&Transaction>,
    ) -> Result<Option<EntryKind>, NativeError> {
        if transaction.is_some() {
            return Err(NativeError::new(codes::ERROR_NOT_SUPPORTED));
        }
        metadata_kind(&self.host_path(path)?)
    }

    fn create_directory(
        &self,
        path: &str,
        security: Option<&NativeSecurity>,
    ) -> Result<(), NativeError> {
        self.create(path, security).map(|_| ())
    }

    fn create_directory_from_template(
        &self,
        template: &str,
        path: &str,
        security: Option<&NativeSecurity>,
    ) -> Result<(), NativeError> {
        let template = self.host_path(template)?;
        let metadata = fs::metadata(&template).map_err(|err| NativeError::from_io(&err))?;
        if !metadata.is_dir() {
            return Err(NativeError::new(codes::ERROR_DIRECTORY));
        }

        let host = self.create(path, security)?;
        if security.and_then(NativeSecurity::mode).is_none() {
            fs::set_permissions(&host, metadata.permissions())
                .map_err(|err| NativeError::from_io(&err))?;
        }
        Ok(())
    }

    fn create_directory_transacted(
        &self,
        _template: Option<&str>,
        _path: &str,
        _security: Option<&NativeSecurity>,
        _transaction: &Transaction,
    ) -> Result<(), NativeError> {
        Err(NativeError::new(codes::ERROR_NOT_SUPPORTED))
    }

    fn set_compression(
        &self,
        _path: &str,
        _enabled: bool,
        _transaction: Option<&Transaction>,
    ) -> Result<(), NativeError> {
        Err(NativeError::new(codes::ERROR_NOT_SUPPORTED))
    }

    fn path_name(
        &self,
        _form: NameForm,
        path: &str,
        buffer: &mut [u16],
        transaction: Option<&Transaction>,
    ) -> Result<NameQuery, NativeError> {
        // std::fs exposes no 8.3 names; every entry is its own short and long name.
        match self.entry_kind(path, transaction)? {
            Some(_) => Ok(fill_name_buffer(path, buffer)),
            None => Err(NativeError::new(codes::ERROR_FILE_NOT_FOUND)),
        }
    }
}
