//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixtures for testing the
//! longpath library against the in-memory and host backends.

use longpath::create::{DirectoryHandle, DirectoryTreeBuilder};
use longpath::native::{HostFileSystem, MemoryFileSystem, NativeCall, NativeFileSystem};
use longpath::path::PathCanonicalizer;
use tempfile::TempDir;

/// Base directory relative paths resolve against in tests.
#[allow(dead_code)]
pub const BASE_DIR: &str = r"C:\work";

/// An in-memory filesystem with volume `C:` and share `\\server\share`.
#[allow(dead_code)]
pub fn memory_fs() -> MemoryFileSystem {
    MemoryFileSystem::new()
        .with_volume('C')
        .with_share("server", "share")
}

/// A builder resolving relative paths against [`BASE_DIR`].
#[allow(dead_code)]
pub fn builder<F: NativeFileSystem + ?Sized>(fs: &F) -> DirectoryTreeBuilder<'_, F> {
    DirectoryTreeBuilder::new(fs).with_canonicalizer(PathCanonicalizer::new().with_base_dir(BASE_DIR))
}

/// The levels a call created, in regular form.
#[allow(dead_code)]
pub fn created(handle: &DirectoryHandle) -> Vec<String> {
    handle
        .created_levels()
        .iter()
        .map(|level| level.to_regular())
        .collect()
}

/// The paths of every creation call recorded by `fs`, in order.
#[allow(dead_code)]
pub fn creation_paths(fs: &MemoryFileSystem) -> Vec<String> {
    fs.calls()
        .into_iter()
        .filter_map(|call| match call {
            NativeCall::CreateDirectory { path }
            | NativeCall::CreateFromTemplate { path, .. }
            | NativeCall::CreateTransacted { path, .. } => Some(path),
            _ => None,
        })
        .collect()
}

/// A host backend with `C:` mapped onto a fresh temporary directory.
///
/// The directory will be automatically cleaned up when the returned
/// `TempDir` is dropped.
#[allow(dead_code)]
pub fn host_fs() -> (TempDir, HostFileSystem) {
    let dir = tempfile::tempdir().unwrap();
    let fs = HostFileSystem::new().with_volume('C', dir.path());
    (dir, fs)
}
