#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # longpath
//!
//! A library for extended-length path handling and multi-level directory
//! creation.
//!
//! Windows paths come in many shapes: relative, drive-relative, rooted,
//! UNC, extended-length (`\\?\`), device namespace (`\\.\`) and more. This
//! library canonicalizes them into a single representation that can be handed
//! to native calls without length limits, and builds directory trees on top of
//! it with optional templates, security, compression and transactions.
//!
//! ## Core Types
//!
//! - [`CanonicalPath`] and [`PathFormat`]: canonical paths and format hints
//! - [`PathCanonicalizer`]: normalization with a configurable base directory
//! - [`DirectoryTreeBuilder`] and [`CreateOptions`]: multi-level creation
//! - [`native::NativeFileSystem`]: the native primitive family, with
//!   in-memory, host and Windows backends
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use longpath::{CreateOptions, DirectoryTreeBuilder, PathFormat};
//! use longpath::native::MemoryFileSystem;
//! use longpath::path::{normalize, to_regular_form};
//!
//! let canonical = normalize(r"C:\data\..\logs\", PathFormat::RelativePath, None).unwrap();
//! assert_eq!(canonical.as_str(), r"\\?\C:\logs");
//! assert_eq!(to_regular_form(canonical.as_str()).unwrap(), r"C:\logs");
//!
//! let fs = MemoryFileSystem::new().with_volume('C');
//! let handle = DirectoryTreeBuilder::new(&fs)
//!     .create_all(r"C:\logs\2024\01", &CreateOptions::new())
//!     .unwrap();
//! assert_eq!(handle.created_levels().len(), 3);
//! ```

pub mod config;
pub mod create;
pub mod error;
pub mod logging;
pub mod native;
pub mod path;
pub mod probe;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use create::{create_all, CreateOptions, CreateVariant, DirectoryHandle, DirectoryTreeBuilder};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use native::{AccessControl, NativeFileSystem, Transaction};
pub use path::{normalize, to_regular_form, CanonicalPath, PathCanonicalizer, PathFormat};
pub use probe::{EntryState, ExistenceProber};
