//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `normalize`: Print the canonical form of a path
//! - `regular`: Strip the extended-length prefix from a canonical path
//! - `mkdir`: Create a directory tree
//! - `short`: Print the short form of an existing path
//! - `long`: Print the long form of an existing path
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod long;
pub mod mkdir;
pub mod normalize;
pub mod regular;
pub mod short;

pub use completions::CompletionsCommand;
pub use long::LongCommand;
pub use mkdir::MkdirCommand;
pub use normalize::NormalizeCommand;
pub use regular::RegularCommand;
pub use short::ShortCommand;
