//! Path canonicalization.
//!
//! This module converts caller-supplied path strings into canonical paths:
//! absolute paths with exactly one recognized prefix class that can be handed
//! to native calls without any further interpretation.
//!
//! # Key Concepts
//!
//! ## Prefix classes
//!
//! | Class             | Example                                    |
//! |-------------------|--------------------------------------------|
//! | extended-length   | `\\?\C:\data`                              |
//! | extended UNC      | `\\?\UNC\server\share\data`                |
//! | device namespace  | `\\.\C:\data`                              |
//! | volume GUID       | `\\?\Volume{GUID}\data`                    |
//! | global root       | `\\?\GLOBALROOT\Device\HarddiskVolume1\x`  |
//! | non-interpreted   | `\??\C:\data`                              |
//!
//! A plain drive-rooted path (`C:\data`) is also canonical; plain UNC paths
//! are always rewritten to the extended UNC form.
//!
//! ## Format hints
//!
//! [`PathFormat`] tells the canonicalizer how much work to do. Relative paths
//! are fully resolved; full paths only get a prefix; long full paths are
//! trusted as they are.
//!
//! # Examples
//!
//! ```
//! use longpath::path::{normalize, to_regular_form, PathFormat};
//!
//! let canonical = normalize(r"\\server\share\reports\", PathFormat::FullPath, None).unwrap();
//! assert_eq!(canonical.as_str(), r"\\?\UNC\server\share\reports");
//! assert_eq!(to_regular_form(canonical.as_str()).unwrap(), r"\\server\share\reports");
//! ```

pub mod canonicalizer;
pub mod normalize;
pub mod prefix;
pub mod regular;
pub mod short_long;
mod types;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types
pub use canonicalizer::PathCanonicalizer;
pub use normalize::{
    check_invalid_characters, check_supported_format, get_full_path, get_long_path, normalize,
};
pub use prefix::{is_long_path, root_length, PrefixKind};
pub use regular::{clean_error_path, to_regular_form};
pub use short_long::{convert_short_long, PathBufferPolicy};
pub use types::{CanonicalPath, FullPathOptions, PathFormat};
