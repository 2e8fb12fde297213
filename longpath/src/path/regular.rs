//! Conversion of canonical paths back to their regular form.

use crate::error::{Error, Result};
use crate::path::prefix::{
    self, starts_with_ignore_case, PrefixKind, LONG_PATH_PREFIX, LONG_PATH_UNC_PREFIX,
    NON_INTERPRETED_PREFIX, NON_INTERPRETED_UNC_PREFIX, UNC_PREFIX,
};

/// Strips the prefix of a canonical path, returning the form a user would type.
///
/// Volume-GUID and global-root paths have no regular equivalent and are
/// returned unchanged, as are paths that carry no extended-length prefix.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `path` is empty or whitespace-only.
///
/// # Examples
///
/// ```
/// use longpath::path::to_regular_form;
///
/// assert_eq!(to_regular_form(r"\\?\C:\x").unwrap(), r"C:\x");
/// assert_eq!(to_regular_form(r"\\?\UNC\s\sh").unwrap(), r"\\s\sh");
/// assert_eq!(to_regular_form(r"\??\UNC\s\sh").unwrap(), r"\\s\sh");
/// assert_eq!(to_regular_form(r"\??\C:\x").unwrap(), r"C:\x");
/// assert_eq!(to_regular_form(r"C:\x").unwrap(), r"C:\x");
/// ```
pub fn to_regular_form(path: &str) -> Result<String> {
    if path.trim().is_empty() {
        return Err(Error::InvalidArgument {
            path: path.to_string(),
            reason: "path is empty or whitespace".to_string(),
        });
    }
    Ok(regular_form(path))
}

/// Infallible core of [`to_regular_form`].
pub(crate) fn regular_form(path: &str) -> String {
    if starts_with_ignore_case(path, NON_INTERPRETED_UNC_PREFIX) {
        return format!("{UNC_PREFIX}{}", &path[NON_INTERPRETED_UNC_PREFIX.len()..]);
    }
    if path.starts_with(NON_INTERPRETED_PREFIX) {
        return path[NON_INTERPRETED_PREFIX.len()..].to_string();
    }

    match PrefixKind::of(path) {
        PrefixKind::ExtendedLengthUnc => {
            format!("{UNC_PREFIX}{}", &path[LONG_PATH_UNC_PREFIX.len()..])
        }
        PrefixKind::ExtendedLength => path[LONG_PATH_PREFIX.len()..].to_string(),
        _ => path.to_string(),
    }
}

/// The form used for every path embedded in an error message.
///
/// The path is converted to its regular form, then trailing separators and
/// wildcard stars beyond the root are removed.
///
/// # Examples
///
/// ```
/// use longpath::path::clean_error_path;
///
/// assert_eq!(clean_error_path(r"\\?\C:\a\b\*"), r"C:\a\b");
/// assert_eq!(clean_error_path(r"\\?\C:\"), r"C:\");
/// assert_eq!(clean_error_path(""), "");
/// ```
#[must_use]
pub fn clean_error_path(path: &str) -> String {
    let mut regular = regular_form(path);
    let root = prefix::root_length(&regular);
    while regular.len() > root && regular.ends_with(|c: char| prefix::is_separator(c) || c == '*') {
        regular.pop();
    }
    regular
}
