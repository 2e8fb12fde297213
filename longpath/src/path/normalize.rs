//! Path normalization functions.
//!
//! This module turns caller-supplied path strings into canonical paths:
//! - Resolving relative and drive-relative paths against a base directory
//! - Resolving `.` and `..` components and collapsing separators
//! - Adding the extended-length prefix to drive-rooted and UNC paths
//! - Rejecting shapes that cannot be represented canonically

use std::env;

use crate::error::{Error, Result};
use crate::path::prefix::{
    self, starts_with_ignore_case, PrefixKind, ALT_DIRECTORY_SEPARATOR, DIRECTORY_SEPARATOR,
    LOGICAL_DRIVE_PREFIX, LONG_PATH_PREFIX, LONG_PATH_UNC_PREFIX, NON_INTERPRETED_PREFIX,
    NON_INTERPRETED_UNC_PREFIX, UNC_PREFIX, VOLUME_SEPARATOR,
};
use crate::path::regular::{clean_error_path, regular_form};
use crate::path::types::{CanonicalPath, FullPathOptions, PathFormat};

/// Normalize a caller-supplied path into its canonical form.
///
/// The amount of work depends on `format`:
/// - [`PathFormat::RelativePath`] resolves the path against `base` (or the
///   process current directory) and adds the extended-length prefix.
/// - [`PathFormat::FullPath`] trims the path and adds the prefix.
/// - [`PathFormat::LongFullPath`] only removes trailing separators.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the path is empty, whitespace-only,
/// or has a colon outside the drive-letter position, and
/// [`Error::Unsupported`] if the result is not absolute or the path is a bare
/// drive designator such as `C:`.
///
/// # Examples
///
/// ```
/// use longpath::path::{normalize, PathFormat};
///
/// let base = Some(r"C:\work");
/// let path = normalize(r"src/../docs\\guide\", PathFormat::RelativePath, base).unwrap();
/// assert_eq!(path.as_str(), r"\\?\C:\work\docs\guide");
///
/// let unc = normalize(r"\\server\share\data", PathFormat::FullPath, None).unwrap();
/// assert_eq!(unc.as_str(), r"\\?\UNC\server\share\data");
/// ```
pub fn normalize(path: &str, format: PathFormat, base: Option<&str>) -> Result<CanonicalPath> {
    reject_empty(path)?;
    reject_drive_designator(path)?;

    let canonical = match format {
        PathFormat::LongFullPath => CanonicalPath::new(path)?,
        PathFormat::FullPath => {
            check_supported_format(path)?;
            let trimmed = apply_options(path, FullPathOptions::canonical());
            CanonicalPath::new(get_long_path(&trimmed)?)?
        }
        PathFormat::RelativePath => {
            CanonicalPath::new(get_full_path(path, base, FullPathOptions::canonical())?)?
        }
    };

    log::trace!("normalized '{path}' ({format}) to '{canonical}'");
    Ok(canonical)
}

/// Resolve `path` to an absolute path and apply `options`.
///
/// Paths that already carry an extended-length, device-namespace or
/// non-interpreted prefix are not resolved; only the options apply.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for empty input, a misplaced colon, or
/// (when checked) invalid characters, and [`Error::Unsupported`] when a
/// relative path has to be resolved against a base directory that is neither
/// drive-rooted nor a network share.
///
/// # Examples
///
/// ```
/// use longpath::path::{get_full_path, FullPathOptions};
///
/// let regular = FullPathOptions::canonical().with_long_path(false);
/// let full = get_full_path(r"..\b", Some(r"C:\a\x"), regular).unwrap();
/// assert_eq!(full, r"C:\a\b");
///
/// let with_separator = FullPathOptions::canonical().with_trailing_separator();
/// let full = get_full_path(r"C:\a", None, with_separator).unwrap();
/// assert_eq!(full, r"\\?\C:\a\");
/// ```
pub fn get_full_path(path: &str, base: Option<&str>, options: FullPathOptions) -> Result<String> {
    reject_empty(path)?;
    check_supported_format(path)?;
    if options.check_invalid_chars {
        check_invalid_characters(path)?;
    }

    let trimmed = if options.trim_end { path.trim_end() } else { path };
    reject_empty(trimmed)?;

    let resolved = resolve_full_path(trimmed, base)?;
    let resolved = apply_options(&resolved, options);
    if options.as_long_path {
        get_long_path(&resolved)
    } else {
        Ok(resolved)
    }
}

/// Add the extended-length prefix to an absolute path.
///
/// Short paths (two characters or fewer), paths that already carry a prefix,
/// and paths that are neither UNC nor drive-rooted are returned unchanged.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `path` is empty or whitespace-only.
///
/// # Examples
///
/// ```
/// use longpath::path::get_long_path;
///
/// assert_eq!(get_long_path(r"C:\temp").unwrap(), r"\\?\C:\temp");
/// assert_eq!(get_long_path(r"\\server\share").unwrap(), r"\\?\UNC\server\share");
/// assert_eq!(get_long_path(r"\\?\C:\temp").unwrap(), r"\\?\C:\temp");
/// assert_eq!(get_long_path(r"relative\dir").unwrap(), r"relative\dir");
/// ```
pub fn get_long_path(path: &str) -> Result<String> {
    reject_empty(path)?;

    if path.len() <= 2
        || path.starts_with(LONG_PATH_PREFIX)
        || path.starts_with(LOGICAL_DRIVE_PREFIX)
        || path.starts_with(NON_INTERPRETED_PREFIX)
    {
        return Ok(path.to_string());
    }

    if path.starts_with(UNC_PREFIX) {
        return Ok(format!("{LONG_PATH_UNC_PREFIX}{}", &path[UNC_PREFIX.len()..]));
    }

    if prefix::is_drive_rooted(path) {
        Ok(format!("{LONG_PATH_PREFIX}{path}"))
    } else {
        Ok(path.to_string())
    }
}

/// Reject a colon anywhere but the drive-letter position.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] naming the path if a misplaced colon is
/// found.
pub fn check_supported_format(path: &str) -> Result<()> {
    let rest = &path[marker_length(path)..];
    let drive = rest.as_bytes().first().is_some_and(u8::is_ascii_alphabetic);

    for (index, c) in rest.char_indices() {
        if c == VOLUME_SEPARATOR && !(index == 1 && drive) {
            return Err(Error::InvalidArgument {
                path: clean_error_path(path),
                reason: "a colon is only valid after a drive letter".to_string(),
            });
        }
    }
    Ok(())
}

/// Reject characters that are never valid in a path component.
///
/// `?` and `*` are allowed inside a prefix marker such as `\\?\`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] naming the first illegal character.
pub fn check_invalid_characters(path: &str) -> Result<()> {
    let rest = &path[marker_length(path)..];
    match rest
        .chars()
        .find(|c| matches!(c, '<' | '>' | '"' | '|' | '?' | '*') || c.is_control())
    {
        Some(c) => Err(Error::InvalidArgument {
            path: clean_error_path(path),
            reason: format!("illegal character '{}'", c.escape_default()),
        }),
        None => Ok(()),
    }
}

/// Apply trimming and trailing-separator options without resolving anything.
pub(crate) fn apply_options(path: &str, options: FullPathOptions) -> String {
    let mut path = if options.trim_end {
        path.trim_end().to_string()
    } else {
        path.to_string()
    };

    if options.remove_trailing_separator {
        // Dropping a separator can expose whitespace, and the reverse.
        let root = prefix::root_length(&path);
        while path.len() > root {
            if path.ends_with(prefix::is_separator)
                || (options.trim_end && path.ends_with(char::is_whitespace))
            {
                path.pop();
            } else {
                break;
            }
        }
    }

    if options.add_trailing_separator && !path.ends_with(prefix::is_separator) {
        path.push(DIRECTORY_SEPARATOR);
    }
    path
}

/// Resolve a path to its absolute regular form.
fn resolve_full_path(path: &str, base: Option<&str>) -> Result<String> {
    let path = path.replace(ALT_DIRECTORY_SEPARATOR, "\\");
    let kind = PrefixKind::of(&path);
    if kind.is_verbatim() {
        return Ok(path);
    }

    let trailing_separator = path.ends_with(DIRECTORY_SEPARATOR);
    let (root, rest) = if kind == PrefixKind::Unc {
        let root_len = prefix::root_length(&path);
        (path[..root_len].to_string(), path[root_len..].to_string())
    } else if prefix::is_drive_rooted(&path) {
        (path[..3].to_string(), path[3..].to_string())
    } else if let Some(letter) = prefix::drive_letter(&path) {
        // Drive-relative: only the base directory knows the current directory of its own drive.
        match base_directory(base).ok().filter(|b| prefix::drive_letter(b) == Some(letter)) {
            Some(base) => split_base(&base, &path[2..]),
            None => (format!("{}{VOLUME_SEPARATOR}{DIRECTORY_SEPARATOR}", &path[..1]), path[2..].to_string()),
        }
    } else if path.starts_with(DIRECTORY_SEPARATOR) {
        let base = base_directory(base)?;
        let root_len = prefix::root_length(&base);
        (base[..root_len].to_string(), path)
    } else {
        split_base(&base_directory(base)?, &path)
    };

    let mut components: Vec<&str> = Vec::new();
    for component in rest.split(DIRECTORY_SEPARATOR) {
        match component {
            "" | "." => {}
            ".." => {
                components.pop();
            }
            name => components.push(name),
        }
    }

    let mut resolved = root;
    for component in &components {
        if !resolved.ends_with(DIRECTORY_SEPARATOR) {
            resolved.push(DIRECTORY_SEPARATOR);
        }
        resolved.push_str(component);
    }
    if !components.is_empty() && trailing_separator {
        resolved.push(DIRECTORY_SEPARATOR);
    }
    Ok(resolved)
}

/// Splits the base directory into its root and the base's own components
/// followed by `relative`.
fn split_base(base: &str, relative: &str) -> (String, String) {
    let root_len = prefix::root_length(base);
    (
        base[..root_len].to_string(),
        format!("{}{DIRECTORY_SEPARATOR}{relative}", &base[root_len..]),
    )
}

/// The directory relative paths are resolved against, in regular form.
fn base_directory(base: Option<&str>) -> Result<String> {
    let base = match base {
        Some(base) => base.to_string(),
        None => {
            let cwd = env::current_dir()?;
            cwd.to_str()
                .ok_or_else(|| Error::InvalidArgument {
                    path: cwd.display().to_string(),
                    reason: "current directory contains invalid UTF-8".to_string(),
                })?
                .to_string()
        }
    };

    let base = regular_form(&base.replace(ALT_DIRECTORY_SEPARATOR, "\\"));
    if prefix::is_drive_rooted(&base) || PrefixKind::of(&base) == PrefixKind::Unc {
        Ok(base)
    } else {
        Err(Error::Unsupported {
            path: base,
            reason: "base directory must be drive-rooted or a network share".to_string(),
        })
    }
}

/// Length of the prefix marker that path checks skip over.
fn marker_length(path: &str) -> usize {
    match PrefixKind::of(path) {
        PrefixKind::ExtendedLengthUnc => LONG_PATH_UNC_PREFIX.len(),
        PrefixKind::ExtendedLength | PrefixKind::VolumeGuid | PrefixKind::GlobalRoot => {
            LONG_PATH_PREFIX.len()
        }
        PrefixKind::DeviceNamespace => LOGICAL_DRIVE_PREFIX.len(),
        PrefixKind::NonInterpreted if starts_with_ignore_case(path, NON_INTERPRETED_UNC_PREFIX) => {
            NON_INTERPRETED_UNC_PREFIX.len()
        }
        PrefixKind::NonInterpreted => NON_INTERPRETED_PREFIX.len(),
        PrefixKind::Unc => UNC_PREFIX.len(),
        PrefixKind::None => 0,
    }
}

fn reject_empty(path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(Error::InvalidArgument {
            path: path.to_string(),
            reason: "path is empty or whitespace".to_string(),
        });
    }
    Ok(())
}

fn reject_drive_designator(path: &str) -> Result<()> {
    let trimmed = path.trim_end();
    if trimmed.len() == 2 && prefix::has_drive_designator(trimmed) {
        return Err(Error::Unsupported {
            path: trimmed.to_string(),
            reason: "a bare drive designator does not name an absolute directory".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: Option<&str> = Some(r"C:\work");

    fn relative(path: &str) -> String {
        normalize(path, PathFormat::RelativePath, BASE).unwrap().into_string()
    }

    #[test]
    fn test_normalize_relative_against_base() {
        assert_eq!(relative(r"a\b"), r"\\?\C:\work\a\b");
        assert_eq!(relative("a/./b/../c//d/"), r"\\?\C:\work\a\c\d");
        assert_eq!(relative("."), r"\\?\C:\work");
    }

    #[test]
    fn test_normalize_rooted_takes_base_root() {
        assert_eq!(relative(r"\x\y"), r"\\?\C:\x\y");
    }

    #[test]
    fn test_normalize_drive_relative() {
        assert_eq!(relative("C:rel"), r"\\?\C:\work\rel");
        assert_eq!(relative("c:rel"), r"\\?\C:\work\rel");
        assert_eq!(relative("D:rel"), r"\\?\D:\rel");
    }

    #[test]
    fn test_normalize_parent_never_escapes_root() {
        assert_eq!(relative(r"..\..\..\x"), r"\\?\C:\x");
        assert_eq!(relative(r"C:\.."), r"\\?\C:\");
    }

    #[test]
    fn test_normalize_unc() {
        assert_eq!(relative(r"\\server\share\a\..\b"), r"\\?\UNC\server\share\b");
        assert_eq!(relative(r"//server/share/"), r"\\?\UNC\server\share");
    }

    #[test]
    fn test_normalize_against_unc_base() {
        let path = normalize("x", PathFormat::RelativePath, Some(r"\\s\sh\w")).unwrap();
        assert_eq!(path.as_str(), r"\\?\UNC\s\sh\w\x");
    }

    #[test]
    fn test_normalize_against_long_base() {
        let path = normalize("x", PathFormat::RelativePath, Some(r"\\?\C:\deep")).unwrap();
        assert_eq!(path.as_str(), r"\\?\C:\deep\x");
    }

    #[test]
    fn test_normalize_prefixed_paths_pass_through() {
        assert_eq!(relative(r"\\?\C:\a\..\b\"), r"\\?\C:\a\..\b");
        assert_eq!(relative(r"\\.\C:\a"), r"\\.\C:\a");
        assert_eq!(relative(r"\??\C:\a"), r"\??\C:\a");
    }

    #[test]
    fn test_normalize_trims_whitespace_and_separators() {
        assert_eq!(relative("C:\\a\\b\\  "), r"\\?\C:\a\b");
        assert_eq!(relative(r"C:\"), r"\\?\C:\");
    }

    #[test]
    fn test_normalize_trims_space_behind_separator() {
        for format in [PathFormat::RelativePath, PathFormat::FullPath] {
            let once = normalize("C:\\a \\", format, BASE).unwrap();
            assert_eq!(once.as_str(), r"\\?\C:\a");
            let twice = normalize(once.as_str(), format, BASE).unwrap();
            assert_eq!(twice, once);
        }
        assert_eq!(relative("C:\\a\\ \\ \\"), r"\\?\C:\a");
        assert_eq!(relative("C:\\a \\b"), r"\\?\C:\a \b");
    }

    #[test]
    fn test_normalize_rooted_keeps_trailing_separator_handling() {
        assert_eq!(relative(r"\x\y\"), r"\\?\C:\x\y");
        assert_eq!(relative(r"\"), r"\\?\C:\");
    }

    #[test]
    fn test_normalize_rejects_empty() {
        for format in PathFormat::ALL {
            assert!(normalize("", format, BASE).unwrap_err().is_invalid_argument());
            assert!(normalize("   ", format, BASE).unwrap_err().is_invalid_argument());
        }
    }

    #[test]
    fn test_normalize_rejects_drive_designator() {
        for format in PathFormat::ALL {
            assert!(normalize("C:", format, BASE).unwrap_err().is_unsupported());
        }
    }

    #[test]
    fn test_normalize_rejects_misplaced_colon() {
        let err = normalize(r"C:\a:b", PathFormat::RelativePath, BASE).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(normalize(r"\\?\C:\a:b", PathFormat::FullPath, BASE).is_err());
        assert!(normalize(r"\\?\C:\a", PathFormat::FullPath, BASE).is_ok());
    }

    #[test]
    fn test_full_path_format() {
        let path = normalize(r"C:\a\b\ ", PathFormat::FullPath, None).unwrap();
        assert_eq!(path.as_str(), r"\\?\C:\a\b");

        let err = normalize(r"a\b", PathFormat::FullPath, None).unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_long_full_path_format_does_minimal_work() {
        let path = normalize(r"\\?\C:\a\b\", PathFormat::LongFullPath, None).unwrap();
        assert_eq!(path.as_str(), r"\\?\C:\a\b");

        let err = normalize(r"\\server\share", PathFormat::LongFullPath, None).unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in [r"a\b", r"\\s\sh\x", r"C:\x\..\y", "D:z", r"\\?\C:\q"] {
            let once = relative(input);
            assert_eq!(relative(&once), once);
            assert_eq!(
                normalize(&once, PathFormat::FullPath, None).unwrap().as_str(),
                once
            );
            assert_eq!(
                normalize(&once, PathFormat::LongFullPath, None).unwrap().as_str(),
                once
            );
        }
    }

    #[test]
    fn test_get_full_path_invalid_characters() {
        let checked = FullPathOptions::canonical().with_invalid_char_check(true);
        for bad in [r"C:\a<b", r"C:\a|b", "C:\\a\"b", r"C:\a?b", r"C:\a*", "C:\\a\u{1}"] {
            let err = get_full_path(bad, BASE, checked).unwrap_err();
            assert!(err.is_invalid_argument(), "{bad} should be rejected");
        }
        assert!(get_full_path(r"\\?\C:\ok", BASE, checked).is_ok());
        assert!(get_full_path(r"C:\a*", BASE, FullPathOptions::canonical()).is_ok());
    }

    #[test]
    fn test_get_full_path_without_long_prefix() {
        let options = FullPathOptions::canonical().with_long_path(false);
        assert_eq!(get_full_path(r"\\s\sh\x\", BASE, options).unwrap(), r"\\s\sh\x");
    }

    #[test]
    fn test_get_long_path_leaves_short_and_relative() {
        assert_eq!(get_long_path("C:").unwrap(), "C:");
        assert_eq!(get_long_path(r"\x").unwrap(), r"\x");
        assert_eq!(get_long_path(r"\\.\C:\x").unwrap(), r"\\.\C:\x");
        assert_eq!(get_long_path(r"\??\C:\x").unwrap(), r"\??\C:\x");
        assert!(get_long_path(" ").is_err());
    }

    #[test]
    fn test_check_supported_format() {
        assert!(check_supported_format(r"C:\a").is_ok());
        assert!(check_supported_format(r"\\?\Volume{abc}\x").is_ok());
        assert!(check_supported_format(r"\\?\UNC\s\sh\x").is_ok());
        assert!(check_supported_format(r"\\s\sh\a:b").is_err());
        assert!(check_supported_format(r"ab:c").is_err());
    }

    #[cfg(not(windows))]
    #[test]
    fn test_relative_without_base_needs_windows_cwd() {
        let err = normalize("x", PathFormat::RelativePath, None).unwrap_err();
        assert!(err.is_unsupported());
    }
}
