//! Prefix classification for Windows-style paths.
//!
//! Every canonical path carries exactly one prefix class. This module knows
//! the markers, detects them in priority order and computes the length of the
//! root portion of a path (the part that always exists and is never created).

/// Extended-length marker: lifts the length limit and disables interpretation.
pub const LONG_PATH_PREFIX: &str = r"\\?\";

/// Extended-length marker for network shares.
pub const LONG_PATH_UNC_PREFIX: &str = r"\\?\UNC\";

/// Plain network share marker.
pub const UNC_PREFIX: &str = r"\\";

/// Win32 device namespace marker.
pub const LOGICAL_DRIVE_PREFIX: &str = r"\\.\";

/// NT object-manager marker, passed to the kernel without interpretation.
pub const NON_INTERPRETED_PREFIX: &str = r"\??\";

/// NT object-manager marker for network shares.
pub const NON_INTERPRETED_UNC_PREFIX: &str = r"\??\UNC\";

/// Volume GUID marker (`\\?\Volume{GUID}\`).
pub const VOLUME_PREFIX: &str = r"\\?\Volume";

/// Global root marker (`\\?\GLOBALROOT\Device\...`).
pub const GLOBAL_ROOT_PREFIX: &str = r"\\?\GLOBALROOT\";

/// The canonical directory separator.
pub const DIRECTORY_SEPARATOR: char = '\\';

/// The alternate directory separator, accepted on input only.
pub const ALT_DIRECTORY_SEPARATOR: char = '/';

/// Separates a drive letter from the rest of the path.
pub const VOLUME_SEPARATOR: char = ':';

/// The prefix class of a path.
///
/// # Examples
///
/// ```
/// use longpath::path::PrefixKind;
///
/// assert_eq!(PrefixKind::of(r"\\?\C:\temp"), PrefixKind::ExtendedLength);
/// assert_eq!(PrefixKind::of(r"\\?\UNC\server\share"), PrefixKind::ExtendedLengthUnc);
/// assert_eq!(PrefixKind::of(r"\\server\share"), PrefixKind::Unc);
/// assert_eq!(PrefixKind::of(r"C:\temp"), PrefixKind::None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixKind {
    /// `\\?\C:\...`
    ExtendedLength,
    /// `\\?\UNC\server\share\...`
    ExtendedLengthUnc,
    /// `\\.\C:\...` or `\\.\Device`
    DeviceNamespace,
    /// `\\?\Volume{GUID}\...`
    VolumeGuid,
    /// `\\?\GLOBALROOT\Device\...`
    GlobalRoot,
    /// `\??\...`
    NonInterpreted,
    /// `\\server\share\...`
    Unc,
    /// A plain path without any marker.
    None,
}

impl PrefixKind {
    /// Detects the prefix class of `path`.
    ///
    /// The more specific markers are checked first, since `\\?\UNC\` and
    /// `\\?\Volume` both start with `\\?\`, and every marker but `\??\`
    /// starts with `\\`.
    #[must_use]
    pub fn of(path: &str) -> Self {
        if starts_with_ignore_case(path, GLOBAL_ROOT_PREFIX) {
            Self::GlobalRoot
        } else if starts_with_ignore_case(path, VOLUME_PREFIX) {
            Self::VolumeGuid
        } else if starts_with_ignore_case(path, LONG_PATH_UNC_PREFIX) {
            Self::ExtendedLengthUnc
        } else if path.starts_with(LONG_PATH_PREFIX) {
            Self::ExtendedLength
        } else if path.starts_with(LOGICAL_DRIVE_PREFIX) {
            Self::DeviceNamespace
        } else if path.starts_with(NON_INTERPRETED_PREFIX) {
            Self::NonInterpreted
        } else if path.starts_with(UNC_PREFIX) {
            Self::Unc
        } else {
            Self::None
        }
    }

    /// Returns `true` for the classes that are handed to native calls without
    /// any further interpretation.
    #[must_use]
    pub const fn is_verbatim(self) -> bool {
        !matches!(self, Self::Unc | Self::None)
    }

    /// Returns `true` for the classes that have a plain regular equivalent.
    #[must_use]
    pub const fn has_regular_form(self) -> bool {
        !matches!(self, Self::VolumeGuid | Self::GlobalRoot)
    }

    /// Returns `true` if the path addresses a network share.
    #[must_use]
    pub fn is_network(self, path: &str) -> bool {
        match self {
            Self::Unc | Self::ExtendedLengthUnc => true,
            Self::NonInterpreted => starts_with_ignore_case(path, NON_INTERPRETED_UNC_PREFIX),
            _ => false,
        }
    }
}

/// Determines whether `path` starts with the extended-length marker.
///
/// # Examples
///
/// ```
/// use longpath::path::is_long_path;
///
/// assert!(is_long_path(r"\\?\C:\temp"));
/// assert!(is_long_path(r"\\?\UNC\server\share"));
/// assert!(!is_long_path(r"C:\temp"));
/// assert!(!is_long_path("   "));
/// ```
#[must_use]
pub fn is_long_path(path: &str) -> bool {
    !path.trim().is_empty() && path.starts_with(LONG_PATH_PREFIX)
}

/// Returns `true` if `c` is a directory separator.
#[must_use]
pub const fn is_separator(c: char) -> bool {
    c == DIRECTORY_SEPARATOR || c == ALT_DIRECTORY_SEPARATOR
}

/// Returns `true` if `path` begins with a drive designator such as `C:`.
#[must_use]
pub fn has_drive_designator(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Returns `true` if `path` is rooted at a drive, such as `C:\`.
#[must_use]
pub fn is_drive_rooted(path: &str) -> bool {
    has_drive_designator(path) && path[2..].starts_with(is_separator)
}

/// Returns the drive letter of a drive-designated path, upper-cased.
#[must_use]
pub fn drive_letter(path: &str) -> Option<char> {
    has_drive_designator(path).then(|| char::from(path.as_bytes()[0].to_ascii_uppercase()))
}

/// Computes the byte length of the root portion of `path`.
///
/// The root is the part that names the volume or share: `C:\`, `\\?\C:\`,
/// `\\server\share`, `\\?\UNC\server\share`, `\\?\Volume{GUID}\` and so on.
/// It is never created, and trailing separators inside it are never trimmed.
///
/// # Examples
///
/// ```
/// use longpath::path::root_length;
///
/// assert_eq!(root_length(r"C:\a\b"), 3);
/// assert_eq!(root_length(r"\\?\C:\a"), 7);
/// assert_eq!(root_length(r"\\server\share\a"), r"\\server\share".len());
/// assert_eq!(root_length(r"\\?\UNC\server\share\a"), r"\\?\UNC\server\share".len());
/// assert_eq!(root_length("relative"), 0);
/// ```
#[must_use]
pub fn root_length(path: &str) -> usize {
    match PrefixKind::of(path) {
        PrefixKind::ExtendedLengthUnc => share_root_length(path, LONG_PATH_UNC_PREFIX.len()),
        PrefixKind::Unc => share_root_length(path, UNC_PREFIX.len()),
        PrefixKind::NonInterpreted if starts_with_ignore_case(path, NON_INTERPRETED_UNC_PREFIX) => {
            share_root_length(path, NON_INTERPRETED_UNC_PREFIX.len())
        }
        PrefixKind::ExtendedLength => device_root_length(path, LONG_PATH_PREFIX.len()),
        PrefixKind::DeviceNamespace => device_root_length(path, LOGICAL_DRIVE_PREFIX.len()),
        PrefixKind::NonInterpreted => device_root_length(path, NON_INTERPRETED_PREFIX.len()),
        PrefixKind::VolumeGuid => component_end(path, VOLUME_PREFIX.len(), 1),
        PrefixKind::GlobalRoot => component_end(path, GLOBAL_ROOT_PREFIX.len(), 2),
        PrefixKind::None => {
            if is_drive_rooted(path) {
                3
            } else if has_drive_designator(path) {
                2
            } else if path.starts_with(is_separator) {
                1
            } else {
                0
            }
        }
    }
}

/// `server\share` following a share marker; the separator after the share is
/// not part of the root.
fn share_root_length(path: &str, start: usize) -> usize {
    let rest = &path[start..];
    let mut parts = 0;
    for (index, c) in rest.char_indices() {
        if is_separator(c) {
            parts += 1;
            if parts == 2 {
                return start + index;
            }
        }
    }
    path.len()
}

/// A drive root (`C:\`) or a single device name following a marker.
fn device_root_length(path: &str, start: usize) -> usize {
    let rest = &path[start..];
    if is_drive_rooted(rest) {
        start + 3
    } else if has_drive_designator(rest) {
        start + 2
    } else {
        component_end(path, start, 1)
    }
}

/// The end of the `count`-th component after `start`, including the separator
/// that terminates it.
fn component_end(path: &str, start: usize, count: usize) -> usize {
    let mut seen = 0;
    for (index, c) in path[start..].char_indices() {
        if is_separator(c) {
            seen += 1;
            if seen == count {
                return start + index + 1;
            }
        }
    }
    path.len()
}

/// ASCII case-insensitive `starts_with`.
pub(crate) fn starts_with_ignore_case(path: &str, prefix: &str) -> bool {
    path.len() >= prefix.len()
        && path.is_char_boundary(prefix.len())
        && path[..prefix.len()].eq_ignore_ascii_case(prefix)
}
