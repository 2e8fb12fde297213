//! Short (8.3) and long name conversion.

use serde::{Deserialize, Serialize};

use crate::create::classify;
use crate::error::{Error, Result};
use crate::native::{codes, NameForm, NameQuery, NativeError, NativeFileSystem, Transaction};
use crate::path::regular::{clean_error_path, regular_form};
use crate::path::types::CanonicalPath;
use crate::probe::ExistenceProber;

/// How name queries size their output buffer.
///
/// The first query uses `initial_capacity` UTF-16 units. When the native call
/// reports that more room is needed, the buffer is reallocated to the reported
/// size and the query repeated, at most `max_attempts` times in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathBufferPolicy {
    /// Capacity of the first buffer, in UTF-16 units.
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,
    /// Upper bound on the number of native queries.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

fn default_initial_capacity() -> usize {
    260
}

fn default_max_attempts() -> usize {
    4
}

impl Default for PathBufferPolicy {
    fn default() -> Self {
        Self {
            initial_capacity: default_initial_capacity(),
            max_attempts: default_max_attempts(),
        }
    }
}

/// Converts an existing path to its short or long form.
///
/// The result is returned in regular form.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if nothing exists at `path`,
/// [`Error::Unsupported`] if a transaction is given on a backend without
/// transaction support, and the classified native error if the query fails
/// or keeps asking for a larger buffer after `policy.max_attempts` queries.
///
/// # Examples
///
/// ```
/// use longpath::native::MemoryFileSystem;
/// use longpath::path::{convert_short_long, CanonicalPath, PathBufferPolicy};
///
/// let fs = MemoryFileSystem::new().with_volume('C');
/// fs.add_directory(r"C:\Program Files").unwrap();
/// fs.set_short_name(r"C:\Program Files", "PROGRA~1").unwrap();
///
/// let path = CanonicalPath::new(r"\\?\C:\Program Files").unwrap();
/// let short = convert_short_long(&fs, &path, true, None, PathBufferPolicy::default()).unwrap();
/// assert_eq!(short, r"C:\PROGRA~1");
/// ```
pub fn convert_short_long<F: NativeFileSystem + ?Sized>(
    fs: &F,
    path: &CanonicalPath,
    to_short: bool,
    transaction: Option<&Transaction>,
    policy: PathBufferPolicy,
) -> Result<String> {
    if transaction.is_some() && !fs.capabilities().transactions {
        return Err(Error::Unsupported {
            path: clean_error_path(path.as_str()),
            reason: "transactions are not supported by this filesystem".to_string(),
        });
    }

    if !ExistenceProber::new(fs).probe(path, transaction).exists() {
        return Err(Error::NotFound {
            path: clean_error_path(path.as_str()),
        });
    }

    // Short names have no transacted query; only the long form is bound.
    let (form, transaction) = if to_short {
        (NameForm::Short, None)
    } else {
        (NameForm::Long, transaction)
    };

    let mut capacity = policy.initial_capacity.max(1);
    let mut last_error = NativeError::new(codes::ERROR_INSUFFICIENT_BUFFER);
    for attempt in 1..=policy.max_attempts {
        let mut buffer = vec![0u16; capacity];
        match fs.path_name(form, path.as_str(), &mut buffer, transaction) {
            Ok(NameQuery::Complete(length)) => {
                let name = String::from_utf16(&buffer[..length]).map_err(|_| Error::InvalidArgument {
                    path: clean_error_path(path.as_str()),
                    reason: "native name is not valid UTF-16".to_string(),
                })?;
                log::debug!("{form:?} name of '{path}' is '{name}'");
                return Ok(regular_form(&name));
            }
            Ok(NameQuery::BufferTooSmall(required)) => {
                log::trace!(
                    "name query {attempt}/{} for '{path}' needs {required} units, had {capacity}",
                    policy.max_attempts
                );
                last_error = NativeError::new(codes::ERROR_INSUFFICIENT_BUFFER);
                capacity = required.max(capacity + 1);
            }
            Err(err) => return Err(classify::native_failure(err, path.as_str())),
        }
    }

    Err(classify::native_failure(last_error, path.as_str()))
}
