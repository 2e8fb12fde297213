//! Scoped translation of access-control descriptions into native form.
//!
//! On Windows the SDDL string is converted into a self-relative security
//! descriptor that lives until the [`NativeSecurity`] is dropped. Other hosts
//! only understand a POSIX mode.
#![allow(unsafe_code)]

use crate::error::Result;

/// A platform-neutral access-control description for new directories.
///
/// # Examples
///
/// ```
/// use longpath::native::AccessControl;
///
/// let acl = AccessControl::new()
///     .with_sddl("D:P(A;OICI;GA;;;SY)(A;OICI;GA;;;BA)")
///     .with_mode(0o750);
/// assert_eq!(acl.mode(), Some(0o750));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessControl {
    sddl: Option<String>,
    mode: Option<u32>,
}

impl AccessControl {
    /// An empty description; new directories inherit their parent's security.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Windows security descriptor, in SDDL form.
    #[must_use]
    pub fn with_sddl(mut self, sddl: impl Into<String>) -> Self {
        self.sddl = Some(sddl.into());
        self
    }

    /// Set the POSIX permission bits used on non-Windows hosts.
    #[must_use]
    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    /// The SDDL string, if any.
    #[must_use]
    pub fn sddl(&self) -> Option<&str> {
        self.sddl.as_deref()
    }

    /// The POSIX mode, if any.
    #[must_use]
    pub fn mode(&self) -> Option<u32> {
        self.mode
    }
}

/// The native form of an [`AccessControl`], valid for its own lifetime.
#[derive(Debug)]
pub struct NativeSecurity {
    sddl: Option<String>,
    mode: Option<u32>,
    #[cfg(windows)]
    descriptor: windows_sys::Win32::Security::PSECURITY_DESCRIPTOR,
}

impl NativeSecurity {
    /// Translates `access` into its native form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`](crate::Error::Validation) if the SDDL
    /// string is rejected by the host.
    pub fn acquire(access: &AccessControl) -> Result<Self> {
        #[cfg(windows)]
        let descriptor = match access.sddl() {
            Some(sddl) => windows_descriptor(sddl)?,
            None => std::ptr::null_mut(),
        };

        log::trace!(
            "acquired security (sddl: {:?}, mode: {:?})",
            access.sddl(),
            access.mode()
        );
        Ok(Self {
            sddl: access.sddl.clone(),
            mode: access.mode,
            #[cfg(windows)]
            descriptor,
        })
    }

    /// The SDDL string this security was built from.
    #[must_use]
    pub fn sddl(&self) -> Option<&str> {
        self.sddl.as_deref()
    }

    /// The POSIX mode this security was built from.
    #[must_use]
    pub fn mode(&self) -> Option<u32> {
        self.mode
    }

    /// Security attributes pointing at the translated descriptor.
    ///
    /// The result borrows the descriptor and must not outlive `self`.
    #[cfg(windows)]
    pub(crate) fn attributes(&self) -> windows_sys::Win32::Security::SECURITY_ATTRIBUTES {
        windows_sys::Win32::Security::SECURITY_ATTRIBUTES {
            nLength: u32::try_from(std::mem::size_of::<
                windows_sys::Win32::Security::SECURITY_ATTRIBUTES,
            >())
            .unwrap_or(u32::MAX),
            lpSecurityDescriptor: self.descriptor,
            bInheritHandle: 0,
        }
    }
}

#[cfg(windows)]
fn windows_descriptor(sddl: &str) -> Result<windows_sys::Win32::Security::PSECURITY_DESCRIPTOR> {
    use windows_sys::Win32::Foundation::GetLastError;
    use windows_sys::Win32::Security::Authorization::ConvertStringSecurityDescriptorToSecurityDescriptorW;

    const SDDL_REVISION_1: u32 = 1;

    let wide: Vec<u16> = sddl.encode_utf16().chain(std::iter::once(0)).collect();
    let mut descriptor: windows_sys::Win32::Security::PSECURITY_DESCRIPTOR = std::ptr::null_mut();
    // SAFETY: `wide` is null-terminated and outlives the call; the out pointer is valid.
    let ok = unsafe {
        ConvertStringSecurityDescriptorToSecurityDescriptorW(
            wide.as_ptr(),
            SDDL_REVISION_1,
            &mut descriptor,
            std::ptr::null_mut(),
        )
    };
    if ok == 0 {
        // SAFETY: reads thread-local state only.
        let code = unsafe { GetLastError() };
        return Err(crate::Error::Validation {
            field: "access_control.sddl".to_string(),
            message: format!("invalid security descriptor '{sddl}' (native error {code})"),
        });
    }
    Ok(descriptor)
}

#[cfg(windows)]
impl Drop for NativeSecurity {
    fn drop(&mut self) {
        if !self.descriptor.is_null() {
            // SAFETY: the descriptor was allocated by the conversion call with LocalAlloc.
            unsafe {
                windows_sys::Win32::Foundation::LocalFree(self.descriptor);
            }
        }
    }
}
