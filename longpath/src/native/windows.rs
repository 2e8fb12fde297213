//! The Win32 backend.
#![allow(unsafe_code)]

use std::ffi::c_void;
use std::ptr;

use windows_sys::Win32::Foundation::{
    CloseHandle, GetLastError, GENERIC_READ, GENERIC_WRITE, HANDLE, INVALID_HANDLE_VALUE,
};
use windows_sys::Win32::Security::SECURITY_ATTRIBUTES;
use windows_sys::Win32::Storage::FileSystem::{
    CreateDirectoryExW, CreateDirectoryTransactedW, CreateDirectoryW, CreateFileTransactedW,
    CreateFileW, GetFileAttributesTransactedW, GetFileAttributesW, GetFileExInfoStandard,
    GetLongPathNameTransactedW, GetLongPathNameW, GetShortPathNameW, FILE_ATTRIBUTE_DIRECTORY,
    FILE_FLAG_BACKUP_SEMANTICS, FILE_SHARE_READ, FILE_SHARE_WRITE, INVALID_FILE_ATTRIBUTES,
    OPEN_EXISTING, WIN32_FILE_ATTRIBUTE_DATA,
};
use windows_sys::Win32::System::Ioctl::FSCTL_SET_COMPRESSION;
use windows_sys::Win32::System::IO::DeviceIoControl;

use crate::native::{
    Capabilities, EntryKind, NameForm, NameQuery, NativeError, NativeFileSystem, NativeSecurity,
    Transaction,
};

const COMPRESSION_FORMAT_NONE: u16 = 0;
const COMPRESSION_FORMAT_DEFAULT: u16 = 1;

/// The Win32 filesystem, including Transactional NTFS.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsFileSystem;

impl WindowsFileSystem {
    /// The Win32 backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn wide(path: &str) -> Vec<u16> {
    path.encode_utf16().chain(std::iter::once(0)).collect()
}

fn last_error() -> NativeError {
    // SAFETY: reads thread-local state only.
    NativeError::new(unsafe { GetLastError() })
}

fn check(ok: i32) -> Result<(), NativeError> {
    if ok == 0 {
        Err(last_error())
    } else {
        Ok(())
    }
}

fn raw_transaction(transaction: &Transaction) -> HANDLE {
    transaction.as_raw() as HANDLE
}

/// A file handle closed on drop.
struct OwnedHandle(HANDLE);

impl Drop for OwnedHandle {
    fn drop(&mut self) {
        // SAFETY: the handle was returned by a successful open and is closed once.
        unsafe {
            CloseHandle(self.0);
        }
    }
}

fn attributes_ptr(
    attributes: Option<&SECURITY_ATTRIBUTES>,
) -> *const SECURITY_ATTRIBUTES {
    attributes.map_or(ptr::null(), |a| a as *const SECURITY_ATTRIBUTES)
}

fn open_directory(path: &str, transaction: Option<&Transaction>) -> Result<OwnedHandle, NativeError> {
    let name = wide(path);
    // SAFETY: `name` is null-terminated and outlives the call.
    let handle = unsafe {
        match transaction {
            Some(tx) => CreateFileTransactedW(
                name.as_ptr(),
                GENERIC_READ | GENERIC_WRITE,
                FILE_SHARE_READ | FILE_SHARE_WRITE,
                ptr::null(),
                OPEN_EXISTING,
                FILE_FLAG_BACKUP_SEMANTICS,
                ptr::null_mut(),
                raw_transaction(tx),
                ptr::null(),
                ptr::null(),
            ),
            None => CreateFileW(
                name.as_ptr(),
                GENERIC_READ | GENERIC_WRITE,
                FILE_SHARE_READ | FILE_SHARE_WRITE,
                ptr::null(),
                OPEN_EXISTING,
                FILE_FLAG_BACKUP_SEMANTICS,
                ptr::null_mut(),
            ),
        }
    };
    if handle == INVALID_HANDLE_VALUE {
        return Err(last_error());
    }
    Ok(OwnedHandle(handle))
}

impl NativeFileSystem for WindowsFileSystem {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            transactions: true,
            templates: true,
        }
    }

    fn entry_kind(
        &self,
        path: &str,
        transaction: Option<&Transaction>,
    ) -> Result<Option<EntryKind>, NativeError> {
        let name = wide(path);
        let attributes = match transaction {
            Some(tx) => {
                // SAFETY: zeroed plain-old-data output structure.
                let mut data: WIN32_FILE_ATTRIBUTE_DATA = unsafe { std::mem::zeroed() };
                // SAFETY: `name` is null-terminated; `data` matches the requested info level.
                let ok = unsafe {
                    GetFileAttributesTransactedW(
                        name.as_ptr(),
                        GetFileExInfoStandard,
                        ptr::addr_of_mut!(data).cast::<c_void>(),
                        raw_transaction(tx),
                    )
                };
                if ok == 0 {
                    INVALID_FILE_ATTRIBUTES
                } else {
                    data.dwFileAttributes
                }
            }
            // SAFETY: `name` is null-terminated and outlives the call.
            None => unsafe { GetFileAttributesW(name.as_ptr()) },
        };

        if attributes == INVALID_FILE_ATTRIBUTES {
            let err = last_error();
            return if err.is_not_found() { Ok(None) } else { Err(err) };
        }
        if attributes & FILE_ATTRIBUTE_DIRECTORY == 0 {
            Ok(Some(EntryKind::File))
        } else {
            Ok(Some(EntryKind::Directory))
        }
    }

    fn create_directory(
        &self,
        path: &str,
        security: Option<&NativeSecurity>,
    ) -> Result<(), NativeError> {
        let name = wide(path);
        let attributes = security.map(NativeSecurity::attributes);
        // SAFETY: all pointers are valid for the duration of the call.
        check(unsafe { CreateDirectoryW(name.as_ptr(), attributes_ptr(attributes.as_ref())) })
    }

    fn create_directory_from_template(
        &self,
        template: &str,
        path: &str,
        security: Option<&NativeSecurity>,
    ) -> Result<(), NativeError> {
        let template = wide(template);
        let name = wide(path);
        let attributes = security.map(NativeSecurity::attributes);
        // SAFETY: all pointers are valid for the duration of the call.
        check(unsafe {
            CreateDirectoryExW(
                template.as_ptr(),
                name.as_ptr(),
                attributes_ptr(attributes.as_ref()),
            )
        })
    }

    fn create_directory_transacted(
        &self,
        template: Option<&str>,
        path: &str,
        security: Option<&NativeSecurity>,
        transaction: &Transaction,
    ) -> Result<(), NativeError> {
        let template = template.map(wide);
        let name = wide(path);
        let attributes = security.map(NativeSecurity::attributes);
        // SAFETY: all pointers are valid for the duration of the call.
        check(unsafe {
            CreateDirectoryTransactedW(
                template.as_ref().map_or(ptr::null(), |t| t.as_ptr()),
                name.as_ptr(),
                attributes_ptr(attributes.as_ref()),
                raw_transaction(transaction),
            )
        })
    }

    fn set_compression(
        &self,
        path: &str,
        enabled: bool,
        transaction: Option<&Transaction>,
    ) -> Result<(), NativeError> {
        let handle = open_directory(path, transaction)?;
        let format = if enabled {
            COMPRESSION_FORMAT_DEFAULT
        } else {
            COMPRESSION_FORMAT_NONE
        };
        let mut returned = 0u32;
        // SAFETY: the input buffer is a live u16 and the handle is open.
        check(unsafe {
            DeviceIoControl(
                handle.0,
                FSCTL_SET_COMPRESSION,
                ptr::addr_of!(format).cast::<c_void>(),
                2,
                ptr::null_mut(),
                0,
                &mut returned,
                ptr::null_mut(),
            )
        })
    }

    fn path_name(
        &self,
        form: NameForm,
        path: &str,
        buffer: &mut [u16],
        transaction: Option<&Transaction>,
    ) -> Result<NameQuery, NativeError> {
        let name = wide(path);
        let capacity = u32::try_from(buffer.len()).unwrap_or(u32::MAX);
        // SAFETY: `buffer` is valid for `capacity` units; `name` is null-terminated.
        let length = unsafe {
            match (form, transaction) {
                (NameForm::Short, _) => {
                    GetShortPathNameW(name.as_ptr(), buffer.as_mut_ptr(), capacity)
                }
                (NameForm::Long, None) => {
                    GetLongPathNameW(name.as_ptr(), buffer.as_mut_ptr(), capacity)
                }
                (NameForm::Long, Some(tx)) => GetLongPathNameTransactedW(
                    name.as_ptr(),
                    buffer.as_mut_ptr(),
                    capacity,
                    raw_transaction(tx),
                ),
            }
        };

        let length = length as usize;
        if length == 0 {
            Err(last_error())
        } else if length >= buffer.len() {
            Ok(NameQuery::BufferTooSmall(length))
        } else {
            Ok(NameQuery::Complete(length))
        }
    }
}
