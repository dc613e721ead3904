use std::ffi::CStr;
use std::slice;

use libc::c_char;

use crate::error::{ErrorKind, FfiError};

/// Borrow a NUL-terminated C string as UTF-8. Invalid UTF-8 is reported
/// with `kind`, the error the argument's content would otherwise produce.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
pub unsafe fn parse_str<'a>(
    ptr: *const c_char,
    what: &'static str,
    kind: ErrorKind,
) -> Result<&'a str, FfiError> {
    if ptr.is_null() {
        return Err(FfiError::NullPointer(what));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|_| FfiError::Utf8 { what, kind })
}

/// Borrow `len` bytes at `ptr`.
///
/// # Safety
/// `ptr` must be null or valid for reads of `len` bytes for `'a`.
pub unsafe fn parse_bytes<'a>(
    ptr: *const u8,
    len: usize,
    what: &'static str,
) -> Result<&'a [u8], FfiError> {
    if ptr.is_null() {
        return Err(FfiError::NullPointer(what));
    }
    Ok(slice::from_raw_parts(ptr, len))
}
