//! Error channel shared by every fallible C call.
//!
//! A channel is created once with `dmbc_error_new`, passed to each call, and
//! overwritten by it: success resets the kind to `DMBC_ERROR_NONE`, failure
//! records a kind and a message. Callers check the channel after each call.

use std::ffi::CString;
use std::ptr;

use libc::c_char;
use thiserror::Error;

use dmbc_tx::TxError;

use crate::registry::{self, Resource};

/// Machine-checkable error kinds. Values are part of the C ABI.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    None = 0,
    InvalidDecimal = 1,
    IntegerOutOfRange = 2,
    InvalidKeyLength = 3,
    InvalidName = 4,
    InvalidQuantity = 5,
    Encoding = 6,
    HandleMisuse = 7,
    BuilderSealed = 8,
    Request = 9,
    Decode = 10,
}

#[derive(Debug, Error)]
pub enum FfiError {
    #[error(transparent)]
    Tx(#[from] TxError),

    #[error("handle {0} is not live")]
    UnknownHandle(u32),

    #[error("handle {handle} is not a {expected}")]
    WrongHandleType { handle: u32, expected: &'static str },

    #[error("null pointer passed for {0}")]
    NullPointer(&'static str),

    /// Text argument that is not UTF-8, reported as `kind`.
    #[error("{what} is not valid UTF-8")]
    Utf8 { what: &'static str, kind: ErrorKind },

    #[error("builder {0} was already encoded and accepts no more assets")]
    Sealed(u32),
}

impl FfiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FfiError::Tx(e) => match e {
                TxError::InvalidDecimal(_) => ErrorKind::InvalidDecimal,
                TxError::IntegerOutOfRange { .. } => ErrorKind::IntegerOutOfRange,
                TxError::InvalidKeyLength { .. } | TxError::InvalidKeyHex(_) => {
                    ErrorKind::InvalidKeyLength
                }
                TxError::InvalidName(_) => ErrorKind::InvalidName,
                TxError::InvalidQuantity(_) => ErrorKind::InvalidQuantity,
                TxError::Encoding(_) => ErrorKind::Encoding,
                TxError::Decode(_) => ErrorKind::Decode,
                TxError::Request(_) | TxError::Config(_) => ErrorKind::Request,
            },
            FfiError::UnknownHandle(_)
            | FfiError::WrongHandleType { .. }
            | FfiError::NullPointer(_) => ErrorKind::HandleMisuse,
            FfiError::Utf8 { kind, .. } => *kind,
            FfiError::Sealed(_) => ErrorKind::BuilderSealed,
        }
    }
}

/// State held behind an error handle.
#[derive(Debug)]
pub struct ErrorChannel {
    kind: ErrorKind,
    message: Option<CString>,
}

impl ErrorChannel {
    pub fn new() -> Self {
        Self {
            kind: ErrorKind::None,
            message: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn clear(&mut self) {
        self.kind = ErrorKind::None;
        self.message = None;
    }

    pub fn set(&mut self, err: &FfiError) {
        self.kind = err.kind();
        // Interior NULs are cut off rather than losing the whole message.
        let text = err.to_string();
        let text = text.split('\0').next().unwrap_or_default();
        self.message = CString::new(text).ok();
    }
}

impl Default for ErrorChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Write the outcome of a call into channel `error` and hand back the value.
pub(crate) fn report<T>(error: u32, result: Result<T, FfiError>) -> Option<T> {
    let outcome = registry::with_error(error, |channel| match &result {
        Ok(_) => channel.clear(),
        Err(e) => channel.set(e),
    });
    if outcome.is_err() {
        if let Err(e) = &result {
            log::warn!("dmbc-ffi: error channel {} is not live, dropping: {}", error, e);
        }
    }
    result.ok()
}

// ─── Exports ────────────────────────────────────────────────────────────────

#[no_mangle]
pub extern "C" fn dmbc_error_new() -> u32 {
    registry::insert(Resource::Error(ErrorChannel::new()))
}

/// Returns 0 on success, -1 if `error` is not a live error handle.
#[no_mangle]
pub extern "C" fn dmbc_error_free(error: u32) -> i32 {
    match registry::remove(error, "error channel", |r| matches!(r, Resource::Error(_))) {
        Ok(_) => 0,
        Err(e) => {
            log::warn!("dmbc_error_free: {}", e);
            -1
        }
    }
}

/// Kind of the last recorded error; `HandleMisuse` if `error` is not live.
#[no_mangle]
pub extern "C" fn dmbc_error_kind(error: u32) -> i32 {
    registry::with_error(error, |channel| channel.kind())
        .unwrap_or(ErrorKind::HandleMisuse) as i32
}

/// Message of the last recorded error, or null when there is none.
///
/// The string is owned by the channel and stays valid until the channel is
/// written again or freed.
#[no_mangle]
pub extern "C" fn dmbc_error_message(error: u32) -> *const c_char {
    registry::with_error(error, |channel| {
        channel
            .message
            .as_ref()
            .map_or(ptr::null(), |m| m.as_ptr())
    })
    .unwrap_or(ptr::null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn test_new_channel_is_clear() {
        let err = dmbc_error_new();
        assert_ne!(err, 0);
        assert_eq!(dmbc_error_kind(err), ErrorKind::None as i32);
        assert!(dmbc_error_message(err).is_null());
        assert_eq!(dmbc_error_free(err), 0);
    }

    #[test]
    fn test_report_sets_and_clears() {
        let err = dmbc_error_new();
        let failed: Option<()> = report(err, Err(FfiError::Sealed(5)));
        assert!(failed.is_none());
        assert_eq!(dmbc_error_kind(err), ErrorKind::BuilderSealed as i32);
        let msg = unsafe { CStr::from_ptr(dmbc_error_message(err)) };
        assert!(msg.to_str().unwrap().contains("already encoded"));

        assert_eq!(report(err, Ok(7)), Some(7));
        assert_eq!(dmbc_error_kind(err), ErrorKind::None as i32);
        assert!(dmbc_error_message(err).is_null());
        dmbc_error_free(err);
    }

    #[test]
    fn test_released_channel() {
        let err = dmbc_error_new();
        assert_eq!(dmbc_error_free(err), 0);
        assert_eq!(dmbc_error_free(err), -1);
        assert_eq!(dmbc_error_kind(err), ErrorKind::HandleMisuse as i32);
        assert!(dmbc_error_message(err).is_null());
    }

    #[test]
    fn test_kind_mapping() {
        let e = FfiError::from(TxError::InvalidQuantity("x".into()));
        assert_eq!(e.kind(), ErrorKind::InvalidQuantity);
        assert_eq!(FfiError::NullPointer("name").kind(), ErrorKind::HandleMisuse);
        assert_eq!(FfiError::UnknownHandle(9).kind(), ErrorKind::HandleMisuse);
        let utf8 = FfiError::Utf8 {
            what: "request json",
            kind: ErrorKind::Request,
        };
        assert_eq!(utf8.kind(), ErrorKind::Request);
    }
}
