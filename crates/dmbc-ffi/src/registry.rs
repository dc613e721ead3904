//! Handle table for resources owned across the C boundary.
//!
//! Every resource the C side holds is a `u32` handle into one process-wide
//! table. Handles are never reused, so a released or foreign handle is
//! reported as misuse instead of touching freed memory. Encoded byte
//! buffers are handed out as raw pointers and tracked separately by address.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use dmbc_tx::{AddAssetsBuilder, Fees};

use crate::error::{ErrorChannel, FfiError};

/// A builder plus whether it has been encoded. Encoding seals it.
#[derive(Debug)]
pub struct BuilderEntry {
    pub builder: AddAssetsBuilder,
    pub sealed: bool,
}

#[derive(Debug)]
pub enum Resource {
    Error(ErrorChannel),
    Fees(Fees),
    Builder(BuilderEntry),
}

// ─── Handle Management ─────────────────────────────────────────────────────

static NEXT_HANDLE: AtomicU32 = AtomicU32::new(1);

fn handles() -> MutexGuard<'static, HashMap<u32, Resource>> {
    static HANDLES: OnceLock<Mutex<HashMap<u32, Resource>>> = OnceLock::new();
    HANDLES
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

fn buffers() -> MutexGuard<'static, HashMap<usize, Box<[u8]>>> {
    static BUFFERS: OnceLock<Mutex<HashMap<usize, Box<[u8]>>>> = OnceLock::new();
    BUFFERS
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Register a resource and return its handle (never 0).
pub fn insert(resource: Resource) -> u32 {
    let handle = NEXT_HANDLE.fetch_add(1, Ordering::SeqCst);
    handles().insert(handle, resource);
    handle
}

/// Remove a handle if `is_kind` accepts the resource behind it. A handle of
/// the wrong kind is left untouched.
pub fn remove(
    handle: u32,
    expected: &'static str,
    is_kind: impl Fn(&Resource) -> bool,
) -> Result<Resource, FfiError> {
    let mut map = handles();
    match map.get(&handle) {
        None => Err(FfiError::UnknownHandle(handle)),
        Some(r) if !is_kind(r) => Err(FfiError::WrongHandleType { handle, expected }),
        Some(_) => map.remove(&handle).ok_or(FfiError::UnknownHandle(handle)),
    }
}

pub fn with_error<F, R>(handle: u32, f: F) -> Result<R, FfiError>
where
    F: FnOnce(&mut ErrorChannel) -> R,
{
    match handles().get_mut(&handle) {
        Some(Resource::Error(channel)) => Ok(f(channel)),
        Some(_) => Err(FfiError::WrongHandleType {
            handle,
            expected: "error channel",
        }),
        None => Err(FfiError::UnknownHandle(handle)),
    }
}

pub fn get_fees(handle: u32) -> Result<Fees, FfiError> {
    match handles().get(&handle) {
        Some(Resource::Fees(fees)) => Ok(*fees),
        Some(_) => Err(FfiError::WrongHandleType {
            handle,
            expected: "fee schedule",
        }),
        None => Err(FfiError::UnknownHandle(handle)),
    }
}

pub fn with_builder<F, R>(handle: u32, f: F) -> Result<R, FfiError>
where
    F: FnOnce(&mut BuilderEntry) -> Result<R, FfiError>,
{
    match handles().get_mut(&handle) {
        Some(Resource::Builder(entry)) => f(entry),
        Some(_) => Err(FfiError::WrongHandleType {
            handle,
            expected: "add_assets builder",
        }),
        None => Err(FfiError::UnknownHandle(handle)),
    }
}

#[cfg(test)]
pub fn is_live(handle: u32) -> bool {
    handles().contains_key(&handle)
}

// ─── Byte Buffers ───────────────────────────────────────────────────────────

/// Take ownership of `bytes` and return a pointer the C side may read until
/// it calls `dmbc_bytes_free`.
pub fn leak_bytes(bytes: Vec<u8>) -> *const u8 {
    let boxed = bytes.into_boxed_slice();
    let ptr = boxed.as_ptr();
    buffers().insert(ptr as usize, boxed);
    ptr
}

pub fn release_bytes(ptr: *const u8, len: usize) -> Result<(), String> {
    let mut map = buffers();
    match map.get(&(ptr as usize)) {
        None => Err(format!("buffer {:p} is not live", ptr)),
        Some(buf) if buf.len() != len => Err(format!(
            "buffer {:p} has {} bytes, release asked for {}",
            ptr,
            buf.len(),
            len
        )),
        Some(_) => {
            map.remove(&(ptr as usize));
            Ok(())
        }
    }
}

/// Live handles plus live byte buffers.
pub fn live_count() -> usize {
    let handles = handles().len();
    handles + buffers().len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique_and_nonzero() {
        let a = insert(Resource::Fees(Fees::zero()));
        let b = insert(Resource::Fees(Fees::zero()));
        assert!(a > 0 && b > 0);
        assert_ne!(a, b);
        remove(a, "fee schedule", |r| matches!(r, Resource::Fees(_))).unwrap();
        remove(b, "fee schedule", |r| matches!(r, Resource::Fees(_))).unwrap();
    }

    #[test]
    fn test_wrong_kind_is_not_removed() {
        let h = insert(Resource::Fees(Fees::zero()));
        let err = remove(h, "error channel", |r| matches!(r, Resource::Error(_))).unwrap_err();
        assert!(matches!(err, FfiError::WrongHandleType { .. }));
        assert!(is_live(h));
        assert!(get_fees(h).is_ok());
        remove(h, "fee schedule", |r| matches!(r, Resource::Fees(_))).unwrap();
        assert!(!is_live(h));
        assert!(matches!(get_fees(h), Err(FfiError::UnknownHandle(_))));
    }

    #[test]
    fn test_byte_buffer_lifecycle() {
        let ptr = leak_bytes(vec![1, 2, 3]);
        assert_eq!(unsafe { std::slice::from_raw_parts(ptr, 3) }, &[1, 2, 3]);
        assert!(release_bytes(ptr, 2).is_err());
        assert!(release_bytes(ptr, 3).is_ok());
        assert!(release_bytes(ptr, 3).is_err());
    }
}
