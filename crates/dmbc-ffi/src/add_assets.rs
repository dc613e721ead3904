//! `add_assets` builder handles and encoded byte buffers.
//!
//! The first call to `dmbc_tx_add_assets_into_bytes` seals the builder:
//! later `add_asset` calls fail with `BuilderSealed`, and encoding again
//! returns the same bytes in a new buffer.

use std::ptr;

use libc::{c_char, size_t};

use dmbc_tx::{AddAssetsBuilder, AddAssetsRequest, MessageConfig};
use dmbc_types::PublicKey;

use crate::common::{parse_bytes, parse_str};
use crate::error::{report, ErrorKind, FfiError};
use crate::registry::{self, BuilderEntry, Resource};

fn register_builder(builder: AddAssetsBuilder) -> u32 {
    registry::insert(Resource::Builder(BuilderEntry {
        builder,
        sealed: false,
    }))
}

unsafe fn parse_key(
    ptr: *const u8,
    len: size_t,
    what: &'static str,
) -> Result<PublicKey, FfiError> {
    let bytes = parse_bytes(ptr, len, what)?;
    PublicKey::from_slice(bytes).map_err(|e| FfiError::Tx(e.into()))
}

/// Create a builder with the default message header.
///
/// Returns 0 on failure.
///
/// # Safety
/// `public_key` must be null or valid for reads of `key_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn dmbc_tx_add_assets_create(
    public_key: *const u8,
    key_len: size_t,
    seed: u64,
    error: u32,
) -> u32 {
    let result = parse_key(public_key, key_len, "public key")
        .map(|key| AddAssetsBuilder::new(key, seed));
    report(error, result).map_or(0, register_builder)
}

/// Create a builder with explicit header fields.
///
/// # Safety
/// `public_key` must be null or valid for reads of `key_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn dmbc_tx_add_assets_create_with_header(
    network_id: u8,
    protocol_version: u8,
    service_id: u16,
    public_key: *const u8,
    key_len: size_t,
    seed: u64,
    error: u32,
) -> u32 {
    let config = MessageConfig::new(network_id, protocol_version, service_id);
    let result = parse_key(public_key, key_len, "public key")
        .map(|key| AddAssetsBuilder::new(key, seed).with_config(config));
    report(error, result).map_or(0, register_builder)
}

/// Create a populated builder from a JSON request.
///
/// # Safety
/// `json` must be null or a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn dmbc_tx_add_assets_from_json(json: *const c_char, error: u32) -> u32 {
    let result = parse_str(json, "request json", ErrorKind::Request).and_then(|text| {
        AddAssetsRequest::from_json(text)
            .and_then(AddAssetsRequest::into_builder)
            .map_err(FfiError::from)
    });
    report(error, result).map_or(0, register_builder)
}

/// Append an asset. The fee schedule is copied; `fees` may be released
/// afterwards.
///
/// Returns 0 on success, -1 on failure.
///
/// # Safety
/// `name` must be null or valid for `name_len` bytes; `receiver_key` must be
/// null or valid for `receiver_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn dmbc_tx_add_assets_add_asset(
    tx: u32,
    name: *const u8,
    name_len: size_t,
    quantity: u64,
    fees: u32,
    receiver_key: *const u8,
    receiver_len: size_t,
    error: u32,
) -> i32 {
    let result = (|| -> Result<(), FfiError> {
        let name = parse_bytes(name, name_len, "asset name")?;
        let name = std::str::from_utf8(name).map_err(|_| FfiError::Utf8 {
            what: "asset name",
            kind: ErrorKind::InvalidName,
        })?;
        let owner = parse_key(receiver_key, receiver_len, "receiver key")?;
        let fees = registry::get_fees(fees)?;
        registry::with_builder(tx, |entry| {
            if entry.sealed {
                return Err(FfiError::Sealed(tx));
            }
            entry.builder.add_asset(name, quantity, &fees, &owner)?;
            Ok(())
        })
    })();
    match report(error, result) {
        Some(()) => 0,
        None => -1,
    }
}

/// Encode the transaction into a new buffer and write its length to
/// `length`. The buffer must be released with `dmbc_bytes_free`.
///
/// Returns null on failure.
///
/// # Safety
/// `length` must be null or valid for a `size_t` write.
#[no_mangle]
pub unsafe extern "C" fn dmbc_tx_add_assets_into_bytes(
    tx: u32,
    length: *mut size_t,
    error: u32,
) -> *const u8 {
    let result = (|| -> Result<Vec<u8>, FfiError> {
        if length.is_null() {
            return Err(FfiError::NullPointer("length"));
        }
        registry::with_builder(tx, |entry| {
            let bytes = entry.builder.encode()?;
            entry.sealed = true;
            Ok(bytes)
        })
    })();
    match report(error, result) {
        Some(bytes) => {
            *length = bytes.len();
            registry::leak_bytes(bytes)
        }
        None => ptr::null(),
    }
}

/// Release a builder. Returns 0 on success, -1 if `tx` is not a live builder.
#[no_mangle]
pub extern "C" fn dmbc_tx_add_assets_free(tx: u32) -> i32 {
    match registry::remove(tx, "add_assets builder", |r| matches!(r, Resource::Builder(_))) {
        Ok(_) => 0,
        Err(e) => {
            log::warn!("dmbc_tx_add_assets_free: {}", e);
            -1
        }
    }
}

/// Release a buffer returned by `dmbc_tx_add_assets_into_bytes`. `length`
/// must be the length reported when the buffer was created.
///
/// Returns 0 on success, -1 if the pointer/length pair is not live.
#[no_mangle]
pub extern "C" fn dmbc_bytes_free(bytes: *const u8, length: size_t) -> i32 {
    match registry::release_bytes(bytes, length) {
        Ok(()) => 0,
        Err(e) => {
            log::warn!("dmbc_bytes_free: {}", e);
            -1
        }
    }
}
