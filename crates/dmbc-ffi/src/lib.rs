//! C FFI bindings for building DMBC `add_assets` transactions.
//!
//! All functions use the convention:
//!   - Resources (error channels, fee schedules, builders) are opaque `u32`
//!     handles; 0 is never a valid handle
//!   - Fallible calls take an error handle and overwrite it with the outcome
//!   - Constructors return a handle or 0, mutators return i32: 0 = ok, -1 = error
//!   - Encoded bytes are Rust-owned and released with `dmbc_bytes_free`
//!   - All functions prefixed `dmbc_` to avoid symbol conflicts
//!
//! The matching declarations live in `include/dmbc_capi.h`.

pub mod add_assets;
mod common;
pub mod error;
pub mod fees;
mod registry;

pub use add_assets::{
    dmbc_bytes_free, dmbc_tx_add_assets_add_asset, dmbc_tx_add_assets_create,
    dmbc_tx_add_assets_create_with_header, dmbc_tx_add_assets_free,
    dmbc_tx_add_assets_from_json, dmbc_tx_add_assets_into_bytes,
};
pub use error::{
    dmbc_error_free, dmbc_error_kind, dmbc_error_message, dmbc_error_new, ErrorKind, FfiError,
};
pub use fees::{dmbc_fees_create, dmbc_fees_free};

/// Number of live handles and byte buffers. Zero once a caller has released
/// everything it created.
#[no_mangle]
pub extern "C" fn dmbc_live_handles() -> usize {
    registry::live_count()
}
