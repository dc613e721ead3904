//! Fee schedule handles.

use libc::c_char;

use dmbc_tx::{Fee, Fees};

use crate::common::parse_str;
use crate::error::{report, ErrorKind, FfiError};
use crate::registry::{self, Resource};

unsafe fn parse_fee(
    fixed: u64,
    fraction: *const c_char,
    what: &'static str,
) -> Result<Fee, FfiError> {
    let text = parse_str(fraction, what, ErrorKind::InvalidDecimal)?;
    Ok(Fee::parse(fixed, text)?)
}

/// Create a fee schedule from three `(fixed, fraction)` pairs.
///
/// Returns 0 on failure; nothing is allocated in that case.
///
/// # Safety
/// The fraction pointers must be null or NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn dmbc_fees_create(
    trade_fixed: u64,
    trade_fraction: *const c_char,
    exchange_fixed: u64,
    exchange_fraction: *const c_char,
    transfer_fixed: u64,
    transfer_fraction: *const c_char,
    error: u32,
) -> u32 {
    let result = (|| -> Result<Fees, FfiError> {
        Ok(Fees::new(
            parse_fee(trade_fixed, trade_fraction, "trade fraction")?,
            parse_fee(exchange_fixed, exchange_fraction, "exchange fraction")?,
            parse_fee(transfer_fixed, transfer_fraction, "transfer fraction")?,
        ))
    })();
    report(error, result).map_or(0, |fees| registry::insert(Resource::Fees(fees)))
}

/// Release a fee schedule. Builders keep their own copies, so this is safe
/// to call while builders that used the schedule are still alive.
///
/// Returns 0 on success, -1 if `fees` is not a live fee schedule.
#[no_mangle]
pub extern "C" fn dmbc_fees_free(fees: u32) -> i32 {
    match registry::remove(fees, "fee schedule", |r| matches!(r, Resource::Fees(_))) {
        Ok(_) => 0,
        Err(e) => {
            log::warn!("dmbc_fees_free: {}", e);
            -1
        }
    }
}
