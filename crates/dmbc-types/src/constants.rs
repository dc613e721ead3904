//! DMBC wire constants.
//!
//! Sizes and identifiers that make up the stable binary layout of an
//! `add_assets` transaction. Changing any of these breaks every verifier
//! that expects the existing layout.

// =============================================================================
// Message Identifiers
// =============================================================================

/// Network identifier written into the message header.
pub const NETWORK_ID: u8 = 0;

/// Protocol major version written into the message header.
pub const PROTOCOL_VERSION: u8 = 0;

/// Identifier of the currency service that owns asset transactions.
pub const SERVICE_ID: u16 = 2;

/// Message identifier of the `add_assets` transaction.
pub const ADD_ASSETS_ID: u16 = 300;

// =============================================================================
// Sizes
// =============================================================================

/// Ed25519 public key size in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 secret key (seed) size in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// Ed25519 detached signature size in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Asset identifier size in bytes.
pub const ASSET_ID_LENGTH: usize = 16;

/// Message header: network id (1) + protocol version (1) + message id (2)
/// + service id (2) + payload length (4).
pub const HEADER_LENGTH: usize = 10;

/// Fixed prefix of an `add_assets` message: header, creator key, seed and
/// asset count.
pub const ADD_ASSETS_PREFIX_LENGTH: usize = HEADER_LENGTH + PUBLIC_KEY_LENGTH + 8 + 4;

/// Fixed part of each encoded asset: name length (1) + quantity (8) + owner
/// key (32) + six fee fields (6 * 8). The name bytes follow the length byte.
pub const ASSET_FIXED_LENGTH: usize = 1 + 8 + PUBLIC_KEY_LENGTH + 6 * 8;

/// Longest asset name the one-byte length field can describe.
pub const MAX_ASSET_NAME_LENGTH: usize = u8::MAX as usize;

// =============================================================================
// Fractions
// =============================================================================

/// Number of decimal places a fee fraction can carry.
pub const FRACTION_DIGITS: usize = 16;

/// Fraction units per whole (10^FRACTION_DIGITS).
pub const FRACTION_SCALE: u64 = 10_000_000_000_000_000;
