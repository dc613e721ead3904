//! DMBC `add_assets` transaction construction, encoding, and parsing.
//!
//! Provides fee schedules with exact decimal fractions, asset descriptors,
//! a builder that accumulates assets in insertion order, a deterministic
//! binary encoder (the bytes that get signed), and the matching decoder.
//! Detached signing is delegated to dmbc-crypto.

pub mod asset;
pub mod builder;
pub mod config;
pub mod encoding;
pub mod fee;
pub mod request;
pub mod sign;
pub mod types;

pub use asset::MetaAsset;
pub use builder::AddAssetsBuilder;
pub use config::MessageConfig;
pub use fee::{Fee, Fees, FeesBuilder};
pub use request::AddAssetsRequest;
pub use sign::{sign_transaction, SignedTransaction};
pub use types::AddAssets;

use dmbc_types::{FractionError, KeyError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TxError {
    #[error("invalid decimal: {0}")]
    InvalidDecimal(#[from] FractionError),

    #[error("{field} is out of range: {value}")]
    IntegerOutOfRange { field: String, value: String },

    #[error("public key must be {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("invalid public key hex: {0}")]
    InvalidKeyHex(String),

    #[error("invalid asset name: {0}")]
    InvalidName(String),

    #[error("asset '{0}' must have a positive quantity")]
    InvalidQuantity(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("invalid request: {0}")]
    Request(String),

    #[error("invalid config: {0}")]
    Config(String),
}

impl From<KeyError> for TxError {
    fn from(err: KeyError) -> Self {
        match err {
            KeyError::InvalidLength { expected, actual } => {
                TxError::InvalidKeyLength { expected, actual }
            }
            KeyError::Hex(e) => TxError::InvalidKeyHex(e.to_string()),
        }
    }
}
