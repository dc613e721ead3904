//! Core types and constants for DMBC asset transactions.
//!
//! This crate provides the foundational types shared by the other DMBC
//! crates: wire constants, exact decimal fee fractions, public keys, and
//! asset identifiers.

pub mod asset_id;
pub mod constants;
pub mod decimal;
pub mod keys;

pub use asset_id::AssetId;
pub use decimal::{Fraction, FractionError};
pub use keys::{KeyError, PublicKey};
