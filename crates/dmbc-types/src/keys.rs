//! Raw Ed25519 public keys as they appear on the wire.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::constants::PUBLIC_KEY_LENGTH;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum KeyError {
    #[error("key must be {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid key hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// A 32-byte public key. No curve validation is performed; the bytes are
/// carried verbatim into the encoded transaction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey([u8; PUBLIC_KEY_LENGTH]);

impl PublicKey {
    pub const fn new(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        PublicKey(bytes)
    }

    /// Create a key from a slice, rejecting anything that is not exactly
    /// [`PUBLIC_KEY_LENGTH`] bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        let arr: [u8; PUBLIC_KEY_LENGTH] =
            bytes.try_into().map_err(|_| KeyError::InvalidLength {
                expected: PUBLIC_KEY_LENGTH,
                actual: bytes.len(),
            })?;
        Ok(PublicKey(arr))
    }

    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(s.trim())?;
        Self::from_slice(&bytes)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; PUBLIC_KEY_LENGTH]> for PublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        PublicKey(bytes)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        PublicKey::from_hex(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_lengths() {
        assert!(PublicKey::from_slice(&[7u8; 32]).is_ok());
        assert_eq!(
            PublicKey::from_slice(&[7u8; 31]),
            Err(KeyError::InvalidLength { expected: 32, actual: 31 })
        );
        assert_eq!(
            PublicKey::from_slice(&[]),
            Err(KeyError::InvalidLength { expected: 32, actual: 0 })
        );
    }

    #[test]
    fn test_hex_roundtrip() {
        let key = PublicKey::new([0xAB; 32]);
        let hex = key.to_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(PublicKey::from_hex(&hex).unwrap(), key);
    }

    #[test]
    fn test_from_hex_errors() {
        assert!(matches!(PublicKey::from_hex("zz"), Err(KeyError::Hex(_))));
        assert!(matches!(
            PublicKey::from_hex("abcd"),
            Err(KeyError::InvalidLength { actual: 2, .. })
        ));
    }
}
