//! Detached Ed25519 signatures and hashing for DMBC transactions.
//!
//! Transactions are signed outside the builder: the encoded bytes are
//! handed to [`sign`] and the resulting 64-byte signature travels next to
//! them. [`verify`] never panics; malformed keys or signatures simply fail
//! verification.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use thiserror::Error;

use dmbc_types::constants::{SECRET_KEY_LENGTH, SIGNATURE_LENGTH};
use dmbc_types::PublicKey;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("secret key must be {expected} bytes, got {actual}")]
    InvalidSecretKey { expected: usize, actual: usize },

    #[error("signature must be {expected} bytes, got {actual}")]
    InvalidSignature { expected: usize, actual: usize },

    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// Secret key bytes (the Ed25519 seed).
pub type SecretKey = [u8; SECRET_KEY_LENGTH];

/// Ed25519 key pair.
#[derive(Clone)]
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generate a fresh key pair from the OS random number generator.
    pub fn generate() -> Self {
        KeyPair {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    pub fn from_secret(secret: &SecretKey) -> Self {
        KeyPair {
            signing_key: SigningKey::from_bytes(secret),
        }
    }

    pub fn from_secret_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(s.trim())?;
        let secret: SecretKey = bytes.as_slice().try_into().map_err(|_| {
            CryptoError::InvalidSecretKey {
                expected: SECRET_KEY_LENGTH,
                actual: bytes.len(),
            }
        })?;
        Ok(Self::from_secret(&secret))
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::new(self.signing_key.verifying_key().to_bytes())
    }

    pub fn secret_key(&self) -> SecretKey {
        self.signing_key.to_bytes()
    }

    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_LENGTH] {
        self.signing_key.sign(message).to_bytes()
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// Sign `message` with a raw secret key.
pub fn sign(message: &[u8], secret: &SecretKey) -> [u8; SIGNATURE_LENGTH] {
    KeyPair::from_secret(secret).sign(message)
}

/// Verify a detached signature. Returns `false` for any malformed input.
pub fn verify(message: &[u8], signature: &[u8], public_key: &PublicKey) -> bool {
    let Ok(sig_bytes) = <[u8; SIGNATURE_LENGTH]>::try_from(signature) else {
        return false;
    };
    let Ok(key) = VerifyingKey::from_bytes(public_key.as_bytes()) else {
        return false;
    };
    key.verify(message, &Signature::from_bytes(&sig_bytes)).is_ok()
}

/// Parse a hex-encoded detached signature.
pub fn signature_from_hex(s: &str) -> Result<[u8; SIGNATURE_LENGTH], CryptoError> {
    let bytes = hex::decode(s.trim())?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| CryptoError::InvalidSignature {
            expected: SIGNATURE_LENGTH,
            actual: bytes.len(),
        })
}

/// SHA-256 of arbitrary data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify() {
        let kp = KeyPair::from_secret(&[42u8; 32]);
        let msg = b"add assets";
        let sig = kp.sign(msg);
        assert!(verify(msg, &sig, &kp.public_key()));
        assert_eq!(sign(msg, &kp.secret_key()), sig);
    }

    #[test]
    fn test_verify_rejects_mutation() {
        let kp = KeyPair::generate();
        let msg = vec![1u8, 2, 3, 4];
        let sig = kp.sign(&msg);

        let mut tampered = msg.clone();
        tampered[2] ^= 0x01;
        assert!(!verify(&tampered, &sig, &kp.public_key()));

        let other = KeyPair::generate();
        assert!(!verify(&msg, &sig, &other.public_key()));
    }

    #[test]
    fn test_verify_malformed_signature() {
        let kp = KeyPair::generate();
        assert!(!verify(b"x", &[0u8; 10], &kp.public_key()));
    }

    #[test]
    fn test_secret_hex() {
        let kp = KeyPair::generate();
        let restored = KeyPair::from_secret_hex(&hex::encode(kp.secret_key())).unwrap();
        assert_eq!(restored.public_key(), kp.public_key());
        assert!(matches!(
            KeyPair::from_secret_hex("abcd"),
            Err(CryptoError::InvalidSecretKey { actual: 2, .. })
        ));
    }

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
