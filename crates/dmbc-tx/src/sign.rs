//! Detached signing of encoded transactions.
//!
//! The signature covers exactly the bytes produced by
//! [`AddAssets::to_bytes`]. For transport the two are concatenated, with the
//! 64-byte signature last.

use dmbc_crypto::KeyPair;
use dmbc_types::constants::SIGNATURE_LENGTH;
use dmbc_types::PublicKey;

use crate::types::AddAssets;
use crate::TxError;

/// Encoded transaction bytes plus their detached signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub tx_bytes: Vec<u8>,
    pub signature: [u8; SIGNATURE_LENGTH],
}

/// Encode `tx` and sign the bytes with `keypair`.
pub fn sign_transaction(tx: &AddAssets, keypair: &KeyPair) -> SignedTransaction {
    let tx_bytes = tx.to_bytes();
    let signature = keypair.sign(&tx_bytes);
    SignedTransaction {
        tx_bytes,
        signature,
    }
}

impl SignedTransaction {
    /// Verify against an explicit public key.
    pub fn verify(&self, public_key: &PublicKey) -> bool {
        dmbc_crypto::verify(&self.tx_bytes, &self.signature, public_key)
    }

    /// Verify against the creator key recorded inside the transaction.
    pub fn verify_creator(&self) -> Result<bool, TxError> {
        let tx = AddAssets::from_bytes(&self.tx_bytes)?;
        Ok(self.verify(tx.public_key()))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.tx_bytes.len() + SIGNATURE_LENGTH);
        out.extend_from_slice(&self.tx_bytes);
        out.extend_from_slice(&self.signature);
        out
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, TxError> {
        if data.len() < SIGNATURE_LENGTH {
            return Err(TxError::Decode(format!(
                "signed message is {} bytes, shorter than a signature",
                data.len()
            )));
        }
        let (tx_bytes, sig) = data.split_at(data.len() - SIGNATURE_LENGTH);
        let mut signature = [0u8; SIGNATURE_LENGTH];
        signature.copy_from_slice(sig);
        Ok(Self {
            tx_bytes: tx_bytes.to_vec(),
            signature,
        })
    }
}
