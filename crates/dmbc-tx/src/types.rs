//! The `add_assets` transaction and its binary form.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! header            10 bytes (see encoding::MessageHeader)
//! creator key       32
//! seed               8
//! asset count        4
//! per asset:
//!   name length      1, name bytes
//!   quantity         8
//!   owner key       32
//!   trade fixed      8, trade fraction units     8
//!   exchange fixed   8, exchange fraction units  8
//!   transfer fixed   8, transfer fraction units  8
//! ```
//!
//! These bytes are exactly what gets signed. Field order and widths are a
//! wire contract shared with every verifier.

use dmbc_types::constants::{ADD_ASSETS_ID, ADD_ASSETS_PREFIX_LENGTH};
use dmbc_types::{Fraction, PublicKey};
use serde::Serialize;

use crate::asset::MetaAsset;
use crate::config::MessageConfig;
use crate::encoding::*;
use crate::fee::{Fee, Fees};
use crate::TxError;

/// A complete, validated `add_assets` transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddAssets {
    #[serde(flatten)]
    config: MessageConfig,
    public_key: PublicKey,
    seed: u64,
    assets: Vec<MetaAsset>,
}

impl AddAssets {
    /// Callers guarantee the asset list has already been validated.
    pub(crate) fn from_parts(
        config: MessageConfig,
        public_key: PublicKey,
        seed: u64,
        assets: Vec<MetaAsset>,
    ) -> Self {
        Self {
            config,
            public_key,
            seed,
            assets,
        }
    }

    pub fn config(&self) -> &MessageConfig {
        &self.config
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn assets(&self) -> &[MetaAsset] {
        &self.assets
    }

    pub fn encoded_len(&self) -> usize {
        ADD_ASSETS_PREFIX_LENGTH + self.assets.iter().map(MetaAsset::encoded_len).sum::<usize>()
    }

    /// Serialize to the signed wire form. Deterministic.
    pub fn to_bytes(&self) -> Vec<u8> {
        let len = self.encoded_len();
        let mut buf = Vec::with_capacity(len);

        MessageHeader::new(&self.config, ADD_ASSETS_ID, len as u32).write(&mut buf);
        buf.extend_from_slice(self.public_key.as_bytes());
        write_u64_le(&mut buf, self.seed);
        write_u32_le(&mut buf, self.assets.len() as u32);

        for asset in &self.assets {
            write_short_str(&mut buf, &asset.name);
            write_u64_le(&mut buf, asset.quantity);
            buf.extend_from_slice(asset.owner.as_bytes());
            write_fees(&mut buf, &asset.fees);
        }

        debug_assert_eq!(buf.len(), len);
        buf
    }

    /// Parse and validate an encoded transaction.
    pub fn from_bytes(data: &[u8]) -> Result<Self, TxError> {
        let mut r = Reader::new(data);
        let header = MessageHeader::read(&mut r)?;

        if header.message_id != ADD_ASSETS_ID {
            return Err(TxError::Decode(format!(
                "message id {} is not add_assets ({})",
                header.message_id, ADD_ASSETS_ID
            )));
        }
        if header.payload_length as usize != data.len() {
            return Err(TxError::Decode(format!(
                "header declares {} bytes, got {}",
                header.payload_length,
                data.len()
            )));
        }

        let public_key = r.read_public_key()?;
        let seed = r.read_u64_le()?;
        let count = r.read_u32_le()? as usize;

        // Every asset takes at least ASSET_FIXED_LENGTH bytes, so a count
        // larger than the remaining data allows is rejected before allocating.
        let max_count = r.remaining() / dmbc_types::constants::ASSET_FIXED_LENGTH;
        if count > max_count {
            return Err(TxError::Decode(format!(
                "asset count {} does not fit in {} remaining bytes",
                count,
                r.remaining()
            )));
        }

        let mut assets = Vec::with_capacity(count);
        for _ in 0..count {
            let name = r.read_short_str()?;
            let quantity = r.read_u64_le()?;
            let owner = r.read_public_key()?;
            let fees = read_fees(&mut r)?;
            assets.push(MetaAsset::new(name, quantity, fees, owner)?);
        }

        if r.remaining() != 0 {
            return Err(TxError::Decode(format!(
                "{} trailing bytes after offset {}",
                r.remaining(),
                r.position()
            )));
        }

        Ok(Self::from_parts(header.config(), public_key, seed, assets))
    }

    /// SHA-256 of the encoded transaction, hex encoded.
    pub fn hash(&self) -> String {
        hex::encode(dmbc_crypto::sha256(&self.to_bytes()))
    }
}

fn write_fee(buf: &mut Vec<u8>, fee: &Fee) {
    write_u64_le(buf, fee.fixed);
    write_u64_le(buf, fee.fraction.units());
}

fn write_fees(buf: &mut Vec<u8>, fees: &Fees) {
    write_fee(buf, &fees.trade);
    write_fee(buf, &fees.exchange);
    write_fee(buf, &fees.transfer);
}

fn read_fee(r: &mut Reader<'_>) -> Result<Fee, TxError> {
    let fixed = r.read_u64_le()?;
    let fraction = Fraction::from_units(r.read_u64_le()?)?;
    Ok(Fee::new(fixed, fraction))
}

fn read_fees(r: &mut Reader<'_>) -> Result<Fees, TxError> {
    Ok(Fees::new(read_fee(r)?, read_fee(r)?, read_fee(r)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmbc_types::constants::{ASSET_FIXED_LENGTH, HEADER_LENGTH};

    fn sample() -> AddAssets {
        let owner = PublicKey::new([5u8; 32]);
        let fees = Fees::parse(10, "0.1", 20, "0.2", 9, "0.99999").unwrap();
        AddAssets::from_parts(
            MessageConfig::default(),
            PublicKey::new([4u8; 32]),
            123,
            vec![
                MetaAsset::new("gold", 10, fees, owner).unwrap(),
                MetaAsset::new("silver", 10_000, fees, owner).unwrap(),
            ],
        )
    }

    #[test]
    fn test_encoded_length() {
        let tx = sample();
        let bytes = tx.to_bytes();
        assert_eq!(bytes.len(), ADD_ASSETS_PREFIX_LENGTH + 2 * ASSET_FIXED_LENGTH + 4 + 6);
        assert_eq!(bytes.len(), tx.encoded_len());
    }

    #[test]
    fn test_field_positions() {
        let bytes = sample().to_bytes();
        assert_eq!(&bytes[HEADER_LENGTH..HEADER_LENGTH + 32], &[4u8; 32]);
        assert_eq!(&bytes[42..50], &123u64.to_le_bytes());
        assert_eq!(&bytes[50..54], &2u32.to_le_bytes());
        // First asset name.
        assert_eq!(bytes[54], 4);
        assert_eq!(&bytes[55..59], b"gold");
        // Quantity, then owner key.
        assert_eq!(&bytes[59..67], &10u64.to_le_bytes());
        assert_eq!(&bytes[67..99], &[5u8; 32]);
        // Trade fixed and trade fraction units.
        assert_eq!(&bytes[99..107], &10u64.to_le_bytes());
        assert_eq!(&bytes[107..115], &1_000_000_000_000_000u64.to_le_bytes());
    }

    #[test]
    fn test_decode_matches() {
        let tx = sample();
        let decoded = AddAssets::from_bytes(&tx.to_bytes()).unwrap();
        assert_eq!(decoded, tx);
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let mut bytes = sample().to_bytes();
        bytes.push(0);
        assert!(matches!(AddAssets::from_bytes(&bytes), Err(TxError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_truncation() {
        let bytes = sample().to_bytes();
        assert!(AddAssets::from_bytes(&bytes[..bytes.len() - 1]).is_err());
        assert!(AddAssets::from_bytes(&bytes[..5]).is_err());
    }

    #[test]
    fn test_decode_rejects_wrong_message_id() {
        let mut bytes = sample().to_bytes();
        bytes[2] = 0x2d;
        assert!(matches!(AddAssets::from_bytes(&bytes), Err(TxError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_huge_count() {
        let mut bytes = sample().to_bytes();
        bytes[50..54].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(AddAssets::from_bytes(&bytes), Err(TxError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_fraction_above_one() {
        let mut bytes = sample().to_bytes();
        bytes[107..115].copy_from_slice(&u64::MAX.to_le_bytes());
        assert!(matches!(AddAssets::from_bytes(&bytes), Err(TxError::InvalidDecimal(_))));
    }

    #[test]
    fn test_decode_rejects_zero_quantity() {
        let mut bytes = sample().to_bytes();
        bytes[59..67].copy_from_slice(&0u64.to_le_bytes());
        assert!(matches!(AddAssets::from_bytes(&bytes), Err(TxError::InvalidQuantity(_))));
    }

    #[test]
    fn test_hash_is_stable() {
        let tx = sample();
        assert_eq!(tx.hash(), tx.clone().hash());
        assert_eq!(tx.hash().len(), 64);
    }
}
