//! Assets declared by an `add_assets` transaction.

use dmbc_types::constants::{ASSET_FIXED_LENGTH, MAX_ASSET_NAME_LENGTH};
use dmbc_types::{AssetId, PublicKey};
use serde::Serialize;

use crate::fee::Fees;
use crate::TxError;

/// One asset to be committed into the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaAsset {
    /// Asset name, 1..=255 bytes of UTF-8.
    pub name: String,
    /// Number of units issued. Always positive.
    pub quantity: u64,
    /// Key of the wallet receiving the issued units.
    pub owner: PublicKey,
    pub fees: Fees,
}

impl MetaAsset {
    pub fn new(name: &str, quantity: u64, fees: Fees, owner: PublicKey) -> Result<Self, TxError> {
        let asset = Self {
            name: name.to_string(),
            quantity,
            owner,
            fees,
        };
        asset.validate()?;
        Ok(asset)
    }

    /// Check the name and quantity. Needed again for assets built from a
    /// struct literal, since the fields are public.
    pub fn validate(&self) -> Result<(), TxError> {
        validate_name(&self.name)?;
        if self.quantity == 0 {
            return Err(TxError::InvalidQuantity(self.name.clone()));
        }
        Ok(())
    }

    pub fn asset_id(&self) -> AssetId {
        AssetId::from_data(&self.name, &self.owner)
    }

    /// Bytes this asset occupies in the encoded transaction.
    pub fn encoded_len(&self) -> usize {
        ASSET_FIXED_LENGTH + self.name.len()
    }
}

fn validate_name(name: &str) -> Result<(), TxError> {
    if name.is_empty() {
        return Err(TxError::InvalidName("name is empty".to_string()));
    }
    if name.len() > MAX_ASSET_NAME_LENGTH {
        return Err(TxError::InvalidName(format!(
            "name is {} bytes, max {}",
            name.len(),
            MAX_ASSET_NAME_LENGTH
        )));
    }
    Ok(())
}
