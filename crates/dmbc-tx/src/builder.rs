//! Transaction builder.
//!
//! Accumulates assets for a single `add_assets` transaction. The creator
//! key and seed are fixed at construction; assets are appended in order and
//! that order is preserved in the encoded bytes. Duplicate names are kept as
//! separate entries.

use dmbc_types::constants::ADD_ASSETS_PREFIX_LENGTH;
use dmbc_types::PublicKey;

use crate::asset::MetaAsset;
use crate::config::MessageConfig;
use crate::fee::Fees;
use crate::types::AddAssets;
use crate::TxError;

/// Builder for an `add_assets` transaction.
#[derive(Debug, Clone)]
pub struct AddAssetsBuilder {
    config: MessageConfig,
    public_key: PublicKey,
    seed: u64,
    assets: Vec<MetaAsset>,
}

impl AddAssetsBuilder {
    /// Create a builder for assets issued by `public_key`, with an
    /// anti-replay `seed`.
    pub fn new(public_key: PublicKey, seed: u64) -> Self {
        Self {
            config: MessageConfig::default(),
            public_key,
            seed,
            assets: Vec::new(),
        }
    }

    /// Override the message header fields.
    pub fn with_config(mut self, config: MessageConfig) -> Self {
        self.config = config;
        self
    }

    /// Append an asset. The fee schedule is copied into the asset.
    pub fn add_asset(
        &mut self,
        name: &str,
        quantity: u64,
        fees: &Fees,
        owner: &PublicKey,
    ) -> Result<&mut Self, TxError> {
        let asset = MetaAsset::new(name, quantity, *fees, *owner)?;
        self.add_meta_asset(asset)
    }

    /// Append a prebuilt asset. It is validated the same way as
    /// [`add_asset`](Self::add_asset) input.
    pub fn add_meta_asset(&mut self, asset: MetaAsset) -> Result<&mut Self, TxError> {
        asset.validate()?;
        log::debug!(
            "add_assets: appending '{}' x{} for {} (#{})",
            asset.name,
            asset.quantity,
            asset.owner,
            self.assets.len() + 1
        );
        self.assets.push(asset);
        Ok(self)
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

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Encode the transaction without consuming the builder.
    ///
    /// Calling this twice on an unchanged builder yields identical bytes.
    pub fn encode(&self) -> Result<Vec<u8>, TxError> {
        self.check_layout()?;
        let tx = AddAssets::from_parts(
            self.config,
            self.public_key,
            self.seed,
            self.assets.clone(),
        );
        let bytes = tx.to_bytes();
        log::debug!(
            "add_assets: encoded {} assets into {} bytes",
            self.assets.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Finish building. The builder is consumed, so no asset can be added
    /// after the transaction exists.
    pub fn build(self) -> Result<AddAssets, TxError> {
        self.check_layout()?;
        Ok(AddAssets::from_parts(self.config, self.public_key, self.seed, self.assets))
    }

    /// Re-check everything the decoder will insist on before any bytes are
    /// produced.
    fn check_layout(&self) -> Result<(), TxError> {
        if self.assets.len() > u32::MAX as usize {
            return Err(TxError::Encoding(format!(
                "{} assets exceed the u32 asset count",
                self.assets.len()
            )));
        }
        let mut total = ADD_ASSETS_PREFIX_LENGTH;
        for asset in &self.assets {
            if asset.name.is_empty() || asset.name.len() > u8::MAX as usize {
                return Err(TxError::Encoding(format!(
                    "asset name of {} bytes does not fit the length field",
                    asset.name.len()
                )));
            }
            if asset.quantity == 0 {
                return Err(TxError::Encoding(format!(
                    "asset '{}' has zero quantity",
                    asset.name
                )));
            }
            total += asset.encoded_len();
        }
        if total > u32::MAX as usize {
            return Err(TxError::Encoding(format!(
                "message of {} bytes exceeds the u32 payload length",
                total
            )));
        }
        Ok(())
    }
}
