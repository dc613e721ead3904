//! JSON description of an `add_assets` transaction.
//!
//! ```json
//! {
//!   "public_key": "<hex>",
//!   "seed": 123,
//!   "header": { "network_id": 0 },
//!   "assets": [
//!     { "data": "Asset#10", "amount": 10, "receiver": "<hex>",
//!       "fees": { "trade":    { "fixed": 10, "fraction": "0.1" },
//!                 "exchange": { "fixed": 20, "fraction": "0.2" },
//!                 "transfer": { "fixed": 9,  "fraction": "0.99999" } } }
//!   ]
//! }
//! ```
//!
//! Integers are kept as raw JSON numbers until conversion so that negative
//! or oversized values surface as [`TxError::IntegerOutOfRange`]. Fractions
//! must be strings; a JSON number has already been through binary floating
//! point and is rejected as a malformed request.

use dmbc_types::PublicKey;
use serde::Deserialize;
use serde_json::{Number, Value};

use crate::builder::AddAssetsBuilder;
use crate::config::MessageConfig;
use crate::fee::{Fee, Fees};
use crate::TxError;

#[derive(Debug, Clone, Deserialize)]
pub struct AddAssetsRequest {
    pub public_key: String,
    pub seed: Number,
    #[serde(default)]
    pub header: Option<MessageConfig>,
    #[serde(default)]
    pub assets: Vec<AssetRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetRequest {
    pub data: String,
    pub amount: Number,
    pub receiver: String,
    pub fees: FeesRequest,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeesRequest {
    pub trade: FeeRequest,
    pub exchange: FeeRequest,
    pub transfer: FeeRequest,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeeRequest {
    pub fixed: Number,
    pub fraction: Value,
}

impl AddAssetsRequest {
    pub fn from_json(json: &str) -> Result<Self, TxError> {
        serde_json::from_str(json).map_err(|e| TxError::Request(e.to_string()))
    }

    /// Validate every field and produce a populated builder.
    pub fn into_builder(self) -> Result<AddAssetsBuilder, TxError> {
        let public_key = PublicKey::from_hex(&self.public_key)?;
        let seed = to_u64("seed", &self.seed)?;

        let mut builder =
            AddAssetsBuilder::new(public_key, seed).with_config(self.header.unwrap_or_default());

        for (i, asset) in self.assets.iter().enumerate() {
            let quantity = to_u64(&format!("assets[{}].amount", i), &asset.amount)?;
            let owner = PublicKey::from_hex(&asset.receiver)?;
            let fees = Fees::new(
                asset.fees.trade.to_fee(&format!("assets[{}].fees.trade", i))?,
                asset.fees.exchange.to_fee(&format!("assets[{}].fees.exchange", i))?,
                asset.fees.transfer.to_fee(&format!("assets[{}].fees.transfer", i))?,
            );
            builder.add_asset(&asset.data, quantity, &fees, &owner)?;
        }

        Ok(builder)
    }
}

impl FeeRequest {
    fn to_fee(&self, field: &str) -> Result<Fee, TxError> {
        let fixed = to_u64(&format!("{}.fixed", field), &self.fixed)?;
        match &self.fraction {
            Value::String(s) => Fee::parse(fixed, s),
            other => Err(TxError::Request(format!(
                "{}.fraction must be a string, got {}",
                field, other
            ))),
        }
    }
}

fn to_u64(field: &str, n: &Number) -> Result<u64, TxError> {
    n.as_u64().ok_or_else(|| TxError::IntegerOutOfRange {
        field: field.to_string(),
        value: n.to_string(),
    })
}
