//! Asset identifiers.
//!
//! An asset is identified by a name-based (v5) UUID over the owner's hex
//! public key followed by the asset name, so the same owner issuing the same
//! name always lands on the same identifier.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::ASSET_ID_LENGTH;
use crate::keys::PublicKey;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(Uuid);

impl AssetId {
    pub fn from_data(name: &str, owner: &PublicKey) -> Self {
        let mut seed = owner.to_hex();
        seed.push_str(name);
        AssetId(Uuid::new_v5(&Uuid::NAMESPACE_DNS, seed.as_bytes()))
    }

    pub fn as_bytes(&self) -> &[u8; ASSET_ID_LENGTH] {
        self.0.as_bytes()
    }

    /// Lowercase hex without dashes.
    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetId({})", self.to_hex())
    }
}
