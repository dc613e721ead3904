//! Message header configuration.
//!
//! The header identifies the network, protocol version, and service a
//! transaction targets. Defaults match the production currency service;
//! overrides come from JSON (a request's `header` object or a config file)
//! or from CLI flags.

use std::path::Path;

use dmbc_types::constants::{NETWORK_ID, PROTOCOL_VERSION, SERVICE_ID};
use serde::{Deserialize, Serialize};

use crate::TxError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    pub network_id: u8,
    pub protocol_version: u8,
    pub service_id: u16,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            network_id: NETWORK_ID,
            protocol_version: PROTOCOL_VERSION,
            service_id: SERVICE_ID,
        }
    }
}

impl MessageConfig {
    pub fn new(network_id: u8, protocol_version: u8, service_id: u16) -> Self {
        Self {
            network_id,
            protocol_version,
            service_id,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, TxError> {
        serde_json::from_str(json).map_err(|e| TxError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, TxError> {
        Self::from_json_str(&read_config(path)?)
    }

    /// Apply the fields present in `json` on top of `self`. Fields the
    /// document leaves out keep their current value.
    pub fn overlay_json_str(self, json: &str) -> Result<Self, TxError> {
        let patch: ConfigPatch =
            serde_json::from_str(json).map_err(|e| TxError::Config(e.to_string()))?;
        Ok(Self {
            network_id: patch.network_id.unwrap_or(self.network_id),
            protocol_version: patch.protocol_version.unwrap_or(self.protocol_version),
            service_id: patch.service_id.unwrap_or(self.service_id),
        })
    }

    pub fn overlay_file(self, path: &Path) -> Result<Self, TxError> {
        self.overlay_json_str(&read_config(path)?)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    network_id: Option<u8>,
    protocol_version: Option<u8>,
    service_id: Option<u16>,
}

fn read_config(path: &Path) -> Result<String, TxError> {
    std::fs::read_to_string(path)
        .map_err(|e| TxError::Config(format!("{}: {}", path.display(), e)))
}
