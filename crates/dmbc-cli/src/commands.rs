//! CLI command implementations.

use std::path::{Path, PathBuf};

use dmbc_crypto::KeyPair;
use dmbc_tx::{sign_transaction, AddAssets, AddAssetsRequest, MessageConfig, SignedTransaction};
use dmbc_types::constants::SIGNATURE_LENGTH;
use dmbc_types::PublicKey;

type Error = Box<dyn std::error::Error>;
type Result = std::result::Result<(), Error>;

/// Header sources for `build`, applied in order: request `header`, config
/// file, individual flags.
#[derive(Debug, Default)]
pub struct HeaderArgs {
    pub config: Option<PathBuf>,
    pub network_id: Option<u8>,
    pub protocol_version: Option<u8>,
    pub service_id: Option<u16>,
}

impl HeaderArgs {
    fn apply(&self, base: MessageConfig) -> std::result::Result<MessageConfig, Error> {
        let mut config = match &self.config {
            Some(path) => base.overlay_file(path)?,
            None => base,
        };
        if let Some(v) = self.network_id {
            config.network_id = v;
        }
        if let Some(v) = self.protocol_version {
            config.protocol_version = v;
        }
        if let Some(v) = self.service_id {
            config.service_id = v;
        }
        Ok(config)
    }
}

/// Result of `build`, kept separate from printing for tests.
#[derive(Debug)]
pub struct BuiltTx {
    pub tx: AddAssets,
    pub bytes: Vec<u8>,
    pub signature: Option<[u8; SIGNATURE_LENGTH]>,
}

// ─── Helpers ────────────────────────────────────────────────────────────────

fn decode_hex(what: &str, s: &str) -> std::result::Result<Vec<u8>, Error> {
    hex::decode(s.trim()).map_err(|e| format!("{} is not valid hex: {}", what, e).into())
}

pub fn build_tx(
    request: &Path,
    secret_key: Option<&str>,
    header: &HeaderArgs,
) -> std::result::Result<BuiltTx, Error> {
    let text = std::fs::read_to_string(request)
        .map_err(|e| format!("cannot read {}: {}", request.display(), e))?;
    let builder = AddAssetsRequest::from_json(&text)?.into_builder()?;
    let config = header.apply(*builder.config())?;
    let tx = builder.with_config(config).build()?;

    let signature = match secret_key {
        Some(hex_key) => {
            let keypair = KeyPair::from_secret_hex(hex_key.trim())?;
            if keypair.public_key() != *tx.public_key() {
                log::warn!(
                    "signing key {} is not the creator key {}",
                    keypair.public_key(),
                    tx.public_key()
                );
            }
            Some(sign_transaction(&tx, &keypair).signature)
        }
        None => None,
    };

    let bytes = tx.to_bytes();
    Ok(BuiltTx {
        tx,
        bytes,
        signature,
    })
}

pub fn check_signature(
    tx_hex: &str,
    signature_hex: &str,
    public_key: Option<&str>,
) -> std::result::Result<bool, Error> {
    let tx_bytes = decode_hex("transaction", tx_hex)?;
    let signature = dmbc_crypto::signature_from_hex(signature_hex.trim())?;
    let signed = SignedTransaction {
        tx_bytes,
        signature,
    };
    match public_key {
        Some(pk) => Ok(signed.verify(&PublicKey::from_hex(pk.trim())?)),
        None => Ok(signed.verify_creator()?),
    }
}

pub fn decode_json(tx_hex: &str) -> std::result::Result<String, Error> {
    let bytes = decode_hex("transaction", tx_hex)?;
    let tx = AddAssets::from_bytes(&bytes)?;
    Ok(serde_json::to_string_pretty(&tx)?)
}

// ─── Commands ───────────────────────────────────────────────────────────────

pub fn keygen() -> Result {
    let keypair = KeyPair::generate();
    println!("public_key: {}", keypair.public_key());
    println!("secret_key: {}", hex::encode(keypair.secret_key()));
    Ok(())
}

pub fn build(request: &Path, secret_key: Option<&str>, header: &HeaderArgs) -> Result {
    let built = build_tx(request, secret_key, header)?;
    log::info!(
        "built add_assets with {} asset(s), {} bytes",
        built.tx.assets().len(),
        built.bytes.len()
    );
    println!("tx:   {}", hex::encode(&built.bytes));
    println!("hash: {}", built.tx.hash());
    if let Some(sig) = built.signature {
        println!("signature: {}", hex::encode(sig));
    }
    Ok(())
}

pub fn verify(tx_hex: &str, signature_hex: &str, public_key: Option<&str>) -> Result {
    if check_signature(tx_hex, signature_hex, public_key)? {
        println!("signature is valid");
        Ok(())
    } else {
        Err("signature does not verify".into())
    }
}

pub fn decode(tx_hex: &str) -> Result {
    println!("{}", decode_json(tx_hex)?);
    Ok(())
}
