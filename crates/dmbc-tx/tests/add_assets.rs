//! End-to-end tests for the add_assets pipeline: build, encode, decode,
//! sign, verify.
//!
//! Run with: cargo test -p dmbc-tx --test add_assets

use dmbc_crypto::KeyPair;
use dmbc_tx::encoding::{MessageHeader, Reader};
use dmbc_tx::{sign_transaction, AddAssets, AddAssetsBuilder, AddAssetsRequest, Fees};
use dmbc_types::constants::*;
use dmbc_types::PublicKey;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn schedule() -> Fees {
    Fees::parse(10, "0.1", 20, "0.2", 9, "0.99999").unwrap()
}

fn two_assets(key: PublicKey, order: [&str; 2]) -> Vec<u8> {
    let mut builder = AddAssetsBuilder::new(key, 123);
    for name in order {
        builder.add_asset(name, 10, &schedule(), &key).unwrap();
    }
    builder.encode().unwrap()
}

// ─── 1. Reference workflow ──────────────────────────────────────────────────

#[test]
fn test_reference_workflow() {
    init_logging();
    let kp = KeyPair::generate();
    let key = kp.public_key();
    let fees = schedule();

    let mut builder = AddAssetsBuilder::new(key, 123);
    builder.add_asset("Asset#10", 10, &fees, &key).unwrap();
    builder.add_asset("Asset#00", 10_000, &fees, &key).unwrap();
    let bytes = builder.encode().unwrap();

    let names_len = "Asset#10".len() + "Asset#00".len();
    assert_eq!(bytes.len(), ADD_ASSETS_PREFIX_LENGTH + 2 * ASSET_FIXED_LENGTH + names_len);

    // Header and fixed prefix, read by hand.
    let mut r = Reader::new(&bytes);
    let header = MessageHeader::read(&mut r).unwrap();
    assert_eq!(header.message_id, ADD_ASSETS_ID);
    assert_eq!(header.service_id, SERVICE_ID);
    assert_eq!(header.payload_length as usize, bytes.len());
    assert_eq!(r.read_public_key().unwrap(), key);
    assert_eq!(r.read_u64_le().unwrap(), 123);
    assert_eq!(r.read_u32_le().unwrap(), 2);

    let tx = AddAssets::from_bytes(&bytes).unwrap();
    assert_eq!(tx.seed(), 123);
    assert_eq!(tx.public_key(), &key);
    assert_eq!(tx.assets()[0].name, "Asset#10");
    assert_eq!(tx.assets()[1].quantity, 10_000);
    assert_eq!(tx.assets()[1].fees.transfer.fraction.to_string(), "0.99999");
}

// ─── 2. Determinism and ordering ────────────────────────────────────────────

#[test]
fn test_encoding_is_deterministic() {
    let key = PublicKey::new([7u8; 32]);
    assert_eq!(two_assets(key, ["A", "B"]), two_assets(key, ["A", "B"]));
}

#[test]
fn test_asset_order_is_significant() {
    let key = PublicKey::new([7u8; 32]);
    let ab = two_assets(key, ["A", "B"]);
    let ba = two_assets(key, ["B", "A"]);
    assert_eq!(ab.len(), ba.len());
    assert_ne!(ab, ba);
}

#[test]
fn test_equal_fractions_encode_identically() {
    let key = PublicKey::new([1u8; 32]);
    let short = Fees::parse(0, "0.1", 0, "0", 0, "1").unwrap();
    let long = Fees::parse(0, "0.10", 0, "0.000", 0, "1.0").unwrap();

    let mut a = AddAssetsBuilder::new(key, 1);
    a.add_asset("x", 1, &short, &key).unwrap();
    let mut b = AddAssetsBuilder::new(key, 1);
    b.add_asset("x", 1, &long, &key).unwrap();
    assert_eq!(a.encode().unwrap(), b.encode().unwrap());
}

// ─── 3. Signatures ──────────────────────────────────────────────────────────

#[test]
fn test_sign_verify_roundtrip() {
    let kp = KeyPair::generate();
    let key = kp.public_key();
    let mut builder = AddAssetsBuilder::new(key, 123);
    builder.add_asset("Asset#10", 10, &schedule(), &key).unwrap();
    let tx = builder.build().unwrap();

    let signed = sign_transaction(&tx, &kp);
    assert!(dmbc_crypto::verify(&signed.tx_bytes, &signed.signature, &key));

    for i in [0, ADD_ASSETS_PREFIX_LENGTH, signed.tx_bytes.len() - 1] {
        let mut mutated = signed.tx_bytes.clone();
        mutated[i] ^= 0x01;
        assert!(!dmbc_crypto::verify(&mutated, &signed.signature, &key), "byte {}", i);
    }
}

// ─── 4. JSON intake ─────────────────────────────────────────────────────────

#[test]
fn test_request_matches_manual_build() {
    let key = PublicKey::new([0x11; 32]);
    let json = format!(
        r#"{{
            "public_key": "{key}",
            "seed": 123,
            "assets": [
                {{ "data": "Asset#10", "amount": 10, "receiver": "{key}",
                   "fees": {{ "trade": {{"fixed": 10, "fraction": "0.1"}},
                              "exchange": {{"fixed": 20, "fraction": "0.2"}},
                              "transfer": {{"fixed": 9, "fraction": "0.99999"}} }} }},
                {{ "data": "Asset#00", "amount": 10000, "receiver": "{key}",
                   "fees": {{ "trade": {{"fixed": 10, "fraction": "0.1"}},
                              "exchange": {{"fixed": 20, "fraction": "0.2"}},
                              "transfer": {{"fixed": 9, "fraction": "0.99999"}} }} }}
            ]
        }}"#,
        key = key.to_hex()
    );
    let from_json = AddAssetsRequest::from_json(&json)
        .unwrap()
        .into_builder()
        .unwrap()
        .encode()
        .unwrap();

    let mut manual = AddAssetsBuilder::new(key, 123);
    manual.add_asset("Asset#10", 10, &schedule(), &key).unwrap();
    manual.add_asset("Asset#00", 10_000, &schedule(), &key).unwrap();
    assert_eq!(from_json, manual.encode().unwrap());
}
