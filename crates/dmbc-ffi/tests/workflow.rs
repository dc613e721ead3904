//! Drives the C surface the way a C caller would and checks that nothing
//! is left behind. Kept as the only test in this binary so the live-handle
//! count is not disturbed by tests running in parallel.
//!
//! Run with: cargo test -p dmbc-ffi --test workflow

use std::ffi::CStr;
use std::slice;

use dmbc_crypto::KeyPair;
use dmbc_ffi::*;
use dmbc_tx::{sign_transaction, AddAssets};

#[test]
fn test_full_workflow_releases_everything() {
    let _ = env_logger::builder().is_test(true).try_init();
    let baseline = dmbc_live_handles();

    let kp = KeyPair::generate();
    let key = kp.public_key();
    let key = key.as_bytes();

    unsafe {
        let err = dmbc_error_new();
        assert_eq!(dmbc_error_kind(err), ErrorKind::None as i32);

        let tx = dmbc_tx_add_assets_create(key.as_ptr(), key.len(), 123, err);
        assert_ne!(tx, 0);

        let fees = dmbc_fees_create(
            10,
            c"0.1".as_ptr(),
            20,
            c"0.2".as_ptr(),
            9,
            c"0.99999".as_ptr(),
            err,
        );
        assert_ne!(fees, 0);

        // Rejected input allocates nothing.
        let before = dmbc_live_handles();
        let bad = dmbc_fees_create(
            10,
            c"0.1".as_ptr(),
            20,
            c"1.5".as_ptr(),
            9,
            c"0.99999".as_ptr(),
            err,
        );
        assert_eq!(bad, 0);
        assert_eq!(dmbc_error_kind(err), ErrorKind::InvalidDecimal as i32);
        assert_eq!(dmbc_live_handles(), before);

        for (name, quantity) in [("Asset#10", 10u64), ("Asset#00", 10_000)] {
            let rc = dmbc_tx_add_assets_add_asset(
                tx,
                name.as_ptr(),
                name.len(),
                quantity,
                fees,
                key.as_ptr(),
                key.len(),
                err,
            );
            assert_eq!(rc, 0, "add_asset({}) failed", name);
        }

        // A failing call leaves a readable message behind.
        let rc = dmbc_tx_add_assets_add_asset(
            tx,
            b"x".as_ptr(),
            1,
            0,
            fees,
            key.as_ptr(),
            key.len(),
            err,
        );
        assert_eq!(rc, -1);
        assert_eq!(dmbc_error_kind(err), ErrorKind::InvalidQuantity as i32);
        let message = CStr::from_ptr(dmbc_error_message(err)).to_str().unwrap();
        assert!(!message.is_empty());

        let mut len = 0usize;
        let bytes = dmbc_tx_add_assets_into_bytes(tx, &mut len, err);
        assert!(!bytes.is_null());
        assert_eq!(dmbc_error_kind(err), ErrorKind::None as i32);

        let encoded = slice::from_raw_parts(bytes, len).to_vec();
        let decoded = AddAssets::from_bytes(&encoded).unwrap();
        assert_eq!(decoded.seed(), 123);
        assert_eq!(decoded.public_key().as_bytes(), key);
        assert_eq!(decoded.assets()[0].name, "Asset#10");
        assert_eq!(decoded.assets()[1].quantity, 10_000);
        assert_eq!(decoded.to_bytes(), encoded);

        let signed = sign_transaction(&decoded, &kp);
        assert!(signed.verify(&kp.public_key()));
        assert!(signed.verify_creator().unwrap());

        assert_eq!(dmbc_bytes_free(bytes, len), 0);
        assert_eq!(dmbc_bytes_free(bytes, len), -1);
        assert_eq!(dmbc_fees_free(fees), 0);
        assert_eq!(dmbc_tx_add_assets_free(tx), 0);
        assert_eq!(dmbc_error_free(err), 0);
    }

    assert_eq!(dmbc_live_handles(), baseline);
}
