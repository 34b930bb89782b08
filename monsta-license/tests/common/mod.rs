//! Shared test helpers for license tests.

#![allow(dead_code)]

use base64::{engine::general_purpose::STANDARD, Engine};
use monsta_crypto::{BoxKeyPairSuite, KeyPair};
use monsta_license::{License, LicenseWriter, BEGIN_BANNER, END_BANNER};

/// Deterministic issuer key pair.
pub fn issuer_keys() -> KeyPair {
    KeyPair::from_secret_bytes([
        1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24,
        25, 26, 27, 28, 29, 30, 31, 32,
    ])
}

/// Deterministic installation key pair.
pub fn install_keys() -> KeyPair {
    KeyPair::from_secret_bytes([42u8; 32])
}

/// Suite the vendor uses to issue licenses.
pub fn issuer_suite() -> BoxKeyPairSuite {
    BoxKeyPairSuite::new(&issuer_keys(), install_keys().public_key())
}

/// Suite the installation uses to read licenses.
pub fn install_suite() -> BoxKeyPairSuite {
    BoxKeyPairSuite::new(&install_keys(), issuer_keys().public_key())
}

/// A typical license.
pub fn sample_license() -> License {
    License::new(
        "buyer@example.com",
        "2025-03-01T09:30:00Z",
        "2026-03-01T09:30:00Z",
        "2.10.4",
    )
}

/// Encodes a license as the vendor tool would.
pub fn issue(license: &License) -> String {
    LicenseWriter::new(issuer_suite()).encode(license).unwrap()
}

/// Seals arbitrary plaintext and wraps it in banners.
pub fn seal_raw(plaintext: &[u8]) -> String {
    use monsta_crypto::KeyPairSuite;
    let blob = issuer_suite().encrypt_and_base64_encode(plaintext).unwrap();
    format!("{BEGIN_BANNER}\n{blob}\n{END_BANNER}\n")
}

/// Decodes the raw ciphertext bytes out of an issued file.
pub fn blob_bytes(contents: &str) -> Vec<u8> {
    STANDARD
        .decode(monsta_license::extract_encoded_data(contents))
        .unwrap()
}

/// Re-wraps raw ciphertext bytes as a license file.
pub fn wrap_bytes(bytes: &[u8]) -> String {
    monsta_license::wrap_encoded_data(&STANDARD.encode(bytes))
}
