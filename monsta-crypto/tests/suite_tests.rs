use base64::{engine::general_purpose::STANDARD, Engine};
use monsta_crypto::{BoxKeyPairSuite, CryptoError, KeyPair, KeyPairSuite, NONCE_SIZE};

fn suites() -> (BoxKeyPairSuite, BoxKeyPairSuite) {
    let issuer = KeyPair::from_secret_bytes([11u8; 32]);
    let install = KeyPair::from_secret_bytes([22u8; 32]);
    (
        BoxKeyPairSuite::new(&issuer, install.public_key()),
        BoxKeyPairSuite::new(&install, issuer.public_key()),
    )
}

#[test]
fn encrypt_decrypt_empty() {
    let (issuer, install) = suites();
    let blob = issuer.encrypt_and_base64_encode(b"").unwrap();
    assert_eq!(install.base64_decode_and_decrypt(&blob).unwrap(), b"");
}

#[test]
fn issuer_can_open_its_own_blob() {
    // Both sides derive the same shared key.
    let (issuer, _) = suites();
    let blob = issuer.encrypt_and_base64_encode(b"mine").unwrap();
    assert_eq!(issuer.base64_decode_and_decrypt(&blob).unwrap(), b"mine");
}

#[test]
fn wrong_installation_key_fails() {
    let (issuer, _) = suites();
    let stranger = KeyPair::generate();
    let issuer_pub = KeyPair::from_secret_bytes([11u8; 32]);
    let wrong = BoxKeyPairSuite::new(&stranger, issuer_pub.public_key());

    let blob = issuer.encrypt_and_base64_encode(b"secret").unwrap();
    assert!(matches!(
        wrong.base64_decode_and_decrypt(&blob),
        Err(CryptoError::Decryption(_))
    ));
}

#[test]
fn forged_issuer_fails() {
    let (_, install) = suites();
    let forger = KeyPair::generate();
    let install_pub = KeyPair::from_secret_bytes([22u8; 32]);
    let forged = BoxKeyPairSuite::new(&forger, install_pub.public_key());

    let blob = forged.encrypt_and_base64_encode(b"{}").unwrap();
    assert!(install.base64_decode_and_decrypt(&blob).is_err());
}

#[test]
fn tampered_ciphertext_fails() {
    let (issuer, install) = suites();
    let blob = issuer.encrypt_and_base64_encode(b"Secret").unwrap();
    let mut bytes = STANDARD.decode(&blob).unwrap();
    bytes[NONCE_SIZE] ^= 0xFF;
    let tampered = STANDARD.encode(&bytes);
    assert!(install.base64_decode_and_decrypt(&tampered).is_err());
}

#[test]
fn truncated_blob_fails() {
    let (issuer, install) = suites();
    let blob = issuer.encrypt_and_base64_encode(b"Secret payload").unwrap();
    let mut bytes = STANDARD.decode(&blob).unwrap();
    bytes.truncate(bytes.len() - 1);
    assert!(install.base64_decode_and_decrypt(&STANDARD.encode(&bytes)).is_err());
}
