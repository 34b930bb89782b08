use monsta_crypto::CryptoError;

#[test]
fn error_display_encoding() {
    let err = CryptoError::Encoding("bad base64".into());
    assert!(format!("{err}").contains("encoding error"));
    assert!(format!("{err}").contains("bad base64"));
}

#[test]
fn error_display_encryption() {
    let err = CryptoError::Encryption("oops".into());
    assert!(format!("{err}").contains("encryption failed"));
}

#[test]
fn error_display_decryption() {
    let err = CryptoError::Decryption("tampered".into());
    assert!(format!("{err}").contains("decryption failed"));
}

#[test]
fn error_display_invalid_key_length() {
    let err = CryptoError::InvalidKeyLength {
        expected: 32,
        actual: 16,
    };
    let msg = format!("{err}");
    assert!(msg.contains("32"));
    assert!(msg.contains("16"));
}
