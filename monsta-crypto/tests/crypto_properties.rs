//! Property-based tests for the key pair suite.
//!
//! - Sealing is reversible by the intended recipient
//! - Any single-byte change to the blob is detected

use base64::{engine::general_purpose::STANDARD, Engine};
use monsta_crypto::{BoxKeyPairSuite, KeyPair, KeyPairSuite};
use proptest::prelude::*;

fn suites() -> (BoxKeyPairSuite, BoxKeyPairSuite) {
    let issuer = KeyPair::from_secret_bytes([3u8; 32]);
    let install = KeyPair::from_secret_bytes([4u8; 32]);
    (
        BoxKeyPairSuite::new(&issuer, install.public_key()),
        BoxKeyPairSuite::new(&install, issuer.public_key()),
    )
}

proptest! {
    #[test]
    fn roundtrip_preserves_data(plaintext in prop::collection::vec(any::<u8>(), 0..4096)) {
        let (issuer, install) = suites();
        let blob = issuer.encrypt_and_base64_encode(&plaintext).unwrap();
        let opened = install.base64_decode_and_decrypt(&blob).unwrap();
        prop_assert_eq!(opened, plaintext);
    }

    #[test]
    fn any_flipped_byte_is_rejected(
        plaintext in prop::collection::vec(any::<u8>(), 1..256),
        index in any::<prop::sample::Index>(),
        mask in 1u8..=255,
    ) {
        let (issuer, install) = suites();
        let blob = issuer.encrypt_and_base64_encode(&plaintext).unwrap();
        let mut bytes = STANDARD.decode(&blob).unwrap();
        let i = index.index(bytes.len());
        bytes[i] ^= mask;
        prop_assert!(install.base64_decode_and_decrypt(&STANDARD.encode(&bytes)).is_err());
    }
}
