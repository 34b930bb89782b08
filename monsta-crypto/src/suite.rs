//! Authenticated public-key encryption of license payloads.
//!
//! Uses crypto_box (X25519 key agreement with XSalsa20-Poly1305). The issuer
//! seals with its own secret key and the installation's public key; the
//! installation opens with its secret key and the issuer's public key, so a
//! payload that opens was necessarily produced by the issuer.
//!
//! Wire layout: `base64(nonce || ciphertext)` where the ciphertext carries the
//! Poly1305 tag.

use crate::error::{CryptoError, CryptoResult};
use crate::key::KeyPair;
use base64::{engine::general_purpose::STANDARD, Engine};
use crypto_box::aead::generic_array::GenericArray;
use crypto_box::aead::{Aead, AeadCore, OsRng};
use crypto_box::{PublicKey, SalsaBox};
use std::sync::Arc;

/// Size of the nonce in bytes (192 bits for XSalsa20).
pub const NONCE_SIZE: usize = 24;

/// Size of the authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// Encrypts and decrypts base64 payloads with a key pair.
pub trait KeyPairSuite: Send + Sync {
    /// Encrypts `plaintext` and returns the base64 blob.
    fn encrypt_and_base64_encode(&self, plaintext: &[u8]) -> CryptoResult<String>;

    /// Decodes a base64 blob and decrypts it.
    ///
    /// Fails on malformed base64, truncation, tampering or a wrong key.
    fn base64_decode_and_decrypt(&self, encoded: &str) -> CryptoResult<Vec<u8>>;
}

impl<T: KeyPairSuite + ?Sized> KeyPairSuite for &T {
    fn encrypt_and_base64_encode(&self, plaintext: &[u8]) -> CryptoResult<String> {
        (**self).encrypt_and_base64_encode(plaintext)
    }

    fn base64_decode_and_decrypt(&self, encoded: &str) -> CryptoResult<Vec<u8>> {
        (**self).base64_decode_and_decrypt(encoded)
    }
}

impl<T: KeyPairSuite + ?Sized> KeyPairSuite for Arc<T> {
    fn encrypt_and_base64_encode(&self, plaintext: &[u8]) -> CryptoResult<String> {
        (**self).encrypt_and_base64_encode(plaintext)
    }

    fn base64_decode_and_decrypt(&self, encoded: &str) -> CryptoResult<Vec<u8>> {
        (**self).base64_decode_and_decrypt(encoded)
    }
}

/// [`KeyPairSuite`] backed by crypto_box.
pub struct BoxKeyPairSuite {
    cipher: SalsaBox,
}

impl BoxKeyPairSuite {
    /// Creates a suite from the local key pair and the peer's public key.
    pub fn new(own: &KeyPair, peer: &PublicKey) -> Self {
        Self {
            cipher: SalsaBox::new(peer, own.secret_key()),
        }
    }
}

impl std::fmt::Debug for BoxKeyPairSuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxKeyPairSuite")
            .field("cipher", &"[REDACTED]")
            .finish()
    }
}

impl KeyPairSuite for BoxKeyPairSuite {
    fn encrypt_and_base64_encode(&self, plaintext: &[u8]) -> CryptoResult<String> {
        let nonce = SalsaBox::generate_nonce(&mut OsRng);

        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;

        let mut bytes = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        bytes.extend_from_slice(&nonce);
        bytes.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(&bytes))
    }

    fn base64_decode_and_decrypt(&self, encoded: &str) -> CryptoResult<Vec<u8>> {
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| CryptoError::Encoding(format!("invalid base64: {e}")))?;

        if bytes.len() < NONCE_SIZE + TAG_SIZE {
            return Err(CryptoError::Encoding("data too short".to_string()));
        }

        let (nonce, ciphertext) = bytes.split_at(NONCE_SIZE);
        self.cipher
            .decrypt(GenericArray::from_slice(nonce), ciphertext)
            .map_err(|_| {
                CryptoError::Decryption(
                    "decryption failed (wrong key or tampered data)".to_string(),
                )
            })
    }
}
