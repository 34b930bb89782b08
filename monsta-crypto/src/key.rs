//! X25519 key pairs for the license suite.
//!
//! Keys travel as standard base64 of their raw 32 bytes, one key per file.

use crate::error::{CryptoError, CryptoResult};
use base64::{engine::general_purpose::STANDARD, Engine};
use crypto_box::aead::OsRng;
use crypto_box::{PublicKey, SecretKey};
use zeroize::Zeroizing;

/// Size of public and secret keys in bytes.
pub const KEY_SIZE: usize = 32;

/// A secret key together with its public half.
///
/// The secret is zeroized when the pair is dropped.
#[derive(Clone)]
pub struct KeyPair {
    secret: SecretKey,
    public: PublicKey,
}

impl KeyPair {
    /// Generates a new random key pair.
    pub fn generate() -> Self {
        let secret = SecretKey::generate(&mut OsRng);
        let public = secret.public_key();
        Self { secret, public }
    }

    /// Restores a key pair from a raw 32-byte secret.
    pub fn from_secret_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        let secret = SecretKey::from(bytes);
        let public = secret.public_key();
        Self { secret, public }
    }

    /// Restores a key pair from a base64-encoded secret.
    pub fn from_secret_base64(encoded: &str) -> CryptoResult<Self> {
        let bytes = Zeroizing::new(decode_key(encoded)?);
        Ok(Self::from_secret_bytes(*bytes))
    }

    /// Returns the secret key.
    pub fn secret_key(&self) -> &SecretKey {
        &self.secret
    }

    /// Returns the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Encodes the secret key as base64.
    pub fn secret_key_base64(&self) -> Zeroizing<String> {
        let bytes = Zeroizing::new(self.secret.to_bytes());
        Zeroizing::new(STANDARD.encode(bytes.as_slice()))
    }

    /// Encodes the public key as base64.
    pub fn public_key_base64(&self) -> String {
        public_key_to_base64(&self.public)
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("secret", &"[REDACTED]")
            .field("public", &self.public_key_base64())
            .finish()
    }
}

/// Encodes a public key as base64.
pub fn public_key_to_base64(key: &PublicKey) -> String {
    STANDARD.encode(key.as_bytes())
}

/// Decodes a base64-encoded public key.
pub fn public_key_from_base64(encoded: &str) -> CryptoResult<PublicKey> {
    decode_key(encoded).map(PublicKey::from)
}

fn decode_key(encoded: &str) -> CryptoResult<[u8; KEY_SIZE]> {
    let bytes = Zeroizing::new(
        STANDARD
            .decode(encoded.trim())
            .map_err(|e| CryptoError::Encoding(format!("invalid key base64: {e}")))?,
    );

    <[u8; KEY_SIZE]>::try_from(bytes.as_slice()).map_err(|_| CryptoError::InvalidKeyLength {
        expected: KEY_SIZE,
        actual: bytes.len(),
    })
}
