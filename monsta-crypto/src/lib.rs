//! Key pair suite for Monsta license payloads.
//!
//! Licenses are sealed by the issuer for one installation and opened there:
//! - [`KeyPair`] holds an X25519 secret key and its public half
//! - [`KeyPairSuite`] is the encrypt/decrypt boundary the license codec uses
//! - [`BoxKeyPairSuite`] implements it with crypto_box

mod error;
mod key;
mod suite;

pub use error::{CryptoError, CryptoResult};
pub use key::{public_key_from_base64, public_key_to_base64, KeyPair, KEY_SIZE};
pub use suite::{BoxKeyPairSuite, KeyPairSuite, NONCE_SIZE, TAG_SIZE};

pub use crypto_box::PublicKey;
