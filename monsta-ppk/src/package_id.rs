//! Per-customer package identifiers.
//!
//! An ID is the first 16 bytes of `SHA-256(salt || email)`, lowercase hex.
//! Without the salt the email cannot be confirmed from the ID, even when the
//! email is known.

use sha2::{Digest, Sha256};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of a package ID in characters.
pub const PACKAGE_ID_LEN: usize = 32;

/// A filesystem-safe token namespacing the files of one customer's package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId(String);

impl PackageId {
    /// Parses an ID, accepting only [`PACKAGE_ID_LEN`] lowercase hex characters.
    pub fn parse(s: &str) -> Option<Self> {
        let well_formed = s.len() == PACKAGE_ID_LEN
            && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        well_formed.then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derives [`PackageId`]s from customer emails under a secret salt.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PackageIdGenerator {
    salt: Vec<u8>,
}

impl PackageIdGenerator {
    pub fn new(salt: impl AsRef<[u8]>) -> Self {
        Self {
            salt: salt.as_ref().to_vec(),
        }
    }

    /// Returns the ID for `email`. Pure and deterministic.
    pub fn id_from_email(&self, email: &str) -> PackageId {
        let mut hasher = Sha256::new();
        hasher.update(&self.salt);
        hasher.update(email.as_bytes());
        let hash = hasher.finalize();

        PackageId(hex::encode(&hash[..PACKAGE_ID_LEN / 2]))
    }
}

impl fmt::Debug for PackageIdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackageIdGenerator")
            .field("salt", &"[REDACTED]")
            .finish()
    }
}
