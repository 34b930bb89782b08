//! Issuing license files; the inverse of [`crate::LicenseReader`].

use crate::envelope::wrap_encoded_data;
use crate::error::{LicenseError, LicenseResult};
use crate::license::License;
use monsta_crypto::KeyPairSuite;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Seals licenses into the banner-wrapped file format.
#[derive(Debug)]
pub struct LicenseWriter<S> {
    suite: S,
}

impl<S: KeyPairSuite> LicenseWriter<S> {
    /// Creates a writer that encrypts with `suite`.
    pub fn new(suite: S) -> Self {
        Self { suite }
    }

    /// Encodes a license to file contents.
    pub fn encode(&self, license: &License) -> LicenseResult<String> {
        let json = serde_json::to_vec(license)?;
        let encoded = self.suite.encrypt_and_base64_encode(&json)?;
        Ok(wrap_encoded_data(&encoded))
    }

    /// Encodes a license and writes it to `path`, replacing any existing file.
    pub fn write_license(&self, license: &License, path: impl AsRef<Path>) -> LicenseResult<()> {
        let path = path.as_ref();
        let contents = self.encode(license)?;
        fs::write(path, contents).map_err(|e| LicenseError::io(path, e))?;
        debug!(path = %path.display(), "License written");
        Ok(())
    }
}
