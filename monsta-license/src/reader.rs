//! Reading installed license files.

use crate::envelope::extract_encoded_data;
use crate::error::{InvalidLicenseKind, LicenseError, LicenseResult};
use crate::license::License;
use monsta_crypto::KeyPairSuite;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Decodes license files with a [`KeyPairSuite`].
#[derive(Debug)]
pub struct LicenseReader<S> {
    suite: S,
}

impl<S: KeyPairSuite> LicenseReader<S> {
    /// Creates a reader that decrypts with `suite`.
    pub fn new(suite: S) -> Self {
        Self { suite }
    }

    /// Reads and decodes the license at `path`.
    ///
    /// Returns `Ok(None)` when no file exists: running without a license is
    /// a supported state.
    ///
    /// # Errors
    ///
    /// [`LicenseError::InvalidLicense`] if the file cannot be decrypted or
    /// does not hold a complete license, [`LicenseError::Io`] if it exists but
    /// cannot be read.
    pub fn read_license(&self, path: impl AsRef<Path>) -> LicenseResult<Option<License>> {
        let path = path.as_ref();

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No license file present");
                return Ok(None);
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!(path = %path.display(), "License file is not valid UTF-8");
                return Err(LicenseError::invalid(
                    path,
                    InvalidLicenseKind::MalformedPayload("license file is not text".to_string()),
                ));
            }
            Err(e) => return Err(LicenseError::io(path, e)),
        };

        self.decode_contents(&contents, path).map(Some)
    }

    /// Decodes license text that has already been loaded from `path`.
    pub fn decode_contents(&self, contents: &str, path: &Path) -> LicenseResult<License> {
        let encoded = extract_encoded_data(contents);

        let plaintext = self.suite.base64_decode_and_decrypt(&encoded).map_err(|e| {
            // The crypto error stays in the log; callers only see the kind.
            warn!(path = %path.display(), error = %e, "License payload rejected");
            LicenseError::invalid(path, InvalidLicenseKind::Undecryptable)
        })?;

        let license = License::from_json_slice(&plaintext).map_err(|kind| {
            warn!(path = %path.display(), %kind, "License payload malformed");
            LicenseError::invalid(path, kind)
        })?;

        debug!(path = %path.display(), version = license.version(), "License decoded");
        Ok(license)
    }
}
