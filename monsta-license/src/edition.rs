//! Startup gate between the free tier and the pro tier.

use crate::config::LicenseConfig;
use crate::error::LicenseResult;
use crate::license::License;
use crate::reader::LicenseReader;
use monsta_crypto::KeyPairSuite;
use tracing::info;

/// Which tier the installation runs in.
#[derive(Debug, Clone, PartialEq)]
pub enum Edition {
    /// No license configured or installed.
    Free,
    /// A valid license was decoded.
    Pro(License),
}

impl Edition {
    /// Returns true for the pro tier.
    #[must_use]
    pub fn is_pro(&self) -> bool {
        matches!(self, Self::Pro(_))
    }

    /// The installed license, if any.
    #[must_use]
    pub fn license(&self) -> Option<&License> {
        match self {
            Self::Free => None,
            Self::Pro(license) => Some(license),
        }
    }
}

/// Determines the edition from the configured license path.
///
/// Absence of a license degrades to [`Edition::Free`]; a license that exists
/// but cannot be decoded is an error so operators know to re-issue it.
pub fn load_edition<S: KeyPairSuite>(config: &LicenseConfig, suite: S) -> LicenseResult<Edition> {
    let Some(path) = config.license_path() else {
        info!("No license path configured, running free edition");
        return Ok(Edition::Free);
    };

    match LicenseReader::new(suite).read_license(path)? {
        Some(license) => {
            info!(path = %path.display(), version = license.version(), "Running pro edition");
            Ok(Edition::Pro(license))
        }
        None => {
            info!(path = %path.display(), "License file not installed, running free edition");
            Ok(Edition::Free)
        }
    }
}
