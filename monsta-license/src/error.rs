//! Error types for the licensing module.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a license file was rejected.
///
/// Deliberately carries no text from the crypto layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidLicenseKind {
    /// The payload could not be decoded or decrypted (wrong key, corruption,
    /// truncation or tampering).
    Undecryptable,
    /// Decrypted plaintext is not a JSON object of the expected shape.
    MalformedPayload(String),
    /// A required field is absent from the payload.
    MissingField(&'static str),
}

impl fmt::Display for InvalidLicenseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undecryptable => f.write_str("license data could not be decrypted"),
            Self::MalformedPayload(reason) => write!(f, "malformed license payload: {reason}"),
            Self::MissingField(field) => write!(f, "license payload is missing '{field}'"),
        }
    }
}

/// Licensing-specific errors.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// The license file exists but cannot be turned into a license.
    #[error("unable to read the license file at '{}'", path.display())]
    InvalidLicense {
        /// The offending file.
        path: PathBuf,
        /// What was wrong with it.
        kind: InvalidLicenseKind,
    },

    /// Reading or writing a license file failed.
    #[error("I/O error at '{}': {source}", path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Settings or pro configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),

    /// Sealing a license for issue failed.
    #[error("license encryption failed: {0}")]
    Crypto(#[from] monsta_crypto::CryptoError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LicenseError {
    /// Stable, localizable error code for presenting to end users.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidLicense { .. } => "LICENSE_READ_FAILED",
            Self::Io { .. } => "LICENSE_IO_FAILED",
            Self::Config(_) => "LICENSE_CONFIG_INVALID",
            Self::Crypto(_) => "LICENSE_ENCRYPT_FAILED",
            Self::Serialization(_) => "LICENSE_SERIALIZATION_FAILED",
        }
    }

    /// The file this error relates to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::InvalidLicense { path, .. } | Self::Io { path, .. } => Some(path),
            _ => None,
        }
    }

    pub(crate) fn invalid(path: &Path, kind: InvalidLicenseKind) -> Self {
        Self::InvalidLicense {
            path: path.to_path_buf(),
            kind,
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
