//! Licensing for Monsta pro installations.
//!
//! This module handles:
//! - Reading the encrypted license file installed with a pro package
//! - Issuing license files on the vendor side
//! - Locating the license through injected configuration
//!
//! # License File Format
//!
//! A text file holding one base64 blob, wrapped at any width, optionally
//! surrounded by `=====...=====` banners and blank lines. The blob is sealed
//! with a [`monsta_crypto::KeyPairSuite`] and decrypts to a JSON object with
//! `email`, `purchaseDate`, `expiryDate` and `version`.
//!
//! A missing file is not an error: it means the free edition. A file that
//! exists and fails to decode is always [`LicenseError::InvalidLicense`].

mod config;
mod edition;
mod envelope;
mod error;
mod license;
mod reader;
mod writer;

pub use config::{
    LicenseConfig, AUTHENTICATION_FILE_DEFINE, LICENSE_PATH_DEFINE, UPLOAD_TMP_DIR_ENV,
};
pub use edition::{load_edition, Edition};
pub use envelope::{
    extract_encoded_data, is_banner, wrap_encoded_data, BEGIN_BANNER, END_BANNER, LINE_WIDTH,
};
pub use error::{InvalidLicenseKind, LicenseError, LicenseResult};
pub use license::{License, REQUIRED_FIELDS};
pub use reader::LicenseReader;
pub use writer::LicenseWriter;
