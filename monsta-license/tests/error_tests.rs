use monsta_license::{InvalidLicenseKind, LicenseError};
use std::path::PathBuf;

#[test]
fn error_display_invalid_license_names_path() {
    let err = LicenseError::InvalidLicense {
        path: PathBuf::from("/srv/license.key"),
        kind: InvalidLicenseKind::Undecryptable,
    };
    assert_eq!(
        format!("{err}"),
        "unable to read the license file at '/srv/license.key'"
    );
}

#[test]
fn kind_display() {
    assert!(InvalidLicenseKind::Undecryptable.to_string().contains("decrypted"));
    assert!(InvalidLicenseKind::MissingField("email").to_string().contains("email"));
    assert!(InvalidLicenseKind::MalformedPayload("bad".into())
        .to_string()
        .contains("bad"));
}

#[test]
fn error_display_io() {
    let err = LicenseError::Io {
        path: PathBuf::from("/srv/license.key"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };
    let msg = format!("{err}");
    assert!(msg.contains("/srv/license.key"));
    assert!(msg.contains("denied"));
    assert_eq!(err.code(), "LICENSE_IO_FAILED");
}

#[test]
fn error_display_config() {
    let err = LicenseError::Config("bad settings".into());
    assert!(format!("{err}").contains("configuration error"));
    assert!(err.path().is_none());
}

#[test]
fn error_from_serde_json() {
    let serde_err: Result<serde_json::Value, _> = serde_json::from_str("not json");
    let license_err: LicenseError = serde_err.unwrap_err().into();
    assert!(format!("{license_err}").contains("serialization"));
    assert_eq!(license_err.code(), "LICENSE_SERIALIZATION_FAILED");
}

#[test]
fn error_from_crypto() {
    let err: LicenseError = monsta_crypto::CryptoError::Encryption("boom".into()).into();
    assert_eq!(err.code(), "LICENSE_ENCRYPT_FAILED");
}

#[test]
fn error_is_debug() {
    let err = LicenseError::Config("x".into());
    let _ = format!("{err:?}");
}
