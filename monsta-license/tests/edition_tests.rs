mod common;

use common::{install_suite, issue, sample_license};
use monsta_license::{load_edition, Edition, LicenseConfig, LicenseError};
use std::fs;

#[test]
fn unconfigured_is_free() {
    let edition = load_edition(&LicenseConfig::default(), install_suite()).unwrap();
    assert_eq!(edition, Edition::Free);
    assert!(edition.license().is_none());
}

#[test]
fn configured_but_absent_is_free() {
    let config = LicenseConfig {
        license_path: Some("/nonexistent/license.key".into()),
        ..LicenseConfig::default()
    };
    let edition = load_edition(&config, install_suite()).unwrap();
    assert!(!edition.is_pro());
}

#[test]
fn installed_license_is_pro() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("license.key");
    fs::write(&path, issue(&sample_license())).unwrap();

    let config = LicenseConfig {
        license_path: Some(path),
        ..LicenseConfig::default()
    };
    let edition = load_edition(&config, &install_suite()).unwrap();
    assert!(edition.is_pro());
    assert_eq!(edition.license(), Some(&sample_license()));
}

#[test]
fn corrupt_license_is_reported_not_downgraded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("license.key");
    fs::write(&path, "=====BEGIN=====\nAAAA\n=====END=====\n").unwrap();

    let config = LicenseConfig {
        license_path: Some(path),
        ..LicenseConfig::default()
    };
    let err = load_edition(&config, install_suite()).unwrap_err();
    assert!(matches!(err, LicenseError::InvalidLicense { .. }));
}
