//! Subcommand implementations.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use monsta_crypto::{public_key_from_base64, BoxKeyPairSuite, KeyPair};
use monsta_license::{load_edition, Edition, License, LicenseConfig, LicenseWriter};
use monsta_ppk::{ProPackage, ProPackageBuilder};
use tracing::info;

/// Environment variable holding the package ID salt.
pub const SALT_ENV: &str = "MONSTA_PACKAGE_SALT";

pub fn keygen(out: &Path) -> Result<()> {
    let keypair = KeyPair::generate();
    let secret_path = append_extension(out, "secret");
    let public_path = append_extension(out, "public");

    write_secret(&secret_path, keypair.secret_key_base64().as_bytes())
        .with_context(|| format!("writing {}", secret_path.display()))?;
    fs::write(&public_path, keypair.public_key_base64())
        .with_context(|| format!("writing {}", public_path.display()))?;

    info!(
        secret = %secret_path.display(),
        public = %public_path.display(),
        "Key pair generated"
    );
    Ok(())
}

/// `issuer.v2` + `secret` is `issuer.v2.secret`.
fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Writes key material readable by the owner only.
fn write_secret(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
        options.mode(0o600);
        let mut file = options.open(path)?;
        // An existing file keeps its old mode through open().
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
        file.write_all(contents)
    }
    #[cfg(not(unix))]
    {
        options.open(path)?.write_all(contents)
    }
}

pub fn issue(secret: &Path, peer: &Path, license: License, out: &Path) -> Result<()> {
    let suite = load_suite(secret, peer)?;
    LicenseWriter::new(suite)
        .write_license(&license, out)
        .with_context(|| format!("issuing license for {}", license.email()))?;

    info!(path = %out.display(), expiry = license.expiry_date(), "License issued");
    Ok(())
}

pub fn inspect(
    license: Option<PathBuf>,
    settings: Option<&Path>,
    pro_config: Option<&Path>,
    secret: &Path,
    peer: &Path,
) -> Result<()> {
    let mut config = match settings {
        Some(path) => LicenseConfig::from_json_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => LicenseConfig::default(),
    };
    if let Some(path) = pro_config {
        config = config
            .with_pro_config(path)
            .with_context(|| format!("loading pro config from {}", path.display()))?;
    }
    if license.is_some() {
        config.license_path = license;
    }

    let suite = load_suite(secret, peer)?;
    match load_edition(&config, suite).map_err(|e| anyhow::anyhow!("{e} [{}]", e.code()))? {
        Edition::Free => println!("free edition (no license installed)"),
        Edition::Pro(license) => {
            println!("{}", serde_json::to_string_pretty(&license)?);
            if license.is_expired_at(chrono::Utc::now()) == Some(true) {
                println!("warning: license expired on {}", license.expiry_date());
            }
        }
    }
    Ok(())
}

pub fn package(
    license: &Path,
    config_template: &Path,
    htaccess: &Path,
    salt: &str,
    email: &str,
    out: &Path,
) -> Result<()> {
    let license_data =
        fs::read(license).with_context(|| format!("reading license {}", license.display()))?;

    let id = ProPackageBuilder::new(license_data, config_template, htaccess)
        .build_archive(out, salt, email)
        .with_context(|| format!("building pro package {}", out.display()))?;

    println!("{id}");
    Ok(())
}

pub fn inspect_package(path: &Path) -> Result<()> {
    let pkg = ProPackage::open_path(path)
        .with_context(|| format!("opening pro package {}", path.display()))?;

    for name in pkg.entry_names() {
        let size = pkg.entry(name).map_or(0, <[u8]>::len);
        println!("{size:>8}  {name}");
    }

    let id = pkg.validate().context("pro package is incomplete")?;
    println!("package id: {id}");
    Ok(())
}

fn load_suite(secret: &Path, peer: &Path) -> Result<BoxKeyPairSuite> {
    let secret_b64 = fs::read_to_string(secret)
        .with_context(|| format!("reading secret key {}", secret.display()))?;
    let own = KeyPair::from_secret_base64(&secret_b64)
        .with_context(|| format!("parsing secret key {}", secret.display()))?;

    let peer_b64 = fs::read_to_string(peer)
        .with_context(|| format!("reading public key {}", peer.display()))?;
    let peer_key = public_key_from_base64(&peer_b64)
        .with_context(|| format!("parsing public key {}", peer.display()))?;

    Ok(BoxKeyPairSuite::new(&own, &peer_key))
}
