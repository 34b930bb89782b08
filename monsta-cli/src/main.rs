//! Monsta license tool
//!
//! Vendor-side companion to the license subsystem:
//! 1. Generate issuer and installation key pairs
//! 2. Issue sealed license files
//! 3. Build per-customer pro packages around them
//!
//! Usage:
//!   monsta-license keygen --out issuer
//!   monsta-license issue --secret issuer.secret --peer install.public \
//!     --email buyer@example.com --expiry-date 2027-03-01 --product-version 2.10.4 --out license.key
//!   monsta-license package --license license.key --config-template config_pro.php.tpl \
//!     --htaccess htaccess.tpl --email buyer@example.com --out pro.zip

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "monsta-license")]
#[command(about = "Issue, inspect and package Monsta pro licenses")]
struct Args {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a key pair as <OUT>.secret and <OUT>.public
    Keygen {
        #[arg(long)]
        out: PathBuf,
    },

    /// Seal a license for one installation
    Issue {
        /// Issuer secret key file
        #[arg(long)]
        secret: PathBuf,
        /// Installation public key file
        #[arg(long)]
        peer: PathBuf,
        #[arg(long)]
        email: String,
        /// Defaults to today (UTC)
        #[arg(long)]
        purchase_date: Option<String>,
        #[arg(long)]
        expiry_date: String,
        #[arg(long)]
        product_version: String,
        #[arg(long)]
        out: PathBuf,
    },

    /// Decode an installed license
    Inspect {
        /// License file; otherwise taken from the settings and pro config
        #[arg(long)]
        license: Option<PathBuf>,
        /// JSON settings file
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Rendered config_pro.php
        #[arg(long)]
        pro_config: Option<PathBuf>,
        /// Installation secret key file
        #[arg(long)]
        secret: PathBuf,
        /// Issuer public key file
        #[arg(long)]
        peer: PathBuf,
    },

    /// Build a pro package archive
    Package {
        /// License file to embed
        #[arg(long)]
        license: PathBuf,
        #[arg(long)]
        config_template: PathBuf,
        #[arg(long)]
        htaccess: PathBuf,
        /// Package ID salt; falls back to MONSTA_PACKAGE_SALT
        #[arg(long)]
        salt: Option<String>,
        #[arg(long)]
        email: String,
        #[arg(long)]
        out: PathBuf,
    },

    /// List and check the entries of a pro package
    InspectPackage { path: PathBuf },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match args.command {
        Command::Keygen { out } => commands::keygen(&out),
        Command::Issue {
            secret,
            peer,
            email,
            purchase_date,
            expiry_date,
            product_version,
            out,
        } => {
            let purchase_date =
                purchase_date.unwrap_or_else(|| chrono::Utc::now().format("%Y-%m-%d").to_string());
            commands::issue(
                &secret,
                &peer,
                monsta_license::License::new(email, purchase_date, expiry_date, product_version),
                &out,
            )
        }
        Command::Inspect {
            license,
            settings,
            pro_config,
            secret,
            peer,
        } => commands::inspect(
            license,
            settings.as_deref(),
            pro_config.as_deref(),
            &secret,
            &peer,
        ),
        Command::Package {
            license,
            config_template,
            htaccess,
            salt,
            email,
            out,
        } => {
            let salt = match salt {
                Some(salt) => salt,
                None => std::env::var(commands::SALT_ENV)
                    .map_err(|_| anyhow::anyhow!("--salt or {} is required", commands::SALT_ENV))?,
            };
            commands::package(&license, &config_template, &htaccess, &salt, &email, &out)
        }
        Command::InspectPackage { path } => commands::inspect_package(&path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_package_command() {
        let args = Args::try_parse_from([
            "monsta-license",
            "package",
            "--license",
            "license.key",
            "--config-template",
            "config_pro.php.tpl",
            "--htaccess",
            "htaccess.tpl",
            "--email",
            "buyer@example.com",
            "--out",
            "pro.zip",
        ])
        .unwrap();
        match args.command {
            Command::Package { salt, email, .. } => {
                assert!(salt.is_none());
                assert_eq!(email, "buyer@example.com");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn issue_requires_expiry() {
        let result = Args::try_parse_from([
            "monsta-license",
            "issue",
            "--secret",
            "a",
            "--peer",
            "b",
            "--email",
            "e",
            "--product-version",
            "1",
            "--out",
            "o",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn verbose_is_global() {
        let args = Args::try_parse_from(["monsta-license", "inspect-package", "pro.zip", "-v"]).unwrap();
        assert!(args.verbose);
    }
}
