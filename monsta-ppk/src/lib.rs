//! Monsta pro package format.
//!
//! A pro package is a zip archive containing:
//! - `license/index.html`          — empty, blocks directory listing
//! - `license/.htaccess`           — access-control template, copied verbatim
//! - `license/profiles-<id>.bin`   — empty profile, filled in by the host later
//! - `license/license-<id>.key`    — the customer's license file
//! - `license/config_pro.php`      — config template rendered with both names
//!
//! `<id>` is a [`PackageId`] derived from the customer email and a secret
//! salt, so file names differ per customer without revealing the email.

mod archive;
mod builder;
mod error;
mod package;
mod package_id;
mod template;

pub use archive::{ArchiveState, ArchiveWriter};
pub use builder::{ProPackageBuilder, ACCESS_CONTROL_ENTRY, ARCHIVE_ROOT, CONFIG_ENTRY, INDEX_ENTRY};
pub use error::{PackagingError, PackagingResult};
pub use package::ProPackage;
pub use package_id::{PackageId, PackageIdGenerator, PACKAGE_ID_LEN};
pub use template::{ProConfigPaths, ProConfigTemplate};
