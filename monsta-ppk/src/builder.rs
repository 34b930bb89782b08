//! Assembly of a customer's pro package.

use crate::archive::ArchiveWriter;
use crate::error::PackagingResult;
use crate::package_id::{PackageId, PackageIdGenerator};
use crate::template::{ProConfigPaths, ProConfigTemplate};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Directory every package entry lives under.
pub const ARCHIVE_ROOT: &str = "license";
pub const INDEX_ENTRY: &str = "license/index.html";
pub const ACCESS_CONTROL_ENTRY: &str = "license/.htaccess";
pub const CONFIG_ENTRY: &str = "license/config_pro.php";

/// Builds pro package archives around one license.
#[derive(Debug, Clone)]
pub struct ProPackageBuilder {
    license_data: Vec<u8>,
    config_template_path: PathBuf,
    access_control_path: PathBuf,
}

impl ProPackageBuilder {
    /// `license_data` is packaged exactly as given.
    pub fn new(
        license_data: impl Into<Vec<u8>>,
        config_template_path: impl Into<PathBuf>,
        access_control_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            license_data: license_data.into(),
            config_template_path: config_template_path.into(),
            access_control_path: access_control_path.into(),
        }
    }

    /// Writes the package for `email` to `output_path`, replacing any file
    /// there, and returns the package ID used to name its entries.
    ///
    /// On error nothing is written to `output_path`.
    pub fn build_archive(
        &self,
        output_path: impl AsRef<Path>,
        salt: impl AsRef<[u8]>,
        email: &str,
    ) -> PackagingResult<PackageId> {
        let id = PackageIdGenerator::new(salt).id_from_email(email);
        let paths = ProConfigPaths::for_package(&id);

        let mut archive = ArchiveWriter::create(output_path)?;
        if let Err(e) = self.write_entries(&mut archive, &paths) {
            archive.abort();
            warn!(output = %archive.output_path().display(), error = %e, "Pro package build failed");
            return Err(e);
        }
        archive.close()?;

        info!(output = %archive.output_path().display(), package_id = %id, "Pro package built");
        Ok(id)
    }

    fn write_entries(&self, archive: &mut ArchiveWriter, paths: &ProConfigPaths) -> PackagingResult<()> {
        archive.add_from_bytes(INDEX_ENTRY, b"")?;
        archive.add_file(ACCESS_CONTROL_ENTRY, &self.access_control_path)?;
        archive.add_from_bytes(&format!("{ARCHIVE_ROOT}/{}", paths.profile_path), b"")?;
        archive.add_from_bytes(
            &format!("{ARCHIVE_ROOT}/{}", paths.license_path),
            &self.license_data,
        )?;

        let rendered = ProConfigTemplate::load(&self.config_template_path)?.render(paths);
        archive.add_from_bytes(CONFIG_ENTRY, rendered.as_bytes())
    }
}
