//! Reading built pro packages back.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use zip::ZipArchive;

use crate::builder::{ACCESS_CONTROL_ENTRY, ARCHIVE_ROOT, CONFIG_ENTRY, INDEX_ENTRY};
use crate::error::{PackagingError, PackagingResult};
use crate::package_id::PackageId;
use crate::template::ProConfigPaths;

/// An opened pro package.
#[derive(Debug, Clone)]
pub struct ProPackage {
    entries: BTreeMap<String, Vec<u8>>,
}

impl ProPackage {
    /// Opens and loads a package from a reader.
    pub fn open<R: Read + Seek>(reader: R) -> PackagingResult<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut entries = BTreeMap::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut data = Vec::new();
            file.read_to_end(&mut data)
                .map_err(|e| PackagingError::io(&name, e))?;
            entries.insert(name, data);
        }

        Ok(Self { entries })
    }

    /// Opens a package file.
    pub fn open_path(path: impl AsRef<Path>) -> PackagingResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| PackagingError::io(path, e))?;
        Self::open(file)
    }

    pub fn entry(&self, name: &str) -> Option<&[u8]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The package ID, recovered from the license entry name.
    pub fn package_id(&self) -> Option<PackageId> {
        let prefix = format!("{ARCHIVE_ROOT}/license-");
        self.entries.keys().find_map(|name| {
            name.strip_prefix(&prefix)
                .and_then(|rest| rest.strip_suffix(".key"))
                .and_then(PackageId::parse)
        })
    }

    pub fn license_key(&self) -> Option<&[u8]> {
        let paths = ProConfigPaths::for_package(&self.package_id()?);
        self.entry(&format!("{ARCHIVE_ROOT}/{}", paths.license_path))
    }

    pub fn profile(&self) -> Option<&[u8]> {
        let paths = ProConfigPaths::for_package(&self.package_id()?);
        self.entry(&format!("{ARCHIVE_ROOT}/{}", paths.profile_path))
    }

    pub fn access_control(&self) -> Option<&[u8]> {
        self.entry(ACCESS_CONTROL_ENTRY)
    }

    pub fn config(&self) -> Option<&[u8]> {
        self.entry(CONFIG_ENTRY)
    }

    /// Checks that every entry of a complete package is present.
    pub fn validate(&self) -> PackagingResult<PackageId> {
        let id = self
            .package_id()
            .ok_or_else(|| PackagingError::MissingEntry(format!("{ARCHIVE_ROOT}/license-<id>.key")))?;
        let paths = ProConfigPaths::for_package(&id);

        let required = [
            INDEX_ENTRY.to_string(),
            ACCESS_CONTROL_ENTRY.to_string(),
            format!("{ARCHIVE_ROOT}/{}", paths.profile_path),
            format!("{ARCHIVE_ROOT}/{}", paths.license_path),
            CONFIG_ENTRY.to_string(),
        ];
        if let Some(missing) = required.into_iter().find(|name| !self.entries.contains_key(name)) {
            return Err(PackagingError::MissingEntry(missing));
        }
        Ok(id)
    }
}
