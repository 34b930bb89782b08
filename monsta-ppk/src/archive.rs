//! Staged zip archive writing.
//!
//! Entries are written to a temporary file beside the output path. Only
//! [`ArchiveWriter::close`] moves the finished archive into place, so a failed
//! build never leaves a partial archive (or clobbers an existing one).

use crate::error::{PackagingError, PackagingResult};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Mode requested for a new archive, before the process umask applies.
#[cfg(unix)]
const ARCHIVE_MODE: u32 = 0o644;

/// Lifecycle of an [`ArchiveWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveState {
    /// Created, no entries yet.
    Open,
    /// At least one entry written.
    Writing,
    /// Finished or aborted; no further writes are accepted.
    Closed,
}

pub struct ArchiveWriter {
    output: PathBuf,
    /// Mode of the file being replaced, restored onto the new archive.
    replaced_permissions: Option<fs::Permissions>,
    zip: Option<ZipWriter<NamedTempFile>>,
    state: ArchiveState,
    options: SimpleFileOptions,
}

impl ArchiveWriter {
    /// Starts a new archive destined for `output`.
    pub fn create(output: impl AsRef<Path>) -> PackagingResult<Self> {
        let output = output.as_ref().to_path_buf();
        if output.is_dir() {
            return Err(PackagingError::io(
                &output,
                io::Error::new(io::ErrorKind::IsADirectory, "output path is a directory"),
            ));
        }

        let dir = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut builder = tempfile::Builder::new();
        builder.prefix(".ppk-").suffix(".partial");
        // Published archives get the usual umask-filtered mode, not 0600.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(ARCHIVE_MODE));
        }
        let staged = builder
            .tempfile_in(dir)
            .map_err(|e| PackagingError::io(dir, e))?;
        let replaced_permissions = fs::metadata(&output).ok().map(|m| m.permissions());

        debug!(output = %output.display(), staged = %staged.path().display(), "Archive opened");

        Ok(Self {
            output,
            replaced_permissions,
            zip: Some(ZipWriter::new(staged)),
            state: ArchiveState::Open,
            options: SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Deflated),
        })
    }

    pub fn state(&self) -> ArchiveState {
        self.state
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    /// Adds an entry. On failure the archive is aborted.
    pub fn add_from_bytes(&mut self, name: &str, data: &[u8]) -> PackagingResult<()> {
        let result = self.write_entry(name, data);
        if result.is_err() {
            self.abort();
        }
        result
    }

    /// Adds an entry copied byte-for-byte from `source`. On failure the
    /// archive is aborted.
    pub fn add_file(&mut self, name: &str, source: impl AsRef<Path>) -> PackagingResult<()> {
        let source = source.as_ref();
        let data = match fs::read(source) {
            Ok(data) => data,
            Err(e) => {
                self.abort();
                return Err(match e.kind() {
                    io::ErrorKind::NotFound => PackagingError::MissingTemplate(source.to_path_buf()),
                    _ => PackagingError::io(source, e),
                });
            }
        };
        self.add_from_bytes(name, &data)
    }

    fn write_entry(&mut self, name: &str, data: &[u8]) -> PackagingResult<()> {
        let zip = self.zip.as_mut().ok_or(PackagingError::ArchiveClosed)?;
        zip.start_file(name, self.options)?;
        zip.write_all(data)
            .map_err(|e| PackagingError::io(&self.output, e))?;
        self.state = ArchiveState::Writing;
        Ok(())
    }

    /// Finishes the archive and moves it to the output path, replacing any
    /// existing file.
    pub fn close(&mut self) -> PackagingResult<()> {
        let zip = self.zip.take().ok_or(PackagingError::ArchiveClosed)?;
        self.state = ArchiveState::Closed;

        let staged = zip.finish()?;
        if let Some(permissions) = self.replaced_permissions.take() {
            staged
                .as_file()
                .set_permissions(permissions)
                .map_err(|e| PackagingError::io(staged.path(), e))?;
        }
        staged
            .persist(&self.output)
            .map_err(|e| PackagingError::io(&self.output, e.error))?;

        debug!(output = %self.output.display(), "Archive closed");
        Ok(())
    }

    /// Discards everything written so far. Idempotent.
    pub fn abort(&mut self) {
        if self.zip.take().is_some() {
            warn!(output = %self.output.display(), "Archive aborted, staged file removed");
        }
        self.state = ArchiveState::Closed;
    }
}

impl std::fmt::Debug for ArchiveWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveWriter")
            .field("output", &self.output)
            .field("state", &self.state)
            .finish()
    }
}
