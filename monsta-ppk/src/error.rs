//! Error types for the pro package crate.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackagingError {
    #[error("I/O error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("template not found: '{}'", .0.display())]
    MissingTemplate(PathBuf),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("invalid config template: {0}")]
    Template(String),

    #[error("archive is already closed")]
    ArchiveClosed,

    #[error("missing required entry: {0}")]
    MissingEntry(String),
}

impl PackagingError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type PackagingResult<T> = Result<T, PackagingError>;
