// SPDX-License-Identifier: MPL-2.0
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors surfaced to the caller of a capture or configuration operation.
///
/// Single-frame barcode decode faults are not part of this enum: they are
/// recovered inside the barcode bridge and never reach a caller.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The output directory is missing, not a directory, or not writable.
    #[error("Directory unavailable: {}: {reason}", path.display())]
    DirectoryUnavailable { path: PathBuf, reason: String },

    /// The capture device reported a fault; nothing was written to the target slot.
    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    /// Tagging or relocating the exposure failed after the device succeeded.
    /// The raw exposure is kept at `temp_path` for recovery.
    #[error("Metadata write failed ({}): {reason}", temp_path.display())]
    MetadataWriteFailed { temp_path: PathBuf, reason: String },

    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),
}

impl Error {
    /// Returns true when re-triggering the same operation may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::CaptureFailed(_))
    }

    /// Returns the temporary file left behind by a failed metadata write.
    pub fn temp_path(&self) -> Option<&Path> {
        match self {
            Error::MetadataWriteFailed { temp_path, .. } => Some(temp_path),
            _ => None,
        }
    }

    pub(crate) fn directory_unavailable(path: &Path, reason: impl Into<String>) -> Self {
        Error::DirectoryUnavailable {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
