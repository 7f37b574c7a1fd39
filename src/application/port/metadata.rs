// SPDX-License-Identifier: MPL-2.0
//! Metadata writing port definitions.
//!
//! Only the EXIF artist (author) tag is written by the capture pipeline; every
//! other tag the device produced must survive untouched.

use std::path::Path;
use thiserror::Error;

// =============================================================================
// MetadataError
// =============================================================================

/// Errors that can occur while tagging a file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    /// Failed to read the existing metadata.
    #[error("Failed to read metadata: {0}")]
    ReadFailed(String),

    /// Failed to write metadata to the file.
    #[error("Failed to write metadata: {0}")]
    WriteFailed(String),

    /// The file format doesn't support EXIF.
    #[error("Format does not support metadata")]
    UnsupportedFormat,

    /// The file could not be accessed.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// MetadataWriter Trait
// =============================================================================

/// Port for injecting the author into an image in place.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the capture worker owns an `Arc`.
pub trait MetadataWriter: Send + Sync {
    /// Replaces the EXIF artist tag of the file at `path` with `artist`.
    ///
    /// # Errors
    ///
    /// Returns a [`MetadataError`] if the file cannot be rewritten.
    fn write_artist(&self, path: &Path, artist: &str) -> Result<(), MetadataError>;
}
