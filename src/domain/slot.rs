// SPDX-License-Identifier: MPL-2.0
//! Output file naming for captures.

use crate::config::{CAPTURE_EXTENSION, SEQUENCE_WIDTH};
use std::path::{Path, PathBuf};

/// A reserved output path: `directory/{code}_{sequence:02}.jpg`.
///
/// Constructed by the slot allocator; `sequence` is always at least 1.
///
/// [`code`](Self::code) is the catalog code as scanned or entered. The file
/// name is built by [`file_name`], which replaces path separators, so a code
/// such as `MU/01/7` is filed as `MU-01-7_01.jpg` while `code()` still
/// returns `MU/01/7`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaptureSlot {
    directory: PathBuf,
    code: String,
    sequence: u32,
    path: PathBuf,
}

impl CaptureSlot {
    /// Builds the slot for `code` at `sequence` inside `directory`.
    ///
    /// # Panics
    ///
    /// Panics if `sequence` is zero.
    #[must_use]
    pub fn new(directory: &Path, code: &str, sequence: u32) -> Self {
        assert!(sequence >= 1, "slot sequence starts at 1");
        let path = directory.join(file_name(code, sequence));
        Self {
            directory: directory.to_path_buf(),
            code: code.to_string(),
            sequence,
            path,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// The unmodified catalog code, which may differ from the file name prefix.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Full path of the finished capture.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// File name for `code` at `sequence`, zero-padded to at least two digits.
///
/// Path separators inside the code are replaced with `-` so a slot never
/// leaves its directory.
#[must_use]
pub fn file_name(code: &str, sequence: u32) -> String {
    let code: String = code
        .chars()
        .map(|c| if std::path::is_separator(c) { '-' } else { c })
        .collect();
    format!(
        "{code}_{sequence:0width$}.{ext}",
        width = SEQUENCE_WIDTH,
        ext = CAPTURE_EXTENSION
    )
}
