// SPDX-License-Identifier: MPL-2.0
//! Media index adapter for platforms without a scanner service.

use crate::application::port::{IndexError, MediaIndex};
use std::path::Path;

/// Announces new files through the log only.
///
/// Desktop file managers pick up new files by watching the directory, so the
/// only thing left to do is confirm the file is actually there.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingMediaIndex;

impl MediaIndex for LoggingMediaIndex {
    fn notify_new_file(&self, path: &Path) -> Result<(), IndexError> {
        if !path.is_file() {
            return Err(IndexError(format!("{} is not a file", path.display())));
        }
        tracing::info!(path = %path.display(), "scanned");
        Ok(())
    }
}
