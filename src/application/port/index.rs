// SPDX-License-Identifier: MPL-2.0
//! Media index port.

use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("media index refresh failed: {0}")]
pub struct IndexError(pub String);

/// Port for the platform media index (gallery database, desktop search, ...).
///
/// Notification is fire-and-forget: the core logs a failure and moves on.
pub trait MediaIndex: Send + Sync {
    fn notify_new_file(&self, path: &Path) -> Result<(), IndexError>;
}
