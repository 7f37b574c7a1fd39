// SPDX-License-Identifier: MPL-2.0
//! The catalog record captures are tagged with.

use crate::config::{DEFAULT_ARTIST, DEFAULT_CODE};

/// Catalog code of the photographed object plus the author credited in EXIF.
///
/// Updates never mutate a shared record in place: `with_code` and
/// `with_artist` return a fresh copy that replaces the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogEntry {
    pub code: String,
    pub artist: String,
}

impl CatalogEntry {
    pub fn new(code: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            artist: artist.into(),
        }
    }

    #[must_use]
    pub fn with_code(&self, code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            artist: self.artist.clone(),
        }
    }

    #[must_use]
    pub fn with_artist(&self, artist: impl Into<String>) -> Self {
        Self {
            code: self.code.clone(),
            artist: artist.into(),
        }
    }
}

impl Default for CatalogEntry {
    fn default() -> Self {
        Self::new(DEFAULT_CODE, DEFAULT_ARTIST)
    }
}
