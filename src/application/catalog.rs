// SPDX-License-Identifier: MPL-2.0
//! Shared, observable catalog record.

use crate::domain::CatalogEntry;
use std::sync::Arc;
use tokio::sync::watch;

/// The `{code, artist}` record shared by user input, the barcode bridge and
/// the capture orchestrator.
///
/// Cloning is cheap and every clone refers to the same record. Each update
/// swaps in a whole new [`CatalogEntry`], so readers always see a consistent
/// pair and never a half-applied change.
#[derive(Debug, Clone)]
pub struct CatalogState {
    tx: Arc<watch::Sender<CatalogEntry>>,
}

impl CatalogState {
    pub fn new(initial: CatalogEntry) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// A consistent copy of the current record.
    pub fn snapshot(&self) -> CatalogEntry {
        self.tx.borrow().clone()
    }

    pub fn code(&self) -> String {
        self.tx.borrow().code.clone()
    }

    pub fn artist(&self) -> String {
        self.tx.borrow().artist.clone()
    }

    /// Sets the catalog code, typed by the user or read from a label.
    pub fn update_label(&self, code: impl Into<String>) {
        let code = code.into();
        tracing::debug!(%code, "update label");
        self.tx.send_modify(|entry| *entry = entry.with_code(code));
    }

    pub fn update_artist(&self, artist: impl Into<String>) {
        let artist = artist.into();
        tracing::debug!(%artist, "update author");
        self.tx.send_modify(|entry| *entry = entry.with_artist(artist));
    }

    pub fn replace(&self, entry: CatalogEntry) {
        self.tx.send_replace(entry);
    }

    /// Receiver notified on every update, for views that mirror the record.
    pub fn subscribe(&self) -> watch::Receiver<CatalogEntry> {
        self.tx.subscribe()
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new(CatalogEntry::default())
    }
}
