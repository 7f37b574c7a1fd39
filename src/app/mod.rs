// SPDX-License-Identifier: MPL-2.0
//! Session controller wiring the capture core together.
//!
//! The `Controller` owns the shared catalog record, the orientation tracker,
//! the barcode bridge and the capture orchestrator. Front ends (the CLI, a
//! camera preview, a scanner daemon) feed it sensor samples, frames and
//! trigger presses; it never talks to a device SDK directly.

use crate::application::port::{BarcodeDecoder, CaptureDevice, Frame, MediaIndex, MetadataWriter};
use crate::application::{
    BarcodeEventBridge, CaptureOrchestrator, CaptureSettings, CaptureTicket, CatalogState,
    FrameAnalysisWorker, OrientationTracker,
};
use crate::config::Config;
use crate::domain::{BarcodeFormat, CatalogEntry, DeviceRotation};
use crate::error::{Error, Result};
use crate::paths;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Resolves the photo and cache directories for `config` and creates them.
///
/// # Errors
///
/// [`Error::DirectoryUnavailable`] if no photo directory can be determined or
/// either directory cannot be created.
pub fn prepare_directories(config: &Config) -> Result<CaptureSettings> {
    let photo_dir = paths::get_photo_dir_with_override(config.photo_dir.clone()).ok_or_else(
        || Error::DirectoryUnavailable {
            path: PathBuf::new(),
            reason: "no home or pictures directory".into(),
        },
    )?;
    let cache_dir = paths::get_cache_dir_with_override(config.cache_dir.clone());

    paths::ensure_directory(&photo_dir)?;
    paths::ensure_directory(&cache_dir)?;

    Ok(CaptureSettings {
        photo_dir,
        cache_dir,
    })
}

pub struct Controller {
    catalog: CatalogState,
    orientation: OrientationTracker,
    bridge: BarcodeEventBridge,
    formats: Vec<BarcodeFormat>,
    orchestrator: CaptureOrchestrator,
}

impl Controller {
    /// Prepares the directories and starts the capture worker.
    pub fn start<D>(
        config: &Config,
        device: D,
        writer: Arc<dyn MetadataWriter>,
        index: Arc<dyn MediaIndex>,
    ) -> Result<Self>
    where
        D: CaptureDevice + 'static,
    {
        let settings = prepare_directories(config)?;
        tracing::info!(
            photo_dir = %settings.photo_dir.display(),
            cache_dir = %settings.cache_dir.display(),
            "capture session started"
        );

        let catalog = CatalogState::new(config.initial_entry());
        let bridge = BarcodeEventBridge::new(catalog.clone());
        let orchestrator = CaptureOrchestrator::spawn(settings, device, writer, index)?;

        Ok(Self {
            catalog,
            orientation: OrientationTracker::new(),
            bridge,
            formats: config.barcode_formats(),
            orchestrator,
        })
    }

    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn orientation(&self) -> &OrientationTracker {
        &self.orientation
    }

    pub fn bridge(&self) -> &BarcodeEventBridge {
        &self.bridge
    }

    pub fn barcode_formats(&self) -> &[BarcodeFormat] {
        &self.formats
    }

    pub fn photo_dir(&self) -> &Path {
        self.orchestrator.photo_dir()
    }

    pub fn entry(&self) -> CatalogEntry {
        self.catalog.snapshot()
    }

    /// Feeds a raw orientation sensor reading.
    pub fn on_orientation_sample(&self, angle: i32) -> Option<DeviceRotation> {
        self.orientation.on_sample(angle)
    }

    /// Manual code entry; same effect as a scanned label.
    pub fn set_code(&self, code: impl Into<String>) {
        self.catalog.update_label(code);
    }

    pub fn set_artist(&self, artist: impl Into<String>) {
        self.catalog.update_artist(artist);
    }

    /// Captures with the current rotation and catalog record.
    ///
    /// Both are read at this moment; later label or tilt changes do not
    /// affect the queued capture.
    pub fn trigger_capture(&self) -> Result<CaptureTicket> {
        let rotation = self.orientation.current();
        self.orchestrator.capture_from(&self.catalog, rotation)
    }

    /// Starts a scanning session: frames submitted to the returned worker
    /// update the catalog code.
    pub fn start_scanning<F, D>(&self, decoder: D) -> Result<FrameAnalysisWorker<F>>
    where
        F: Frame + 'static,
        D: BarcodeDecoder + 'static,
    {
        self.bridge.reset();
        FrameAnalysisWorker::spawn(self.bridge.clone(), decoder, self.formats.clone())
    }
}
