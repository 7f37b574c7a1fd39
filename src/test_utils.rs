// SPDX-License-Identifier: MPL-2.0
//! Test doubles for the external collaborator ports.
//!
//! The fakes resolve synchronously so capture and scan flows can be driven
//! deterministically from unit tests.

use crate::application::port::{
    BarcodeDecoder, CaptureDevice, DecodeFault, DeviceFault, Frame, FrameImage, IndexError,
    MediaIndex, MetadataError, MetadataWriter,
};
use crate::domain::{BarcodeDetection, BarcodeFormat, DeviceRotation};
use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// =============================================================================
// Frames
// =============================================================================

/// Shared record of which frames were closed, in order.
#[derive(Debug, Clone, Default)]
pub struct ReleaseLog(Arc<Mutex<Vec<u32>>>);

impl ReleaseLog {
    pub fn releases_of(&self, id: u32) -> usize {
        self.0.lock().unwrap().iter().filter(|&&r| r == id).count()
    }

    pub fn total(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

/// A frame that records its release in a [`ReleaseLog`].
pub struct CountingFrame {
    id: u32,
    rotation_degrees: u16,
    buffer: Vec<u8>,
    log: ReleaseLog,
}

impl CountingFrame {
    pub fn new(id: u32, log: &ReleaseLog) -> Self {
        Self {
            id,
            rotation_degrees: 0,
            buffer: vec![0; 16],
            log: log.clone(),
        }
    }

    pub fn rotated(mut self, degrees: u16) -> Self {
        self.rotation_degrees = degrees;
        self
    }
}

impl Frame for CountingFrame {
    fn image(&self) -> FrameImage<'_> {
        FrameImage {
            buffer: &self.buffer,
            width: 4,
            height: 4,
            rotation_degrees: self.rotation_degrees,
        }
    }

    fn close(&mut self) {
        self.log.0.lock().unwrap().push(self.id);
    }
}

/// Decoder that replays a script of results, then reports empty frames.
pub struct ScriptedDecoder {
    script: VecDeque<Result<Vec<BarcodeDetection>, DecodeFault>>,
}

impl ScriptedDecoder {
    pub fn new(script: Vec<Result<Vec<BarcodeDetection>, DecodeFault>>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

impl BarcodeDecoder for ScriptedDecoder {
    fn decode(
        &mut self,
        _image: &FrameImage<'_>,
        _formats: &[BarcodeFormat],
    ) -> Result<Vec<BarcodeDetection>, DecodeFault> {
        self.script.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

// =============================================================================
// Capture device
// =============================================================================

/// Capture device that writes a marker file, or fails on scripted exposures.
#[derive(Clone, Default)]
pub struct FakeDevice {
    failures: Arc<Mutex<VecDeque<bool>>>,
    rotations: Arc<Mutex<Vec<DeviceRotation>>>,
    staged: Arc<Mutex<Vec<PathBuf>>>,
    delay: Option<Duration>,
}

impl FakeDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Each entry decides one exposure in order: `true` fails it.
    pub fn with_failures(failures: &[bool]) -> Self {
        let device = Self::default();
        device.failures.lock().unwrap().extend(failures.iter().copied());
        device
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn rotations(&self) -> Vec<DeviceRotation> {
        self.rotations.lock().unwrap().clone()
    }

    /// Temporary paths the device was asked to write, in call order.
    pub fn staged_paths(&self) -> Vec<PathBuf> {
        self.staged.lock().unwrap().clone()
    }
}

impl CaptureDevice for FakeDevice {
    fn take_picture(&mut self, target: &Path, rotation: DeviceRotation) -> Result<(), DeviceFault> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.rotations.lock().unwrap().push(rotation);
        self.staged.lock().unwrap().push(target.to_path_buf());
        if self.failures.lock().unwrap().pop_front().unwrap_or(false) {
            return Err(DeviceFault::Exposure("sensor timeout".into()));
        }
        fs::write(target, format!("exposure {rotation}"))
            .map_err(|e| DeviceFault::Save(e.to_string()))
    }
}

// =============================================================================
// Metadata writers
// =============================================================================

/// Writer that appends `artist=<name>` to the file so tests can see the tag.
#[derive(Clone, Default)]
pub struct RecordingWriter {
    calls: Arc<Mutex<Vec<(PathBuf, String)>>>,
}

impl RecordingWriter {
    pub fn calls(&self) -> Vec<(PathBuf, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl MetadataWriter for RecordingWriter {
    fn write_artist(&self, path: &Path, artist: &str) -> Result<(), MetadataError> {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_path_buf(), artist.to_string()));
        let mut file = OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|e| MetadataError::IoError(e.to_string()))?;
        write!(file, "\nartist={artist}").map_err(|e| MetadataError::WriteFailed(e.to_string()))
    }
}

/// Writer that always fails.
#[derive(Clone, Copy, Default)]
pub struct FailingWriter;

impl MetadataWriter for FailingWriter {
    fn write_artist(&self, _path: &Path, _artist: &str) -> Result<(), MetadataError> {
        Err(MetadataError::WriteFailed("tag table full".into()))
    }
}

// =============================================================================
// Media index
// =============================================================================

/// Index that records notified paths, optionally failing every call.
#[derive(Clone, Default)]
pub struct RecordingIndex {
    notified: Arc<Mutex<Vec<PathBuf>>>,
    failing: bool,
}

impl RecordingIndex {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn notified(&self) -> Vec<PathBuf> {
        self.notified.lock().unwrap().clone()
    }
}

impl MediaIndex for RecordingIndex {
    fn notify_new_file(&self, path: &Path) -> Result<(), IndexError> {
        self.notified.lock().unwrap().push(path.to_path_buf());
        if self.failing {
            Err(IndexError("scanner service not running".into()))
        } else {
            Ok(())
        }
    }
}
