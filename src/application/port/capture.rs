// SPDX-License-Identifier: MPL-2.0
//! Capture device port.

use crate::domain::DeviceRotation;
use std::path::Path;
use thiserror::Error;

/// Fault reported by the capture device for one exposure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceFault {
    /// The camera is closed, busy or was never bound.
    #[error("camera unavailable: {0}")]
    Unavailable(String),

    /// The exposure itself failed.
    #[error("exposure failed: {0}")]
    Exposure(String),

    /// The encoded image could not be stored at the requested path.
    #[error("could not save exposure: {0}")]
    Save(String),
}

/// Port for the camera that takes the picture.
///
/// The device encodes one exposure as JPEG into `target`, a private staging
/// path owned by the caller. `rotation` is the intended up-direction the
/// device should apply to the sensor output.
///
/// Called from the capture worker thread only, one exposure at a time.
pub trait CaptureDevice: Send {
    fn take_picture(&mut self, target: &Path, rotation: DeviceRotation) -> Result<(), DeviceFault>;
}

impl<F> CaptureDevice for F
where
    F: FnMut(&Path, DeviceRotation) -> Result<(), DeviceFault> + Send,
{
    fn take_picture(&mut self, target: &Path, rotation: DeviceRotation) -> Result<(), DeviceFault> {
        self(target, rotation)
    }
}
