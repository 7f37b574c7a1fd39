// SPDX-License-Identifier: MPL-2.0
//! Frame analyzer and barcode decoder ports.

use crate::domain::{BarcodeDetection, BarcodeFormat};
use thiserror::Error;

/// A single-frame decode error. Recovered locally, never surfaced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("barcode decode fault: {0}")]
pub struct DecodeFault(pub String);

/// Borrowed view of a frame's pixels.
#[derive(Debug, Clone, Copy)]
pub struct FrameImage<'a> {
    pub buffer: &'a [u8],
    pub width: u32,
    pub height: u32,
    /// Clockwise rotation needed to display the buffer upright.
    pub rotation_degrees: u16,
}

/// A frame handed out by the upstream camera pipeline.
///
/// The pipeline has a small fixed pool of buffers; every frame must be
/// returned through [`Frame::close`] exactly once or the preview stalls.
pub trait Frame: Send {
    fn image(&self) -> FrameImage<'_>;

    /// Returns the buffer to the pipeline.
    fn close(&mut self);
}

/// Port for the barcode SDK.
pub trait BarcodeDecoder: Send {
    /// Decodes every barcode of one of `formats` visible in `image`.
    ///
    /// Detections are returned in scanner order, which is not meaningful.
    fn decode(
        &mut self,
        image: &FrameImage<'_>,
        formats: &[BarcodeFormat],
    ) -> Result<Vec<BarcodeDetection>, DecodeFault>;
}

impl<F> BarcodeDecoder for F
where
    F: FnMut(&FrameImage<'_>, &[BarcodeFormat]) -> Result<Vec<BarcodeDetection>, DecodeFault>
        + Send,
{
    fn decode(
        &mut self,
        image: &FrameImage<'_>,
        formats: &[BarcodeFormat],
    ) -> Result<Vec<BarcodeDetection>, DecodeFault> {
        self(image, formats)
    }
}
