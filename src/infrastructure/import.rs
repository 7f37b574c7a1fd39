// SPDX-License-Identifier: MPL-2.0
//! Capture device backed by an existing image file.
//!
//! Stands in for a camera when photos come from a scanner, a tethered camera
//! dump or a test fixture. The source is decoded, turned upright according to
//! the rotation hint and encoded as JPEG into the target path.

use crate::application::port::{CaptureDevice, DeviceFault};
use crate::config::DEFAULT_JPEG_QUALITY;
use crate::domain::DeviceRotation;
use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::DynamicImage;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ImageImportDevice {
    source: PathBuf,
    quality: u8,
}

impl ImageImportDevice {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// JPEG quality, clamped to 1..=100.
    #[must_use]
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(1, 100);
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}

/// Turns a frame taken with the device held at `rotation` upright.
pub fn upright(image: &DynamicImage, rotation: DeviceRotation) -> DynamicImage {
    match rotation {
        DeviceRotation::Rot0 => image.clone(),
        DeviceRotation::Rot90 => image.rotate270(),
        DeviceRotation::Rot270 => image.rotate90(),
    }
}

impl CaptureDevice for ImageImportDevice {
    fn take_picture(&mut self, target: &Path, rotation: DeviceRotation) -> Result<(), DeviceFault> {
        let source = image_rs::open(&self.source).map_err(|err| {
            DeviceFault::Unavailable(format!("{}: {err}", self.source.display()))
        })?;
        let rgb = upright(&source, rotation).to_rgb8();

        let file = File::create(target).map_err(|err| DeviceFault::Save(err.to_string()))?;
        let mut writer = BufWriter::new(file);
        JpegEncoder::new_with_quality(&mut writer, self.quality)
            .encode_image(&rgb)
            .map_err(|err| DeviceFault::Exposure(err.to_string()))?;
        writer
            .flush()
            .map_err(|err| DeviceFault::Save(err.to_string()))?;

        tracing::debug!(
            source = %self.source.display(),
            width = rgb.width(),
            height = rgb.height(),
            %rotation,
            "frame imported"
        );
        Ok(())
    }
}
