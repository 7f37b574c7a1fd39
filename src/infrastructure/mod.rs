// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`exif`]: Artist tagging via `little_exif` (implements [`MetadataWriter`])
//! - [`import`]: File-backed capture device (implements [`CaptureDevice`])
//! - [`index`]: Log-only media index (implements [`MediaIndex`])
//!
//! [`MetadataWriter`]: crate::application::port::MetadataWriter
//! [`CaptureDevice`]: crate::application::port::CaptureDevice
//! [`MediaIndex`]: crate::application::port::MediaIndex

pub mod exif;
pub mod import;
pub mod index;

pub use self::exif::{read_artist, LittleExifWriter};
pub use self::import::ImageImportDevice;
pub use self::index::LoggingMediaIndex;
