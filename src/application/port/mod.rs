// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for the external collaborators.
//!
//! The camera pipeline, the barcode SDK, the EXIF encoder and the platform
//! media index all live outside this crate. The core only talks to them
//! through these traits, so tests substitute fakes that resolve immediately.
//!
//! # Available Ports
//!
//! - [`capture`]: Exposure into a file ([`CaptureDevice`])
//! - [`metadata`]: Artist tag injection ([`MetadataWriter`])
//! - [`index`]: Media index refresh ([`MediaIndex`])
//! - [`barcode`]: Frame decoding ([`BarcodeDecoder`], [`Frame`])
//!
//! # Design Notes
//!
//! - All traits use domain types only
//! - Methods are synchronous; the core calls them from its own worker threads
//! - Each port has its own fault type; the core maps faults to [`crate::error::Error`]

pub mod barcode;
pub mod capture;
pub mod index;
pub mod metadata;

pub use barcode::{BarcodeDecoder, DecodeFault, Frame, FrameImage};
pub use capture::{CaptureDevice, DeviceFault};
pub use index::{IndexError, MediaIndex};
pub use metadata::{MetadataError, MetadataWriter};
