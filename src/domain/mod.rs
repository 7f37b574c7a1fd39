// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core value types with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`barcode`]: Decoded labels ([`BarcodeDetection`], [`BarcodeFormat`])
//! - [`catalog`]: The `{code, artist}` record ([`CatalogEntry`])
//! - [`orientation`]: Device tilt classification ([`DeviceRotation`], [`classify`])
//! - [`slot`]: Output file naming ([`CaptureSlot`])

pub mod barcode;
pub mod catalog;
pub mod orientation;
pub mod slot;

pub use barcode::{BarcodeDetection, BarcodeFormat};
pub use catalog::CatalogEntry;
pub use orientation::{classify, DeviceRotation};
pub use slot::CaptureSlot;
