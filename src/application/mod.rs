// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions for the external collaborators
//! - [`catalog`]: Shared `{code, artist}` state ([`CatalogState`])
//! - [`orientation`]: Latest device rotation ([`OrientationTracker`])
//! - [`allocator`]: Output slot probing ([`FileSlotAllocator`])
//! - [`barcode`]: Detection-to-catalog bridge ([`BarcodeEventBridge`])
//! - [`capture`]: Serial capture pipeline ([`CaptureOrchestrator`])
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The controller in [`crate::app`] wires both together

pub mod allocator;
pub mod barcode;
pub mod capture;
pub mod catalog;
pub mod orientation;
pub mod port;

pub use allocator::FileSlotAllocator;
pub use barcode::{BarcodeEventBridge, FrameAnalysisWorker, FrameGuard};
pub use capture::{
    CaptureOrchestrator, CaptureResult, CaptureSettings, CaptureTicket, CapturedPhoto,
};
pub use catalog::CatalogState;
pub use orientation::OrientationTracker;
