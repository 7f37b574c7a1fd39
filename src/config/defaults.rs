// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.

// ==========================================================================
// Catalog Defaults
// ==========================================================================

/// Catalog code shown before the photographer enters or scans one.
pub const DEFAULT_CODE: &str = "MUXX-XX-000000";

/// Author written into the EXIF artist tag until changed.
pub const DEFAULT_ARTIST: &str = "Museum Wiesbaden";

// ==========================================================================
// Storage Defaults
// ==========================================================================

/// Subdirectory of the public photo directory that receives captures.
pub const PHOTO_SUBDIR: &str = "MuWiCamera";

/// Directory name used under the platform cache/config directories.
pub const APP_DIR_NAME: &str = "MuWiScan";

/// Extension of every finished capture.
pub const CAPTURE_EXTENSION: &str = "jpg";

/// Minimum number of digits in the sequence part of a file name.
pub const SEQUENCE_WIDTH: usize = 2;

// ==========================================================================
// Orientation Defaults
// ==========================================================================

/// Sentinel reported by the orientation sensor when the tilt is unknown
/// (e.g. the device is lying flat).
pub const ORIENTATION_UNKNOWN: i32 = -1;

// ==========================================================================
// Encoding Defaults
// ==========================================================================

/// JPEG quality used when an imported source image is re-encoded.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;
