// SPDX-License-Identifier: MPL-2.0
//! Classification of raw device tilt into discrete capture rotations.
//!
//! The orientation sensor reports the clockwise tilt of the device in whole
//! degrees (`0..=359`), or [`ORIENTATION_UNKNOWN`] when the device lies flat.
//! Captures only distinguish three rotations; holding the device upside down
//! is deliberately treated like the natural orientation so that overhead
//! shots of objects on a table are not flipped.

use crate::config::ORIENTATION_UNKNOWN;
use std::fmt;

/// Intended up-direction of a capture, in surface-rotation terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceRotation {
    /// Natural orientation (portrait on phones).
    #[default]
    Rot0,
    /// Device turned a quarter turn counter-clockwise.
    Rot90,
    /// Device turned a quarter turn clockwise.
    Rot270,
}

impl DeviceRotation {
    /// Rotation in degrees (0, 90 or 270).
    #[must_use]
    pub fn degrees(self) -> u16 {
        match self {
            DeviceRotation::Rot0 => 0,
            DeviceRotation::Rot90 => 90,
            DeviceRotation::Rot270 => 270,
        }
    }

    /// Parses an exact rotation in degrees. 180 is not a capture rotation.
    #[must_use]
    pub fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(DeviceRotation::Rot0),
            90 => Some(DeviceRotation::Rot90),
            270 => Some(DeviceRotation::Rot270),
            _ => None,
        }
    }
}

impl fmt::Display for DeviceRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ROT_{}", self.degrees())
    }
}

/// Maps a raw tilt angle to a capture rotation.
///
/// | angle        | rotation |
/// |--------------|----------|
/// | `[45, 135)`  | `Rot270` |
/// | `[135, 225)` | `Rot0`   |
/// | `[225, 315)` | `Rot90`  |
/// | anything else, including [`ORIENTATION_UNKNOWN`] | `Rot0` |
///
/// Total over `i32`: out-of-range readings never fail.
#[must_use]
pub fn classify(angle: i32) -> DeviceRotation {
    if angle == ORIENTATION_UNKNOWN {
        return DeviceRotation::Rot0;
    }
    match angle {
        45..=134 => DeviceRotation::Rot270,
        // upside down counts as natural, no overhead flip
        135..=224 => DeviceRotation::Rot0,
        225..=314 => DeviceRotation::Rot90,
        _ => DeviceRotation::Rot0,
    }
}
