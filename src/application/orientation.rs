// SPDX-License-Identifier: MPL-2.0
//! Latest-value tracking of the device rotation.

use crate::config::ORIENTATION_UNKNOWN;
use crate::domain::{classify, DeviceRotation};
use std::sync::Arc;
use tokio::sync::watch;

/// Holds the rotation derived from the most recent orientation sample.
///
/// No history is kept. Samples carrying the unknown sentinel are ignored, so a
/// device briefly laid flat keeps the rotation it had before.
#[derive(Debug, Clone)]
pub struct OrientationTracker {
    tx: Arc<watch::Sender<DeviceRotation>>,
}

impl OrientationTracker {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(DeviceRotation::default());
        Self { tx: Arc::new(tx) }
    }

    /// Feeds one raw sensor reading. Returns the new rotation, or `None` for
    /// an unknown reading.
    pub fn on_sample(&self, angle: i32) -> Option<DeviceRotation> {
        if angle == ORIENTATION_UNKNOWN {
            return None;
        }
        let rotation = classify(angle);
        self.tx.send_if_modified(|current| {
            if *current == rotation {
                false
            } else {
                *current = rotation;
                true
            }
        });
        Some(rotation)
    }

    pub fn current(&self) -> DeviceRotation {
        *self.tx.borrow()
    }

    /// Receiver woken only when the rotation actually changes.
    pub fn subscribe(&self) -> watch::Receiver<DeviceRotation> {
        self.tx.subscribe()
    }
}

impl Default for OrientationTracker {
    fn default() -> Self {
        Self::new()
    }
}
