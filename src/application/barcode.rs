// SPDX-License-Identifier: MPL-2.0
//! Bridge from the continuous barcode frame stream to catalog label updates.
//!
//! Every detection of every analyzed frame overwrites the catalog code and
//! raises the "barcode found" signal. There is no deduplication: when several
//! frames report values before the scanning screen is torn down, the last one
//! wins. The scanning session is expected to close promptly after the first
//! hit.
//!
//! Frames are analyzed on a dedicated thread that keeps only the latest
//! pending frame (see [`FrameAnalysisWorker`]).

use crate::application::catalog::CatalogState;
use crate::application::port::{BarcodeDecoder, Frame};
use crate::domain::{BarcodeDetection, BarcodeFormat};
use crate::error::{Error, Result};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use tokio::sync::watch;

// =============================================================================
// FrameGuard
// =============================================================================

/// Owns a frame and returns it to the pipeline when dropped.
///
/// Dropping happens exactly once whether decoding succeeds, fails, panics or
/// the frame is discarded unanalyzed.
pub struct FrameGuard<F: Frame> {
    frame: F,
}

impl<F: Frame> FrameGuard<F> {
    pub fn new(frame: F) -> Self {
        Self { frame }
    }

    pub fn frame(&self) -> &F {
        &self.frame
    }
}

impl<F: Frame> Drop for FrameGuard<F> {
    fn drop(&mut self) {
        self.frame.close();
    }
}

// =============================================================================
// BarcodeEventBridge
// =============================================================================

/// Turns decoded barcodes into catalog label updates plus a "found" signal.
#[derive(Debug, Clone)]
pub struct BarcodeEventBridge {
    catalog: CatalogState,
    found: Arc<watch::Sender<bool>>,
}

impl BarcodeEventBridge {
    pub fn new(catalog: CatalogState) -> Self {
        let (found, _rx) = watch::channel(false);
        Self {
            catalog,
            found: Arc::new(found),
        }
    }

    /// Applies one frame's detections in scanner order.
    pub fn on_detections(&self, batch: &[BarcodeDetection]) {
        for detection in batch {
            self.catalog.update_label(detection.raw_value.clone());
            self.found.send_replace(true);
        }
    }

    /// Decodes one frame and applies its detections, releasing the frame
    /// afterwards. Returns the number of detections applied.
    ///
    /// A decode fault or a panicking decoder is logged and counts as an empty
    /// frame.
    pub fn analyze<F, D>(&self, decoder: &mut D, formats: &[BarcodeFormat], frame: F) -> usize
    where
        F: Frame,
        D: BarcodeDecoder + ?Sized,
    {
        self.analyze_guarded(decoder, formats, FrameGuard::new(frame))
    }

    fn analyze_guarded<F, D>(
        &self,
        decoder: &mut D,
        formats: &[BarcodeFormat],
        guard: FrameGuard<F>,
    ) -> usize
    where
        F: Frame,
        D: BarcodeDecoder + ?Sized,
    {
        let image = guard.frame().image();
        let decoded = panic::catch_unwind(AssertUnwindSafe(|| decoder.decode(&image, formats)));
        match decoded {
            Ok(Ok(batch)) => {
                self.on_detections(&batch);
                batch.len()
            }
            Ok(Err(fault)) => {
                tracing::error!(%fault, "barcode failure");
                0
            }
            Err(_) => {
                tracing::error!("barcode failure: decoder panicked");
                0
            }
        }
    }

    /// Whether any barcode was applied since the last [`reset`](Self::reset).
    pub fn found(&self) -> bool {
        *self.found.borrow()
    }

    pub fn subscribe_found(&self) -> watch::Receiver<bool> {
        self.found.subscribe()
    }

    /// Clears the found signal for a new scanning session.
    pub fn reset(&self) {
        self.found.send_replace(false);
    }

    /// The code the last detection wrote.
    pub fn label(&self) -> String {
        self.catalog.code()
    }
}

// =============================================================================
// FrameAnalysisWorker
// =============================================================================

struct MailboxState<F: Frame> {
    pending: Option<FrameGuard<F>>,
    closed: bool,
}

struct Mailbox<F: Frame> {
    state: Mutex<MailboxState<F>>,
    ready: Condvar,
}

impl<F: Frame> Mailbox<F> {
    fn lock(&self) -> MutexGuard<'_, MailboxState<F>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Single-threaded frame analysis with a "keep only latest" back-pressure
/// policy.
///
/// A frame submitted while another one is waiting replaces it; the replaced
/// frame is released without being analyzed. Dropping the worker stops the
/// thread and releases any pending frame.
pub struct FrameAnalysisWorker<F: Frame + 'static> {
    mailbox: Arc<Mailbox<F>>,
    handle: Option<JoinHandle<()>>,
}

impl<F: Frame + 'static> FrameAnalysisWorker<F> {
    pub fn spawn<D>(
        bridge: BarcodeEventBridge,
        mut decoder: D,
        formats: Vec<BarcodeFormat>,
    ) -> Result<Self>
    where
        D: BarcodeDecoder + 'static,
    {
        let mailbox = Arc::new(Mailbox {
            state: Mutex::new(MailboxState {
                pending: None,
                closed: false,
            }),
            ready: Condvar::new(),
        });

        let worker_mailbox = Arc::clone(&mailbox);
        let handle = std::thread::Builder::new()
            .name("muwi-analysis".into())
            .spawn(move || loop {
                let guard = {
                    let mut state = worker_mailbox.lock();
                    while state.pending.is_none() && !state.closed {
                        state = worker_mailbox
                            .ready
                            .wait(state)
                            .unwrap_or_else(PoisonError::into_inner);
                    }
                    if state.closed {
                        break;
                    }
                    state.pending.take()
                };
                if let Some(guard) = guard {
                    bridge.analyze_guarded(&mut decoder, &formats, guard);
                }
            })
            .map_err(|err| Error::Io(format!("cannot start analysis thread: {err}")))?;

        Ok(Self {
            mailbox,
            handle: Some(handle),
        })
    }

    /// Hands a frame to the analysis thread.
    ///
    /// Returns `true` if an older pending frame was dropped in its favour.
    /// After shutdown the frame is released immediately.
    pub fn submit(&self, frame: F) -> bool {
        let guard = FrameGuard::new(frame);
        let replaced = {
            let mut state = self.mailbox.lock();
            if state.closed {
                return false;
            }
            state.pending.replace(guard)
        };
        self.mailbox.ready.notify_one();
        // released outside the lock
        replaced.is_some()
    }

    /// Stops the analysis thread after the frame in progress, if any.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let pending = {
            let mut state = self.mailbox.lock();
            state.closed = true;
            state.pending.take()
        };
        drop(pending);
        self.mailbox.ready.notify_all();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("analysis thread panicked");
            }
        }
    }
}

impl<F: Frame + 'static> Drop for FrameAnalysisWorker<F> {
    fn drop(&mut self) {
        self.stop();
    }
}
