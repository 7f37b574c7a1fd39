// SPDX-License-Identifier: MPL-2.0
//! Capture pipeline: exposure, artist tagging and placement at a reserved slot.
//!
//! # Pipeline
//!
//! ```text
//! trigger ──▶ reserve slot ──▶ queue ══▶ expose to cache ──▶ tag artist ──▶ move to slot ──▶ notify index
//!  (caller thread, sync)               (muwi-capture thread, strictly serial)
//! ```
//!
//! The slot is resolved when the capture is triggered, so a later change of
//! the catalog code does not redirect a capture already in the queue. Slots
//! promised to queued captures are reserved, which keeps two quick triggers
//! for the same code from landing on the same file.
//!
//! The raw exposure never touches the target path directly. It is staged in
//! the private cache directory and only moved once it is fully tagged. If
//! tagging or moving fails the staged file is kept for recovery.

use crate::application::allocator::FileSlotAllocator;
use crate::application::catalog::CatalogState;
use crate::application::port::{CaptureDevice, MediaIndex, MetadataWriter};
use crate::domain::{CaptureSlot, DeviceRotation};
use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use tokio::sync::{mpsc, oneshot};

/// Directories the orchestrator works in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSettings {
    /// Public directory finished captures are placed in.
    pub photo_dir: PathBuf,
    /// Private directory raw exposures are staged in.
    pub cache_dir: PathBuf,
}

/// A finished, tagged capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPhoto {
    pub path: PathBuf,
    pub artist: String,
    pub sequence: u32,
}

/// Outcome of one capture, delivered through its [`CaptureTicket`].
pub type CaptureResult = Result<CapturedPhoto>;

/// Completion signal of a queued capture.
#[derive(Debug)]
pub struct CaptureTicket {
    slot: CaptureSlot,
    rx: oneshot::Receiver<CaptureResult>,
}

impl CaptureTicket {
    /// The slot reserved for this capture at trigger time.
    pub fn slot(&self) -> &CaptureSlot {
        &self.slot
    }

    /// Blocks until the capture has finished.
    ///
    /// Must not be called from inside an async runtime; use
    /// [`outcome`](Self::outcome) there.
    pub fn wait(self) -> CaptureResult {
        self.rx.blocking_recv().unwrap_or_else(|_| Err(worker_stopped()))
    }

    /// Resolves when the capture has finished.
    pub async fn outcome(self) -> CaptureResult {
        self.rx.await.unwrap_or_else(|_| Err(worker_stopped()))
    }
}

fn worker_stopped() -> Error {
    Error::CaptureFailed("capture worker stopped".into())
}

struct CaptureJob {
    slot: CaptureSlot,
    rotation: DeviceRotation,
    artist: String,
    reply: oneshot::Sender<CaptureResult>,
}

type Reservations = Arc<Mutex<HashSet<PathBuf>>>;

fn lock(reservations: &Reservations) -> MutexGuard<'_, HashSet<PathBuf>> {
    reservations.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Frees one reservation when dropped, including while unwinding.
struct ReservationGuard<'a> {
    reservations: &'a Reservations,
    path: &'a Path,
}

impl Drop for ReservationGuard<'_> {
    fn drop(&mut self) {
        lock(self.reservations).remove(self.path);
    }
}

// =============================================================================
// CaptureOrchestrator
// =============================================================================

/// Drives captures through a single serial worker thread.
///
/// Dropping the orchestrator finishes every capture already queued, then
/// stops the worker. Captures are never cancelled once triggered.
pub struct CaptureOrchestrator {
    allocator: FileSlotAllocator,
    reservations: Reservations,
    queue: Option<mpsc::UnboundedSender<CaptureJob>>,
    worker: Option<JoinHandle<()>>,
}

impl CaptureOrchestrator {
    /// Starts the capture worker.
    ///
    /// Both directories are expected to exist already (see
    /// [`crate::paths::ensure_directory`]).
    pub fn spawn<D>(
        settings: CaptureSettings,
        device: D,
        writer: Arc<dyn MetadataWriter>,
        index: Arc<dyn MediaIndex>,
    ) -> Result<Self>
    where
        D: CaptureDevice + 'static,
    {
        let reservations: Reservations = Arc::default();
        let (queue, mut jobs) = mpsc::unbounded_channel::<CaptureJob>();

        let mut pipeline = Pipeline {
            device: Box::new(device),
            writer,
            index,
            cache_dir: settings.cache_dir,
        };
        let worker_reservations = Arc::clone(&reservations);

        let worker = std::thread::Builder::new()
            .name("muwi-capture".into())
            .spawn(move || {
                while let Some(job) = jobs.blocking_recv() {
                    let reservation = ReservationGuard {
                        reservations: &worker_reservations,
                        path: job.slot.path(),
                    };
                    let result = panic::catch_unwind(AssertUnwindSafe(|| {
                        pipeline.run(&job.slot, job.rotation, &job.artist)
                    }))
                    .unwrap_or_else(|_| {
                        tracing::error!(
                            target_file = %job.slot.path().display(),
                            "capture panicked"
                        );
                        Err(Error::CaptureFailed("capture device panicked".into()))
                    });
                    drop(reservation);
                    // the caller may have dropped its ticket
                    let _ = job.reply.send(result);
                }
            })
            .map_err(|err| Error::Io(format!("cannot start capture thread: {err}")))?;

        Ok(Self {
            allocator: FileSlotAllocator::new(settings.photo_dir),
            reservations,
            queue: Some(queue),
            worker: Some(worker),
        })
    }

    pub fn photo_dir(&self) -> &Path {
        self.allocator.directory()
    }

    /// Reserves the next slot for `code` and queues a capture tagged with
    /// `artist`.
    ///
    /// # Errors
    ///
    /// [`Error::DirectoryUnavailable`] if no slot can be allocated; nothing is
    /// queued in that case. Every later failure arrives through the ticket.
    pub fn capture(
        &self,
        rotation: DeviceRotation,
        artist: &str,
        code: &str,
    ) -> Result<CaptureTicket> {
        let slot = {
            let mut reserved = lock(&self.reservations);
            let slot = self
                .allocator
                .next_slot_excluding(code, |path| reserved.contains(path))?;
            reserved.insert(slot.path().to_path_buf());
            slot
        };
        tracing::debug!(target_file = %slot.path().display(), %rotation, "capture queued");

        let (reply, rx) = oneshot::channel();
        let job = CaptureJob {
            slot: slot.clone(),
            rotation,
            artist: artist.to_string(),
            reply,
        };

        let sent = self
            .queue
            .as_ref()
            .map(|queue| queue.send(job).is_ok())
            .unwrap_or(false);
        if !sent {
            lock(&self.reservations).remove(slot.path());
            return Err(worker_stopped());
        }

        Ok(CaptureTicket { slot, rx })
    }

    /// Queues a capture for the catalog record as it is right now.
    pub fn capture_from(
        &self,
        catalog: &CatalogState,
        rotation: DeviceRotation,
    ) -> Result<CaptureTicket> {
        let entry = catalog.snapshot();
        self.capture(rotation, &entry.artist, &entry.code)
    }

    /// Number of captures queued or running.
    pub fn in_flight(&self) -> usize {
        lock(&self.reservations).len()
    }
}

impl Drop for CaptureOrchestrator {
    fn drop(&mut self) {
        // closing the queue lets the worker drain it and exit
        self.queue.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::error!("capture thread panicked");
            }
        }
    }
}

// =============================================================================
// Pipeline
// =============================================================================

struct Pipeline {
    device: Box<dyn CaptureDevice>,
    writer: Arc<dyn MetadataWriter>,
    index: Arc<dyn MediaIndex>,
    cache_dir: PathBuf,
}

impl Pipeline {
    fn run(&mut self, slot: &CaptureSlot, rotation: DeviceRotation, artist: &str) -> CaptureResult {
        let staged = tempfile::Builder::new()
            .prefix(&format!("{}_", slot.sequence()))
            .suffix(".jpg")
            .tempfile_in(&self.cache_dir)
            .map_err(|err| Error::directory_unavailable(&self.cache_dir, err.to_string()))?
            .into_temp_path();
        tracing::debug!(cache_file = %staged.display(), "exposure staged");

        // dropping `staged` on this path removes whatever the device left
        if let Err(fault) = self.device.take_picture(&staged, rotation) {
            tracing::error!(%fault, target_file = %slot.path().display(), "take photo error");
            return Err(Error::CaptureFailed(fault.to_string()));
        }

        let staged = staged
            .keep()
            .map_err(|err| Error::Io(format!("cannot keep staged exposure: {err}")))?;

        if let Err(err) = self.writer.write_artist(&staged, artist) {
            tracing::error!(error = %err, cache_file = %staged.display(), "artist tag failed");
            return Err(Error::MetadataWriteFailed {
                temp_path: staged,
                reason: err.to_string(),
            });
        }

        if let Err(err) = relocate(&staged, slot.path()) {
            tracing::error!(error = %err, cache_file = %staged.display(), "move to slot failed");
            return Err(Error::MetadataWriteFailed {
                temp_path: staged,
                reason: format!("cannot move to {}: {err}", slot.path().display()),
            });
        }

        tracing::info!(%artist, path = %slot.path().display(), "photo saved");

        if let Err(err) = self.index.notify_new_file(slot.path()) {
            tracing::warn!(error = %err, path = %slot.path().display(), "media index not refreshed");
        }

        Ok(CapturedPhoto {
            path: slot.path().to_path_buf(),
            artist: artist.to_string(),
            sequence: slot.sequence(),
        })
    }
}

/// Moves `from` to `to` without ever overwriting an existing `to`.
///
/// Tries an atomic rename first. When that is impossible (e.g. the cache is
/// on another filesystem) the file is copied, the copy's length checked and
/// synced, and only then the original removed. A failed copy leaves no
/// partial file at `to`.
pub(crate) fn relocate(from: &Path, to: &Path) -> io::Result<()> {
    if fs::symlink_metadata(to).is_ok() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "target slot already taken",
        ));
    }

    match fs::rename(from, to) {
        Ok(()) => {}
        Err(rename_err) => {
            tracing::debug!(error = %rename_err, "rename failed, copying instead");
            if let Err(err) = copy_verified(from, to) {
                let _ = fs::remove_file(to);
                return Err(err);
            }
            if let Err(err) = fs::remove_file(from) {
                tracing::warn!(error = %err, cache_file = %from.display(), "staged exposure not removed");
            }
        }
    }

    make_public(to);
    Ok(())
}

fn copy_verified(from: &Path, to: &Path) -> io::Result<()> {
    let expected = fs::metadata(from)?.len();
    let copied = fs::copy(from, to)?;
    fs::File::open(to)?.sync_all()?;
    let written = fs::metadata(to)?.len();
    if copied != expected || written != expected {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("copied {written} of {expected} bytes"),
        ));
    }
    Ok(())
}

/// Staged files are private to the user; finished captures must be readable
/// by other applications.
#[cfg(unix)]
fn make_public(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(err) = fs::set_permissions(path, fs::Permissions::from_mode(0o644)) {
        tracing::warn!(error = %err, path = %path.display(), "cannot relax permissions");
    }
}

#[cfg(not(unix))]
fn make_public(_path: &Path) {}
