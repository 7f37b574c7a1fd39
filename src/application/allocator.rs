// SPDX-License-Identifier: MPL-2.0
//! Sequential output slot allocation.
//!
//! Slots are found by probing `{code}_01.jpg`, `{code}_02.jpg`, ... in order
//! and taking the first name with no filesystem entry. Nothing is remembered
//! between calls: deleting a file in the middle of a series makes its slot the
//! next one handed out.
//!
//! Probing is check-then-use without a lock. Callers that allocate from more
//! than one thread must serialize allocation and write themselves; the capture
//! orchestrator does this with its slot reservations.

use crate::domain::CaptureSlot;
use crate::error::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Allocates capture slots inside one output directory.
#[derive(Debug, Clone)]
pub struct FileSlotAllocator {
    directory: PathBuf,
}

impl FileSlotAllocator {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Returns the lowest free slot for `code`.
    ///
    /// # Errors
    ///
    /// [`Error::DirectoryUnavailable`] when the directory does not exist, is
    /// not a writable directory, or cannot be probed.
    pub fn next_slot(&self, code: &str) -> Result<CaptureSlot> {
        self.next_slot_excluding(code, |_| false)
    }

    /// Like [`next_slot`](Self::next_slot), but also skips paths for which
    /// `is_reserved` returns true (slots promised to in-flight captures).
    pub fn next_slot_excluding(
        &self,
        code: &str,
        is_reserved: impl Fn(&Path) -> bool,
    ) -> Result<CaptureSlot> {
        check_directory(&self.directory)?;

        for sequence in 1..=u32::MAX {
            let slot = CaptureSlot::new(&self.directory, code, sequence);
            if is_reserved(slot.path()) {
                continue;
            }
            match fs::symlink_metadata(slot.path()) {
                Ok(_) => continue,
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    tracing::debug!(path = %slot.path().display(), "next available file");
                    return Ok(slot);
                }
                Err(err) => {
                    return Err(Error::directory_unavailable(
                        &self.directory,
                        format!("cannot probe {}: {err}", slot.path().display()),
                    ));
                }
            }
        }

        Err(Error::directory_unavailable(
            &self.directory,
            format!("no free slot left for {code}"),
        ))
    }
}

/// Convenience wrapper for a one-off allocation.
pub fn next_slot(directory: &Path, code: &str) -> Result<CaptureSlot> {
    FileSlotAllocator::new(directory).next_slot(code)
}

fn check_directory(directory: &Path) -> Result<()> {
    let metadata = fs::metadata(directory)
        .map_err(|err| Error::directory_unavailable(directory, err.to_string()))?;
    if !metadata.is_dir() {
        return Err(Error::directory_unavailable(directory, "not a directory"));
    }
    // permission bits alone miss ownership; create a file to be sure
    tempfile::Builder::new()
        .prefix(".muwi-write-check")
        .tempfile_in(directory)
        .map_err(|_| Error::directory_unavailable(directory, "not writable"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const CODE: &str = "MUXX-01-000001";

    fn touch(path: &Path) {
        fs::write(path, b"jpeg").expect("failed to create file");
    }

    #[test]
    fn empty_directory_yields_first_slot() {
        let dir = tempdir().expect("failed to create temp dir");
        let slot = next_slot(dir.path(), CODE).expect("slot");
        assert_eq!(slot.path(), dir.path().join("MUXX-01-000001_01.jpg"));
        assert_eq!(slot.sequence(), 1);
    }

    #[test]
    fn existing_file_advances_sequence() {
        let dir = tempdir().expect("failed to create temp dir");
        let first = next_slot(dir.path(), CODE).expect("slot");
        touch(first.path());

        let second = next_slot(dir.path(), CODE).expect("slot");
        assert_eq!(second.path(), dir.path().join("MUXX-01-000001_02.jpg"));
    }

    #[test]
    fn deleted_middle_file_is_reused() {
        let dir = tempdir().expect("failed to create temp dir");
        for _ in 0..3 {
            let slot = next_slot(dir.path(), CODE).expect("slot");
            touch(slot.path());
        }
        fs::remove_file(dir.path().join("MUXX-01-000001_02.jpg")).expect("remove");

        let slot = next_slot(dir.path(), CODE).expect("slot");
        assert_eq!(slot.path(), dir.path().join("MUXX-01-000001_02.jpg"));
    }

    #[test]
    fn other_codes_do_not_interfere() {
        let dir = tempdir().expect("failed to create temp dir");
        touch(&dir.path().join("MUXX-01-000002_01.jpg"));

        let slot = next_slot(dir.path(), CODE).expect("slot");
        assert_eq!(slot.sequence(), 1);
    }

    #[test]
    fn directories_count_as_taken() {
        let dir = tempdir().expect("failed to create temp dir");
        fs::create_dir(dir.path().join("MUXX-01-000001_01.jpg")).expect("mkdir");

        let slot = next_slot(dir.path(), CODE).expect("slot");
        assert_eq!(slot.sequence(), 2);
    }

    #[test]
    fn sequence_grows_past_two_digits() {
        let dir = tempdir().expect("failed to create temp dir");
        for sequence in 1..=99 {
            touch(&dir.path().join(format!("A_{sequence:02}.jpg")));
        }

        let slot = next_slot(dir.path(), "A").expect("slot");
        assert_eq!(slot.path(), dir.path().join("A_100.jpg"));
    }

    #[test]
    fn reserved_paths_are_skipped() {
        let dir = tempdir().expect("failed to create temp dir");
        let allocator = FileSlotAllocator::new(dir.path());
        let reserved = dir.path().join("MUXX-01-000001_01.jpg");

        let slot = allocator
            .next_slot_excluding(CODE, |path| path == reserved)
            .expect("slot");
        assert_eq!(slot.sequence(), 2);
    }

    #[test]
    fn missing_directory_is_unavailable() {
        let dir = tempdir().expect("failed to create temp dir");
        let missing = dir.path().join("does-not-exist");

        let err = next_slot(&missing, CODE).expect_err("must fail");
        assert!(matches!(err, Error::DirectoryUnavailable { path, .. } if path == missing));
    }

    #[test]
    fn file_instead_of_directory_is_unavailable() {
        let dir = tempdir().expect("failed to create temp dir");
        let file = dir.path().join("photos");
        touch(&file);

        let err = next_slot(&file, CODE).expect_err("must fail");
        assert!(matches!(err, Error::DirectoryUnavailable { .. }));
    }

    #[test]
    fn write_check_leaves_no_file_behind() {
        let dir = tempdir().expect("failed to create temp dir");
        next_slot(dir.path(), CODE).expect("slot");

        assert_eq!(fs::read_dir(dir.path()).expect("read dir").count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn unwritable_directory_is_unavailable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().expect("failed to create temp dir");
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).expect("mkdir");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).expect("chmod");

        // root ignores the mode bits, nothing to check then
        let writable = fs::write(locked.join("canary"), b"").is_ok();
        let result = next_slot(&locked, CODE);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("chmod");
        if writable {
            return;
        }

        let err = result.expect_err("must fail");
        assert!(matches!(
            err,
            Error::DirectoryUnavailable { path, reason } if path == locked && reason == "not writable"
        ));
    }
}
