// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for the photo and cache directories.
//!
//! # Path Resolution Order
//!
//! Paths are resolved in the following priority order:
//! 1. **Explicit override** - parameter to `_with_override()` functions (config file, tests)
//! 2. **CLI arguments** (`--photo-dir`, `--cache-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`MUWI_PHOTO_DIR`, `MUWI_CACHE_DIR`)
//! 4. **Platform default** - via `dirs` crate
//!
//! Finished captures go to a publicly discoverable photo directory so other
//! applications and the media index can see them. Raw exposures are written to
//! the private cache directory first.

use crate::config::{APP_DIR_NAME, PHOTO_SUBDIR};
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Environment variable to override the photo directory.
pub const ENV_PHOTO_DIR: &str = "MUWI_PHOTO_DIR";

/// Environment variable to override the cache directory.
pub const ENV_CACHE_DIR: &str = "MUWI_CACHE_DIR";

/// Global CLI override for the photo directory (set once at startup).
static CLI_PHOTO_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Global CLI override for the cache directory (set once at startup).
static CLI_CACHE_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Initializes CLI overrides for the photo and cache directories.
///
/// Only the first call has an effect; later calls are logged and ignored.
pub fn init_cli_overrides(photo_dir: Option<String>, cache_dir: Option<String>) {
    set_overrides(&CLI_PHOTO_DIR, &CLI_CACHE_DIR, photo_dir, cache_dir);
}

/// Sets each cell independently so one stale value cannot block the other.
fn set_overrides(
    photo_cell: &OnceLock<Option<PathBuf>>,
    cache_cell: &OnceLock<Option<PathBuf>>,
    photo_dir: Option<String>,
    cache_dir: Option<String>,
) {
    let photo_set = photo_cell.set(photo_dir.map(PathBuf::from)).is_ok();
    let cache_set = cache_cell.set(cache_dir.map(PathBuf::from)).is_ok();
    if !photo_set {
        tracing::warn!("CLI photo directory override already initialized, ignoring");
    }
    if !cache_set {
        tracing::warn!("CLI cache directory override already initialized, ignoring");
    }
}

fn get_cli_photo_dir() -> Option<PathBuf> {
    CLI_PHOTO_DIR.get().and_then(Clone::clone)
}

fn get_cli_cache_dir() -> Option<PathBuf> {
    CLI_CACHE_DIR.get().and_then(Clone::clone)
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Returns the directory finished captures are written to.
///
/// # Resolution Order
///
/// 1. CLI argument `--photo-dir`
/// 2. `MUWI_PHOTO_DIR` environment variable (if set and non-empty)
/// 3. `<Pictures>/MuWiCamera`, or `~/DCIM/MuWiCamera` when the platform has
///    no pictures directory
///
/// Returns `None` if no home directory can be determined.
pub fn get_photo_dir() -> Option<PathBuf> {
    get_photo_dir_with_override(None)
}

/// Returns the photo directory with an optional override taking highest priority.
pub fn get_photo_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Some(path) = get_cli_photo_dir() {
        return Some(path);
    }

    if let Some(path) = env_path(ENV_PHOTO_DIR) {
        return Some(path);
    }

    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("DCIM")))
        .map(|mut path| {
            path.push(PHOTO_SUBDIR);
            path
        })
}

/// Returns the private directory raw exposures are staged in.
///
/// Falls back to the system temporary directory when the platform has no
/// cache directory, so this always resolves.
pub fn get_cache_dir() -> PathBuf {
    get_cache_dir_with_override(None)
}

/// Returns the cache directory with an optional override taking highest priority.
pub fn get_cache_dir_with_override(override_path: Option<PathBuf>) -> PathBuf {
    if let Some(path) = override_path {
        return path;
    }

    if let Some(path) = get_cli_cache_dir() {
        return path;
    }

    if let Some(path) = env_path(ENV_CACHE_DIR) {
        return path;
    }

    let mut path = dirs::cache_dir().unwrap_or_else(std::env::temp_dir);
    path.push(APP_DIR_NAME);
    path
}

/// Creates `dir` (and its parents) if it does not exist yet.
///
/// Safe to call repeatedly and concurrently: an existing directory, including
/// one created by a racing call, is success.
pub fn ensure_directory(dir: &Path) -> Result<()> {
    match fs::create_dir_all(dir) {
        Ok(()) => {
            tracing::debug!(dir = %dir.display(), "directory ready");
            Ok(())
        }
        Err(err) => {
            if dir.is_dir() {
                return Ok(());
            }
            Err(Error::directory_unavailable(dir, err.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::tempdir;

    // Mutex to prevent parallel tests from interfering with each other's env vars
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn cache_override_applies_when_photo_override_is_stale() {
        let photo_cell = OnceLock::new();
        let cache_cell = OnceLock::new();
        photo_cell.set(Some(PathBuf::from("/earlier"))).unwrap();

        set_overrides(
            &photo_cell,
            &cache_cell,
            Some("/photos".into()),
            Some("/cache".into()),
        );

        assert_eq!(photo_cell.get(), Some(&Some(PathBuf::from("/earlier"))));
        assert_eq!(cache_cell.get(), Some(&Some(PathBuf::from("/cache"))));
    }

    #[test]
    fn photo_dir_ends_with_subdir() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::remove_var(ENV_PHOTO_DIR);

        if let Some(path) = get_photo_dir() {
            assert!(path.ends_with(PHOTO_SUBDIR));
        }
        // If neither a pictures nor a home directory exists, the test passes silently
    }

    #[test]
    fn cache_dir_contains_app_name() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::remove_var(ENV_CACHE_DIR);

        let path = get_cache_dir();
        assert!(path.to_string_lossy().contains(APP_DIR_NAME));
    }

    #[test]
    fn override_path_takes_precedence_over_env_var() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_PHOTO_DIR, "/env/photos");

        let override_path = PathBuf::from("/override/photos");
        let result = get_photo_dir_with_override(Some(override_path.clone()));
        assert_eq!(result, Some(override_path));

        std::env::remove_var(ENV_PHOTO_DIR);
    }

    #[test]
    fn env_var_overrides_default_cache_dir() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_CACHE_DIR, "/test/cache/dir");

        assert_eq!(get_cache_dir(), PathBuf::from("/test/cache/dir"));

        std::env::remove_var(ENV_CACHE_DIR);
    }

    #[test]
    fn empty_env_var_uses_default() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_CACHE_DIR, "");

        assert!(get_cache_dir().to_string_lossy().contains(APP_DIR_NAME));

        std::env::remove_var(ENV_CACHE_DIR);
    }

    #[test]
    fn ensure_directory_is_idempotent() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let target = temp_dir.path().join("DCIM").join(PHOTO_SUBDIR);

        ensure_directory(&target).expect("first creation");
        ensure_directory(&target).expect("second creation");
        assert!(target.is_dir());
    }

    #[test]
    fn ensure_directory_rejects_a_file_in_the_way() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").expect("write blocker");

        let err = ensure_directory(&blocker.join("photos")).expect_err("must fail");
        assert!(matches!(err, Error::DirectoryUnavailable { .. }));
    }
}
