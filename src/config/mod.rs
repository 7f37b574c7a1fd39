// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use muwi_scan::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.artist = Some("Photo Lab".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded_config.artist, Some("Photo Lab".to_string()));
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

pub mod defaults;

use crate::domain::{BarcodeFormat, CatalogEntry};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use defaults::*;

const CONFIG_FILE: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub photo_dir: Option<PathBuf>,
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    #[serde(default = "default_barcode_formats")]
    pub barcode_formats: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            artist: None,
            code: None,
            photo_dir: None,
            cache_dir: None,
            barcode_formats: default_barcode_formats(),
        }
    }
}

impl Config {
    /// The catalog record a fresh session starts from.
    pub fn initial_entry(&self) -> CatalogEntry {
        CatalogEntry::new(
            self.code.clone().unwrap_or_else(|| DEFAULT_CODE.to_string()),
            self.artist
                .clone()
                .unwrap_or_else(|| DEFAULT_ARTIST.to_string()),
        )
    }

    /// Parsed barcode formats; unknown names are logged and skipped.
    /// Falls back to Code 128 when nothing usable is configured.
    pub fn barcode_formats(&self) -> Vec<BarcodeFormat> {
        let formats: Vec<BarcodeFormat> = self
            .barcode_formats
            .iter()
            .filter_map(|name| match name.parse() {
                Ok(format) => Some(format),
                Err(err) => {
                    tracing::warn!(%err, "ignoring barcode format");
                    None
                }
            })
            .collect();
        if formats.is_empty() {
            vec![BarcodeFormat::Code128]
        } else {
            formats
        }
    }
}

fn default_barcode_formats() -> Vec<String> {
    vec![BarcodeFormat::Code128.to_string()]
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_DIR_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid settings, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
