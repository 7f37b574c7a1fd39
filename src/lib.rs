// SPDX-License-Identifier: MPL-2.0
//! `muwi_scan` is the capture core of a catalog-coded object photography
//! workflow.
//!
//! Photos are filed as `{catalog code}_{NN}.jpg` without ever overwriting an
//! earlier shot, tagged with the photographer in EXIF, and captured with the
//! rotation the device was held at. The current catalog code comes from a
//! barcode scanner or manual entry.

#![doc(html_root_url = "https://docs.rs/muwi_scan/0.9.2")]

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod paths;

#[cfg(test)]
mod test_utils;
