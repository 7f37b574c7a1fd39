// SPDX-License-Identifier: MPL-2.0
//! EXIF artist tagging via `little_exif`, with a `kamadak-exif` reader for
//! checking the result.

use crate::application::port::{MetadataError, MetadataWriter};
use crate::error::{Error, Result};
use little_exif::exif_tag::ExifTag;
use little_exif::metadata::Metadata;
use std::fs::File;
use std::io::BufReader;
use std::panic;
use std::path::Path;

/// [`MetadataWriter`] that rewrites the EXIF block of JPEG files in place.
///
/// Existing tags are loaded and written back unchanged; only `Artist` is
/// replaced. Files without an EXIF block get a fresh one.
#[derive(Debug, Clone, Copy, Default)]
pub struct LittleExifWriter;

impl LittleExifWriter {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataWriter for LittleExifWriter {
    fn write_artist(&self, path: &Path, artist: &str) -> std::result::Result<(), MetadataError> {
        if !is_jpeg(path) {
            return Err(MetadataError::UnsupportedFormat);
        }
        if !path.is_file() {
            return Err(MetadataError::IoError(format!(
                "no such file: {}",
                path.display()
            )));
        }

        // little_exif can panic on malformed input
        let read_result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
            Metadata::new_from_path(path)
        }));
        let mut metadata = match read_result {
            Ok(Ok(existing)) => existing,
            Ok(Err(err)) => {
                tracing::debug!(error = ?err, path = %path.display(), "no EXIF block, creating one");
                Metadata::new()
            }
            Err(_) => {
                return Err(MetadataError::ReadFailed(format!(
                    "unreadable EXIF block in {}",
                    path.display()
                )))
            }
        };

        metadata.set_tag(ExifTag::Artist(artist.to_string()));

        let write_result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
            metadata.write_to_file(path)
        }));
        match write_result {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(MetadataError::WriteFailed(format!("{err:?}"))),
            Err(_) => Err(MetadataError::WriteFailed(
                "EXIF encoder aborted".to_string(),
            )),
        }
    }
}

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
}

/// Reads the EXIF artist of an image, if it has one.
///
/// # Errors
///
/// [`Error::Io`] if the file cannot be opened. A file without EXIF data is
/// not an error and yields `Ok(None)`.
pub fn read_artist(path: &Path) -> Result<Option<String>> {
    let file = File::open(path).map_err(|e| Error::Io(e.to_string()))?;
    let mut reader = BufReader::new(file);

    let Ok(exif) = exif::Reader::new().read_from_container(&mut reader) else {
        return Ok(None);
    };

    Ok(exif
        .get_field(exif::Tag::Artist, exif::In::PRIMARY)
        .map(|field| {
            field
                .display_value()
                .to_string()
                .trim_matches('"')
                .to_string()
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_plain_jpeg(path: &Path) {
        let img = image_rs::RgbImage::from_pixel(8, 8, image_rs::Rgb([120, 90, 60]));
        img.save(path).expect("failed to write jpeg");
    }

    #[test]
    fn artist_is_written_to_jpeg_without_exif() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("shot.jpg");
        write_plain_jpeg(&path);
        assert_eq!(read_artist(&path).unwrap(), None);

        LittleExifWriter::new()
            .write_artist(&path, "Museum Wiesbaden")
            .expect("write artist");

        assert_eq!(
            read_artist(&path).unwrap().as_deref(),
            Some("Museum Wiesbaden")
        );
        image_rs::open(&path).expect("image still decodes");
    }

    #[test]
    fn artist_is_replaced_not_appended() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("shot.jpg");
        write_plain_jpeg(&path);
        let writer = LittleExifWriter::new();

        writer.write_artist(&path, "First").unwrap();
        writer.write_artist(&path, "Second").unwrap();

        assert_eq!(read_artist(&path).unwrap().as_deref(), Some("Second"));
    }

    #[test]
    fn other_tags_survive() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("shot.jpg");
        write_plain_jpeg(&path);

        let mut seeded = Metadata::new();
        seeded.set_tag(ExifTag::Model("Pixel 3a".to_string()));
        seeded.write_to_file(&path).expect("seed EXIF");

        LittleExifWriter::new().write_artist(&path, "Jane").unwrap();

        let file = File::open(&path).unwrap();
        let exif = exif::Reader::new()
            .read_from_container(&mut BufReader::new(file))
            .unwrap();
        let model = exif
            .get_field(exif::Tag::Model, exif::In::PRIMARY)
            .expect("model kept");
        assert_eq!(model.display_value().to_string().trim_matches('"'), "Pixel 3a");
    }

    #[test]
    fn non_jpeg_is_unsupported() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let err = LittleExifWriter::new()
            .write_artist(&path, "Jane")
            .unwrap_err();
        assert_eq!(err, MetadataError::UnsupportedFormat);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().expect("failed to create temp dir");
        let err = LittleExifWriter::new()
            .write_artist(&dir.path().join("gone.jpg"), "Jane")
            .unwrap_err();
        assert!(matches!(err, MetadataError::IoError(_)));
    }

    #[test]
    fn read_artist_of_missing_file_fails() {
        let dir = tempdir().expect("failed to create temp dir");
        assert!(read_artist(&dir.path().join("gone.jpg")).is_err());
    }
}
