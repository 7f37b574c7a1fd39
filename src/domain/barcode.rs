// SPDX-License-Identifier: MPL-2.0
//! Barcode values reported by the frame analyzer.

use std::fmt;
use std::str::FromStr;

/// Symbologies the decoder can be asked for.
///
/// Museum labels are printed as Code 128; the others are accepted so that a
/// configuration can widen the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarcodeFormat {
    Code128,
    Code39,
    Ean13,
    Ean8,
    QrCode,
    DataMatrix,
}

impl BarcodeFormat {
    /// Stable lowercase name used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            BarcodeFormat::Code128 => "code_128",
            BarcodeFormat::Code39 => "code_39",
            BarcodeFormat::Ean13 => "ean_13",
            BarcodeFormat::Ean8 => "ean_8",
            BarcodeFormat::QrCode => "qr_code",
            BarcodeFormat::DataMatrix => "data_matrix",
        }
    }
}

impl fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown format name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBarcodeFormat(pub String);

impl fmt::Display for UnknownBarcodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown barcode format: {}", self.0)
    }
}

impl std::error::Error for UnknownBarcodeFormat {}

impl FromStr for BarcodeFormat {
    type Err = UnknownBarcodeFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "code_128" | "code128" => Ok(BarcodeFormat::Code128),
            "code_39" | "code39" => Ok(BarcodeFormat::Code39),
            "ean_13" | "ean13" => Ok(BarcodeFormat::Ean13),
            "ean_8" | "ean8" => Ok(BarcodeFormat::Ean8),
            "qr_code" | "qr" => Ok(BarcodeFormat::QrCode),
            "data_matrix" | "datamatrix" => Ok(BarcodeFormat::DataMatrix),
            _ => Err(UnknownBarcodeFormat(s.to_string())),
        }
    }
}

/// One decoded barcode from a single analyzed frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeDetection {
    pub raw_value: String,
    pub format: BarcodeFormat,
}

impl BarcodeDetection {
    pub fn new(raw_value: impl Into<String>, format: BarcodeFormat) -> Self {
        Self {
            raw_value: raw_value.into(),
            format,
        }
    }

    /// A Code 128 detection, the format museum labels use.
    pub fn code128(raw_value: impl Into<String>) -> Self {
        Self::new(raw_value, BarcodeFormat::Code128)
    }
}
