//! Image format detection
//!
//! Detects formats by magic numbers in the stream header, with a
//! fallback mapping from file extensions for encoding.

use std::path::Path;

use crate::{IoError, IoResult};

/// Supported container formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Portable Network Graphics, 16-bit grayscale
    Png,
    /// Tagged Image File Format, 16-bit grayscale
    Tiff,
    /// Binary portable graymap (P5)
    Pgm,
}

/// Magic numbers for format detection
mod magic {
    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// TIFF little-endian: II 2A 00
    pub const TIFF_LE: &[u8] = &[0x49, 0x49, 0x2A, 0x00];

    /// TIFF big-endian: MM 00 2A
    pub const TIFF_BE: &[u8] = &[0x4D, 0x4D, 0x00, 0x2A];

    /// PGM binary: P5
    pub const PGM_BINARY: &[u8] = b"P5";
}

/// Detect the image format from leading bytes.
///
/// # Errors
///
/// Returns `IoError::UnsupportedFormat` if the header matches no known
/// magic, or there are not enough bytes to tell.
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() >= 8 && data.starts_with(magic::PNG) {
        return Ok(ImageFormat::Png);
    }
    if data.len() >= 4 && (data.starts_with(magic::TIFF_LE) || data.starts_with(magic::TIFF_BE)) {
        return Ok(ImageFormat::Tiff);
    }
    if data.len() >= 2 && data.starts_with(magic::PGM_BINARY) {
        return Ok(ImageFormat::Pgm);
    }
    Err(IoError::UnsupportedFormat(
        "unrecognized image header".to_string(),
    ))
}

/// Choose a format from a file extension (used when encoding).
pub fn format_from_extension<P: AsRef<Path>>(path: P) -> Option<ImageFormat> {
    let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some(ImageFormat::Png),
        "tif" | "tiff" => Some(ImageFormat::Tiff),
        "pgm" => Some(ImageFormat::Pgm),
        _ => None,
    }
}
