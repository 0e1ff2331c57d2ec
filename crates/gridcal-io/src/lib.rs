//! gridcal IO - grid codec
//!
//! Turns a file path into a raw `Grid<u16>` and back. The correction
//! pipeline itself is a pure in-memory transform library; this crate is
//! the boundary where sensor frames enter and leave it.
//!
//! Formats: 16-bit grayscale PNG, TIFF and binary PGM, each behind a
//! cargo feature (`png-format` and `pgm` are on by default). Decoding
//! sniffs the format from magic bytes; encoding picks it from the file
//! extension. Codec failures are [`IoError`], a distinct outcome from
//! the pipeline's contract errors, so callers can retry or skip a file
//! without conflating the two.
//!
//! ```no_run
//! use gridcal_io::{decode, encode};
//!
//! let frame = decode("frame_0001.png").unwrap();
//! // ... correct the frame ...
//! encode(&frame, "frame_0001_corrected.png").unwrap();
//! ```

mod error;
mod format;
#[cfg(feature = "pgm")]
mod pgm;
#[cfg(feature = "png-format")]
mod png;
#[cfg(feature = "tiff-format")]
mod tiff;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format_from_bytes, format_from_extension};
#[cfg(feature = "pgm")]
pub use pgm::{read_pgm, write_pgm};
#[cfg(feature = "png-format")]
pub use png::{read_png, write_png};
#[cfg(feature = "tiff-format")]
pub use tiff::{read_tiff, write_tiff};

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom};
use std::path::Path;

use gridcal_core::Grid;

/// Decode an image file into a u16 grid, detecting the format from its
/// magic bytes.
///
/// # Errors
///
/// Returns `IoError::Io` if the file cannot be opened,
/// `IoError::UnsupportedFormat` if the header is not a known (and
/// enabled) format, or a decode error for malformed content.
pub fn decode<P: AsRef<Path>>(path: P) -> IoResult<Grid<u16>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let mut header = [0u8; 8];
    let bytes_read = reader.read(&mut header)?;
    reader.seek(SeekFrom::Start(0))?;
    let format = detect_format_from_bytes(&header[..bytes_read])?;

    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => read_png(reader),
        #[cfg(feature = "tiff-format")]
        ImageFormat::Tiff => read_tiff(reader),
        #[cfg(feature = "pgm")]
        ImageFormat::Pgm => read_pgm(reader),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}

/// Encode a u16 grid to a file, picking the format from the extension.
///
/// # Errors
///
/// Returns `IoError::UnsupportedFormat` for unknown extensions and
/// `IoError::Io`/`IoError::EncodeError` for write failures.
pub fn encode<P: AsRef<Path>>(grid: &Grid<u16>, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let format = format_from_extension(path).ok_or_else(|| {
        IoError::UnsupportedFormat(format!("no codec for path {}", path.display()))
    })?;

    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => write_png(grid, writer),
        #[cfg(feature = "tiff-format")]
        ImageFormat::Tiff => write_tiff(grid, writer),
        #[cfg(feature = "pgm")]
        ImageFormat::Pgm => write_pgm(grid, writer),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}
