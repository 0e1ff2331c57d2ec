//! TIFF image format support
//!
//! Reads and writes single-page 16-bit grayscale TIFF. 8-bit grayscale
//! widens to u16 with values preserved.

use std::io::{Read, Seek, Write};

use gridcal_core::Grid;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::TiffEncoder;
use tiff::encoder::colortype::Gray16;

use crate::{IoError, IoResult};

/// Read a grayscale TIFF into a u16 grid.
///
/// # Errors
///
/// Returns `IoError::DecodeError` for malformed streams and
/// `IoError::UnsupportedFormat` for color or deeper-than-16-bit data.
pub fn read_tiff<R: Read + Seek>(reader: R) -> IoResult<Grid<u16>> {
    let mut decoder = Decoder::new(reader)
        .map_err(|e| IoError::DecodeError(format!("TIFF decoder error: {}", e)))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| IoError::DecodeError(format!("TIFF dimensions: {}", e)))?;

    let colortype = decoder
        .colortype()
        .map_err(|e| IoError::DecodeError(format!("TIFF colortype: {}", e)))?;
    match colortype {
        tiff::ColorType::Gray(8) | tiff::ColorType::Gray(16) => {}
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported TIFF color type: {:?} (need 8/16-bit grayscale)",
                other
            )));
        }
    }

    let image = decoder
        .read_image()
        .map_err(|e| IoError::DecodeError(format!("TIFF read error: {}", e)))?;

    let cells: Vec<u16> = match image {
        DecodingResult::U8(data) => data.into_iter().map(u16::from).collect(),
        DecodingResult::U16(data) => data,
        _ => {
            return Err(IoError::UnsupportedFormat(
                "unsupported TIFF sample format".to_string(),
            ));
        }
    };

    Ok(Grid::from_data(width, height, cells)?)
}

/// Write a u16 grid as a single-page 16-bit grayscale TIFF.
///
/// # Errors
///
/// Returns `IoError::EncodeError` if the stream cannot be written.
pub fn write_tiff<W: Write + Seek>(grid: &Grid<u16>, writer: W) -> IoResult<()> {
    let mut encoder = TiffEncoder::new(writer)
        .map_err(|e| IoError::EncodeError(format!("TIFF encoder error: {}", e)))?;
    encoder
        .write_image::<Gray16>(grid.width(), grid.height(), grid.as_slice())
        .map_err(|e| IoError::EncodeError(format!("TIFF write error: {}", e)))?;
    Ok(())
}
