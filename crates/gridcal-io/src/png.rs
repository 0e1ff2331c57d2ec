//! PNG image format support
//!
//! Reads and writes 16-bit grayscale PNG. 8-bit grayscale sources widen
//! to u16 with values preserved (raw counts, not rescaled); color and
//! paletted images are out of scope for a sensor pipeline and rejected.

use std::io::{BufRead, Seek, Write};

use gridcal_core::Grid;
use png::{BitDepth, ColorType, Decoder, Encoder};

use crate::{IoError, IoResult};

/// Read a grayscale PNG into a u16 grid.
///
/// # Errors
///
/// Returns `IoError::DecodeError` for malformed streams and
/// `IoError::UnsupportedFormat` for color or paletted images.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Grid<u16>> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::Eight | BitDepth::Sixteen) => {}
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG format: {:?} {:?} (need 8/16-bit grayscale)",
                color_type, bit_depth
            )));
        }
    }

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;
    let data = &buf[..output_info.buffer_size()];

    let count = (width as usize) * (height as usize);
    let mut cells = Vec::with_capacity(count);
    match bit_depth {
        BitDepth::Sixteen => {
            if data.len() < count * 2 {
                return Err(IoError::DecodeError("truncated PNG data".to_string()));
            }
            // PNG 16-bit samples are big-endian
            for pair in data[..count * 2].chunks_exact(2) {
                cells.push(u16::from_be_bytes([pair[0], pair[1]]));
            }
        }
        BitDepth::Eight => {
            if data.len() < count {
                return Err(IoError::DecodeError("truncated PNG data".to_string()));
            }
            cells.extend(data[..count].iter().map(|&v| u16::from(v)));
        }
        _ => unreachable!(),
    }

    Ok(Grid::from_data(width, height, cells)?)
}

/// Write a u16 grid as 16-bit grayscale PNG.
///
/// # Errors
///
/// Returns `IoError::EncodeError` if the stream cannot be written.
pub fn write_png<W: Write>(grid: &Grid<u16>, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, grid.width(), grid.height());
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Sixteen);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let mut data = Vec::with_capacity(grid.element_count() * 2);
    for &value in grid.as_slice() {
        data.extend_from_slice(&value.to_be_bytes());
    }
    png_writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    Ok(())
}
