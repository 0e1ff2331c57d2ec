//! PGM (binary portable graymap) format support
//!
//! Reads and writes P5 streams. PGM is the simplest container raw
//! sensor dumps come in: an ASCII header (magic, dimensions, maxval)
//! followed by big-endian samples, one or two bytes per cell depending
//! on maxval.

use std::io::{BufRead, Write};

use gridcal_core::Grid;

use crate::{IoError, IoResult};

/// Read a binary PGM (P5) into a u16 grid.
///
/// Sources with `maxval < 256` are stored one byte per cell and widen to
/// u16 with values preserved.
///
/// # Errors
///
/// Returns `IoError::DecodeError` for bad magic, malformed headers or
/// truncated sample data.
pub fn read_pgm<R: BufRead>(mut reader: R) -> IoResult<Grid<u16>> {
    let mut magic = [0u8; 2];
    reader
        .read_exact(&mut magic)
        .map_err(|e| IoError::DecodeError(format!("PGM magic: {}", e)))?;
    if &magic != b"P5" {
        return Err(IoError::DecodeError("not a binary PGM (P5) stream".into()));
    }

    let width = read_header_value(&mut reader)?;
    let height = read_header_value(&mut reader)?;
    let maxval = read_header_value(&mut reader)?;
    if width == 0 || height == 0 || width > u64::from(u32::MAX) || height > u64::from(u32::MAX) {
        return Err(IoError::DecodeError(format!(
            "bad PGM dimensions: {}x{}",
            width, height
        )));
    }
    if maxval == 0 || maxval > 65_535 {
        return Err(IoError::DecodeError(format!("bad PGM maxval: {}", maxval)));
    }

    let count = (width as usize) * (height as usize);
    let mut cells = Vec::with_capacity(count);
    if maxval < 256 {
        let mut data = vec![0u8; count];
        reader
            .read_exact(&mut data)
            .map_err(|e| IoError::DecodeError(format!("truncated PGM data: {}", e)))?;
        cells.extend(data.into_iter().map(u16::from));
    } else {
        let mut data = vec![0u8; count * 2];
        reader
            .read_exact(&mut data)
            .map_err(|e| IoError::DecodeError(format!("truncated PGM data: {}", e)))?;
        for pair in data.chunks_exact(2) {
            cells.push(u16::from_be_bytes([pair[0], pair[1]]));
        }
    }

    Ok(Grid::from_data(width as u32, height as u32, cells)?)
}

/// Write a u16 grid as binary PGM (P5) with maxval 65535.
///
/// # Errors
///
/// Returns `IoError::Io` if the stream cannot be written.
pub fn write_pgm<W: Write>(grid: &Grid<u16>, mut writer: W) -> IoResult<()> {
    write!(writer, "P5\n{} {}\n65535\n", grid.width(), grid.height())?;
    let mut data = Vec::with_capacity(grid.element_count() * 2);
    for &value in grid.as_slice() {
        data.extend_from_slice(&value.to_be_bytes());
    }
    writer.write_all(&data)?;
    Ok(())
}

/// Read one whitespace-delimited ASCII integer, skipping `#` comments.
fn read_header_value<R: BufRead>(reader: &mut R) -> IoResult<u64> {
    let mut value: Option<u64> = None;
    loop {
        let mut byte = [0u8; 1];
        reader
            .read_exact(&mut byte)
            .map_err(|e| IoError::DecodeError(format!("PGM header: {}", e)))?;
        match byte[0] {
            b'#' => {
                // Comment runs to end of line
                let mut rest = Vec::new();
                reader
                    .read_until(b'\n', &mut rest)
                    .map_err(|e| IoError::DecodeError(format!("PGM header: {}", e)))?;
            }
            c if c.is_ascii_whitespace() => {
                if value.is_some() {
                    // A single whitespace byte terminates the field
                    break;
                }
            }
            c if c.is_ascii_digit() => {
                let digit = u64::from(c - b'0');
                let current = value.unwrap_or(0);
                value = Some(
                    current
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(digit))
                        .ok_or_else(|| {
                            IoError::DecodeError("PGM header value overflow".into())
                        })?,
                );
            }
            c => {
                return Err(IoError::DecodeError(format!(
                    "unexpected byte {:#04x} in PGM header",
                    c
                )));
            }
        }
    }
    value.ok_or_else(|| IoError::DecodeError("missing PGM header field".into()))
}
