//! Error types for gridcal-io
//!
//! Codec failures are a distinct outcome from the library's contract
//! errors: a missing file or a malformed stream is an I/O condition the
//! caller handles, never a programming error in the pipeline.

use thiserror::Error;

/// I/O error type
#[derive(Error, Debug)]
pub enum IoError {
    /// Underlying I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Format not recognized, or recognized but not enabled/supported
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Malformed or truncated image stream
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Failure while writing an image stream
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Grid construction failed for decoded data
    #[error(transparent)]
    Core(#[from] gridcal_core::Error),
}

/// Result type alias for I/O operations
pub type IoResult<T> = std::result::Result<T, IoError>;
