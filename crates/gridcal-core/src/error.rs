//! Error types for gridcal-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.
//!
//! All of these variants represent precondition failures at API
//! boundaries: callers are expected to validate inputs before building a
//! pipeline rather than to recover from them at runtime.

use thiserror::Error;

/// gridcal error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid grid dimensions
    #[error("invalid grid dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Grid dimension mismatch between two grids in a binary operation
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Buffer length does not match the declared dimensions
    #[error("data size mismatch: expected {expected} elements, got {actual}")]
    DataSizeMismatch { expected: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: ({x}, {y}) outside {width}x{height}")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Quantization range with `max <= min`
    #[error("empty value range: min {min} must be less than max {max}")]
    EmptyRange { min: f64, max: f64 },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for gridcal operations
pub type Result<T> = std::result::Result<T, Error>;
