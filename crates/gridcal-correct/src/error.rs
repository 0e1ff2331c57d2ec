//! Error types for gridcal-correct

use thiserror::Error;

/// Correction pipeline error type
#[derive(Error, Debug)]
pub enum CorrectError {
    /// Core data structure error (dimension mismatch, bad parameter)
    #[error(transparent)]
    Core(#[from] gridcal_core::Error),
}

/// Result type alias for correction operations
pub type CorrectResult<T> = std::result::Result<T, CorrectError>;
