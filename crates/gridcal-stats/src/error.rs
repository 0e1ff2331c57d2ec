//! Error types for gridcal-stats

use thiserror::Error;

/// Statistics error type
#[derive(Error, Debug)]
pub enum StatsError {
    /// Core data structure error
    #[error(transparent)]
    Core(#[from] gridcal_core::Error),
}

/// Result type alias for statistics operations
pub type StatsResult<T> = std::result::Result<T, StatsError>;
