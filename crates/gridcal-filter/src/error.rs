//! Error types for gridcal-filter

use thiserror::Error;

/// Filter error type
#[derive(Error, Debug)]
pub enum FilterError {
    /// Kernel size must be odd so a unique center exists
    #[error("kernel size must be odd and nonzero: {0}")]
    EvenKernelSize(u32),

    /// Workspace buffers sized for a different bin count
    #[error("workspace sized for {actual} bins, histogram has {expected}")]
    WorkspaceSize { expected: usize, actual: usize },

    /// Invalid parameter combination
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Core data structure error
    #[error(transparent)]
    Core(#[from] gridcal_core::Error),
}

/// Result type alias for filter operations
pub type FilterResult<T> = std::result::Result<T, FilterError>;
