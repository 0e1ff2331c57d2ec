//! gridcal Filter - windowed filtering and dynamic-range enhancement
//!
//! - [`Kernel`] - square weighting kernels (box, Gaussian, custom)
//! - [`mean_filter`] - separable O(1)-per-cell sliding-window average
//! - [`histogram_equalize`] - cumulative-histogram LUT remapping

mod enhance;
mod error;
mod kernel;
mod mean_filter;

pub use enhance::{EqualizeWorkspace, histogram_equalize};
pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;
pub use mean_filter::mean_filter;
