//! gridcal Core - Basic data structures for sensor-grid processing
//!
//! This crate provides the fundamental data structures used throughout
//! the gridcal library:
//!
//! - [`Grid`] - dense 2D numeric buffer, the core data structure
//! - [`GridElement`] - trait for the numeric types a grid can hold
//! - [`Histogram`] - 1D bin counts over quantized cell values
//! - [`ValueRange`] - the quantization shared by histogram construction
//!   and lookup-table application
//!
//! Everything else in the workspace (the data-parallel engine, statistics,
//! correction stages, filters, codecs) operates on these types.

pub mod error;
pub mod grid;
pub mod histogram;

pub use error::{Error, Result};
pub use grid::{Grid, GridElement};
pub use histogram::{Histogram, ValueRange};
