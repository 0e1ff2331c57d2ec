//! gridcal - sensor-grid correction and analysis for Rust
//!
//! A data-parallel library for correcting and analyzing large dense 2D
//! numeric grids captured from imaging sensors:
//!
//! - Dark-current subtraction, per-pixel gain flattening and defective
//!   pixel interpolation ([`correct`])
//! - Mean, thresholded counting and histograms ([`stats`])
//! - Histogram equalization and sliding-window mean filtering
//!   ([`filter`])
//! - A map/reduce/scan/stencil engine the above are built from
//!   ([`engine`])
//! - A 16-bit grayscale codec at the boundary ([`io`])
//!
//! # Example
//!
//! ```
//! use gridcal::{Engine, EngineConfig, Grid};
//!
//! let engine = Engine::new(EngineConfig::default()).unwrap();
//! let mut frame = Grid::new_with_value(512, 512, 5000u16).unwrap();
//! let dark = Grid::new_with_value(512, 512, 500u16).unwrap();
//!
//! gridcal::correct::dark_correct(&engine, &mut frame, &dark, 300).unwrap();
//! assert_eq!(gridcal::stats::mean(&engine, &frame), 4800.0);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use gridcal_core::*;

// Engine types are part of every call signature
pub use gridcal_engine::{Engine, EngineConfig, EngineError, Neighborhood};

// Re-export domain crates as modules to avoid name conflicts
pub use gridcal_correct as correct;
pub use gridcal_engine as engine;
pub use gridcal_filter as filter;
pub use gridcal_io as io;
pub use gridcal_stats as stats;
