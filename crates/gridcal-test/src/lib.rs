//! gridcal-test - Regression test harness for gridcal
//!
//! Provides [`RegParams`], a small regression framework: tests run a
//! series of numbered value comparisons and finish with a pass/fail
//! summary. Two modes, selected by the `REGTEST_MODE` environment
//! variable:
//!
//! - **Compare** (default): mismatches fail the test
//! - **Display**: mismatches are reported but do not fail, for
//!   inspecting values while bringing a test up
//!
//! Also provides deterministic synthetic frames, so the regression
//! tests need no image files on disk.
//!
//! # Usage
//!
//! ```
//! use gridcal_test::{RegParams, noise_grid};
//!
//! let mut rp = RegParams::new("example");
//! let frame = noise_grid(64, 64, 1234, 0, 4096);
//! rp.compare_values(4096.0, frame.element_count() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod params;

pub use params::{RegParams, RegTestMode};

use gridcal_core::Grid;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Build a uniform-noise u16 frame with values in `[min, max)`.
///
/// The generator is seeded, so the same arguments always produce the
/// same frame; regression comparisons stay reproducible across runs and
/// machines.
pub fn noise_grid(width: u32, height: u32, seed: u64, min: u16, max: u16) -> Grid<u16> {
    let mut rng = StdRng::seed_from_u64(seed);
    let count = (width as usize) * (height as usize);
    let data: Vec<u16> = (0..count).map(|_| rng.random_range(min..max)).collect();
    Grid::from_data(width, height, data).expect("valid noise grid dimensions")
}

/// Build a u16 frame with a horizontal linear ramp from `low` to `high`.
///
/// Useful for exercising value-dependent paths (quantization,
/// equalization) with a known distribution.
pub fn ramp_grid(width: u32, height: u32, low: u16, high: u16) -> Grid<u16> {
    let count = (width as usize) * (height as usize);
    let span = f64::from(high) - f64::from(low);
    let data: Vec<u16> = (0..count)
        .map(|i| {
            let x = (i % width as usize) as f64;
            let t = if width > 1 { x / f64::from(width - 1) } else { 0.0 };
            (f64::from(low) + t * span).round() as u16
        })
        .collect();
    Grid::from_data(width, height, data).expect("valid ramp grid dimensions")
}
