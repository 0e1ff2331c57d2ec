//! gridcal Stats - summary statistics over grids
//!
//! Mean, predicate counting and histogram construction, all built on the
//! engine's reduce/for_each primitives. These run before the correction
//! stages to derive their parameters (reference means, thresholds) and
//! after them to verify results.

mod error;

pub use error::{StatsError, StatsResult};

use std::sync::atomic::{AtomicU64, Ordering};

use gridcal_core::{Grid, GridElement, Histogram, ValueRange};
use gridcal_engine::Engine;

/// Arithmetic mean of all cells.
///
/// Accumulates in `f64` regardless of the element type: summing millions
/// of small integers in their own width would truncate or wrap long
/// before the division.
///
/// # Examples
///
/// ```
/// use gridcal_core::Grid;
/// use gridcal_engine::Engine;
///
/// let engine = Engine::sequential();
/// let grid = Grid::new_with_value(100, 100, 5000u16).unwrap();
/// assert_eq!(gridcal_stats::mean(&engine, &grid), 5000.0);
/// ```
pub fn mean<T: GridElement>(engine: &Engine, grid: &Grid<T>) -> f64 {
    let sum = engine.reduce(grid, 0.0f64, |v| v.to_f64(), |a, b| a + b);
    sum / grid.element_count() as f64
}

/// Number of cells satisfying a predicate.
///
/// For any grid, `count_where(engine, &grid, |_| true)` equals the
/// grid's element count.
pub fn count_where<T, P>(engine: &Engine, grid: &Grid<T>, predicate: P) -> usize
where
    T: GridElement,
    P: Fn(T) -> bool + Sync + Send,
{
    engine.reduce(
        grid,
        0usize,
        |v| usize::from(predicate(v)),
        |a, b| a + b,
    )
}

/// Histogram of cell values quantized by `range` into `num_bins` bins.
///
/// Every cell lands in exactly one bin (values outside the range clamp
/// to the edge bins), so the bin counts always sum to the element count.
/// Bins are the one piece of shared mutable state in the pipeline:
/// concurrent increments from cells hashing to the same bin go through
/// an atomic add, never a plain read-modify-write.
///
/// # Errors
///
/// Returns `StatsError::Core` if `num_bins` is 0. A degenerate range is
/// unrepresentable: `ValueRange` construction already rejects
/// `max <= min`.
pub fn histogram<T: GridElement>(
    engine: &Engine,
    grid: &Grid<T>,
    range: &ValueRange,
    num_bins: usize,
) -> StatsResult<Histogram> {
    if num_bins == 0 {
        return Err(gridcal_core::Error::InvalidParameter(
            "histogram must have at least one bin".into(),
        )
        .into());
    }

    let bins: Vec<AtomicU64> = (0..num_bins).map(|_| AtomicU64::new(0)).collect();
    engine.for_each(grid, |v| {
        let bin = range.bin_index(v.to_f64(), num_bins);
        bins[bin].fetch_add(1, Ordering::Relaxed);
    });

    let counts = bins.into_iter().map(AtomicU64::into_inner).collect();
    Ok(Histogram::from_counts(counts)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_uniform() {
        let engine = Engine::sequential();
        let grid = Grid::new_with_value(16, 16, 42u16).unwrap();
        assert_eq!(mean(&engine, &grid), 42.0);
    }

    #[test]
    fn test_mean_accumulates_in_double() {
        let engine = Engine::sequential();
        // 4096 cells of u16::MAX sum far past u16 (and u32) range
        let grid = Grid::new_with_value(64, 64, u16::MAX).unwrap();
        assert_eq!(mean(&engine, &grid), u16::MAX as f64);
    }

    #[test]
    fn test_count_where_always_true_is_element_count() {
        let engine = Engine::sequential();
        let grid: Grid<u16> = Grid::new(37, 11).unwrap();
        assert_eq!(count_where(&engine, &grid, |_| true), grid.element_count());
        assert_eq!(count_where(&engine, &grid, |_| false), 0);
    }

    #[test]
    fn test_count_where_threshold() {
        let engine = Engine::sequential();
        let grid = Grid::from_data(4, 1, vec![1u16, 5, 9, 13]).unwrap();
        assert_eq!(count_where(&engine, &grid, |v| v > 5), 2);
    }

    #[test]
    fn test_histogram_counts_every_cell() {
        let engine = Engine::sequential();
        let grid = Grid::from_data(4, 2, vec![0u16, 1, 2, 3, 200, 201, 202, 203]).unwrap();
        let range = ValueRange::new(0.0, 100.0).unwrap();
        let hist = histogram(&engine, &grid, &range, 10).unwrap();

        assert_eq!(hist.total(), grid.element_count() as u64);
        // Values past the range clamp into the last bin
        assert_eq!(hist.count(9), Some(4));
        assert_eq!(hist.count(0), Some(4));
    }

    #[test]
    fn test_histogram_rejects_zero_bins() {
        let engine = Engine::sequential();
        let grid: Grid<u16> = Grid::new(2, 2).unwrap();
        let range = ValueRange::new(0.0, 10.0).unwrap();
        assert!(histogram(&engine, &grid, &range, 0).is_err());
    }

    #[test]
    fn test_histogram_full_range_identity_bins() {
        let engine = Engine::sequential();
        let grid = Grid::from_data(3, 1, vec![0u8, 128, 255]).unwrap();
        let range = ValueRange::full::<u8>();
        let hist = histogram(&engine, &grid, &range, 256).unwrap();
        assert_eq!(hist.count(0), Some(1));
        assert_eq!(hist.count(128), Some(1));
        assert_eq!(hist.count(255), Some(1));
    }
}
