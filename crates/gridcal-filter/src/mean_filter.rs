//! Separable sliding-window mean filter
//!
//! Box-filter averaging over a `(2*half+1)^2` window without recomputing
//! a full window sum per cell. Each 1D pass keeps a running sum that
//! adds the column entering the window and subtracts the one leaving,
//! so the cost per cell is O(1) once the first window is primed. Windows
//! clip at the grid edges: fewer terms, and the divisor is the true
//! clipped count, so a constant grid stays constant all the way into the
//! corners.
//!
//! The 2D filter is separable: a horizontal pass, then the same pass
//! over the transposed intermediate. Both passes accumulate in `f64`;
//! the result narrows back to the source element type at the end.

use gridcal_core::{Grid, GridElement};
use gridcal_engine::Engine;

use crate::FilterResult;

/// Box-average `src` over a `(2*half_window+1)^2` neighborhood.
///
/// Defects are not treated specially here; suppress them with
/// defect correction before filtering if needed. `half_window == 0`
/// returns an unfiltered copy.
///
/// # Examples
///
/// ```
/// use gridcal_core::Grid;
/// use gridcal_engine::Engine;
/// use gridcal_filter::mean_filter;
///
/// let engine = Engine::sequential();
/// let grid = Grid::new_with_value(32, 32, 7u16).unwrap();
/// let smoothed = mean_filter(&engine, &grid, 1).unwrap();
/// // Averaging a constant grid changes nothing, boundaries included
/// assert_eq!(smoothed, grid);
/// ```
pub fn mean_filter<T: GridElement>(
    engine: &Engine,
    src: &Grid<T>,
    half_window: u32,
) -> FilterResult<Grid<T>> {
    if half_window == 0 {
        return Ok(src.clone());
    }
    let half = half_window as usize;

    // Horizontal pass, then the same pass along columns via transpose.
    // Row-major rows keep both passes cache-friendly.
    let horizontal: Grid<f64> = engine.map_rows(src, |_, srow, orow| {
        sliding_row_mean(srow, orow, half);
    });
    let transposed = transpose(engine, &horizontal)?;
    let vertical: Grid<f64> = engine.map_rows(&transposed, |_, srow, orow| {
        sliding_row_mean(srow, orow, half);
    });
    let restored = transpose(engine, &vertical)?;

    Ok(engine.map(&restored, T::from_f64))
}

/// 1D clipped sliding mean of one row.
///
/// The window around `x` is `[x-half, x+half]` intersected with the row;
/// `count` tracks the live window width so the divisor is always exact.
fn sliding_row_mean<T: GridElement>(row: &[T], out: &mut [f64], half: usize) {
    let width = row.len();

    // Prime the window for x = 0: columns [0, half] clipped to the row.
    let hi = half.min(width - 1);
    let mut sum: f64 = row[..=hi].iter().map(|v| v.to_f64()).sum();
    let mut count = hi + 1;
    out[0] = sum / count as f64;

    for x in 1..width {
        let entering = x + half;
        if entering < width {
            sum += row[entering].to_f64();
            count += 1;
        }
        if x > half {
            sum -= row[x - half - 1].to_f64();
            count -= 1;
        }
        out[x] = sum / count as f64;
    }
}

fn transpose(engine: &Engine, src: &Grid<f64>) -> FilterResult<Grid<f64>> {
    let mut out: Grid<f64> = Grid::new(src.height(), src.width())?;
    engine.fill(&mut out, |x, y| src.get_unchecked(y, x));
    Ok(out)
}
