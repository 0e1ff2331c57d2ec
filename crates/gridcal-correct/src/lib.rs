//! gridcal Correct - sensor correction pipeline stages
//!
//! The fixed-order correction stages for raw sensor frames:
//!
//! 1. [`dark_correct`] - subtract the dark-current map
//! 2. [`normalize`] + [`gain_correct`] - flatten per-pixel sensitivity
//! 3. [`defect_correct`] - interpolate over known-bad pixels
//!
//! Stages compose only through the grids passed between them; each call
//! completes fully before the next stage runs, and a reference grid
//! (dark map, gain map, defect map) is never mutated.

mod error;

pub use error::{CorrectError, CorrectResult};

use gridcal_core::{Grid, GridElement};
use gridcal_engine::Engine;
use gridcal_filter::Kernel;
use num_traits::{WrappingAdd, WrappingSub};

fn ensure_same_dims<T: GridElement, U: GridElement>(
    a: &Grid<T>,
    b: &Grid<U>,
) -> CorrectResult<()> {
    if !a.dimensions_match(b) {
        return Err(gridcal_core::Error::DimensionMismatch {
            expected: (a.width(), a.height()),
            actual: (b.width(), b.height()),
        }
        .into());
    }
    Ok(())
}

/// Subtract fixed-pattern dark current: `input = input - dark_map + offset`.
///
/// The offset biases the result so that shot noise around the dark level
/// does not clip at zero. There is no clamping: arithmetic wraps like
/// the sensor's own unsigned pipeline, which is why the element type
/// must support wrapping ops (integer frames; dark maps are not
/// meaningful for float grids).
///
/// # Errors
///
/// Returns a dimension mismatch error if `dark_map` differs in shape.
///
/// # Examples
///
/// ```
/// use gridcal_core::Grid;
/// use gridcal_engine::Engine;
///
/// let engine = Engine::sequential();
/// let mut frame = Grid::new_with_value(4, 4, 5000u16).unwrap();
/// let dark = Grid::new_with_value(4, 4, 500u16).unwrap();
/// gridcal_correct::dark_correct(&engine, &mut frame, &dark, 300).unwrap();
/// assert_eq!(frame.get(0, 0).unwrap(), 4800);
/// ```
pub fn dark_correct<T>(
    engine: &Engine,
    input: &mut Grid<T>,
    dark_map: &Grid<T>,
    offset: T,
) -> CorrectResult<()>
where
    T: GridElement + WrappingAdd + WrappingSub,
{
    ensure_same_dims(input, dark_map)?;
    engine.zip_in_place(input, dark_map, |v, d| {
        v.wrapping_sub(&d).wrapping_add(&offset)
    });
    Ok(())
}

/// Build the per-pixel gain multiplier from a gain reference frame.
///
/// `normalized(x, y) = mean(gain) / gain(x, y)`: multiplying a frame by
/// it drives every pixel toward the reference mean. Zero-valued
/// reference pixels get multiplier 1, treated as already calibrated
/// rather than propagating infinities.
pub fn normalize<T: GridElement>(engine: &Engine, gain: &Grid<T>) -> Grid<f64> {
    let reference_mean = gridcal_stats::mean(engine, gain);
    engine.map(gain, move |v| {
        let value = v.to_f64();
        if value == 0.0 { 1.0 } else { reference_mean / value }
    })
}

/// Apply a normalized gain map: `input = clamp(input * gain, min, max)`.
///
/// # Errors
///
/// Returns a dimension mismatch error if the shapes differ, or
/// `InvalidParameter` if `min > max`.
pub fn gain_correct<T: GridElement>(
    engine: &Engine,
    input: &mut Grid<T>,
    normalized_gain: &Grid<f64>,
    min: f64,
    max: f64,
) -> CorrectResult<()> {
    ensure_same_dims(input, normalized_gain)?;
    if min > max {
        return Err(gridcal_core::Error::InvalidParameter(format!(
            "clamp range inverted: min {min} > max {max}"
        ))
        .into());
    }
    engine.zip_in_place(input, normalized_gain, |v, g| {
        T::from_f64((v.to_f64() * g).clamp(min, max))
    });
    Ok(())
}

/// Interpolate over known-defective pixels.
///
/// Cells marked nonzero in `defect_map` are replaced by the
/// kernel-weighted average of their in-bounds, non-defective neighbors;
/// the defective cell itself never contributes to its own replacement.
/// A defective cell with no usable neighbor (isolated inside a defect
/// cluster filling its whole window) is left unchanged. Non-defective
/// cells are never touched.
///
/// # Errors
///
/// Returns a dimension mismatch error if `defect_map` differs in shape.
pub fn defect_correct<T: GridElement>(
    engine: &Engine,
    input: &mut Grid<T>,
    defect_map: &Grid<u8>,
    kernel: &Kernel,
) -> CorrectResult<()> {
    ensure_same_dims(input, defect_map)?;

    let corrected: Grid<T> = engine.stencil(input, kernel.half(), |nb| {
        if defect_map.get_unchecked(nb.x(), nb.y()) == 0 {
            return nb.center();
        }

        let mut weighted_sum = 0.0f64;
        let mut weight_sum = 0.0f64;
        for (dx, dy, value) in nb.iter() {
            if dx == 0 && dy == 0 {
                continue;
            }
            let nx = (nb.x() as i64 + dx as i64) as u32;
            let ny = (nb.y() as i64 + dy as i64) as u32;
            if defect_map.get_unchecked(nx, ny) != 0 {
                continue;
            }
            let weight = f64::from(kernel.weight_at(dx, dy));
            weighted_sum += value.to_f64() * weight;
            weight_sum += weight;
        }

        if weight_sum == 0.0 {
            nb.center()
        } else {
            T::from_f64(weighted_sum / weight_sum)
        }
    });

    *input = corrected;
    Ok(())
}
