//! Histogram equalization
//!
//! Spreads an image's value distribution across the output range by
//! remapping each cell through the normalized cumulative histogram:
//! cumulative sum (scan), normalize to `[0, 1]`, scale into a lookup
//! table, apply with a map.
//!
//! The LUT is indexed by the same [`ValueRange`] quantization that built
//! the histogram, one convention everywhere. When `num_bins` spans the
//! full raw value range this degenerates to indexing by the raw cell
//! value.

use gridcal_core::{Grid, GridElement, Histogram, ValueRange};
use gridcal_engine::Engine;

use crate::{FilterError, FilterResult};

/// Reusable working buffers for [`histogram_equalize`].
///
/// The equalization never allocates: callers create one workspace per
/// bin count and reuse it across frames.
#[derive(Debug, Clone)]
pub struct EqualizeWorkspace<T> {
    normalized: Vec<f64>,
    lut: Vec<T>,
}

impl<T: GridElement> EqualizeWorkspace<T> {
    /// Create buffers for a histogram of `num_bins` bins.
    pub fn new(num_bins: usize) -> Self {
        EqualizeWorkspace {
            normalized: vec![0.0; num_bins],
            lut: vec![T::default(); num_bins],
        }
    }

    /// Bin count the buffers are sized for.
    pub fn num_bins(&self) -> usize {
        self.lut.len()
    }

    /// The lookup table built by the last equalization call.
    ///
    /// Monotonically non-decreasing, with outputs in `[0, lut_range]`.
    pub fn lut(&self) -> &[T] {
        &self.lut
    }
}

/// Equalize `image` in place using its histogram.
///
/// `histogram` must have been filled from `image` with the same `range`;
/// it is turned into its cumulative sum in place (after which its last
/// bin equals the image's element count) and can be refilled with
/// [`Histogram::clear`] for the next frame. `lut_range` is the ceiling
/// of the remapped output values.
///
/// # Errors
///
/// Returns `FilterError::WorkspaceSize` if `workspace` was built for a
/// different bin count.
pub fn histogram_equalize<T: GridElement>(
    engine: &Engine,
    image: &mut Grid<T>,
    histogram: &mut Histogram,
    workspace: &mut EqualizeWorkspace<T>,
    range: &ValueRange,
    lut_range: T,
) -> FilterResult<()> {
    let num_bins = histogram.num_bins();
    if workspace.num_bins() != num_bins {
        return Err(FilterError::WorkspaceSize {
            expected: num_bins,
            actual: workspace.num_bins(),
        });
    }

    let element_count = image.element_count() as f64;

    // Cumulative histogram, in place.
    engine.scan_in_place(histogram.bins_mut(), |a, b| a + b);

    // Normalize the cumulative counts to [0, 1].
    for (norm, &cumulative) in workspace.normalized.iter_mut().zip(histogram.counts()) {
        *norm = cumulative as f64 / element_count;
    }

    // Scale into the lookup table. The cumulative sum is non-decreasing
    // and rounding is monotone, so the LUT is non-decreasing too.
    let ceiling = lut_range.to_f64();
    for (entry, &norm) in workspace.lut.iter_mut().zip(workspace.normalized.iter()) {
        *entry = T::from_f64((norm * ceiling).round());
    }

    // Remap every cell through the table.
    let lut = &workspace.lut;
    engine.map_in_place(image, |v| lut[range.bin_index(v.to_f64(), num_bins)]);
    Ok(())
}
