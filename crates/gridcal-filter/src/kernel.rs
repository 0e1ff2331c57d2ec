//! Weighting kernels
//!
//! Square, odd-sized grids of `f32` weights used by defect interpolation
//! and windowed filters. Weights need not sum to 1: consumers normalize
//! by the weight actually applied, which at grid edges or around masked
//! cells is less than the kernel total.

use crate::{FilterError, FilterResult};

/// A square 2D weighting kernel
///
/// The size is always odd so the center cell is unique; `half()` is the
/// neighborhood radius the kernel spans.
#[derive(Debug, Clone)]
pub struct Kernel {
    /// Side length (odd)
    size: u32,
    /// Weights (row-major order)
    data: Vec<f32>,
}

impl Kernel {
    /// Create a kernel from a slice of weights.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::EvenKernelSize` for even or zero sizes, and
    /// `FilterError::InvalidParameters` if `data.len() != size * size`.
    pub fn from_slice(size: u32, data: &[f32]) -> FilterResult<Self> {
        if size == 0 || size.is_multiple_of(2) {
            return Err(FilterError::EvenKernelSize(size));
        }
        let expected = (size as usize) * (size as usize);
        if data.len() != expected {
            return Err(FilterError::InvalidParameters(format!(
                "kernel of size {} needs {} weights, got {}",
                size,
                expected,
                data.len()
            )));
        }
        Ok(Kernel {
            size,
            data: data.to_vec(),
        })
    }

    /// Create a box (uniform averaging) kernel: all weights `1/(size^2)`.
    pub fn box_kernel(size: u32) -> FilterResult<Self> {
        if size == 0 || size.is_multiple_of(2) {
            return Err(FilterError::EvenKernelSize(size));
        }
        let count = (size as usize) * (size as usize);
        Ok(Kernel {
            size,
            data: vec![1.0 / count as f32; count],
        })
    }

    /// Create a normalized Gaussian kernel.
    ///
    /// Weights are `exp(-(dx^2 + dy^2) / (2 * sigma^2))`, scaled so the
    /// kernel sums to 1.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::EvenKernelSize` for even or zero sizes, and
    /// `FilterError::InvalidParameters` for `sigma <= 0`.
    pub fn gaussian(size: u32, sigma: f32) -> FilterResult<Self> {
        if size == 0 || size.is_multiple_of(2) {
            return Err(FilterError::EvenKernelSize(size));
        }
        if sigma <= 0.0 {
            return Err(FilterError::InvalidParameters(
                "sigma must be positive".into(),
            ));
        }

        let half = (size / 2) as i32;
        let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
        let mut data = Vec::with_capacity((size as usize) * (size as usize));
        let mut sum = 0.0f64;
        for dy in -half..=half {
            for dx in -half..=half {
                let w = (-f64::from(dx * dx + dy * dy) / denom).exp();
                sum += w;
                data.push(w as f32);
            }
        }
        for w in data.iter_mut() {
            *w = (f64::from(*w) / sum) as f32;
        }
        Ok(Kernel { size, data })
    }

    /// Side length of the kernel.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Neighborhood radius spanned by the kernel (`size / 2`).
    #[inline]
    pub fn half(&self) -> u32 {
        self.size / 2
    }

    /// Weight at kernel coordinates `(ki, kj)`.
    #[inline]
    pub fn get(&self, ki: u32, kj: u32) -> f32 {
        debug_assert!(ki < self.size && kj < self.size);
        self.data[(kj as usize) * (self.size as usize) + (ki as usize)]
    }

    /// Weight for a neighbor at offset `(dx, dy)` from the center.
    ///
    /// Offsets are the ones a stencil neighborhood yields; both must be
    /// within `[-half, half]`.
    #[inline]
    pub fn weight_at(&self, dx: i32, dy: i32) -> f32 {
        let half = self.half() as i32;
        debug_assert!(dx.abs() <= half && dy.abs() <= half);
        self.get((dx + half) as u32, (dy + half) as u32)
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }
}
