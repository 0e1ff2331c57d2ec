//! Grid - dense 2D numeric buffer
//!
//! `Grid<T>` is the single data structure the rest of the library operates
//! on: an owned, rectangular, dense array of one numeric element type.
//! Sensor frames, dark maps, gain references, defect maps and filter
//! intermediates are all grids of different element types.
//!
//! # Examples
//!
//! ```
//! use gridcal_core::Grid;
//!
//! // Create a 100x100 u16 frame, zero-initialized
//! let mut grid: Grid<u16> = Grid::new(100, 100).unwrap();
//!
//! // Set and get cell values
//! grid.set(10, 20, 4096).unwrap();
//! assert_eq!(grid.get(10, 20).unwrap(), 4096);
//! assert_eq!(grid.element_count(), 10_000);
//! ```

use num_traits::Bounded;

use crate::error::{Error, Result};

/// Element type stored in a [`Grid`].
///
/// Implemented for the unsigned, signed and floating-point types sensor
/// pipelines actually use. The two conversion methods give generic code a
/// single widening/narrowing path: statistics and filters accumulate in
/// `f64` whatever the element type, then narrow back at the end.
pub trait GridElement:
    Copy + Default + PartialOrd + Bounded + Send + Sync + 'static
{
    /// Widen to `f64` for accumulation.
    fn to_f64(self) -> f64;

    /// Narrow from `f64`.
    ///
    /// Integer types round to nearest and saturate at the type's bounds
    /// (NaN becomes zero); floating-point types cast directly.
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_grid_element_int {
    ($($t:ty),* $(,)?) => {$(
        impl GridElement for $t {
            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                // `as` saturates for float-to-int casts and maps NaN to 0
                value.round() as $t
            }
        }
    )*};
}

macro_rules! impl_grid_element_float {
    ($($t:ty),* $(,)?) => {$(
        impl GridElement for $t {
            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }
        }
    )*};
}

impl_grid_element_int!(u8, u16, u32, u64, i16, i32, i64);
impl_grid_element_float!(f32, f64);

/// Dense 2D numeric buffer
///
/// A rectangular array of `width * height` elements of a single numeric
/// type, stored contiguously with exclusive ownership. Distinct grids
/// never alias.
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding. The cell at (x, y)
/// is at index `y * width + x`. All crates in the workspace assume this
/// layout; [`rows`](Grid::rows) and [`rows_mut`](Grid::rows_mut) expose it
/// directly for row-wise processing.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    /// Width in cells
    width: u32,
    /// Height in cells
    height: u32,
    /// Cell data (row-major, no padding)
    data: Vec<T>,
}

impl<T: GridElement> Grid<T> {
    /// Create a new grid with all cells set to the element default (zero)
    ///
    /// # Arguments
    ///
    /// * `width` - Width in cells (must be > 0)
    /// * `height` - Height in cells (must be > 0)
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridcal_core::Grid;
    ///
    /// let grid: Grid<u16> = Grid::new(640, 480).unwrap();
    /// assert_eq!(grid.width(), 640);
    /// assert_eq!(grid.height(), 480);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let size = (width as usize) * (height as usize);
        Ok(Grid {
            width,
            height,
            data: vec![T::default(); size],
        })
    }

    /// Create a new grid with all cells set to the specified value
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridcal_core::Grid;
    ///
    /// let grid = Grid::new_with_value(100, 100, 5000u16).unwrap();
    /// assert_eq!(grid.get(50, 50).unwrap(), 5000);
    /// ```
    pub fn new_with_value(width: u32, height: u32, value: T) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let size = (width as usize) * (height as usize);
        Ok(Grid {
            width,
            height,
            data: vec![value; size],
        })
    }

    /// Create a grid wrapping an externally supplied buffer
    ///
    /// # Arguments
    ///
    /// * `width` - Width in cells
    /// * `height` - Height in cells
    /// * `data` - Cell data in row-major order
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` for zero dimensions, or
    /// `Error::DataSizeMismatch` if `data.len() != width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::DataSizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Grid {
            width,
            height,
            data,
        })
    }

    /// Create a zero-initialized grid with the same dimensions as `self`,
    /// possibly with a different element type.
    ///
    /// Infallible: `self` already satisfies the dimension invariant.
    pub fn new_like<U: GridElement>(&self) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            data: vec![U::default(); self.element_count()],
        }
    }

    /// Get the width in cells.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in cells.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the total number of cells (`width * height`).
    #[inline]
    pub fn element_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Check whether another grid has the same dimensions.
    #[inline]
    pub fn dimensions_match<U>(&self, other: &Grid<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Get the value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if the coordinates are outside
    /// the grid.
    pub fn get(&self, x: u32, y: u32) -> Result<T> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.data[(y as usize) * (self.width as usize) + (x as usize)])
    }

    /// Set the value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if the coordinates are outside
    /// the grid.
    pub fn set(&mut self, x: u32, y: u32, value: T) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.data[(y as usize) * (self.width as usize) + (x as usize)] = value;
        Ok(())
    }

    /// Get the value at (x, y) without bounds checking.
    ///
    /// Coordinates are debug-asserted; callers on hot paths must guarantee
    /// `x < width && y < height`.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> T {
        debug_assert!(x < self.width && y < self.height);
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Set the value at (x, y) without bounds checking.
    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, value: T) {
        debug_assert!(x < self.width && y < self.height);
        self.data[(y as usize) * (self.width as usize) + (x as usize)] = value;
    }

    /// View the cell data as a flat row-major slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// View the cell data as a mutable flat row-major slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the grid and return the underlying buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Iterate over the rows of the grid.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks_exact(self.width as usize)
    }

    /// Iterate over the rows of the grid mutably.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [T]> {
        self.data.chunks_exact_mut(self.width as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_zero_initialized() {
        let grid: Grid<u16> = Grid::new(4, 3).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.element_count(), 12);
        assert!(grid.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(matches!(
            Grid::<u16>::new(0, 10),
            Err(Error::InvalidDimension { width: 0, height: 10 })
        ));
        assert!(matches!(
            Grid::<u16>::new(10, 0),
            Err(Error::InvalidDimension { width: 10, height: 0 })
        ));
    }

    #[test]
    fn test_from_data_size_check() {
        let grid = Grid::from_data(2, 2, vec![1u16, 2, 3, 4]).unwrap();
        assert_eq!(grid.get(1, 1).unwrap(), 4);

        assert!(matches!(
            Grid::from_data(2, 2, vec![1u16, 2, 3]),
            Err(Error::DataSizeMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_row_major_layout() {
        let grid = Grid::from_data(3, 2, vec![0u16, 1, 2, 10, 11, 12]).unwrap();
        assert_eq!(grid.get(0, 0).unwrap(), 0);
        assert_eq!(grid.get(2, 0).unwrap(), 2);
        assert_eq!(grid.get(0, 1).unwrap(), 10);
        assert_eq!(grid.get(2, 1).unwrap(), 12);

        let rows: Vec<&[u16]> = grid.rows().collect();
        assert_eq!(rows, vec![&[0u16, 1, 2][..], &[10u16, 11, 12][..]]);
    }

    #[test]
    fn test_get_set_bounds() {
        let mut grid: Grid<u16> = Grid::new(2, 2).unwrap();
        assert!(grid.set(2, 0, 1).is_err());
        assert!(grid.get(0, 2).is_err());
        grid.set(1, 1, 7).unwrap();
        assert_eq!(grid.get(1, 1).unwrap(), 7);
    }

    #[test]
    fn test_new_like_changes_element_type() {
        let grid = Grid::new_with_value(5, 4, 123u16).unwrap();
        let like: Grid<f64> = grid.new_like();
        assert_eq!(like.width(), 5);
        assert_eq!(like.height(), 4);
        assert!(like.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_element_conversions() {
        assert_eq!(u16::from_f64(3.4), 3);
        assert_eq!(u16::from_f64(3.6), 4);
        assert_eq!(u16::from_f64(-5.0), 0);
        assert_eq!(u16::from_f64(1e9), u16::MAX);
        assert_eq!(u16::from_f64(f64::NAN), 0);
        assert_eq!(f32::from_f64(0.25), 0.25f32);
        assert_eq!(12345u16.to_f64(), 12345.0);
    }
}
