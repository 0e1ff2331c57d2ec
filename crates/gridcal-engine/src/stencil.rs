//! Stencil primitive - per-cell neighborhood computation
//!
//! For every cell, the callback receives a [`Neighborhood`]: read access
//! to the `(2*radius+1)^2` window around the cell, clipped to the grid
//! bounds. Out-of-bounds neighbors are simply absent (no wraparound, no
//! synthetic padding), and the neighborhood reports how many cells it
//! actually contains so weighted sums can normalize by the true
//! denominator.

use gridcal_core::{Grid, GridElement};
use rayon::prelude::*;

use crate::Engine;

/// Read-only view of the clipped window around one cell.
pub struct Neighborhood<'a, T: GridElement> {
    grid: &'a Grid<T>,
    x: u32,
    y: u32,
    radius: u32,
}

impl<'a, T: GridElement> Neighborhood<'a, T> {
    /// X coordinate of the center cell.
    #[inline]
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Y coordinate of the center cell.
    #[inline]
    pub fn y(&self) -> u32 {
        self.y
    }

    /// Window radius the stencil was invoked with.
    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Value of the center cell.
    #[inline]
    pub fn center(&self) -> T {
        self.grid.get_unchecked(self.x, self.y)
    }

    /// Clipped window bounds as inclusive `(x0, y0, x1, y1)`.
    fn clipped(&self) -> (i64, i64, i64, i64) {
        let r = self.radius as i64;
        let cx = self.x as i64;
        let cy = self.y as i64;
        let x0 = (cx - r).max(0);
        let y0 = (cy - r).max(0);
        let x1 = (cx + r).min(self.grid.width() as i64 - 1);
        let y1 = (cy + r).min(self.grid.height() as i64 - 1);
        (x0, y0, x1, y1)
    }

    /// Number of in-bounds cells in the window, center included.
    ///
    /// At an interior cell this is `(2*radius+1)^2`; at corners and edges
    /// it shrinks with the clipping.
    pub fn valid_count(&self) -> usize {
        let (x0, y0, x1, y1) = self.clipped();
        ((x1 - x0 + 1) * (y1 - y0 + 1)) as usize
    }

    /// Iterate over the in-bounds window as `(dx, dy, value)` triples,
    /// center included at `(0, 0)`.
    ///
    /// Offsets are relative to the center, so `dx + radius` /
    /// `dy + radius` index a kernel of the same radius directly.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, T)> + '_ {
        let (x0, y0, x1, y1) = self.clipped();
        let cx = self.x as i64;
        let cy = self.y as i64;
        (y0..=y1).flat_map(move |ny| {
            (x0..=x1).map(move |nx| {
                (
                    (nx - cx) as i32,
                    (ny - cy) as i32,
                    self.grid.get_unchecked(nx as u32, ny as u32),
                )
            })
        })
    }
}

impl Engine {
    /// Compute one output value per cell from its clipped neighborhood.
    ///
    /// Rows are the parallel work unit; each output cell is written by
    /// exactly one worker, and `f` only reads the source grid, so no
    /// synchronization is needed.
    ///
    /// # Panics
    ///
    /// Panics if `radius` cannot be represented as a neighbor offset
    /// (`radius >= i32::MAX`); practical stencils are a few cells wide.
    pub fn stencil<T, U, F>(&self, src: &Grid<T>, radius: u32, f: F) -> Grid<U>
    where
        T: GridElement,
        U: GridElement,
        F: Fn(&Neighborhood<'_, T>) -> U + Sync + Send,
    {
        assert!(radius < i32::MAX as u32, "stencil radius too large");
        let mut out: Grid<U> = src.new_like();
        let width = src.width() as usize;
        let n = src.element_count();
        let odata = out.as_mut_slice();

        let run_row = |y: usize, row: &mut [U]| {
            for (x, cell) in row.iter_mut().enumerate() {
                let neighborhood = Neighborhood {
                    grid: src,
                    x: x as u32,
                    y: y as u32,
                    radius,
                };
                *cell = f(&neighborhood);
            }
        };

        if self.parallel(n) {
            self.install(|| {
                odata
                    .par_chunks_mut(width)
                    .enumerate()
                    .for_each(|(y, row)| run_row(y, row));
            });
        } else {
            for (y, row) in odata.chunks_mut(width).enumerate() {
                run_row(y, row);
            }
        }
        out
    }
}
