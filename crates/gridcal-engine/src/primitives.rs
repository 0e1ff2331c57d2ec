//! Elementwise, reduction and prefix-scan primitives
//!
//! Every function here has a sequential and a parallel twin path; the
//! engine picks one from the workload size and its configuration, and
//! both produce identical results.

use gridcal_core::{Grid, GridElement};
use rayon::prelude::*;

use crate::Engine;

/// Chunk length for reduction partials and scan blocks. Large enough to
/// amortize task overhead, small enough to keep all workers busy on
/// mid-sized frames.
const CHUNK: usize = 4096;

impl Engine {
    /// Compute every cell from its coordinates: `grid(x, y) = f(x, y)`.
    pub fn fill<T, F>(&self, grid: &mut Grid<T>, f: F)
    where
        T: GridElement,
        F: Fn(u32, u32) -> T + Sync + Send,
    {
        let width = grid.width() as usize;
        let n = grid.element_count();
        let data = grid.as_mut_slice();
        if self.parallel(n) {
            self.install(|| {
                data.par_iter_mut().enumerate().for_each(|(i, cell)| {
                    *cell = f((i % width) as u32, (i / width) as u32);
                });
            });
        } else {
            for (i, cell) in data.iter_mut().enumerate() {
                *cell = f((i % width) as u32, (i / width) as u32);
            }
        }
    }

    /// Update every cell in place: `grid(x, y) = f(grid(x, y))`.
    pub fn map_in_place<T, F>(&self, grid: &mut Grid<T>, f: F)
    where
        T: GridElement,
        F: Fn(T) -> T + Sync + Send,
    {
        let n = grid.element_count();
        let data = grid.as_mut_slice();
        if self.parallel(n) {
            self.install(|| {
                data.par_iter_mut().for_each(|cell| *cell = f(*cell));
            });
        } else {
            for cell in data.iter_mut() {
                *cell = f(*cell);
            }
        }
    }

    /// Produce a new grid of the same dimensions: `out(x, y) = f(src(x, y))`.
    ///
    /// The output element type may differ from the input's; this is how
    /// integer frames become floating-point intermediates and back.
    pub fn map<T, U, F>(&self, src: &Grid<T>, f: F) -> Grid<U>
    where
        T: GridElement,
        U: GridElement,
        F: Fn(T) -> U + Sync + Send,
    {
        let mut out: Grid<U> = src.new_like();
        let n = src.element_count();
        let sdata = src.as_slice();
        let odata = out.as_mut_slice();
        if self.parallel(n) {
            self.install(|| {
                odata
                    .par_iter_mut()
                    .zip_eq(sdata.par_iter())
                    .for_each(|(o, s)| *o = f(*s));
            });
        } else {
            for (o, s) in odata.iter_mut().zip(sdata.iter()) {
                *o = f(*s);
            }
        }
        out
    }

    /// Combine two grids elementwise into the first:
    /// `dst(x, y) = f(dst(x, y), src(x, y))`. The reference grid is never
    /// mutated.
    ///
    /// # Panics
    ///
    /// Panics if the grids have different dimensions.
    pub fn zip_in_place<T, U, F>(&self, dst: &mut Grid<T>, src: &Grid<U>, f: F)
    where
        T: GridElement,
        U: GridElement,
        F: Fn(T, U) -> T + Sync + Send,
    {
        assert!(
            dst.dimensions_match(src),
            "grid dimension mismatch: {}x{} vs {}x{}",
            dst.width(),
            dst.height(),
            src.width(),
            src.height()
        );
        let n = dst.element_count();
        let ddata = dst.as_mut_slice();
        let sdata = src.as_slice();
        if self.parallel(n) {
            self.install(|| {
                ddata
                    .par_iter_mut()
                    .zip_eq(sdata.par_iter())
                    .for_each(|(d, s)| *d = f(*d, *s));
            });
        } else {
            for (d, s) in ddata.iter_mut().zip(sdata.iter()) {
                *d = f(*d, *s);
            }
        }
    }

    /// Visit every cell read-only.
    ///
    /// `f` runs concurrently across cells; any shared state it touches
    /// must be atomic. This is the primitive under histogram filling.
    pub fn for_each<T, F>(&self, grid: &Grid<T>, f: F)
    where
        T: GridElement,
        F: Fn(T) + Sync + Send,
    {
        let data = grid.as_slice();
        if self.parallel(data.len()) {
            self.install(|| {
                data.par_iter().for_each(|v| f(*v));
            });
        } else {
            for v in data.iter() {
                f(*v);
            }
        }
    }

    /// Produce a new grid by mapping whole rows: `f(y, src_row, out_row)`.
    ///
    /// Rows are independent work units, which is what separable filters
    /// need: an incremental running sum is sequential within its row but
    /// every row runs in parallel.
    pub fn map_rows<T, U, F>(&self, src: &Grid<T>, f: F) -> Grid<U>
    where
        T: GridElement,
        U: GridElement,
        F: Fn(usize, &[T], &mut [U]) + Sync + Send,
    {
        let mut out: Grid<U> = src.new_like();
        let width = src.width() as usize;
        let n = src.element_count();
        let sdata = src.as_slice();
        let odata = out.as_mut_slice();
        if self.parallel(n) {
            self.install(|| {
                odata
                    .par_chunks_mut(width)
                    .zip_eq(sdata.par_chunks(width))
                    .enumerate()
                    .for_each(|(y, (orow, srow))| f(y, srow, orow));
            });
        } else {
            for (y, (orow, srow)) in odata
                .chunks_mut(width)
                .zip(sdata.chunks(width))
                .enumerate()
            {
                f(y, srow, orow);
            }
        }
        out
    }

    /// Fold every cell into a single scalar.
    ///
    /// `map` projects a cell into the accumulator domain and `combine`
    /// merges partial accumulators. `combine` must be associative and
    /// commutative (sum, min, max): partials are built per chunk and
    /// merged in unspecified order. `identity` must be neutral for
    /// `combine`.
    pub fn reduce<T, A, M, C>(&self, grid: &Grid<T>, identity: A, map: M, combine: C) -> A
    where
        T: GridElement,
        A: Copy + Send + Sync,
        M: Fn(T) -> A + Sync + Send,
        C: Fn(A, A) -> A + Sync + Send,
    {
        let data = grid.as_slice();
        if self.parallel(data.len()) {
            self.install(|| {
                data.par_chunks(CHUNK)
                    .map(|chunk| {
                        chunk
                            .iter()
                            .fold(identity, |acc, v| combine(acc, map(*v)))
                    })
                    .reduce(|| identity, &combine)
            })
        } else {
            data.iter().fold(identity, |acc, v| combine(acc, map(*v)))
        }
    }

    /// Inclusive prefix fold over a 1D sequence, in place.
    ///
    /// After the call, `seq[i]` holds the fold of `seq[0..=i]`. The
    /// result always equals the sequential left-to-right scan; the
    /// parallel path decomposes into per-chunk scans, a sequential scan
    /// of chunk totals, and a parallel offset pass, which requires
    /// `combine` to be associative (commutativity is not needed; chunk
    /// offsets are always applied from the left).
    pub fn scan_in_place<A, C>(&self, seq: &mut [A], combine: C)
    where
        A: Copy + Send + Sync,
        C: Fn(A, A) -> A + Sync + Send,
    {
        if seq.len() <= 1 {
            return;
        }
        if !self.parallel(seq.len()) {
            for i in 1..seq.len() {
                seq[i] = combine(seq[i - 1], seq[i]);
            }
            return;
        }
        self.install(|| {
            // Pass 1: inclusive scan inside each chunk.
            seq.par_chunks_mut(CHUNK).for_each(|chunk| {
                for i in 1..chunk.len() {
                    chunk[i] = combine(chunk[i - 1], chunk[i]);
                }
            });

            // Inclusive scan of the chunk totals; chunk i needs the fold
            // of every total before it.
            let mut offsets: Vec<A> = seq.chunks(CHUNK).map(|c| c[c.len() - 1]).collect();
            for i in 1..offsets.len() {
                offsets[i] = combine(offsets[i - 1], offsets[i]);
            }

            // Pass 2: push the left-prefix offset through each chunk.
            seq.par_chunks_mut(CHUNK)
                .enumerate()
                .for_each(|(ci, chunk)| {
                    if ci == 0 {
                        return;
                    }
                    let offset = offsets[ci - 1];
                    for v in chunk.iter_mut() {
                        *v = combine(offset, *v);
                    }
                });
        });
    }
}
