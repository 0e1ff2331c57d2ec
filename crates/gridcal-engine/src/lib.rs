//! gridcal Engine - data-parallel primitives over grids
//!
//! Four primitive operations (map, reduce, scan, stencil) plus a few
//! shaped variants (fill, zip, row map) that the statistics, correction
//! and filter crates are built from. Each primitive distributes
//! independent per-cell work across a thread pool owned by the
//! [`Engine`]; a call returns only once every cell has been processed, so
//! two sequential pipeline stages never observe each other's partial
//! results.
//!
//! Within one call, cell visitation order is unspecified. Closures passed
//! to the primitives must therefore be free of cross-cell side effects;
//! the one sanctioned exception is accumulating into atomics (histogram
//! bins). `reduce` requires an associative and commutative combine
//! because per-chunk partials merge in unspecified order. `scan` is the
//! exception to unordered visitation: its observable result always equals
//! the sequential left-to-right inclusive fold.
//!
//! # Contract violations
//!
//! Dimension mismatches between grids passed to a binary primitive are
//! programmer errors, not recoverable conditions; the primitives panic
//! (see `# Panics` on each). Callers that accept untrusted shapes should
//! validate with `Grid::dimensions_match` first.
//!
//! # Configuration
//!
//! There is no global state: thread count and the sequential-fallback
//! threshold are set per engine at construction, so the same pipeline
//! code runs identically single-threaded in tests.
//!
//! ```
//! use gridcal_core::Grid;
//! use gridcal_engine::{Engine, EngineConfig};
//!
//! let engine = Engine::new(EngineConfig::default()).unwrap();
//! let mut grid = Grid::new_with_value(64, 64, 10u16).unwrap();
//! engine.map_in_place(&mut grid, |v| v + 1);
//! let sum = engine.reduce(&grid, 0.0f64, |v| v as f64, |a, b| a + b);
//! assert_eq!(sum, 64.0 * 64.0 * 11.0);
//! ```

mod primitives;
mod stencil;

pub use stencil::Neighborhood;

use thiserror::Error;

/// Errors raised while constructing an engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The worker thread pool could not be built
    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),
}

/// Result type alias for engine construction.
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Grids smaller than this run sequentially on the caller thread; the
/// fork/join overhead dominates below it.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 16 * 1024;

/// Engine construction parameters.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Worker thread count; `None` uses one thread per available core.
    pub threads: Option<usize>,
    /// Minimum element count before a primitive goes parallel.
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            threads: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Data-parallel execution engine.
///
/// Owns the worker pool every primitive dispatches onto. Construct one
/// per pipeline and pass it by reference; engines are cheap to share
/// (`&Engine` is `Sync`) but deliberately not global.
pub struct Engine {
    pool: Option<rayon::ThreadPool>,
    threshold: usize,
}

impl Engine {
    /// Build an engine with its own thread pool.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::ThreadPool` if the pool cannot be created.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(threads) = config.threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder
            .build()
            .map_err(|e| EngineError::ThreadPool(e.to_string()))?;
        Ok(Engine {
            pool: Some(pool),
            threshold: config.parallel_threshold,
        })
    }

    /// Build an engine that runs every primitive on the caller thread.
    ///
    /// Results are identical to the parallel engine; tests use this to
    /// keep failures deterministic and stack traces readable.
    pub fn sequential() -> Self {
        Engine {
            pool: None,
            threshold: usize::MAX,
        }
    }

    /// Whether a workload of `len` elements should go parallel.
    #[inline]
    pub(crate) fn parallel(&self, len: usize) -> bool {
        self.pool.is_some() && len >= self.threshold
    }

    /// Run `op` inside the engine's pool (or inline when sequential).
    #[inline]
    pub(crate) fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}
