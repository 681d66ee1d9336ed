//! Longest strictly-increasing path in a grid.
//!
//! Given an `R x C` grid of comparable values, find the length of the longest
//! path that moves between cardinal neighbours (up, down, left, right) and
//! strictly increases in value at every step. A single cell is a path of
//! length 1; an empty grid yields 0.
//!
//! ## Core idea
//! 1. The longest path starting at a cell is `1 + max` over its strictly
//!    greater neighbours, so it depends only on cells with larger values.
//! 2. That dependency relation is acyclic, so a depth-first search with a
//!    per-cell memo table visits each cell exactly once: O(R·C) time and
//!    space, no visited markers.
//! 3. [`PathEngine`] runs that search over any [`GridSource`], either by
//!    recursion, with an explicit stack, or (feature `parallel`) on rayon.
//!
//! ## Quick start
//! ```
//! use grid_lip::longest_increasing_path;
//!
//! let rows = vec![vec![3, 4, 5], vec![3, 2, 6], vec![2, 2, 1]];
//! assert_eq!(longest_increasing_path(&rows).unwrap(), 4);
//!
//! let ragged = vec![vec![1, 2], vec![3]];
//! assert!(longest_increasing_path(&ragged).is_err());
//! ```
//!
//! ## Features
//! - `parallel`: enables [`Strategy::Parallel`] (rayon).
//! - `tracing`: emits spans and events through `tracing`.
//! - `probe`: builds the `scale_probe` binary.
//! - `heavy`: enables long-running stress tests.

pub mod builder;
pub mod engine;
pub mod error;
pub mod grid;
pub(crate) mod memo;
pub mod traits;
pub mod utils;

pub use crate::builder::PathEngineBuilder;
pub use crate::engine::{PathEngine, Strategy};
pub use crate::error::{ErrorKind, GridError};
pub use crate::grid::{Grid, RowsRef};
pub use crate::traits::GridSource;

/// Length of the longest strictly-increasing path in `rows`.
///
/// `rows` is borrowed, not copied. Input with no rows, or with an empty first
/// row, is an empty grid and yields `Ok(0)`. Rows of differing lengths yield
/// [`GridError::RaggedRow`].
pub fn longest_increasing_path<T: Ord + Sync>(rows: &[Vec<T>]) -> Result<usize, GridError> {
    let grid = RowsRef::new(rows)?;
    Ok(PathEngine::new(grid).run())
}
