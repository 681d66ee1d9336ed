//! Core trait definitions for grids the path engine can search.
//!
//! To run the engine over your own storage, implement [`GridSource`] for a
//! type that exposes a rectangular block of comparable values.
//!
//! The engine only ever:
//! - asks for the dimensions (`rows`, `cols`),
//! - reads individual cells by coordinate,
//! - compares two cell values with `<`/`>`.
//!
//! It never mutates the grid and never performs arithmetic on values, so any
//! totally ordered type works (integers of any width, fixed-point wrappers,
//! even strings).

/// Read-only view of a rectangular grid.
///
/// Semantics:
/// - The grid has `rows()` rows and `cols()` columns; either may be zero.
/// - `value(row, col)` is defined for every `row < rows()` and `col < cols()`.
/// - `rows() * cols()` must fit in `usize`; [`GridSource::cell_count`]
///   panics otherwise.
/// - The dimensions and values must not change while an engine holds the
///   source. The memo table is sized once from the initial dimensions.
pub trait GridSource {
    /// Cell value type. Only the ordering is used.
    type Value: Ord;

    /// Number of rows `R`.
    fn rows(&self) -> usize;

    /// Number of columns `C`.
    fn cols(&self) -> usize;

    /// Value stored at `(row, col)`.
    ///
    /// Implementations may panic on out-of-range coordinates; the engine never
    /// produces them.
    fn value(&self, row: usize, col: usize) -> &Self::Value;

    /// True if the grid has no cells.
    #[inline]
    fn is_empty(&self) -> bool {
        self.rows() == 0 || self.cols() == 0
    }

    /// Total number of cells `R * C`.
    ///
    /// # Panics
    /// Panics if `R * C` overflows `usize`.
    #[inline]
    fn cell_count(&self) -> usize {
        let (rows, cols) = (self.rows(), self.cols());
        match rows.checked_mul(cols) {
            Some(cells) => cells,
            None => panic!("{rows} x {cols} grid has more cells than usize can index"),
        }
    }
}

impl<G: GridSource + ?Sized> GridSource for &G {
    type Value = G::Value;

    #[inline]
    fn rows(&self) -> usize {
        (**self).rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        (**self).cols()
    }

    #[inline]
    fn value(&self, row: usize, col: usize) -> &Self::Value {
        (**self).value(row, col)
    }
}
