//! Errors raised while validating grid input.
//!
//! The search itself cannot fail: once a grid is known to be rectangular the
//! engine always returns a length. Everything that can go wrong happens when
//! turning caller data into a [`Grid`](crate::grid::Grid) or
//! [`RowsRef`](crate::grid::RowsRef).

use thiserror::Error;

/// Coarse classification of a [`GridError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The caller supplied data that does not describe a rectangular grid.
    InvalidInput,
}

/// Reasons a grid cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GridError {
    /// A row's length differs from the length of row 0.
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A flat buffer does not hold exactly `rows * cols` values.
    #[error("flat buffer holds {found} values, a {rows} x {cols} grid needs {expected}")]
    LengthMismatch {
        rows: usize,
        cols: usize,
        expected: usize,
        found: usize,
    },

    /// `rows * cols` does not fit in `usize`.
    #[error("a {rows} x {cols} grid has more cells than usize can index")]
    TooLarge { rows: usize, cols: usize },
}

impl GridError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GridError::RaggedRow { .. }
            | GridError::LengthMismatch { .. }
            | GridError::TooLarge { .. } => ErrorKind::InvalidInput,
        }
    }
}
