//! Rectangular grid containers.
//!
//! [`Grid`] owns its values in a single row-major buffer. [`RowsRef`] borrows
//! a `&[Vec<T>]` after checking it is rectangular, so callers holding nested
//! vectors can search them without copying.
//!
//! Emptiness is decided before shape: input with no rows, or whose first row
//! is empty, is an empty grid regardless of what follows.

use crate::error::GridError;
use crate::traits::GridSource;

/// Owned `rows x cols` grid stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Build a grid from nested rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, GridError> {
        let cols = match validate_rows(&rows)? {
            Some(cols) => cols,
            None => return Ok(Self::empty()),
        };
        let n_rows = rows.len();
        checked_cells(n_rows, cols)?;
        let cells: Vec<T> = rows.into_iter().flatten().collect();
        Ok(Self {
            rows: n_rows,
            cols,
            cells,
        })
    }

    /// Build a grid from a row-major buffer.
    pub fn from_flat(rows: usize, cols: usize, cells: Vec<T>) -> Result<Self, GridError> {
        let expected = checked_cells(rows, cols)?;
        if cells.len() != expected {
            return Err(GridError::LengthMismatch {
                rows,
                cols,
                expected,
                found: cells.len(),
            });
        }
        Ok(Self { rows, cols, cells })
    }

    /// The 0 x 0 grid.
    pub fn empty() -> Self {
        Self {
            rows: 0,
            cols: 0,
            cells: Vec::new(),
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Value at `(row, col)`, or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Row `row` as a slice.
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row < self.rows {
            let start = row * self.cols;
            Some(&self.cells[start..start + self.cols])
        } else {
            None
        }
    }

    /// Underlying row-major buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }
}

impl<T> Default for Grid<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> TryFrom<Vec<Vec<T>>> for Grid<T> {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<T>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl<T: Ord> GridSource for Grid<T> {
    type Value = T;

    #[inline]
    fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn value(&self, row: usize, col: usize) -> &T {
        &self.cells[row * self.cols + col]
    }
}

/// Borrowed grid over nested rows, validated to be rectangular.
#[derive(Clone, Copy, Debug)]
pub struct RowsRef<'a, T> {
    rows: &'a [Vec<T>],
    cols: usize,
}

impl<'a, T> RowsRef<'a, T> {
    pub fn new(rows: &'a [Vec<T>]) -> Result<Self, GridError> {
        match validate_rows(rows)? {
            Some(cols) => {
                checked_cells(rows.len(), cols)?;
                Ok(Self { rows, cols })
            }
            None => Ok(Self { rows: &[], cols: 0 }),
        }
    }
}

impl<'a, T: Ord> GridSource for RowsRef<'a, T> {
    type Value = T;

    #[inline]
    fn rows(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn value(&self, row: usize, col: usize) -> &T {
        &self.rows[row][col]
    }
}

/// Returns `Ok(None)` for empty input, `Ok(Some(cols))` for rectangular input.
fn validate_rows<T>(rows: &[Vec<T>]) -> Result<Option<usize>, GridError> {
    let cols = match rows.first() {
        Some(first) if !first.is_empty() => first.len(),
        _ => return Ok(None),
    };
    for (row, r) in rows.iter().enumerate().skip(1) {
        if r.len() != cols {
            return Err(GridError::RaggedRow {
                row,
                expected: cols,
                found: r.len(),
            });
        }
    }
    Ok(Some(cols))
}

fn checked_cells(rows: usize, cols: usize) -> Result<usize, GridError> {
    rows.checked_mul(cols)
        .ok_or(GridError::TooLarge { rows, cols })
}
