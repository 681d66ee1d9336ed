//! Assorted utilities and helpers.

use crate::engine::Strategy;

/// Largest grid (in cells) searched with plain recursion by default.
///
/// A path can be at most as long as the grid has cells, so this also bounds
/// the recursion depth.
pub const RECURSION_CELL_LIMIT: usize = 1 << 12;

/// Smallest grid (in cells) handed to rayon by default.
#[cfg(feature = "parallel")]
pub const PARALLEL_CELL_THRESHOLD: usize = 1 << 16;

/// Cardinal steps as `(d_row, d_col)`: down, up, right, left.
pub const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Pick an execution strategy for a grid of `cells` cells.
#[inline]
pub fn default_strategy(cells: usize) -> Strategy {
    #[cfg(feature = "parallel")]
    {
        if cells >= PARALLEL_CELL_THRESHOLD {
            return Strategy::Parallel;
        }
    }
    if cells <= RECURSION_CELL_LIMIT {
        Strategy::Recursive
    } else {
        Strategy::Iterative
    }
}

/// Apply `(d_row, d_col)` to `(row, col)`, staying inside `rows x cols`.
#[inline]
pub fn step(
    row: usize,
    col: usize,
    (d_row, d_col): (isize, isize),
    rows: usize,
    cols: usize,
) -> Option<(usize, usize)> {
    let r = row.checked_add_signed(d_row)?;
    let c = col.checked_add_signed(d_col)?;
    (r < rows && c < cols).then_some((r, c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_grids_recurse() {
        assert_eq!(default_strategy(0), Strategy::Recursive);
        assert_eq!(default_strategy(1), Strategy::Recursive);
        assert_eq!(default_strategy(RECURSION_CELL_LIMIT), Strategy::Recursive);
    }

    #[test]
    fn large_grids_avoid_recursion() {
        assert_ne!(
            default_strategy(RECURSION_CELL_LIMIT + 1),
            Strategy::Recursive
        );
        assert_ne!(default_strategy(usize::MAX), Strategy::Recursive);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn huge_grids_go_parallel() {
        assert_eq!(
            default_strategy(PARALLEL_CELL_THRESHOLD),
            Strategy::Parallel
        );
    }

    #[test]
    fn step_stays_in_bounds() {
        assert_eq!(step(0, 0, (-1, 0), 3, 3), None);
        assert_eq!(step(0, 0, (0, -1), 3, 3), None);
        assert_eq!(step(2, 2, (1, 0), 3, 3), None);
        assert_eq!(step(2, 2, (0, 1), 3, 3), None);
        assert_eq!(step(1, 1, (1, 0), 3, 3), Some((2, 1)));
        assert_eq!(step(1, 1, (0, -1), 3, 3), Some((1, 0)));
    }

    #[test]
    fn corner_has_two_neighbors() {
        let inside: Vec<_> = DIRECTIONS
            .iter()
            .filter_map(|&d| step(0, 0, d, 2, 2))
            .collect();
        assert_eq!(inside, vec![(1, 0), (0, 1)]);
    }
}
