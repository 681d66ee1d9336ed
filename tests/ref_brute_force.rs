use std::collections::VecDeque;

use grid_lip::{longest_increasing_path, Grid, PathEngine};
use proptest::prelude::*;

const STEPS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

fn neighbours(r: usize, c: usize, rows: usize, cols: usize) -> Vec<(usize, usize)> {
    STEPS
        .iter()
        .filter_map(|&(dr, dc)| {
            let nr = r as isize + dr;
            let nc = c as isize + dc;
            (nr >= 0 && nc >= 0 && (nr as usize) < rows && (nc as usize) < cols)
                .then_some((nr as usize, nc as usize))
        })
        .collect()
}

/// Unmemoized recursion: exponential, fine for tiny grids.
fn brute_from(grid: &[Vec<i32>], r: usize, c: usize) -> usize {
    let (rows, cols) = (grid.len(), grid[0].len());
    1 + neighbours(r, c, rows, cols)
        .into_iter()
        .filter(|&(nr, nc)| grid[nr][nc] > grid[r][c])
        .map(|(nr, nc)| brute_from(grid, nr, nc))
        .max()
        .unwrap_or(0)
}

fn brute_force(grid: &[Vec<i32>]) -> usize {
    if grid.is_empty() || grid[0].is_empty() {
        return 0;
    }
    let mut best = 0;
    for r in 0..grid.len() {
        for c in 0..grid[0].len() {
            best = best.max(brute_from(grid, r, c));
        }
    }
    best
}

/// Topological peeling: remove cells with no strictly greater neighbour
/// left, one layer per round.
fn peel(grid: &[Vec<i32>]) -> usize {
    if grid.is_empty() || grid[0].is_empty() {
        return 0;
    }
    let (rows, cols) = (grid.len(), grid[0].len());
    let mut higher = vec![vec![0usize; cols]; rows];
    let mut queue = VecDeque::new();
    for r in 0..rows {
        for c in 0..cols {
            higher[r][c] = neighbours(r, c, rows, cols)
                .into_iter()
                .filter(|&(nr, nc)| grid[nr][nc] > grid[r][c])
                .count();
            if higher[r][c] == 0 {
                queue.push_back((r, c));
            }
        }
    }
    let mut rounds = 0;
    while !queue.is_empty() {
        rounds += 1;
        for _ in 0..queue.len() {
            let (r, c) = queue.pop_front().unwrap();
            for (nr, nc) in neighbours(r, c, rows, cols) {
                if grid[nr][nc] < grid[r][c] {
                    higher[nr][nc] -= 1;
                    if higher[nr][nc] == 0 {
                        queue.push_back((nr, nc));
                    }
                }
            }
        }
    }
    rounds
}

fn rect_grid(max_side: usize, values: std::ops::Range<i32>) -> impl Strategy<Value = Vec<Vec<i32>>> {
    (1..=max_side, 1..=max_side).prop_flat_map(move |(rows, cols)| {
        prop::collection::vec(prop::collection::vec(values.clone(), cols), rows)
    })
}

proptest! {
    #[test]
    fn memoized_matches_brute_force(grid in rect_grid(4, -3..4)) {
        let expected = brute_force(&grid);
        prop_assert_eq!(longest_increasing_path(&grid).unwrap(), expected);
    }

    #[test]
    fn memoized_matches_peeling(grid in rect_grid(12, -50..50)) {
        let expected = peel(&grid);
        prop_assert_eq!(longest_increasing_path(&grid).unwrap(), expected);
    }

    #[test]
    fn non_empty_result_is_bounded(grid in rect_grid(8, 0..5)) {
        let cells = grid.len() * grid[0].len();
        let len = longest_increasing_path(&grid).unwrap();
        prop_assert!(len >= 1);
        prop_assert!(len <= cells);
        // At most as many steps as distinct values.
        let mut distinct: Vec<i32> = grid.iter().flatten().copied().collect();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert!(len <= distinct.len());
    }

    #[test]
    fn transposing_preserves_length(grid in rect_grid(8, -10..10)) {
        let rows = grid.len();
        let cols = grid[0].len();
        let transposed: Vec<Vec<i32>> = (0..cols)
            .map(|c| (0..rows).map(|r| grid[r][c]).collect())
            .collect();
        prop_assert_eq!(
            longest_increasing_path(&grid).unwrap(),
            longest_increasing_path(&transposed).unwrap()
        );
    }

    #[test]
    fn negating_values_preserves_length(grid in rect_grid(8, -10..10)) {
        // Reversing the order reverses every path.
        let negated: Vec<Vec<i32>> = grid
            .iter()
            .map(|row| row.iter().map(|v| -v).collect())
            .collect();
        let owned = Grid::from_rows(negated).unwrap();
        prop_assert_eq!(
            PathEngine::new(owned).run(),
            longest_increasing_path(&grid).unwrap()
        );
    }
}
