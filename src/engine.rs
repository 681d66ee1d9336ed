//! Memoized depth-first search for the longest strictly-increasing path.
//!
//! Every cell asks for the longest path starting at it:
//! 1. a memo hit returns immediately,
//! 2. otherwise the answer is `1 + max` over strictly greater cardinal
//!    neighbours (or `1` if there are none), which is then recorded.
//!
//! Because each step strictly increases the value, the "greater neighbour"
//! relation is acyclic. The search therefore never needs an in-progress
//! marker: a cell can never be reached again while it is still on the stack.
//!
//! The engine is generic over any [`GridSource`].

use crate::memo::{LengthCache, MemoTable};
#[cfg(feature = "parallel")]
use crate::memo::AtomicMemoTable;
use crate::traits::GridSource;
use crate::utils::{default_strategy, step, DIRECTIONS};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How the per-cell search is carried out.
///
/// All strategies return identical results; they differ only in stack usage
/// and threading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Plain recursion. Depth grows with the longest path, so keep this for
    /// small grids.
    Recursive,
    /// Same search driven by an explicit heap-allocated stack.
    Iterative,
    /// Rows spread across rayon workers sharing an atomic memo table.
    #[cfg(feature = "parallel")]
    Parallel,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Recursive => "recursive",
            Strategy::Iterative => "iterative",
            #[cfg(feature = "parallel")]
            Strategy::Parallel => "parallel",
        }
    }
}

/// Longest-increasing-path engine for a grid `G`.
///
/// Typical usage:
/// ```
/// use grid_lip::{Grid, PathEngine};
///
/// let grid = Grid::from_rows(vec![
///     vec![9, 9, 4],
///     vec![6, 6, 8],
///     vec![2, 1, 1],
/// ])
/// .unwrap();
/// let engine = PathEngine::new(grid);
/// assert_eq!(engine.run(), 4);
/// ```
pub struct PathEngine<G: GridSource> {
    grid: G,
    strategy: Strategy,
}

impl<G: GridSource> PathEngine<G> {
    /// Create an engine with a strategy picked from the grid size.
    pub fn new(grid: G) -> Self {
        let strategy = default_strategy(grid.cell_count());
        Self::with_strategy(grid, strategy)
    }

    /// Create an engine with an explicit strategy.
    pub fn with_strategy(grid: G, strategy: Strategy) -> Self {
        Self { grid, strategy }
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    /// Give the grid back.
    pub fn into_grid(self) -> G {
        self.grid
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Longest strictly-increasing path starting at `(row, col)`.
    ///
    /// Runs a fresh search from that single cell. Returns `None` when the
    /// coordinate lies outside the grid.
    pub fn path_length_from(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.grid.rows() || col >= self.grid.cols() {
            return None;
        }
        let mut search = Search::new(&self.grid, MemoTable::new(self.grid.cell_count()));
        let mut stack = Vec::new();
        Some(search.path_length_from_iterative(row, col, &mut stack))
    }
}

#[cfg(not(feature = "parallel"))]
impl<G: GridSource> PathEngine<G> {
    /// Length of the longest strictly-increasing path anywhere in the grid.
    ///
    /// Returns `0` for an empty grid and at least `1` otherwise.
    pub fn run(&self) -> usize {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "lip_run",
            rows = self.grid.rows(),
            cols = self.grid.cols(),
            strategy = self.strategy.as_str()
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let best = match self.strategy {
            Strategy::Recursive => longest_recursive(&self.grid),
            Strategy::Iterative => longest_iterative(&self.grid),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(length = best, "longest increasing path");
        best
    }
}

#[cfg(feature = "parallel")]
impl<G> PathEngine<G>
where
    G: GridSource + Sync,
{
    /// Length of the longest strictly-increasing path anywhere in the grid,
    /// with the `Sync` bound required by the `parallel` feature.
    ///
    /// Returns `0` for an empty grid and at least `1` otherwise.
    pub fn run(&self) -> usize {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "lip_run",
            rows = self.grid.rows(),
            cols = self.grid.cols(),
            strategy = self.strategy.as_str()
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let best = match self.strategy {
            Strategy::Recursive => longest_recursive(&self.grid),
            Strategy::Iterative => longest_iterative(&self.grid),
            Strategy::Parallel => longest_parallel(&self.grid),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(length = best, "longest increasing path");
        best
    }
}

fn longest_recursive<G: GridSource>(grid: &G) -> usize {
    if grid.is_empty() {
        return 0;
    }
    #[cfg(feature = "tracing")]
    let _span = tracing::trace_span!("recursive_pass").entered();

    let mut search = Search::new(grid, MemoTable::new(grid.cell_count()));
    let mut best = 0;
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            best = best.max(search.path_length_from(row, col));
        }
    }
    debug_assert_eq!(search.memo.computed(), grid.cell_count());
    best
}

fn longest_iterative<G: GridSource>(grid: &G) -> usize {
    if grid.is_empty() {
        return 0;
    }
    #[cfg(feature = "tracing")]
    let _span = tracing::trace_span!("iterative_pass").entered();

    let mut search = Search::new(grid, MemoTable::new(grid.cell_count()));
    let mut stack = Vec::new();
    let mut best = 0;
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            best = best.max(search.path_length_from_iterative(row, col, &mut stack));
        }
    }
    debug_assert_eq!(search.memo.computed(), grid.cell_count());
    best
}

#[cfg(feature = "parallel")]
fn longest_parallel<G: GridSource + Sync>(grid: &G) -> usize {
    if grid.is_empty() {
        return 0;
    }
    #[cfg(feature = "tracing")]
    let _span = tracing::trace_span!("parallel_pass", threads = rayon::current_num_threads())
        .entered();

    let memo = AtomicMemoTable::new(grid.cell_count());
    let best = (0..grid.rows())
        .into_par_iter()
        .map_init(Vec::new, |stack, row| {
            let mut search = Search::new(grid, &memo);
            (0..grid.cols())
                .map(|col| search.path_length_from_iterative(row, col, stack))
                .max()
                .unwrap_or(0)
        })
        .max()
        .unwrap_or(0);
    debug_assert_eq!(memo.computed(), grid.cell_count());
    best
}

/// One pending cell in the explicit-stack search.
#[derive(Debug, Clone, Copy)]
struct Frame {
    row: usize,
    col: usize,
    /// Index into [`DIRECTIONS`] of the next neighbour to inspect.
    next_dir: usize,
    best: usize,
}

impl Frame {
    fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            next_dir: 0,
            best: 1,
        }
    }
}

/// Grid plus memo table for one top-level computation.
struct Search<'g, G: GridSource, M: LengthCache> {
    grid: &'g G,
    memo: M,
    rows: usize,
    cols: usize,
}

impl<'g, G: GridSource, M: LengthCache> Search<'g, G, M> {
    fn new(grid: &'g G, memo: M) -> Self {
        Self {
            grid,
            memo,
            rows: grid.rows(),
            cols: grid.cols(),
        }
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Memoized recursion.
    fn path_length_from(&mut self, row: usize, col: usize) -> usize {
        let idx = self.index(row, col);
        if let Some(len) = self.memo.get(idx) {
            return len;
        }
        let grid = self.grid;
        let here = grid.value(row, col);
        let mut best = 1;
        for &dir in &DIRECTIONS {
            if let Some((r, c)) = step(row, col, dir, self.rows, self.cols) {
                if grid.value(r, c) > here {
                    best = best.max(1 + self.path_length_from(r, c));
                }
            }
        }
        self.memo.record(idx, best);
        best
    }

    /// Same search as [`Self::path_length_from`] with an explicit stack.
    ///
    /// `stack` is scratch space reused across calls and is empty on return.
    fn path_length_from_iterative(
        &mut self,
        row: usize,
        col: usize,
        stack: &mut Vec<Frame>,
    ) -> usize {
        if let Some(len) = self.memo.get(self.index(row, col)) {
            return len;
        }
        let grid = self.grid;
        stack.clear();
        stack.push(Frame::new(row, col));
        let mut result = 1;

        while let Some(top) = stack.last_mut() {
            if top.next_dir == DIRECTIONS.len() {
                let done = *top;
                stack.pop();
                let idx = self.index(done.row, done.col);
                self.memo.record(idx, done.best);
                match stack.last_mut() {
                    Some(parent) => parent.best = parent.best.max(1 + done.best),
                    None => result = done.best,
                }
                continue;
            }

            let dir = DIRECTIONS[top.next_dir];
            top.next_dir += 1;
            let Some((r, c)) = step(top.row, top.col, dir, self.rows, self.cols) else {
                continue;
            };
            if grid.value(r, c) <= grid.value(top.row, top.col) {
                continue;
            }
            match self.memo.get(self.index(r, c)) {
                Some(len) => top.best = top.best.max(1 + len),
                None => stack.push(Frame::new(r, c)),
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn grid(rows: Vec<Vec<i32>>) -> Grid<i32> {
        Grid::from_rows(rows).unwrap()
    }

    fn strategies() -> Vec<Strategy> {
        #[allow(unused_mut)]
        let mut all = vec![Strategy::Recursive, Strategy::Iterative];
        #[cfg(feature = "parallel")]
        all.push(Strategy::Parallel);
        all
    }

    #[test]
    fn classic_grids_every_strategy() {
        for strategy in strategies() {
            let a = PathEngine::with_strategy(
                grid(vec![vec![9, 9, 4], vec![6, 6, 8], vec![2, 1, 1]]),
                strategy,
            );
            assert_eq!(a.run(), 4, "{}", strategy.as_str());
            let b = PathEngine::with_strategy(
                grid(vec![vec![3, 4, 5], vec![3, 2, 6], vec![2, 2, 1]]),
                strategy,
            );
            assert_eq!(b.run(), 4, "{}", strategy.as_str());
        }
    }

    #[test]
    fn empty_grid_is_zero() {
        for strategy in strategies() {
            assert_eq!(PathEngine::with_strategy(Grid::<i32>::empty(), strategy).run(), 0);
        }
    }

    #[test]
    fn recursion_fills_every_memo_entry_once() {
        let g = grid(vec![vec![1, 2, 3], vec![6, 5, 4], vec![7, 8, 9]]);
        let mut search = Search::new(&g, MemoTable::new(9));
        let mut best = 0;
        for row in 0..3 {
            for col in 0..3 {
                best = best.max(search.path_length_from(row, col));
            }
        }
        assert_eq!(best, 9);
        assert_eq!(search.memo.computed(), 9);
        assert_eq!(search.memo.get(0), Some(9));
        assert_eq!(search.memo.get(8), Some(1));
    }

    #[test]
    fn iterative_matches_recursive_per_cell() {
        let g = grid(vec![
            vec![5, 1, 7, 3],
            vec![2, 8, 4, 4],
            vec![9, 0, 6, 2],
        ]);
        let mut rec = Search::new(&g, MemoTable::new(12));
        let mut it = Search::new(&g, MemoTable::new(12));
        let mut stack = Vec::new();
        for row in 0..3 {
            for col in 0..4 {
                assert_eq!(
                    rec.path_length_from(row, col),
                    it.path_length_from_iterative(row, col, &mut stack),
                    "cell ({row}, {col})"
                );
                assert!(stack.is_empty());
            }
        }
    }

    #[test]
    fn single_cell_query() {
        let engine = PathEngine::new(grid(vec![vec![1, 2], vec![4, 3]]));
        assert_eq!(engine.path_length_from(0, 0), Some(4));
        assert_eq!(engine.path_length_from(1, 0), Some(1));
        assert_eq!(engine.path_length_from(2, 0), None);
        assert_eq!(engine.path_length_from(0, 2), None);
    }

    #[test]
    fn deep_serpentine_needs_no_recursion() {
        let (rows, cols) = (200usize, 200usize);
        let mut cells = vec![0i64; rows * cols];
        for r in 0..rows {
            for c in 0..cols {
                let c_eff = if r % 2 == 0 { c } else { cols - 1 - c };
                cells[r * cols + c_eff] = (r * cols + c) as i64;
            }
        }
        let g = Grid::from_flat(rows, cols, cells).unwrap();
        let engine = PathEngine::with_strategy(g, Strategy::Iterative);
        assert_eq!(engine.run(), rows * cols);
    }

    #[test]
    fn default_strategy_follows_size() {
        assert_eq!(PathEngine::new(grid(vec![vec![1]])).strategy(), Strategy::Recursive);
        let big = Grid::from_flat(100, 100, vec![0u8; 10_000]).unwrap();
        assert_ne!(PathEngine::new(big).strategy(), Strategy::Recursive);
    }
}
