#![cfg(feature = "parallel")]

use grid_lip::{builder::PathEngineBuilder, Grid, PathEngine, Strategy};
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_grid(rng: &mut StdRng, rows: usize, cols: usize, max: i32) -> Grid<i32> {
    let cells = (0..rows * cols).map(|_| rng.gen_range(0..max)).collect();
    Grid::from_flat(rows, cols, cells).unwrap()
}

#[test]
fn parallel_matches_sequential_on_large_random_grids() {
    let mut rng = StdRng::seed_from_u64(7);
    for &(rows, cols, max) in &[(300, 300, 50), (64, 1024, 1000), (1024, 64, 4)] {
        let grid = random_grid(&mut rng, rows, cols, max);
        let seq = PathEngine::with_strategy(&grid, Strategy::Iterative).run();
        let par = PathEngine::with_strategy(&grid, Strategy::Parallel).run();
        assert_eq!(seq, par, "{rows}x{cols} values < {max}");
    }
}

#[test]
fn large_grids_default_to_parallel() {
    let grid = Grid::from_flat(512, 512, vec![0i32; 512 * 512]).unwrap();
    let engine = PathEngineBuilder::new(&grid).build();
    assert_eq!(engine.strategy(), Strategy::Parallel);
    assert_eq!(engine.run(), 1);

    let seq = PathEngineBuilder::new(&grid).sequential().build();
    assert_eq!(seq.strategy(), Strategy::Iterative);
}

#[test]
fn parallel_serpentine_spans_rows() {
    let (rows, cols) = (256usize, 256usize);
    let mut cells = vec![0u32; rows * cols];
    for r in 0..rows {
        for c in 0..cols {
            let col = if r % 2 == 0 { c } else { cols - 1 - c };
            cells[r * cols + col] = (r * cols + c) as u32;
        }
    }
    let grid = Grid::from_flat(rows, cols, cells).unwrap();
    assert_eq!(
        PathEngine::with_strategy(&grid, Strategy::Parallel).run(),
        rows * cols
    );
}

proptest! {
    #[test]
    fn parallel_matches_recursive(
        rows in 1usize..16,
        cols in 1usize..16,
        values in prop::collection::vec(0i32..6, 256)
    ) {
        let grid = Grid::from_flat(rows, cols, values[..rows * cols].to_vec()).unwrap();
        let rec = PathEngine::with_strategy(&grid, Strategy::Recursive).run();
        let par = PathEngine::with_strategy(&grid, Strategy::Parallel).run();
        prop_assert_eq!(rec, par);
    }
}
