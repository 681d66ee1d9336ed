//! Example: longest uphill hike over a synthetic height map.
//!
//! Run with:
//! `cargo run --example terrain [side]`

use grid_lip::{Grid, PathEngineBuilder};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn main() {
    let side = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(256);

    let heights = height_map(side, 2024);
    let engine = PathEngineBuilder::new(&heights).build();
    let len = engine.run();

    println!("terrain {side}x{side}, strategy {}", engine.strategy().as_str());
    println!("longest strictly uphill hike: {len} cells");

    let peak = heights.as_slice().iter().max().copied().unwrap_or_default();
    println!("highest point: {peak} m");
}

/// Smooth-ish heights: a ridge plus noise, in metres.
fn height_map(side: usize, seed: u64) -> Grid<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let centre = side as f64 / 2.0;
    let cells = (0..side * side)
        .map(|i| {
            let (r, c) = ((i / side) as f64, (i % side) as f64);
            let ridge = 2000.0 - ((r - centre).powi(2) + (c - centre).powi(2)).sqrt() * 8.0;
            ridge as i32 + rng.gen_range(-40..40)
        })
        .collect();
    Grid::from_flat(side, side, cells).unwrap_or_default()
}
