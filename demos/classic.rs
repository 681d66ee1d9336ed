//! Example: the textbook grids.
//!
//! Run with:
//! `cargo run --example classic`

use grid_lip::{longest_increasing_path, GridError};

fn main() -> Result<(), GridError> {
    let grids: [(&str, Vec<Vec<i32>>); 5] = [
        ("descending corner", vec![vec![9, 9, 4], vec![6, 6, 8], vec![2, 1, 1]]),
        ("spiral edge", vec![vec![3, 4, 5], vec![3, 2, 6], vec![2, 2, 1]]),
        ("increasing row", vec![vec![1, 2, 3, 4]]),
        ("plateau", vec![vec![5, 5], vec![5, 5]]),
        ("single cell", vec![vec![7]]),
    ];

    for (name, rows) in &grids {
        let len = longest_increasing_path(rows)?;
        println!("{name:>18}: {len}");
        for row in rows {
            println!("{:>18}  {row:?}", "");
        }
    }

    let ragged = vec![vec![1, 2], vec![3]];
    match longest_increasing_path(&ragged) {
        Ok(len) => println!("ragged input unexpectedly accepted: {len}"),
        Err(err) => println!("ragged input rejected ({:?}): {err}", err.kind()),
    }
    Ok(())
}
