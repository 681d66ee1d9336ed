use crate::engine::Strategy;
use crate::utils::default_strategy;
use crate::{GridSource, PathEngine};

pub struct PathEngineBuilder<G: GridSource> {
    grid: G,
    strategy: Option<Strategy>,
}

impl<G: GridSource> PathEngineBuilder<G> {
    /// Start from `grid` with no strategy chosen.
    pub fn new(grid: G) -> Self {
        Self {
            grid,
            strategy: None,
        }
    }
    /// Override the grid-size heuristic with an explicit strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }
    /// Never run on rayon workers, even for grids above the parallel threshold.
    pub fn sequential(mut self) -> Self {
        let cells = self.grid.cell_count();
        self.strategy = Some(match default_strategy(cells) {
            Strategy::Recursive => Strategy::Recursive,
            _ => Strategy::Iterative,
        });
        self
    }
    pub fn build(self) -> PathEngine<G> {
        match self.strategy {
            Some(s) => PathEngine::with_strategy(self.grid, s),
            None => {
                let s = default_strategy(self.grid.cell_count());
                PathEngine::with_strategy(self.grid, s)
            }
        }
    }
}
