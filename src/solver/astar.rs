use crate::{
    cell::Cell,
    euclidean_distance,
    grid::Grid,
    manhattan_distance,
    solver::{dijkstra::weighted_search, prepare_cells, Algorithm, GridSolver, SearchResult},
    Cost,
};

/// Distance estimate towards the end. Both are admissible on a 4-directional grid whose weights
/// are at least 1; Manhattan is the tighter of the two.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Heuristic {
    #[default]
    Manhattan,
    Euclidean,
}

impl Heuristic {
    pub fn estimate(&self, from: &Cell, to: &Cell) -> Cost {
        match self {
            Heuristic::Manhattan => manhattan_distance(from, to),
            Heuristic::Euclidean => euclidean_distance(from, to),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AstarSolver {
    pub heuristic: Heuristic,
    /// Multiplies the heuristic. Values above 1 make the search greedier and give up the
    /// guarantee that the path is a cheapest one.
    pub heuristic_factor: f64,
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic: Heuristic::Manhattan,
            heuristic_factor: 1.0,
        }
    }

    fn estimate(&self, from: &Cell, to: &Cell) -> Cost {
        self.heuristic.estimate(from, to) * self.heuristic_factor
    }
}

impl GridSolver for AstarSolver {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Astar
    }

    /// Dijkstra's loop ordered by `distance + heuristic`. The heuristic of every cell is set
    /// up front and derived again whenever a cell is relaxed.
    fn solve(&self, grid: &mut Grid, start: usize, end: usize) -> SearchResult {
        let goal = grid.cell_at(end).clone();
        prepare_cells(grid, start, end, |cell| self.estimate(cell, &goal));
        weighted_search(grid, start, end, |grid, ix| {
            self.estimate(grid.cell_at(ix), &goal)
        })
    }
}

/// A* with the Manhattan heuristic.
pub fn astar(grid: &mut Grid, start: usize, end: usize) -> SearchResult {
    AstarSolver::new().solve(grid, start, end)
}
