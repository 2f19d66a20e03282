//! # route_finder
//!
//! The search engine behind an interactive grid pathfinding visualizer. A [Grid] of [Cell]s can
//! be edited (walls, weights, start and end placement) and searched with
//! [breadth-first search](solver::bfs), [depth-first search](solver::dfs),
//! [Dijkstra](solver::dijkstra) or [A*](solver::astar). Every search reports the order in which it
//! finalized cells together with the path it found, which is all a presentation layer needs to
//! animate the run.
//!
//! Movement is 4-directional. Entering a cell costs its weight, which defaults to 1; breadth-first
//! and depth-first search ignore weights. The weighted searches are backed by the
//! [PriorityQueue] in this crate.
//!
//! The [editor], [playback], [stats] and [session] modules model the interactive parts of the
//! visualizer without any rendering: they turn pointer input into grid edits, search results
//! into timed animation frames, and runs into statistics.
pub mod cell;
pub mod editor;
pub mod grid;
pub mod playback;
pub mod priority_queue;
pub mod session;
pub mod solver;
pub mod stats;

pub use cell::Cell;
pub use grid::Grid;
pub use priority_queue::PriorityQueue;
pub use solver::{Algorithm, GridSolver, SearchResult};

use itertools::Itertools;

/// Weights, distances and priorities.
pub type Cost = f64;

/// Follows the `previous` links from `end` back to the cell without a predecessor and returns
/// the indices in start to end order.
pub fn reconstruct_path(grid: &Grid, end: usize) -> Vec<usize> {
    let mut path = std::iter::successors(Some(end), |&ix| grid.cell_at(ix).previous)
        .collect::<Vec<usize>>();
    path.reverse();
    path
}

/// The number of orthogonal steps between two cells.
pub fn manhattan_distance(a: &Cell, b: &Cell) -> Cost {
    ((a.row - b.row).abs() + (a.col - b.col).abs()) as Cost
}

/// The straight-line distance between two cells.
pub fn euclidean_distance(a: &Cell, b: &Cell) -> Cost {
    let dr = (a.row - b.row) as Cost;
    let dc = (a.col - b.col) as Cost;
    dr.hypot(dc)
}

/// Sums the weights of all cells on `path`, the start included. Since the start can never be
/// weighted this is one more than the distance the weighted searches report for the end.
pub fn path_cost(grid: &Grid, path: &[usize]) -> Cost {
    path.iter().map(|&ix| grid.cell_at(ix).weight).sum()
}

/// Checks that every cell on `path` is open and orthogonally adjacent to the next one.
pub fn is_continuous_path(grid: &Grid, path: &[usize]) -> bool {
    path.iter().all(|&ix| !grid.cell_at(ix).is_wall)
        && path.iter().tuple_windows().all(|(&a, &b)| {
            manhattan_distance(grid.cell_at(a), grid.cell_at(b)) == 1.0
        })
}

/// Formats cell positions as `(row, col)` pairs, mainly for log output.
pub fn format_positions(grid: &Grid, cells: &[usize]) -> String {
    cells
        .iter()
        .map(|&ix| {
            let (row, col) = grid.cell_at(ix).position();
            format!("({row}, {col})")
        })
        .join(" -> ")
}
