use crate::{cell::Cell, format_positions, grid::Grid, reconstruct_path, Cost};
use core::fmt;
use log::{debug, info, warn};
use std::error::Error;
use std::str::FromStr;

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod dijkstra;

pub use astar::{astar, AstarSolver, Heuristic};
pub use bfs::{bfs, BfsSolver};
pub use dfs::{dfs, DfsSolver};
pub use dijkstra::{dijkstra, DijkstraSolver};

/// Outcome of a single search. Both lists hold row-major cell indices: `visited_order` in the
/// order cells were finalized, `path` from start to end inclusive and empty if the end could not
/// be reached.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchResult {
    pub visited_order: Vec<usize>,
    pub path: Vec<usize>,
    pub success: bool,
}

impl SearchResult {
    pub(crate) fn found(grid: &Grid, visited_order: Vec<usize>, end: usize) -> SearchResult {
        let path = reconstruct_path(grid, end);
        info!(
            "Found a path of {} cells after visiting {} cells",
            path.len(),
            visited_order.len()
        );
        debug!("Path: {}", format_positions(grid, &path));
        SearchResult {
            visited_order,
            path,
            success: true,
        }
    }

    pub(crate) fn not_found(visited_order: Vec<usize>) -> SearchResult {
        info!(
            "End is not reachable, exhausted the frontier after visiting {} cells",
            visited_order.len()
        );
        SearchResult {
            visited_order,
            path: Vec::new(),
            success: false,
        }
    }

    pub fn nodes_visited(&self) -> usize {
        self.visited_order.len()
    }

    /// Number of cells on the path, start and end included.
    pub fn path_length(&self) -> usize {
        self.path.len()
    }

    /// `(row, col)` of every path cell.
    pub fn path_positions(&self, grid: &Grid) -> Vec<(i32, i32)> {
        self.path
            .iter()
            .map(|&ix| grid.cell_at(ix).position())
            .collect()
    }
}

/// Resets the transient search state of every cell, assigns each its heuristic value and makes
/// `start` the only cell with a finite distance.
pub(crate) fn prepare_cells<F>(grid: &mut Grid, start: usize, end: usize, heuristic: F)
where
    F: Fn(&Cell) -> Cost,
{
    debug_assert!(start < grid.len() && end < grid.len());
    debug!(
        "Searching from {:?} to {:?}",
        grid.cell_at(start).position(),
        grid.cell_at(end).position()
    );
    for cell in grid.all_cells_mut() {
        cell.reset();
        cell.heuristic = heuristic(cell);
    }
    let start_cell = grid.cell_at_mut(start);
    start_cell.distance = 0.0;
    start_cell.total_distance = start_cell.heuristic;
}

pub trait GridSolver {
    fn algorithm(&self) -> Algorithm;

    /// Searches from `start` to `end`, overwriting the transient state of every cell.
    fn solve(&self, grid: &mut Grid, start: usize, end: usize) -> SearchResult;

    /// Searches between the start and end designated on the grid itself. Returns [None] if
    /// either is missing.
    fn solve_grid(&self, grid: &mut Grid) -> Option<SearchResult> {
        match (grid.start(), grid.end()) {
            (Some(start), Some(end)) => Some(self.solve(grid, start, end)),
            _ => {
                warn!("Cannot run {} without a start and an end", self.algorithm());
                None
            }
        }
    }
}

/// The searches a caller can pick from, keyed by `bfs`, `dfs`, `dijkstra` and `astar`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bfs,
    Dfs,
    Dijkstra,
    Astar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Dijkstra,
        Algorithm::Astar,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::Astar => "astar",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "Breadth-First Search",
            Algorithm::Dfs => "Depth-First Search",
            Algorithm::Dijkstra => "Dijkstra's Algorithm",
            Algorithm::Astar => "A* Search",
        }
    }

    /// Whether cell weights influence the search.
    pub fn is_weighted(&self) -> bool {
        matches!(self, Algorithm::Dijkstra | Algorithm::Astar)
    }

    /// Whether the returned path is a cheapest one. Breadth-first search only guarantees the
    /// fewest steps, which is the cheapest path on an unweighted grid.
    pub fn guarantees_shortest_path(&self) -> bool {
        !matches!(self, Algorithm::Dfs)
    }

    pub fn run(&self, grid: &mut Grid, start: usize, end: usize) -> SearchResult {
        match self {
            Algorithm::Bfs => bfs(grid, start, end),
            Algorithm::Dfs => dfs(grid, start, end),
            Algorithm::Dijkstra => dijkstra(grid, start, end),
            Algorithm::Astar => astar(grid, start, end),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(key: &str) -> Result<Algorithm, ParseAlgorithmError> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.key() == key)
            .ok_or_else(|| ParseAlgorithmError {
                key: key.to_owned(),
            })
    }
}

/// Returned when a key names none of the available searches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseAlgorithmError {
    pub key: String,
}

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown algorithm `{}`", self.key)
    }
}

impl Error for ParseAlgorithmError {}
