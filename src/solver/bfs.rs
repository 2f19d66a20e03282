use std::collections::VecDeque;

use crate::{
    grid::Grid,
    solver::{prepare_cells, Algorithm, GridSolver, SearchResult},
};

/// Breadth-first search. Cells are marked visited when they enter the queue, so each is queued
/// at most once, and `distance` ends up holding the hop count from the start. Weights are ignored.
pub fn bfs(grid: &mut Grid, start: usize, end: usize) -> SearchResult {
    prepare_cells(grid, start, end, |_| 0.0);
    let mut visited_order = Vec::new();
    let mut queue = VecDeque::new();
    grid.cell_at_mut(start).visited = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        visited_order.push(current);
        if current == end {
            return SearchResult::found(grid, visited_order, end);
        }
        let distance = grid.cell_at(current).distance + 1.0;
        for neighbour in grid.neighbours(current) {
            let cell = grid.cell_at_mut(neighbour);
            if !cell.visited {
                cell.visited = true;
                cell.distance = distance;
                cell.total_distance = distance;
                cell.previous = Some(current);
                queue.push_back(neighbour);
            }
        }
    }
    SearchResult::not_found(visited_order)
}

#[derive(Clone, Debug, Default)]
pub struct BfsSolver;

impl GridSolver for BfsSolver {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Bfs
    }

    fn solve(&self, grid: &mut Grid, start: usize, end: usize) -> SearchResult {
        bfs(grid, start, end)
    }
}
