use crate::{
    grid::Grid,
    priority_queue::PriorityQueue,
    solver::{prepare_cells, Algorithm, GridSolver, SearchResult},
    Cost,
};

/// Shared loop of the weighted searches. A cell is pushed again every time a cheaper route to it
/// is found instead of having its queued priority lowered in place; the older, more expensive
/// entries are skipped when they surface because the cell is visited by then. This keeps every
/// relaxation O(log n) at the price of a larger heap.
///
/// `heuristic` estimates the remaining cost from a cell and is added to its distance to form the
/// priority.
pub(crate) fn weighted_search<F>(
    grid: &mut Grid,
    start: usize,
    end: usize,
    heuristic: F,
) -> SearchResult
where
    F: Fn(&Grid, usize) -> Cost,
{
    let mut visited_order = Vec::new();
    let mut queue: PriorityQueue<usize> = PriorityQueue::new();
    queue.enqueue(start, grid.cell_at(start).total_distance);

    while let Some(current) = queue.dequeue() {
        if grid.cell_at(current).visited {
            continue;
        }
        grid.cell_at_mut(current).visited = true;
        visited_order.push(current);
        if current == end {
            return SearchResult::found(grid, visited_order, end);
        }
        let distance = grid.cell_at(current).distance;
        for neighbour in grid.neighbours(current) {
            if grid.cell_at(neighbour).visited {
                continue;
            }
            let new_distance = distance + grid.cell_at(neighbour).weight;
            if new_distance < grid.cell_at(neighbour).distance {
                let h = heuristic(&*grid, neighbour);
                let cell = grid.cell_at_mut(neighbour);
                cell.distance = new_distance;
                cell.heuristic = h;
                cell.total_distance = new_distance + h;
                cell.previous = Some(current);
                queue.enqueue(neighbour, cell.total_distance);
            }
        }
    }
    SearchResult::not_found(visited_order)
}

/// Dijkstra's algorithm: cells are finalized in order of their accumulated weight from the
/// start, which makes the returned path a cheapest one.
pub fn dijkstra(grid: &mut Grid, start: usize, end: usize) -> SearchResult {
    prepare_cells(grid, start, end, |_| 0.0);
    weighted_search(grid, start, end, |_, _| 0.0)
}

#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dijkstra
    }

    fn solve(&self, grid: &mut Grid, start: usize, end: usize) -> SearchResult {
        dijkstra(grid, start, end)
    }
}
