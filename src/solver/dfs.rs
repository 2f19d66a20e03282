use crate::{
    grid::Grid,
    solver::{prepare_cells, Algorithm, GridSolver, SearchResult},
};

/// Depth-first search with an explicit stack. Cells are marked visited when pushed. Neighbours
/// are pushed in reverse enumeration order so that the upward neighbour is explored first. The
/// path found is valid but in general not the shortest.
pub fn dfs(grid: &mut Grid, start: usize, end: usize) -> SearchResult {
    prepare_cells(grid, start, end, |_| 0.0);
    let mut visited_order = Vec::new();
    let mut stack = vec![start];
    grid.cell_at_mut(start).visited = true;

    while let Some(current) = stack.pop() {
        visited_order.push(current);
        if current == end {
            return SearchResult::found(grid, visited_order, end);
        }
        let distance = grid.cell_at(current).distance + 1.0;
        for neighbour in grid.neighbours(current).into_iter().rev() {
            let cell = grid.cell_at_mut(neighbour);
            if !cell.visited {
                cell.visited = true;
                cell.distance = distance;
                cell.total_distance = distance;
                cell.previous = Some(current);
                stack.push(neighbour);
            }
        }
    }
    SearchResult::not_found(visited_order)
}

#[derive(Clone, Debug, Default)]
pub struct DfsSolver;

impl GridSolver for DfsSolver {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dfs
    }

    fn solve(&self, grid: &mut Grid, start: usize, end: usize) -> SearchResult {
        dfs(grid, start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::is_continuous_path;

    #[test]
    fn explores_upwards_first() {
        // |...|
        // |.S.|
        // |...|
        // |.E.|
        let mut grid = Grid::new(4, 3);
        grid.move_start(1, 1);
        grid.move_end(3, 1);
        let result = DfsSolver.solve_grid(&mut grid).unwrap();
        let order = result
            .visited_order
            .iter()
            .take(2)
            .map(|&ix| grid.cell_at(ix).position())
            .collect::<Vec<_>>();
        assert_eq!(order, vec![(1, 1), (0, 1)]);
        assert!(result.success);
        assert!(is_continuous_path(&grid, &result.path));
    }

    #[test]
    fn every_visited_cell_is_visited_once() {
        let mut grid = Grid::new(6, 6);
        grid.add_wall(2, 2);
        grid.add_wall(3, 3);
        let result = DfsSolver.solve_grid(&mut grid).unwrap();
        let mut seen = result.visited_order.clone();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), result.nodes_visited());
    }
}
