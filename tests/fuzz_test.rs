/// Fuzzes the searches on many random grids: every search must find a path exactly when the end
/// shares a connected component with the start, breadth-first search must find the fewest cells,
/// and Dijkstra and A* must agree on the cheapest cost.
use rand::prelude::*;
use route_finder::{is_continuous_path, path_cost, Algorithm, Grid, SearchResult};
use std::collections::VecDeque;

fn random_grid(rows: usize, cols: usize, rng: &mut StdRng, weighted: bool) -> Grid {
    let mut grid = Grid::new(rows, cols);
    grid.move_start(0, 0);
    grid.move_end(rows as i32 - 1, cols as i32 - 1);
    for row in 0..rows as i32 {
        for col in 0..cols as i32 {
            if rng.gen_bool(0.3) {
                grid.add_wall(row, col);
            } else if weighted && rng.gen_bool(0.2) {
                grid.set_weight(row, col, rng.gen_range(2..10) as f64);
            }
        }
    }
    grid.update();
    grid
}

fn visualize_grid(grid: &Grid) {
    println!("{grid}");
}

/// Fewest moves from `start` to `end`, computed independently of the crate's searches.
fn brute_force_hops(grid: &Grid, start: usize, end: usize) -> Option<usize> {
    let mut hops = vec![None; grid.len()];
    hops[start] = Some(0);
    let mut queue = VecDeque::from([start]);
    while let Some(ix) = queue.pop_front() {
        let here = hops[ix].unwrap();
        for n in grid.neighbours(ix) {
            if hops[n].is_none() {
                hops[n] = Some(here + 1);
                queue.push_back(n);
            }
        }
    }
    hops[end]
}

fn run(algorithm: Algorithm, grid: &mut Grid) -> SearchResult {
    let (start, end) = (grid.start().unwrap(), grid.end().unwrap());
    algorithm.run(grid, start, end)
}

#[test]
fn fuzz() {
    const N: usize = 8;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, N, &mut rng, false);
        let (start, end) = (grid.start().unwrap(), grid.end().unwrap());
        let reachable = grid.reachable(start, end);
        for algorithm in Algorithm::ALL {
            let result = run(algorithm, &mut grid);
            // Show the grid if the outcome is wrong
            if result.success != reachable {
                visualize_grid(&grid);
            }
            assert_eq!(result.success, reachable, "{algorithm}");
            if reachable {
                assert!(is_continuous_path(&grid, &result.path));
            } else {
                let component = grid.component_of(start);
                assert!(result
                    .visited_order
                    .iter()
                    .all(|&ix| grid.component_of(ix) == component));
                let size = (0..grid.len())
                    .filter(|&ix| grid.reachable(start, ix))
                    .count();
                assert_eq!(result.nodes_visited(), size);
            }
        }
    }
}

#[test]
fn fuzz_hops() {
    const N: usize = 7;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, N, &mut rng, true);
        let (start, end) = (grid.start().unwrap(), grid.end().unwrap());
        let expected = brute_force_hops(&grid, start, end);
        let result = run(Algorithm::Bfs, &mut grid);
        assert_eq!(result.success, expected.is_some());
        if let Some(hops) = expected {
            assert_eq!(result.path_length(), hops + 1);
        }
        assert!(result.visited_order.len() <= grid.len());
    }
}

#[test]
fn fuzz_cost() {
    const N: usize = 7;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, N, &mut rng, true);
        let dijkstra = run(Algorithm::Dijkstra, &mut grid);
        let astar = run(Algorithm::Astar, &mut grid);
        assert_eq!(dijkstra.success, astar.success);
        if dijkstra.success {
            let dijkstra_cost = path_cost(&grid, &dijkstra.path);
            let astar_cost = path_cost(&grid, &astar.path);
            if dijkstra_cost != astar_cost {
                println!("Dijkstra cost: {dijkstra_cost}; A* cost: {astar_cost}");
                visualize_grid(&grid);
            }
            assert_eq!(dijkstra_cost, astar_cost);
            assert!(astar.nodes_visited() <= dijkstra.nodes_visited());
            // Breadth-first search ignores weights, so its path can only cost more.
            let bfs = run(Algorithm::Bfs, &mut grid);
            assert!(path_cost(&grid, &bfs.path) >= dijkstra_cost);
        }
    }
}

#[test]
fn fuzz_edits_keep_components_consistent() {
    const N: usize = 6;
    let mut rng = StdRng::seed_from_u64(0);
    let mut grid = Grid::new(N, N);
    for _ in 0..5000 {
        let (row, col) = (rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
        grid.toggle_wall(row, col);
        grid.update();
        let (start, end) = (grid.start().unwrap(), grid.end().unwrap());
        let expected = brute_force_hops(&grid, start, end).is_some();
        assert_eq!(grid.reachable(start, end), expected);
    }
}
