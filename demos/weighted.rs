use route_finder::{path_cost, stats::run_with_stats, Algorithm, Grid};

// Compares every search on a board where the direct route crosses heavy cells
//  _______
// |   9   |
// | S 9 E |
// |   9   |
// |       |
//  _______
// Breadth-first and depth-first search walk straight through, the weighted searches go around.

fn main() {
    env_logger::init();
    let mut grid = Grid::new(4, 7);
    grid.move_start(1, 1);
    grid.move_end(1, 5);
    for row in 0..3 {
        grid.set_weight(row, 3, 9.0);
    }
    println!("{}", grid);
    for algorithm in Algorithm::ALL {
        let (result, stats) = run_with_stats(algorithm, &mut grid).unwrap();
        println!("{stats}");
        println!("Cost: {}\n", path_cost(&grid, &result.path));
    }
}
