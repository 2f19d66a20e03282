use route_finder::{
    solver::{astar::AstarSolver, GridSolver},
    Grid,
};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks a wall
// - S marks the start
// - E marks the end
//
// Cells have a 4-neighborhood

fn main() {
    env_logger::init();
    let mut grid = Grid::new(3, 3);
    grid.move_start(0, 0);
    grid.move_end(2, 2);
    grid.add_wall(1, 1);
    grid.update();
    println!("{}", grid);
    let result = AstarSolver::new().solve_grid(&mut grid).unwrap();
    println!("Path:");
    for p in result.path_positions(&grid) {
        println!("{:?}", p);
    }
}
