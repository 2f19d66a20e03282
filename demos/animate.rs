use route_finder::{playback::CellClass, session::Session, Algorithm};
use std::thread;

// Drives a session the way a front end would: draw a wall with the pointer, run A* and replay the
// visited cells and the path frame by frame in the terminal.

fn main() {
    env_logger::init();
    let mut session = Session::new(10, 24);
    // Draw a vertical wall between the start (5, 6) and the end (5, 18).
    session.press(1, 12);
    for row in 2..9 {
        session.enter(row, 12);
    }
    session.release();
    session.select_algorithm(Algorithm::Astar);
    session.set_speed(90);

    let stats = match session.visualize() {
        Ok(stats) => stats,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };
    if let Some(playback) = session.playback_mut() {
        for frame in playback.by_ref() {
            thread::sleep(frame.delay);
            let marker = match frame.class {
                CellClass::Visited => "visited",
                CellClass::Path => "path",
            };
            println!("({}, {}) {marker}", frame.row, frame.col);
        }
    }
    session.finish_playback();
    println!("{}", session.grid());
    println!("{stats}");
}
