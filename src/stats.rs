//! Statistics of a finished search, formatted the way the visualizer's side panel shows them.
use core::fmt;
use std::time::{Duration, Instant};

use log::warn;

use crate::{grid::Grid, path_cost, solver::Algorithm, Cost, SearchResult};

#[derive(Clone, Debug, PartialEq)]
pub struct RunStats {
    pub algorithm: Algorithm,
    pub nodes_visited: usize,
    /// Cells on the path, start and end included.
    pub path_length: usize,
    pub path_cost: Cost,
    pub execution_time: Duration,
    pub success: bool,
}

impl RunStats {
    pub fn from_result(
        algorithm: Algorithm,
        result: &SearchResult,
        grid: &Grid,
        execution_time: Duration,
    ) -> RunStats {
        RunStats {
            algorithm,
            nodes_visited: result.nodes_visited(),
            path_length: result.path_length(),
            path_cost: path_cost(grid, &result.path),
            execution_time,
            success: result.success,
        }
    }

    /// The path length as shown to the user.
    pub fn path_summary(&self) -> String {
        if !self.success {
            "No path found".to_owned()
        } else if self.path_length > 0 {
            self.path_length.to_string()
        } else {
            "-".to_owned()
        }
    }

    pub fn execution_millis(&self) -> f64 {
        self.execution_time.as_secs_f64() * 1000.0
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Algorithm: {}", self.algorithm)?;
        writeln!(f, "Visited: {}", self.nodes_visited)?;
        writeln!(f, "Path length: {}", self.path_summary())?;
        write!(f, "Time: {:.2} ms", self.execution_millis())
    }
}

/// What the statistics panel currently shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum StatsView {
    /// Nothing has run since the last reset.
    #[default]
    Empty,
    Run(RunStats),
    /// A run could not be started; the message takes the place of the path length.
    Error(String),
}

impl StatsView {
    pub fn run_stats(&self) -> Option<&RunStats> {
        match self {
            StatsView::Run(stats) => Some(stats),
            _ => None,
        }
    }
}

impl fmt::Display for StatsView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StatsView::Run(stats) => write!(f, "{stats}"),
            StatsView::Empty => {
                write!(f, "Algorithm: -\nVisited: -\nPath length: -\nTime: -")
            }
            StatsView::Error(message) => {
                write!(
                    f,
                    "Algorithm: Error\nVisited: -\nPath length: {message}\nTime: -"
                )
            }
        }
    }
}

/// Runs `algorithm` between the grid's own start and end and times it.
pub fn run_with_stats(algorithm: Algorithm, grid: &mut Grid) -> Option<(SearchResult, RunStats)> {
    let (Some(start), Some(end)) = (grid.start(), grid.end()) else {
        warn!("Cannot run {algorithm} without a start and an end");
        return None;
    };
    let now = Instant::now();
    let result = algorithm.run(grid, start, end);
    let elapsed = now.elapsed();
    let stats = RunStats::from_result(algorithm, &result, grid, elapsed);
    Some((result, stats))
}

/// Display name for an algorithm key. Besides the four searches this knows the names of the
/// planned ones; any other key is echoed back.
pub fn format_algorithm_name(key: &str) -> String {
    if let Ok(algorithm) = key.parse::<Algorithm>() {
        return algorithm.display_name().to_owned();
    }
    match key {
        "greedy" => "Greedy Best-First Search",
        "swarm" => "Swarm Algorithm",
        "convergent" => "Convergent Swarm",
        "bidirectional" => "Bidirectional Swarm",
        other => other,
    }
    .to_owned()
}
