use core::fmt;
use std::error::Error;

use log::{info, warn};

use crate::{
    editor::Editor,
    grid::Grid,
    playback::{AnimationSpeed, Playback},
    solver::{Algorithm, ParseAlgorithmError},
    stats::{run_with_stats, RunStats, StatsView},
};

/// Why a run could not be started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisualizeError {
    NoAlgorithmSelected,
    MissingEndpoints,
}

impl fmt::Display for VisualizeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VisualizeError::NoAlgorithmSelected => f.write_str("select an algorithm first"),
            VisualizeError::MissingEndpoints => f.write_str("set a start and an end first"),
        }
    }
}

impl Error for VisualizeError {}

/// The control panel of the visualizer: it owns the grid and ties together algorithm selection,
/// editing, animation and statistics.
#[derive(Debug, Default)]
pub struct Session {
    grid: Grid,
    pub editor: Editor,
    algorithm: Option<Algorithm>,
    speed: AnimationSpeed,
    playback: Option<Playback>,
    stats: StatsView,
}

impl Session {
    pub fn new(rows: usize, cols: usize) -> Session {
        Session {
            grid: Grid::new(rows, cols),
            ..Session::default()
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn algorithm(&self) -> Option<Algorithm> {
        self.algorithm
    }

    pub fn select_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = Some(algorithm);
    }

    /// Selects the algorithm registered under `key`. An unknown key leaves the selection as is.
    pub fn select_algorithm_key(&mut self, key: &str) -> Result<Algorithm, ParseAlgorithmError> {
        let algorithm = key.parse::<Algorithm>()?;
        self.algorithm = Some(algorithm);
        Ok(algorithm)
    }

    pub fn speed(&self) -> AnimationSpeed {
        self.speed
    }

    pub fn set_speed(&mut self, value: u8) {
        self.speed = AnimationSpeed::new(value);
    }

    pub fn is_visualizing(&self) -> bool {
        self.playback.as_ref().is_some_and(Playback::is_active)
    }

    pub fn playback_mut(&mut self) -> Option<&mut Playback> {
        self.playback.as_mut()
    }

    pub fn last_stats(&self) -> Option<&RunStats> {
        self.stats.run_stats()
    }

    /// The statistics panel: the last run, the reason the last run could not start, or nothing
    /// after a clear.
    pub fn stats(&self) -> &StatsView {
        &self.stats
    }

    /// Runs the selected algorithm on a clean copy of the current board and prepares its
    /// animation. Editing stays disabled until [finish_playback](Self::finish_playback) or one of
    /// the clear actions.
    pub fn visualize(&mut self) -> Result<RunStats, VisualizeError> {
        let result = self.try_visualize();
        match &result {
            Ok(stats) => self.stats = StatsView::Run(stats.clone()),
            Err(err) => self.stats = StatsView::Error(err.to_string()),
        }
        result
    }

    fn try_visualize(&mut self) -> Result<RunStats, VisualizeError> {
        let algorithm = self.algorithm.ok_or(VisualizeError::NoAlgorithmSelected)?;
        let (Some(start), Some(end)) = (self.grid.start(), self.grid.end()) else {
            return Err(VisualizeError::MissingEndpoints);
        };
        self.stop_playback();
        self.grid.clear_path();
        self.grid.update();
        if !self.grid.reachable(start, end) {
            info!("End is not reachable from the start, {algorithm} will exhaust the board");
        }
        let Some((result, stats)) = run_with_stats(algorithm, &mut self.grid) else {
            warn!("Endpoints disappeared before {algorithm} could run");
            return Err(VisualizeError::MissingEndpoints);
        };
        self.playback = Some(Playback::new(&self.grid, &result, self.speed));
        self.editor.disable();
        Ok(stats)
    }

    /// Called by the driver once the playback has run out.
    pub fn finish_playback(&mut self) {
        self.stop_playback();
        self.editor.enable();
    }

    fn stop_playback(&mut self) {
        if let Some(playback) = &self.playback {
            playback.stop();
        }
    }

    /// Forwards a press to the editor; ignored while a run is being animated.
    pub fn press(&mut self, row: i32, col: i32) {
        self.editor.press(&mut self.grid, row, col);
    }

    pub fn enter(&mut self, row: i32, col: i32) {
        self.editor.enter(&mut self.grid, row, col);
    }

    pub fn release(&mut self) {
        self.editor.release();
    }

    pub fn clear_path(&mut self) {
        self.interrupt();
        self.grid.clear_path();
    }

    /// Clears both walls and weights.
    pub fn clear_walls(&mut self) {
        self.interrupt();
        self.grid.clear_walls();
        self.grid.clear_weights();
    }

    pub fn clear_board(&mut self) {
        self.interrupt();
        self.grid.clear_board();
    }

    pub fn reset(&mut self) {
        self.interrupt();
        self.grid.reset();
    }

    /// Cancels any animation, drops what it revealed and its statistics, and hands control back
    /// to the editor.
    fn interrupt(&mut self) {
        if let Some(mut playback) = self.playback.take() {
            playback.stop();
            playback.clear();
        }
        self.stats = StatsView::Empty;
        self.editor.enable();
    }
}
