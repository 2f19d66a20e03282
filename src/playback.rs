//! Step-by-step reveal of a search result.
//!
//! A [Playback] turns a [SearchResult] into [Frame]s, each telling the presentation layer which
//! cell to reveal and how long to wait first. The playback never sleeps itself; the driver does,
//! which keeps the search engine free of timers. The revealed state is tracked in a view-state
//! keyed by `(row, col)` that lives beside the grid instead of inside its cells.
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use log::debug;

use crate::{grid::Grid, SearchResult};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Extra wait between the last visited cell and the first path cell.
pub const PHASE_PAUSE: Duration = Duration::from_millis(100);

/// Slider value giving the initial 10 ms step delay.
pub const DEFAULT_SPEED: u8 = 41;

/// Position of the speed slider, from 1 (slowest) to 100 (fastest).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationSpeed(u8);

impl Default for AnimationSpeed {
    fn default() -> Self {
        AnimationSpeed(DEFAULT_SPEED)
    }
}

impl AnimationSpeed {
    /// Clamps `value` into the slider range.
    pub fn new(value: u8) -> AnimationSpeed {
        AnimationSpeed(value.clamp(1, 100))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Delay before each visited cell is revealed.
    pub fn step_delay(&self) -> Duration {
        let millis = 51_i32 - self.0 as i32;
        Duration::from_millis(millis.max(1) as u64)
    }

    /// Path cells are revealed at half the pace of visited cells.
    pub fn path_delay(&self) -> Duration {
        self.step_delay() * 2
    }

    pub fn label(&self) -> &'static str {
        match self.0 {
            0..=29 => "Slow",
            30..=69 => "Medium",
            _ => "Fast",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellClass {
    Visited,
    Path,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub row: i32,
    pub col: i32,
    pub class: CellClass,
    /// How long the driver waits before revealing this cell.
    pub delay: Duration,
}

/// Shared stop switch of a [Playback]. Cloning it lets another part of the application cancel the
/// animation, e.g. when the user starts a new run or clears the board.
#[derive(Clone, Debug)]
pub struct PlaybackHandle {
    active: Arc<AtomicBool>,
}

impl PlaybackHandle {
    pub fn stop(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct Playback {
    frames: VecDeque<Frame>,
    handle: PlaybackHandle,
    view: FxIndexMap<(i32, i32), CellClass>,
}

impl Playback {
    /// Builds the frames of `result`. The start and end cells are never revealed since they keep
    /// their own markers.
    pub fn new(grid: &Grid, result: &SearchResult, speed: AnimationSpeed) -> Playback {
        let shown = |ix: &&usize| !grid.cell_at(**ix).has_role();
        let visited = result.visited_order.iter().filter(shown).map(|&ix| {
            let (row, col) = grid.cell_at(ix).position();
            Frame {
                row,
                col,
                class: CellClass::Visited,
                delay: speed.step_delay(),
            }
        });
        let path = result
            .path
            .iter()
            .filter(shown)
            .enumerate()
            .map(|(i, &ix)| {
                let (row, col) = grid.cell_at(ix).position();
                let pause = if i == 0 { PHASE_PAUSE } else { Duration::ZERO };
                Frame {
                    row,
                    col,
                    class: CellClass::Path,
                    delay: pause + speed.path_delay(),
                }
            });
        let frames = visited.chain(path).collect::<VecDeque<Frame>>();
        debug!("Prepared {} playback frames", frames.len());
        Playback {
            frames,
            handle: PlaybackHandle {
                active: Arc::new(AtomicBool::new(true)),
            },
            view: FxIndexMap::default(),
        }
    }

    pub fn handle(&self) -> PlaybackHandle {
        self.handle.clone()
    }

    pub fn stop(&self) {
        self.handle.stop();
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_active()
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    /// Total wait of the frames that have not been shown yet.
    pub fn remaining_duration(&self) -> Duration {
        self.frames.iter().map(|frame| frame.delay).sum()
    }

    /// Reveals every remaining frame at once and ends the playback.
    pub fn reveal_all(&mut self) {
        while let Some(frame) = self.frames.pop_front() {
            self.apply(&frame);
        }
        self.handle.stop();
    }

    /// Forgets everything revealed so far.
    pub fn clear(&mut self) {
        self.view.clear();
    }

    /// Revealed cells in reveal order. A path cell replaces its earlier visited mark.
    pub fn view(&self) -> &FxIndexMap<(i32, i32), CellClass> {
        &self.view
    }

    pub fn class_at(&self, row: i32, col: i32) -> Option<CellClass> {
        self.view.get(&(row, col)).copied()
    }

    fn apply(&mut self, frame: &Frame) {
        let key = (frame.row, frame.col);
        self.view.shift_remove(&key);
        self.view.insert(key, frame.class);
    }
}

impl Iterator for Playback {
    type Item = Frame;

    /// Yields the next frame unless the playback was stopped or has run out of frames.
    fn next(&mut self) -> Option<Frame> {
        if !self.is_active() {
            return None;
        }
        match self.frames.pop_front() {
            Some(frame) => {
                self.apply(&frame);
                Some(frame)
            }
            None => {
                self.handle.stop();
                None
            }
        }
    }
}
