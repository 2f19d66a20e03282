//! Pointer-driven grid editing.
//!
//! Pressing on the start or the end drags it around; pressing on a wall erases walls for the rest
//! of the drag; pressing anywhere else paints with the current [Brush]. The editor only translates
//! gestures into [Grid] edits, so every invalid target is silently ignored by the grid itself.
use log::trace;

use crate::{grid::Grid, Cost};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Brush {
    Wall,
    Weight(Cost),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    Idle,
    MovingStart,
    MovingEnd,
    Drawing,
    Erasing,
}

#[derive(Clone, Debug)]
pub struct Editor {
    pub brush: Brush,
    mode: DragMode,
    enabled: bool,
}

impl Default for Editor {
    fn default() -> Editor {
        Editor {
            brush: Brush::Wall,
            mode: DragMode::Idle,
            enabled: true,
        }
    }
}

impl Editor {
    pub fn new() -> Editor {
        Editor::default()
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Stops reacting to input and abandons the current drag.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.mode = DragMode::Idle;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn press(&mut self, grid: &mut Grid, row: i32, col: i32) {
        if !self.enabled {
            return;
        }
        let Some(cell) = grid.cell(row, col) else {
            self.mode = DragMode::Idle;
            return;
        };
        self.mode = if cell.is_start {
            DragMode::MovingStart
        } else if cell.is_end {
            DragMode::MovingEnd
        } else if cell.is_wall {
            DragMode::Erasing
        } else {
            DragMode::Drawing
        };
        trace!("Pressed ({row}, {col}), now {:?}", self.mode);
        self.apply(grid, row, col);
    }

    /// The pointer moved onto `(row, col)` while pressed.
    pub fn enter(&mut self, grid: &mut Grid, row: i32, col: i32) {
        if self.enabled {
            self.apply(grid, row, col);
        }
    }

    pub fn release(&mut self) {
        self.mode = DragMode::Idle;
    }

    fn apply(&self, grid: &mut Grid, row: i32, col: i32) {
        match (self.mode, self.brush) {
            (DragMode::Idle, _) => {}
            (DragMode::MovingStart, _) => grid.move_start(row, col),
            (DragMode::MovingEnd, _) => grid.move_end(row, col),
            (DragMode::Drawing, Brush::Wall) => grid.add_wall(row, col),
            (DragMode::Drawing, Brush::Weight(weight)) => grid.set_weight(row, col, weight),
            (DragMode::Erasing, _) => grid.remove_wall(row, col),
        }
    }
}
