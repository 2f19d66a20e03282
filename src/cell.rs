use crate::Cost;

/// Traversal cost of entering a cell that has not been weighted.
pub const DEFAULT_WEIGHT: Cost = 1.0;

/// A single grid position. The role flags and the weight persist across runs, while `visited`,
/// `distance`, `heuristic`, `total_distance` and `previous` only describe the latest search.
///
/// `previous` holds the row-major index of the predecessor on the best known path, so cells never
/// own each other and a [Grid](crate::grid::Grid) can reset them without untangling references.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
    pub is_start: bool,
    pub is_end: bool,
    pub is_wall: bool,
    pub weight: Cost,
    pub visited: bool,
    pub distance: Cost,
    pub heuristic: Cost,
    pub total_distance: Cost,
    pub previous: Option<usize>,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Cell {
        Cell {
            row,
            col,
            is_start: false,
            is_end: false,
            is_wall: false,
            weight: DEFAULT_WEIGHT,
            visited: false,
            distance: Cost::INFINITY,
            heuristic: 0.0,
            total_distance: Cost::INFINITY,
            previous: None,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.row, self.col)
    }

    /// Start and end cells carry a role; every other cell may be edited freely.
    pub fn has_role(&self) -> bool {
        self.is_start || self.is_end
    }

    pub fn is_weighted(&self) -> bool {
        self.weight > DEFAULT_WEIGHT && !self.is_wall
    }

    /// Resets the transient search state, keeping walls, weights and roles.
    pub fn reset(&mut self) {
        self.visited = false;
        self.distance = Cost::INFINITY;
        self.heuristic = 0.0;
        self.total_distance = Cost::INFINITY;
        self.previous = None;
    }

    /// Returns the cell to the state it had right after construction.
    pub fn clear(&mut self) {
        *self = Cell::new(self.row, self.col);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_keeps_structure() {
        let mut cell = Cell::new(2, 3);
        cell.is_wall = true;
        cell.weight = 5.0;
        cell.visited = true;
        cell.distance = 4.0;
        cell.heuristic = 2.0;
        cell.total_distance = 6.0;
        cell.previous = Some(7);
        cell.reset();
        assert!(cell.is_wall);
        assert_eq!(cell.weight, 5.0);
        assert!(!cell.visited);
        assert_eq!(cell.distance, Cost::INFINITY);
        assert_eq!(cell.heuristic, 0.0);
        assert_eq!(cell.total_distance, Cost::INFINITY);
        assert_eq!(cell.previous, None);
    }

    #[test]
    fn clear_restores_defaults() {
        let mut cell = Cell::new(1, 1);
        cell.is_start = true;
        cell.weight = 3.0;
        cell.visited = true;
        cell.clear();
        assert_eq!(cell, Cell::new(1, 1));
    }

    #[test]
    fn walls_are_never_weighted() {
        let mut cell = Cell::new(0, 0);
        cell.weight = 5.0;
        assert!(cell.is_weighted());
        cell.is_wall = true;
        assert!(!cell.is_weighted());
    }
}
