use crate::cell::{Cell, DEFAULT_WEIGHT};
use crate::Cost;
use core::fmt;
use log::{info, trace};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

pub const DEFAULT_ROWS: usize = 20;
pub const DEFAULT_COLS: usize = 50;

/// Up to four orthogonal neighbours are ever produced.
pub const N_NEIGHBOURS: usize = 4;

/// Row/column offsets in enumeration order: up, left, down, right.
const NEUMANN_OFFSETS: [(i32, i32); N_NEIGHBOURS] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

/// [Grid] stores its [Cell]s in a flat row-major [Vec] and refers to the start and end cell by
/// index. It also maintains the connected components of open cells in a [UnionFind] structure,
/// which lets callers tell apart an unreachable end from a search that has yet to run.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    start: Option<usize>,
    end: Option<usize>,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl Grid {
    /// Creates a grid with the start placed at `(rows / 2, cols / 4)` and the end at
    /// `(rows / 2, 3 * cols / 4)`.
    ///
    /// # Panics
    /// If `rows` is zero or `cols` is smaller than two, since the default start and end would
    /// then fall outside the grid or onto the same cell.
    pub fn new(rows: usize, cols: usize) -> Grid {
        assert!(rows >= 1, "a grid needs at least one row");
        assert!(cols >= 2, "a grid needs at least two columns");
        let mut grid = Grid {
            rows,
            cols,
            cells: Vec::new(),
            start: None,
            end: None,
            components: UnionFind::new(0),
            components_dirty: false,
        };
        grid.initialize();
        grid
    }

    fn initialize(&mut self) {
        let (rows, cols) = (self.rows as i32, self.cols as i32);
        self.cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Cell::new(row, col)))
            .collect();
        let start = self.compute_ix(self.rows / 2, self.cols / 4);
        let end = self.compute_ix(self.rows / 2, 3 * self.cols / 4);
        self.cells[start].is_start = true;
        self.cells[end].is_end = true;
        self.start = Some(start);
        self.end = Some(end);
        self.generate_components();
    }

    fn compute_ix(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of cells in the grid.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major index of `(row, col)`, or [None] if it lies outside the grid.
    pub fn index_of(&self, row: i32, col: i32) -> Option<usize> {
        if self.in_bounds(row, col) {
            Some(self.compute_ix(row as usize, col as usize))
        } else {
            None
        }
    }

    /// Bounds-checked lookup.
    pub fn cell(&self, row: i32, col: i32) -> Option<&Cell> {
        self.index_of(row, col).map(|ix| &self.cells[ix])
    }

    pub fn cell_at(&self, ix: usize) -> &Cell {
        &self.cells[ix]
    }

    pub(crate) fn cell_at_mut(&mut self, ix: usize) -> &mut Cell {
        &mut self.cells[ix]
    }

    /// All cells in row-major order.
    pub fn all_cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn all_cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn start(&self) -> Option<usize> {
        self.start
    }

    pub fn end(&self) -> Option<usize> {
        self.end
    }

    pub fn start_cell(&self) -> Option<&Cell> {
        self.start.map(|ix| &self.cells[ix])
    }

    pub fn end_cell(&self) -> Option<&Cell> {
        self.end.map(|ix| &self.cells[ix])
    }

    /// Open orthogonal neighbours of the cell at `ix`, enumerated up, left, down, right.
    pub fn neighbours(&self, ix: usize) -> SmallVec<[usize; N_NEIGHBOURS]> {
        let cell = &self.cells[ix];
        NEUMANN_OFFSETS
            .iter()
            .filter_map(|(dr, dc)| self.index_of(cell.row + dr, cell.col + dc))
            .filter(|&n| !self.cells[n].is_wall)
            .collect()
    }

    /// Index of a cell that may be edited, i.e. one that exists and holds no role.
    fn editable_ix(&self, row: i32, col: i32) -> Option<usize> {
        match self.index_of(row, col) {
            Some(ix) if !self.cells[ix].has_role() => Some(ix),
            _ => {
                trace!("Ignoring edit of ({row}, {col})");
                None
            }
        }
    }

    pub fn toggle_wall(&mut self, row: i32, col: i32) {
        if let Some(ix) = self.editable_ix(row, col) {
            if self.cells[ix].is_wall {
                self.unblock(ix);
            } else {
                self.block(ix);
            }
        }
    }

    pub fn add_wall(&mut self, row: i32, col: i32) {
        if let Some(ix) = self.editable_ix(row, col) {
            if !self.cells[ix].is_wall {
                self.block(ix);
            }
        }
    }

    pub fn remove_wall(&mut self, row: i32, col: i32) {
        if let Some(ix) = self.editable_ix(row, col) {
            if self.cells[ix].is_wall {
                self.unblock(ix);
            }
        }
    }

    /// A new wall may split a component in two, which the [UnionFind] cannot express, so the
    /// components are only flagged as dirty.
    fn block(&mut self, ix: usize) {
        self.cells[ix].is_wall = true;
        self.components_dirty = true;
    }

    /// Joins the freed cell with the components of its open neighbours.
    fn unblock(&mut self, ix: usize) {
        self.cells[ix].is_wall = false;
        for n in self.neighbours(ix) {
            self.components.union(ix, n);
        }
    }

    /// Overwrites the weight of an open cell without a role. Weights are expected to be positive
    /// and finite; nothing stops a caller from passing anything else.
    pub fn set_weight(&mut self, row: i32, col: i32, weight: Cost) {
        debug_assert!(weight.is_finite() && weight > 0.0);
        if let Some(ix) = self.editable_ix(row, col) {
            if !self.cells[ix].is_wall {
                self.cells[ix].weight = weight;
            }
        }
    }

    /// Moves the start onto `(row, col)` unless that cell is a wall or the end. The cell taking
    /// the role drops any weight it had.
    pub fn move_start(&mut self, row: i32, col: i32) {
        match self.index_of(row, col) {
            Some(ix) if !self.cells[ix].is_wall && !self.cells[ix].is_end => {
                if let Some(old) = self.start {
                    self.cells[old].is_start = false;
                }
                self.cells[ix].is_start = true;
                self.cells[ix].weight = DEFAULT_WEIGHT;
                self.start = Some(ix);
            }
            _ => trace!("Start cannot move onto ({row}, {col})"),
        }
    }

    /// Moves the end onto `(row, col)` unless that cell is a wall or the start. The cell taking
    /// the role drops any weight it had.
    pub fn move_end(&mut self, row: i32, col: i32) {
        match self.index_of(row, col) {
            Some(ix) if !self.cells[ix].is_wall && !self.cells[ix].is_start => {
                if let Some(old) = self.end {
                    self.cells[old].is_end = false;
                }
                self.cells[ix].is_end = true;
                self.cells[ix].weight = DEFAULT_WEIGHT;
                self.end = Some(ix);
            }
            _ => trace!("End cannot move onto ({row}, {col})"),
        }
    }

    /// Resets the transient search state of every cell, keeping walls, weights and roles.
    pub fn clear_path(&mut self) {
        self.cells.iter_mut().for_each(Cell::reset);
    }

    pub fn clear_walls(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.is_wall = false;
        }
        self.generate_components();
    }

    pub fn clear_weights(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.weight > DEFAULT_WEIGHT) {
            cell.weight = DEFAULT_WEIGHT;
        }
    }

    /// Clears walls, weights and search state of every cell except the start and the end.
    pub fn clear_board(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| !c.has_role()) {
            cell.clear();
        }
        self.generate_components();
    }

    /// Discards every edit and restores the default start and end placement.
    pub fn reset(&mut self) {
        self.initialize();
    }

    /// Retrieves the component id the cell at `ix` belongs to.
    pub fn component_of(&self, ix: usize) -> usize {
        self.components.find(ix)
    }

    /// Checks if `a` and `b` are open cells on the same component. Only meaningful on up-to-date
    /// components, see [update](Self::update).
    pub fn reachable(&self, a: usize, b: usize) -> bool {
        !self.cells[a].is_wall && !self.cells[b].is_wall && self.components.equiv(a, b)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    pub fn components_dirty(&self) -> bool {
        self.components_dirty
    }

    /// Generates a new [UnionFind] structure and links up open orthogonal neighbours.
    pub fn generate_components(&mut self) {
        info!("Generating connected components");
        self.components = UnionFind::new(self.cells.len());
        self.components_dirty = false;
        for ix in 0..self.cells.len() {
            if self.cells[ix].is_wall {
                continue;
            }
            let (row, col) = self.cells[ix].position();
            // Linking down and right covers every edge exactly once.
            for (dr, dc) in [(1, 0), (0, 1)] {
                if let Some(n) = self.index_of(row + dr, col + dc) {
                    if !self.cells[n].is_wall {
                        self.components.union(ix, n);
                    }
                }
            }
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            let line = row
                .iter()
                .map(|cell| {
                    if cell.is_start {
                        'S'
                    } else if cell.is_end {
                        'E'
                    } else if cell.is_wall {
                        '#'
                    } else if cell.is_weighted() {
                        // Only whole weights below 10 fit a digit.
                        if cell.weight.fract() == 0.0 {
                            char::from_digit(cell.weight as u32, 10).unwrap_or('+')
                        } else {
                            '+'
                        }
                    } else {
                        '.'
                    }
                })
                .collect::<String>();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walls(grid: &Grid) -> usize {
        grid.all_cells().iter().filter(|c| c.is_wall).count()
    }

    #[test]
    fn default_placement() {
        let grid = Grid::default();
        assert_eq!(grid.dimensions(), (20, 50));
        assert_eq!(grid.start_cell().unwrap().position(), (10, 12));
        assert_eq!(grid.end_cell().unwrap().position(), (10, 37));
        let grid = Grid::new(25, 50);
        assert_eq!(grid.start_cell().unwrap().position(), (12, 12));
        assert_eq!(grid.end_cell().unwrap().position(), (12, 37));
    }

    #[test]
    #[should_panic]
    fn single_column_is_rejected() {
        Grid::new(3, 1);
    }

    #[test]
    fn lookup_is_bounds_checked() {
        let grid = Grid::new(5, 5);
        assert!(grid.cell(-1, 0).is_none());
        assert!(grid.cell(0, 5).is_none());
        assert!(grid.cell(5, 0).is_none());
        assert_eq!(grid.cell(4, 3).unwrap().position(), (4, 3));
        assert_eq!(grid.index_of(1, 2), Some(7));
    }

    #[test]
    fn all_cells_are_row_major() {
        let grid = Grid::new(3, 4);
        let positions = grid
            .all_cells()
            .iter()
            .map(Cell::position)
            .collect::<Vec<_>>();
        assert_eq!(positions[0], (0, 0));
        assert_eq!(positions[3], (0, 3));
        assert_eq!(positions[4], (1, 0));
        assert_eq!(positions.len(), 12);
    }

    #[test]
    fn neighbour_order_skips_walls_and_edges() {
        // The default endpoints sit on (1, 0) and (1, 2), which cannot be walled.
        let mut grid = Grid::new(3, 3);
        grid.move_start(0, 0);
        grid.move_end(2, 2);
        let ix = |grid: &Grid, r, c| grid.index_of(r, c).unwrap();
        let centre = ix(&grid, 1, 1);
        let expected = [(0, 1), (1, 0), (2, 1), (1, 2)]
            .iter()
            .map(|&(r, c)| ix(&grid, r, c))
            .collect::<Vec<_>>();
        assert_eq!(grid.neighbours(centre).to_vec(), expected);
        grid.add_wall(1, 0);
        let expected = [(0, 1), (2, 1), (1, 2)]
            .iter()
            .map(|&(r, c)| ix(&grid, r, c))
            .collect::<Vec<_>>();
        assert_eq!(grid.neighbours(centre).to_vec(), expected);
        let corner = grid.index_of(0, 0).unwrap();
        assert_eq!(
            grid.neighbours(corner).to_vec(),
            vec![grid.index_of(0, 1).unwrap()]
        );
    }

    #[test]
    fn walls_skip_roles_and_out_of_range() {
        let mut grid = Grid::new(5, 5);
        let (sr, sc) = grid.start_cell().unwrap().position();
        let (er, ec) = grid.end_cell().unwrap().position();
        grid.add_wall(sr, sc);
        grid.toggle_wall(er, ec);
        grid.add_wall(-1, 2);
        grid.toggle_wall(9, 9);
        assert_eq!(walls(&grid), 0);
    }

    #[test]
    fn wall_edits_are_idempotent() {
        let mut grid = Grid::new(5, 5);
        grid.add_wall(0, 0);
        let once = grid.clone();
        grid.add_wall(0, 0);
        assert_eq!(grid.all_cells(), once.all_cells());
        grid.remove_wall(0, 0);
        grid.remove_wall(0, 0);
        assert_eq!(walls(&grid), 0);
        grid.toggle_wall(0, 0);
        assert!(grid.cell(0, 0).unwrap().is_wall);
        grid.toggle_wall(0, 0);
        assert!(!grid.cell(0, 0).unwrap().is_wall);
    }

    #[test]
    fn weights_skip_walls_and_roles() {
        let mut grid = Grid::new(5, 5);
        grid.add_wall(0, 0);
        grid.set_weight(0, 0, 5.0);
        let (sr, sc) = grid.start_cell().unwrap().position();
        grid.set_weight(sr, sc, 5.0);
        grid.set_weight(0, 1, 5.0);
        assert_eq!(grid.cell(0, 0).unwrap().weight, 1.0);
        assert_eq!(grid.cell(sr, sc).unwrap().weight, 1.0);
        assert_eq!(grid.cell(0, 1).unwrap().weight, 5.0);
        grid.clear_weights();
        assert_eq!(grid.cell(0, 1).unwrap().weight, 1.0);
    }

    #[test]
    fn moving_endpoints() {
        let mut grid = Grid::new(5, 5);
        let end = grid.end().unwrap();
        grid.move_start(0, 0);
        assert_eq!(grid.start_cell().unwrap().position(), (0, 0));
        assert_eq!(grid.all_cells().iter().filter(|c| c.is_start).count(), 1);
        // Onto the end, a wall and outside the grid: all ignored.
        let (er, ec) = grid.end_cell().unwrap().position();
        grid.move_start(er, ec);
        grid.add_wall(1, 1);
        grid.move_start(1, 1);
        grid.move_start(-3, 0);
        assert_eq!(grid.start_cell().unwrap().position(), (0, 0));
        // Onto itself is harmless.
        grid.move_start(0, 0);
        assert!(grid.cell(0, 0).unwrap().is_start);
        grid.move_end(0, 0);
        assert_eq!(grid.end(), Some(end));
        grid.move_end(4, 4);
        assert_eq!(grid.end_cell().unwrap().position(), (4, 4));
        assert!(!grid.cell_at(end).is_end);
    }

    #[test]
    fn clear_board_restores_open_cells() {
        let mut grid = Grid::new(5, 5);
        for row in 0..4 {
            grid.add_wall(row, 2);
        }
        grid.set_weight(4, 0, 5.0);
        grid.set_weight(0, 4, 3.0);
        grid.cell_at_mut(0).visited = true;
        grid.clear_board();
        for cell in grid.all_cells().iter().filter(|c| !c.has_role()) {
            assert!(!cell.is_wall);
            assert!(cell.weight <= 1.0);
            assert!(!cell.visited);
        }
        assert!(grid.start().is_some());
        assert!(grid.end().is_some());
    }

    #[test]
    fn reset_discards_edits() {
        let mut grid = Grid::new(5, 5);
        grid.add_wall(0, 0);
        grid.move_start(4, 0);
        grid.set_weight(3, 3, 7.0);
        grid.reset();
        let fresh = Grid::new(5, 5);
        assert_eq!(grid.all_cells(), fresh.all_cells());
        assert_eq!(grid.start(), fresh.start());
        assert_eq!(grid.end(), fresh.end());
    }

    /// Tests whether cells are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // |S.#..|
        // |..#..|
        // |..#.E|
        let mut grid = Grid::new(3, 5);
        grid.move_start(0, 0);
        grid.move_end(2, 4);
        for row in 0..3 {
            grid.add_wall(row, 2);
        }
        assert!(grid.components_dirty());
        grid.update();
        let ix = |r, c| grid.index_of(r, c).unwrap();
        assert!(grid.reachable(ix(0, 0), ix(2, 1)));
        assert!(!grid.reachable(ix(0, 0), ix(2, 4)));
        assert!(!grid.reachable(ix(0, 0), ix(1, 2)));
        assert_eq!(grid.component_of(ix(0, 3)), grid.component_of(ix(2, 4)));
    }

    #[test]
    fn removing_a_wall_joins_components() {
        let mut grid = Grid::new(3, 5);
        for row in 0..3 {
            grid.add_wall(row, 2);
        }
        grid.update();
        grid.remove_wall(1, 2);
        assert!(!grid.components_dirty());
        let a = grid.index_of(0, 0).unwrap();
        let b = grid.index_of(2, 4).unwrap();
        assert!(grid.reachable(a, b));
    }

    #[test]
    fn display_marks_roles_walls_and_weights() {
        let mut grid = Grid::new(2, 4);
        grid.add_wall(0, 0);
        grid.set_weight(0, 3, 5.0);
        grid.set_weight(0, 2, 12.0);
        assert_eq!(grid.to_string(), "#.+5\n.S.E\n");
        grid.set_weight(0, 1, 1.5);
        grid.set_weight(1, 0, 2.5);
        assert_eq!(grid.to_string(), "#++5\n+S.E\n");
    }

    #[test]
    fn endpoints_drop_the_weight_of_their_cell() {
        let mut grid = Grid::new(3, 5);
        grid.set_weight(0, 0, 7.0);
        grid.set_weight(2, 4, 4.0);
        grid.move_start(0, 0);
        grid.move_end(2, 4);
        grid.clear_board();
        assert_eq!(grid.start_cell().unwrap().weight, DEFAULT_WEIGHT);
        assert_eq!(grid.end_cell().unwrap().weight, DEFAULT_WEIGHT);
        let (start, end) = (grid.start().unwrap(), grid.end().unwrap());
        let result = crate::solver::dijkstra(&mut grid, start, end);
        let cost = crate::path_cost(&grid, &result.path);
        assert_eq!(cost, grid.end_cell().unwrap().distance + 1.0);
        assert_eq!(cost, 7.0);
    }
}
