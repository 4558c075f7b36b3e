//! The build grid and the enemy path.
//!
//! The path is fixed: a serpentine run of cells from the spawn on the left
//! edge to the base on the right edge. Waypoints are the pixel centers of
//! those cells, in walking order, and never change after construction.

use serde::{Deserialize, Serialize};

use crate::constants::{GRID_COLS, GRID_ROWS};
use crate::enums::CellKind;
use crate::types::{GridCell, Position};

/// Path cells as (row, col), spawn first, base last.
const PATH_CELLS: [(i32, i32); 59] = [
    (2, 0), (2, 1), (2, 2), (2, 3), (2, 4), (2, 5),
    (3, 5), (4, 5), (5, 5),
    (5, 6), (5, 7), (5, 8), (5, 9), (5, 10), (5, 11), (5, 12), (5, 13),
    (4, 13), (3, 13), (2, 13),
    (2, 14), (2, 15), (2, 16), (2, 17),
    (3, 17), (4, 17), (5, 17), (6, 17), (7, 17), (8, 17),
    (8, 16), (8, 15), (8, 14), (8, 13), (8, 12), (8, 11), (8, 10), (8, 9), (8, 8), (8, 7), (8, 6), (8, 5),
    (9, 5), (10, 5), (11, 5),
    (11, 6), (11, 7), (11, 8), (11, 9), (11, 10), (11, 11), (11, 12), (11, 13),
    (11, 14), (11, 15), (11, 16), (11, 17), (11, 18), (11, 19),
];

/// Grid of cell kinds plus the ordered waypoint list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapGrid {
    /// Row-major cells, `GRID_ROWS * GRID_COLS` long.
    cells: Vec<CellKind>,
    waypoints: Vec<Position>,
}

impl Default for MapGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl MapGrid {
    /// Build the standard map.
    pub fn new() -> Self {
        let mut cells = vec![CellKind::Grass; (GRID_COLS * GRID_ROWS) as usize];
        for &(row, col) in &PATH_CELLS {
            cells[index(GridCell::new(col, row))] = CellKind::Path;
        }

        let (spawn_row, spawn_col) = PATH_CELLS[0];
        let (base_row, base_col) = PATH_CELLS[PATH_CELLS.len() - 1];
        cells[index(GridCell::new(spawn_col, spawn_row))] = CellKind::Spawn;
        cells[index(GridCell::new(base_col, base_row))] = CellKind::Base;

        let waypoints = PATH_CELLS
            .iter()
            .map(|&(row, col)| GridCell::new(col, row).center())
            .collect();

        Self { cells, waypoints }
    }

    /// Kind of a cell, or `None` when out of bounds.
    pub fn cell_kind(&self, cell: GridCell) -> Option<CellKind> {
        cell.in_bounds().then(|| self.cells[index(cell)])
    }

    /// True iff the cell is in bounds and plain grass.
    pub fn can_build(&self, cell: GridCell) -> bool {
        self.cell_kind(cell) == Some(CellKind::Grass)
    }

    /// Mark a grass cell as occupied by a tower. Returns false if the cell
    /// was not buildable.
    pub fn occupy(&mut self, cell: GridCell) -> bool {
        if !self.can_build(cell) {
            return false;
        }
        self.cells[index(cell)] = CellKind::Occupied;
        true
    }

    /// Return an occupied cell to grass. Path, spawn and base cells are
    /// never touched.
    pub fn release(&mut self, cell: GridCell) -> bool {
        if self.cell_kind(cell) != Some(CellKind::Occupied) {
            return false;
        }
        self.cells[index(cell)] = CellKind::Grass;
        true
    }

    /// Path waypoints in walking order.
    pub fn waypoints(&self) -> &[Position] {
        &self.waypoints
    }

    /// Where enemies enter the map.
    pub fn spawn_point(&self) -> Position {
        self.waypoints[0]
    }
}

fn index(cell: GridCell) -> usize {
    (cell.row * GRID_COLS + cell.col) as usize
}
