use serde::{Deserialize, Serialize};

use crate::direction::Direction;

/// Grid position in logical cell coordinates, 0-indexed.
///
/// Coordinates are signed so that a step off the board can be represented
/// and rejected by [`Grid::in_bounds`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn offset(self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

/// Board dimensions, fixed for the lifetime of an engine.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    pub rows: u16,
    pub cols: u16,
}

impl Grid {
    #[must_use]
    pub const fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }

    /// Returns true when `cell` lies inside the board.
    #[must_use]
    pub fn in_bounds(self, cell: Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && cell.row < i32::from(self.rows)
            && cell.col < i32::from(self.cols)
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.rows) * usize::from(self.cols)
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..i32::from(self.rows))
            .flat_map(move |row| (0..i32::from(self.cols)).map(move |col| Cell { row, col }))
    }
}

#[cfg(test)]
mod tests {
    use crate::direction::Direction;

    use super::{Cell, Grid};

    #[test]
    fn bounds_are_half_open() {
        let grid = Grid::new(10, 10);

        assert!(grid.in_bounds(Cell::new(0, 0)));
        assert!(grid.in_bounds(Cell::new(9, 9)));
        assert!(!grid.in_bounds(Cell::new(10, 0)));
        assert!(!grid.in_bounds(Cell::new(0, 10)));
        assert!(!grid.in_bounds(Cell::new(-1, 3)));
        assert!(!grid.in_bounds(Cell::new(3, -1)));
    }

    #[test]
    fn non_square_grid_uses_rows_for_row_axis() {
        let grid = Grid::new(3, 7);

        assert!(grid.in_bounds(Cell::new(2, 6)));
        assert!(!grid.in_bounds(Cell::new(6, 2)));
        assert_eq!(grid.total_cells(), 21);
        assert_eq!(grid.cells().count(), 21);
    }

    #[test]
    fn offset_moves_one_cell() {
        let cell = Cell::new(4, 4);

        assert_eq!(cell.offset(Direction::Up), Cell::new(3, 4));
        assert_eq!(cell.offset(Direction::Down), Cell::new(5, 4));
        assert_eq!(cell.offset(Direction::Left), Cell::new(4, 3));
        assert_eq!(cell.offset(Direction::Right), Cell::new(4, 5));
    }
}
