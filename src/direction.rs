use serde::{Deserialize, Serialize};

use crate::grid::Cell;

/// Canonical movement directions on the grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the unit `(d_row, d_col)` step for this direction.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns true when `self` and `other` are antiparallel.
    #[must_use]
    pub fn is_opposite(self, other: Self) -> bool {
        other == self.opposite()
    }

    /// Returns the direction leading from `from` to an orthogonally adjacent `to`.
    #[must_use]
    pub fn between(from: Cell, to: Cell) -> Option<Self> {
        Self::ALL.into_iter().find(|direction| from.offset(*direction) == to)
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
///
/// `current` is the direction of travel, not an earlier unconsumed request.
#[must_use]
pub fn direction_change_is_valid(current: Direction, requested: Direction) -> bool {
    !current.is_opposite(requested)
}
