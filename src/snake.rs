use std::collections::VecDeque;
use std::iter;

use crate::direction::Direction;
use crate::grid::Cell;
use crate::speed::Speed;

/// Mutable snake body, heading and speed.
///
/// The head is kept apart from the trailing segments, which are stored tail
/// first, so a snake can never lose its last cell. The starting values are
/// kept so [`SnakeState::reset`] can restore them.
#[derive(Debug, Clone)]
pub struct SnakeState {
    head: Cell,
    trail: VecDeque<Cell>,
    direction: Direction,
    speed: Speed,
    initial_head: Cell,
    initial_trail: Vec<Cell>,
    initial_direction: Direction,
    initial_speed: Speed,
}

impl SnakeState {
    /// Creates a snake from segments ordered tail to head. Returns `None`
    /// when `segments` is empty.
    #[must_use]
    pub fn from_segments(
        mut segments: Vec<Cell>,
        direction: Direction,
        speed: Speed,
    ) -> Option<Self> {
        let head = segments.pop()?;

        Some(Self {
            head,
            trail: VecDeque::from(segments.clone()),
            direction,
            speed,
            initial_head: head,
            initial_trail: segments,
            initial_direction: direction,
            initial_speed: speed,
        })
    }

    /// Returns the cell the head would enter moving in `direction`.
    #[must_use]
    pub fn next_head(&self, direction: Direction) -> Cell {
        self.head.offset(direction)
    }

    /// Moves the head to `next_head`, dropping the tail unless the snake grew
    /// this step.
    pub fn advance(&mut self, next_head: Cell, grew: bool) {
        self.trail.push_back(self.head);
        self.head = next_head;
        if !grew {
            let _ = self.trail.pop_front();
        }
    }

    /// Returns true if `cell` is part of the current body, tail included.
    ///
    /// Must be called before [`SnakeState::advance`] for the same step.
    #[must_use]
    pub fn collides_self(&self, cell: Cell) -> bool {
        self.head == cell || self.trail.contains(&cell)
    }

    /// Restores body, direction and speed to their starting values.
    pub fn reset(&mut self) {
        self.head = self.initial_head;
        self.trail = VecDeque::from(self.initial_trail.clone());
        self.direction = self.initial_direction;
        self.speed = self.initial_speed;
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        self.head
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.trail.len() + 1
    }

    /// Always false: a snake keeps at least its head.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the current direction of travel.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    #[must_use]
    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn speed_mut(&mut self) -> &mut Speed {
        &mut self.speed
    }

    /// Iterates over body segments from tail to head.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.trail.iter().chain(iter::once(&self.head))
    }
}
