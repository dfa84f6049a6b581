use std::collections::BTreeSet;

use rand::Rng;

use crate::error::EngineError;
use crate::grid::{Cell, Grid};
use crate::snake::SnakeState;

/// Uniform samples tried before falling back to enumerating free cells.
pub const MAX_REJECTION_ATTEMPTS: usize = 64;

/// Places food on uniformly random free cells.
///
/// Sampling is rejection based, which is cheap on a sparse board. After
/// `max_attempts` misses the free cells are enumerated and one is picked
/// uniformly, so placement always terminates.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FoodPolicy {
    max_attempts: usize,
}

impl Default for FoodPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_REJECTION_ATTEMPTS,
        }
    }
}

impl FoodPolicy {
    #[must_use]
    pub fn with_max_attempts(max_attempts: usize) -> Self {
        Self { max_attempts }
    }

    /// Picks a cell that is neither snake nor existing food.
    pub fn place<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        grid: Grid,
        snake: &SnakeState,
        food: &BTreeSet<Cell>,
    ) -> Result<Cell, EngineError> {
        let exhausted = EngineError::GridExhausted {
            rows: grid.rows,
            cols: grid.cols,
        };
        if snake.len() + food.len() >= grid.total_cells() {
            return Err(exhausted);
        }

        let is_free = |cell: &Cell| !snake.collides_self(*cell) && !food.contains(cell);

        for _ in 0..self.max_attempts {
            let candidate = Cell {
                row: rng.gen_range(0..i32::from(grid.rows)),
                col: rng.gen_range(0..i32::from(grid.cols)),
            };
            if is_free(&candidate) {
                return Ok(candidate);
            }
        }

        let candidates: Vec<Cell> = grid.cells().filter(is_free).collect();
        if candidates.is_empty() {
            return Err(exhausted);
        }

        let index = rng.gen_range(0..candidates.len());
        Ok(candidates[index])
    }

    /// Tops `food` up to `target` items. Cells placed before an exhaustion
    /// error stay on the board.
    pub fn refill<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        grid: Grid,
        snake: &SnakeState,
        food: &mut BTreeSet<Cell>,
        target: usize,
    ) -> Result<(), EngineError> {
        while food.len() < target {
            let cell = self.place(rng, grid, snake, food)?;
            food.insert(cell);
        }
        Ok(())
    }
}
