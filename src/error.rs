use std::io;

use thiserror::Error;

use crate::direction::Direction;
use crate::grid::Cell;

/// Reasons an [`EngineConfig`](crate::config::EngineConfig) is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be non-zero")]
    ZeroDimension,
    #[error("initial snake must contain at least one cell")]
    EmptySnake,
    #[error("initial snake cell {0:?} lies outside the grid")]
    SnakeOutOfBounds(Cell),
    #[error("initial snake visits cell {0:?} more than once")]
    SnakeOverlap(Cell),
    #[error("initial snake segments {from:?} and {to:?} are not adjacent")]
    DisconnectedSnake { from: Cell, to: Cell },
    #[error("initial direction {0:?} points back into the snake body")]
    ReversedDirection(Direction),
    #[error("initial speed must be positive and finite, got {0}")]
    InvalidSpeed(f64),
    #[error("growth increment must be non-negative and finite, got {0}")]
    InvalidGrowthIncrement(f64),
    #[error("boost multiplier must be positive and finite, got {0}")]
    InvalidBoostMultiplier(f64),
    #[error("initial food cell {0:?} lies outside the grid")]
    FoodOutOfBounds(Cell),
    #[error("initial food cell {0:?} overlaps the snake")]
    FoodOnSnake(Cell),
    #[error("initial food lists cell {0:?} more than once")]
    FoodOverlap(Cell),
    #[error("{given} initial food cells exceed the food count of {food_count}")]
    TooManyInitialFood { given: usize, food_count: usize },
    #[error("grid has {cells} cells but snake and food need {required}")]
    BoardTooSmall { cells: usize, required: usize },
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors surfaced by the simulation engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("no free cell left for food on the {rows}x{cols} grid")]
    GridExhausted { rows: u16, cols: u16 },
}
