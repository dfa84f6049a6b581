use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::ConfigError;
use crate::grid::{Cell, Grid};
use crate::speed::interval_for;

/// Default board height in cells.
pub const DEFAULT_ROWS: u16 = 30;

/// Default board width in cells.
pub const DEFAULT_COLS: u16 = 40;

/// Default starting speed in ticks per second.
pub const DEFAULT_SPEED: f64 = 10.0;

/// Speed gained per food eaten.
pub const DEFAULT_GROWTH_INCREMENT: f64 = 0.5;

/// Speed multiplier while boost is held.
pub const DEFAULT_BOOST_MULTIPLIER: f64 = 2.0;

/// Length of the default snake, laid out along row 0.
pub const DEFAULT_SNAKE_LENGTH: i32 = 10;

/// Delay between input polls in the terminal driver.
pub const FRAME_POLL_INTERVAL: Duration = Duration::from_millis(16);

/// How long boost stays active after the last key press or repeat when the
/// terminal does not report key releases.
pub const BOOST_HOLD_WINDOW: Duration = Duration::from_millis(250);

/// Engine parameters. Deserializes from JSON with every field optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rows: u16,
    pub cols: u16,
    /// Starting body, ordered tail to head.
    pub initial_snake: Vec<Cell>,
    pub initial_direction: Direction,
    pub initial_speed: f64,
    pub growth_increment: f64,
    /// Number of food items kept on the board.
    pub food_count: usize,
    pub boost_multiplier: f64,
    /// Food placed at start and after every reset before random top-up.
    pub initial_food: Vec<Cell>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            initial_snake: (0..DEFAULT_SNAKE_LENGTH).map(|col| Cell::new(0, col)).collect(),
            initial_direction: Direction::Right,
            initial_speed: DEFAULT_SPEED,
            growth_increment: DEFAULT_GROWTH_INCREMENT,
            food_count: 1,
            boost_multiplier: DEFAULT_BOOST_MULTIPLIER,
            initial_food: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Loads a config from a JSON file, falling back to defaults for
    /// missing fields. The result is not validated yet.
    pub fn from_json_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        Grid::new(self.rows, self.cols)
    }

    /// Checks every field so an engine is never built from a partially
    /// valid config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        if !(self.initial_speed.is_finite() && self.initial_speed > 0.0) {
            return Err(ConfigError::InvalidSpeed(self.initial_speed));
        }
        if !(self.growth_increment.is_finite() && self.growth_increment >= 0.0) {
            return Err(ConfigError::InvalidGrowthIncrement(self.growth_increment));
        }
        if !(self.boost_multiplier.is_finite() && self.boost_multiplier > 0.0) {
            return Err(ConfigError::InvalidBoostMultiplier(self.boost_multiplier));
        }
        // Growth only raises speed, so the slowest the engine can run is the
        // starting speed, further slowed by a boost multiplier below one.
        if interval_for(self.initial_speed).is_none() {
            return Err(ConfigError::InvalidSpeed(self.initial_speed));
        }
        if interval_for(self.initial_speed * self.boost_multiplier).is_none() {
            return Err(ConfigError::InvalidBoostMultiplier(self.boost_multiplier));
        }

        self.validate_snake()?;
        self.validate_food()?;

        let required = self.initial_snake.len() + self.food_count;
        let cells = self.grid().total_cells();
        if required > cells {
            return Err(ConfigError::BoardTooSmall { cells, required });
        }

        Ok(())
    }

    fn validate_snake(&self) -> Result<(), ConfigError> {
        let grid = self.grid();
        let Some(&head) = self.initial_snake.last() else {
            return Err(ConfigError::EmptySnake);
        };

        let mut seen = HashSet::with_capacity(self.initial_snake.len());
        for &cell in &self.initial_snake {
            if !grid.in_bounds(cell) {
                return Err(ConfigError::SnakeOutOfBounds(cell));
            }
            if !seen.insert(cell) {
                return Err(ConfigError::SnakeOverlap(cell));
            }
        }

        for pair in self.initial_snake.windows(2) {
            if Direction::between(pair[0], pair[1]).is_none() {
                return Err(ConfigError::DisconnectedSnake {
                    from: pair[0],
                    to: pair[1],
                });
            }
        }

        if let [.., neck, _] = self.initial_snake.as_slice() {
            if head.offset(self.initial_direction) == *neck {
                return Err(ConfigError::ReversedDirection(self.initial_direction));
            }
        }

        Ok(())
    }

    fn validate_food(&self) -> Result<(), ConfigError> {
        if self.initial_food.len() > self.food_count {
            return Err(ConfigError::TooManyInitialFood {
                given: self.initial_food.len(),
                food_count: self.food_count,
            });
        }

        let grid = self.grid();
        let mut seen = HashSet::with_capacity(self.initial_food.len());
        for &cell in &self.initial_food {
            if !grid.in_bounds(cell) {
                return Err(ConfigError::FoodOutOfBounds(cell));
            }
            if self.initial_snake.contains(&cell) {
                return Err(ConfigError::FoodOnSnake(cell));
            }
            if !seen.insert(cell) {
                return Err(ConfigError::FoodOverlap(cell));
            }
        }

        Ok(())
    }
}
