use std::collections::BTreeSet;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::EngineConfig;
use crate::direction::{Direction, direction_change_is_valid};
use crate::error::{ConfigError, EngineError};
use crate::food::FoodPolicy;
use crate::grid::{Cell, Grid};
use crate::snake::SnakeState;
use crate::speed::Speed;

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The snake moved one cell, eating food if `ate` is set.
    Advanced { ate: bool },
    /// The head would have left the grid; the simulation was reset.
    OutOfBounds,
    /// The head would have entered the body; the simulation was reset.
    SelfCollision,
}

impl TickOutcome {
    /// Returns true when the tick ended in a reset.
    #[must_use]
    pub fn is_reset(self) -> bool {
        matches!(self, Self::OutOfBounds | Self::SelfCollision)
    }
}

/// Read-only view of the board handed to renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Body cells ordered tail to head.
    pub snake: Vec<Cell>,
    pub food: BTreeSet<Cell>,
    /// Effective ticks per second, boost included.
    pub speed: f64,
    pub direction: Direction,
    /// Ticks advanced since the last reset.
    pub tick: u64,
}

impl Snapshot {
    #[must_use]
    pub fn head(&self) -> Option<Cell> {
        self.snake.last().copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    pub outcome: TickOutcome,
    pub snapshot: Snapshot,
}

/// Lifetime counters for one engine.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct EngineStats {
    pub ticks: u64,
    pub resets: u64,
    pub food_eaten: u64,
}

/// Owns all simulation state and advances it one tick at a time.
///
/// Direction requests are buffered in a single last-write-wins slot and only
/// consumed at the start of the next [`SimulationEngine::tick`].
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    config: EngineConfig,
    grid: Grid,
    snake: SnakeState,
    food: BTreeSet<Cell>,
    pending_direction: Option<Direction>,
    policy: FoodPolicy,
    rng: StdRng,
    ticks_since_reset: u64,
    stats: EngineStats,
    exhausted: bool,
}

impl SimulationEngine {
    /// Validates `config` and builds an engine seeded from OS entropy.
    pub fn initialize(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic engine for tests and reproducible runs.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Result<Self, EngineError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: EngineConfig, rng: StdRng) -> Result<Self, EngineError> {
        config.validate()?;

        let grid = config.grid();
        let snake = SnakeState::from_segments(
            config.initial_snake.clone(),
            config.initial_direction,
            Speed::new(config.initial_speed, config.boost_multiplier),
        )
        .ok_or(ConfigError::EmptySnake)?;

        let mut engine = Self {
            config,
            grid,
            snake,
            food: BTreeSet::new(),
            pending_direction: None,
            policy: FoodPolicy::default(),
            rng,
            ticks_since_reset: 0,
            stats: EngineStats::default(),
            exhausted: false,
        };
        engine.restock_initial_food()?;

        info!(
            target: "snake",
            "engine initialized: {}x{} grid, snake length {}, food count {}",
            grid.rows,
            grid.cols,
            engine.snake.len(),
            engine.config.food_count
        );
        Ok(engine)
    }

    /// Overwrites the pending direction request. Legality is decided when
    /// the request is consumed by the next tick.
    pub fn request_direction(&mut self, direction: Direction) {
        self.pending_direction = Some(direction);
    }

    /// Turns the boost multiplier on or off. Repeated calls with the same
    /// value are no-ops.
    pub fn set_boost(&mut self, active: bool) {
        if self.snake.speed_mut().set_boost(active) {
            debug!(
                target: "snake",
                "boost {}: speed now {:.2}",
                if active { "on" } else { "off" },
                self.snake.speed().current()
            );
        }
    }

    /// Advances the simulation by one step.
    ///
    /// Wall and self collisions reset the simulation and are reported as
    /// outcomes. The only error is [`EngineError::GridExhausted`], after which
    /// every tick fails the same way until [`SimulationEngine::reset`].
    pub fn tick(&mut self) -> Result<TickResult, EngineError> {
        if self.exhausted {
            return Err(self.exhausted_error());
        }
        self.stats.ticks += 1;

        if let Some(requested) = self.pending_direction.take() {
            if direction_change_is_valid(self.snake.direction(), requested) {
                self.snake.set_direction(requested);
            } else {
                debug!(target: "snake", "ignoring reversal to {requested:?}");
            }
        }

        let next_head = self.snake.next_head(self.snake.direction());

        if !self.grid.in_bounds(next_head) {
            return self.reset_after(TickOutcome::OutOfBounds);
        }

        if self.snake.collides_self(next_head) {
            return self.reset_after(TickOutcome::SelfCollision);
        }

        let ate = self.food.remove(&next_head);
        if ate {
            self.snake
                .speed_mut()
                .accelerate(self.config.growth_increment);
            self.stats.food_eaten += 1;
            debug!(
                target: "snake",
                "ate food at {next_head:?}: length {}, speed {:.2}",
                self.snake.len() + 1,
                self.snake.speed().current()
            );
        }

        self.snake.advance(next_head, ate);
        self.ticks_since_reset += 1;

        if ate {
            if let Err(error) = self.policy.refill(
                &mut self.rng,
                self.grid,
                &self.snake,
                &mut self.food,
                self.config.food_count,
            ) {
                warn!(target: "snake", "{error}");
                self.exhausted = true;
                return Err(error);
            }
        }

        Ok(TickResult {
            outcome: TickOutcome::Advanced { ate },
            snapshot: self.snapshot(),
        })
    }

    /// Restores the configured snake, direction, speed and food.
    pub fn reset(&mut self) -> Result<(), EngineError> {
        self.snake.reset();
        self.pending_direction = None;
        self.ticks_since_reset = 0;
        self.exhausted = false;
        self.stats.resets += 1;
        self.restock_initial_food()
    }

    /// Returns a copy of the current board state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.segments().copied().collect(),
            food: self.food.clone(),
            speed: self.snake.speed().current(),
            direction: self.snake.direction(),
            tick: self.ticks_since_reset,
        }
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[must_use]
    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Current speed, including the boost state.
    #[must_use]
    pub fn speed(&self) -> Speed {
        self.snake.speed()
    }

    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    fn reset_after(&mut self, outcome: TickOutcome) -> Result<TickResult, EngineError> {
        info!(
            target: "snake",
            "{outcome:?} after {} ticks at length {}, resetting",
            self.ticks_since_reset,
            self.snake.len()
        );
        self.reset()?;

        Ok(TickResult {
            outcome,
            snapshot: self.snapshot(),
        })
    }

    fn restock_initial_food(&mut self) -> Result<(), EngineError> {
        self.food = self.config.initial_food.iter().copied().collect();
        self.policy.refill(
            &mut self.rng,
            self.grid,
            &self.snake,
            &mut self.food,
            self.config.food_count,
        )
    }

    fn exhausted_error(&self) -> EngineError {
        EngineError::GridExhausted {
            rows: self.grid.rows,
            cols: self.grid.cols,
        }
    }
}
