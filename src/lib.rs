//! Grid-based snake simulation.
//!
//! The core ([`engine::SimulationEngine`] and the types it is built from) is
//! free of any terminal concerns: a driver calls [`engine::SimulationEngine::tick`]
//! once per interval and draws the returned [`engine::Snapshot`].

pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod food;
pub mod grid;
pub mod input;
pub mod pacing;
pub mod renderer;
pub mod snake;
pub mod speed;
pub mod terminal_runtime;
