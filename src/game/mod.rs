//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A `GameState` is advanced once per tick by whatever drives it.

pub mod config;
pub mod direction;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig};
pub use direction::Direction;
pub use engine::{StepInfo, FRUIT_SAMPLE_ATTEMPTS};
pub use state::{CollisionType, GameState, Position, Snake};
