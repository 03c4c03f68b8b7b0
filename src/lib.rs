//! Grid Snake - a terminal snake game on a fixed square grid
//!
//! This library provides:
//! - Core game logic (game module)
//! - Terminal rendering (render module) and key mapping (input module)
//! - The interactive play loop (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
