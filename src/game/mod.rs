//! Core game logic for Rival Snake
//!
//! This module holds the board, the rival AI and the tick loop without any
//! I/O or rendering dependencies, so it can be driven by the terminal mode
//! or directly from tests.

pub mod action;
pub mod ai;
pub mod config;
pub mod engine;
pub mod grid;
pub mod spawn;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Intent, PendingInput};
pub use ai::Target;
pub use config::GameConfig;
pub use engine::{GameEngine, GameEvent, TickOutcome};
pub use grid::Grid;
pub use state::{CollisionType, GameState, PassThrough, Phase, Position, Snake};
