//! Rival Snake - a terminal Snake game with an AI rival
//!
//! This library provides:
//! - Core game logic: board, rival AI and the fixed-tick engine (game module)
//! - Terminal rendering and keyboard input (render, input modules)
//! - Audio cues and high score persistence (audio, persistence modules)
//! - The interactive runtime that ties them together (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod persistence;
pub mod render;
