//! High score persistence
//!
//! The best player score is kept as a single plain-text integer. A missing
//! or unreadable file is not an error for the game: it simply starts from
//! zero and the problem is logged.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Default file name, relative to the working directory
pub const DEFAULT_HIGH_SCORE_FILE: &str = "highscore.txt";

/// Reads and writes the persisted high score
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the stored high score, falling back to 0
    pub fn load(&self) -> u32 {
        match self.try_load() {
            Ok(score) => {
                debug!(path = ?self.path, score, "loaded high score");
                score
            }
            Err(err) => {
                warn!(path = ?self.path, "high score unavailable, starting from 0: {err:#}");
                0
            }
        }
    }

    fn try_load(&self) -> Result<u32> {
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read high score from {:?}", self.path))?;
        text.trim()
            .parse::<u32>()
            .with_context(|| format!("Invalid high score {:?} in {:?}", text.trim(), self.path))
    }

    /// Write `score` to storage, creating parent directories if needed
    pub fn save(&self, score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        std::fs::write(&self.path, score.to_string())
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;
        debug!(path = ?self.path, score, "saved high score");
        Ok(())
    }
}
