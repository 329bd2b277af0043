use serde::{Deserialize, Serialize};
use std::path::Path;

use anyhow::{Context, Result};

/// Configuration for a game session
///
/// Every field has a default, so a config file only needs the values it
/// wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the playing canvas in pixels
    pub canvas_width: u32,
    /// Height of the playing canvas in pixels
    pub canvas_height: u32,
    /// Edge length of one tile in pixels
    pub tile_size: u32,
    /// Milliseconds between game ticks
    pub tick_ms: u64,

    /// Points for eating food
    pub food_points: i32,
    /// Points for picking up the power-up
    pub power_up_points: i32,
    /// Points the rival loses when it crashes
    pub rival_crash_penalty: i32,
    /// Rival score at which it stops foraging and hunts the player
    pub chase_threshold: i32,
    /// Ticks of obstacle pass-through granted by a power-up
    pub pass_through_ticks: u32,

    /// Fewest obstacles placed per session
    pub obstacle_count_min: usize,
    /// Most obstacles placed per session
    pub obstacle_count_max: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            tile_size: 25,
            tick_ms: 100,
            food_points: 10,
            power_up_points: 20,
            rival_crash_penalty: 50,
            chase_threshold: 100,
            pass_through_ticks: 50,
            obstacle_count_min: 5,
            obstacle_count_max: 9,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom canvas and the default rules
    pub fn new(canvas_width: u32, canvas_height: u32, tile_size: u32) -> Self {
        Self {
            canvas_width,
            canvas_height,
            tile_size,
            ..Default::default()
        }
    }

    /// A 10x10 tile board without obstacles, for tests
    pub fn small() -> Self {
        Self {
            obstacle_count_min: 0,
            obstacle_count_max: 0,
            ..Self::new(250, 250, 25)
        }
    }

    /// Read a JSON config file; missing fields fall back to defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))
    }

    /// Number of tile columns
    pub fn columns(&self) -> u32 {
        self.canvas_width / self.tile_size.max(1)
    }

    /// Number of tile rows
    pub fn rows(&self) -> u32 {
        self.canvas_height / self.tile_size.max(1)
    }

    /// Validate configuration parameters
    ///
    /// Returns `Err` with a message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        if self.tile_size == 0 {
            return Err("tile_size must be at least 1".to_string());
        }

        if self.canvas_width % self.tile_size != 0 || self.canvas_height % self.tile_size != 0 {
            return Err(format!(
                "canvas {}x{} is not a whole number of {}px tiles",
                self.canvas_width, self.canvas_height, self.tile_size
            ));
        }

        if self.columns() < 2 || self.rows() < 2 {
            return Err(format!(
                "board must be at least 2x2 tiles, got {}x{}",
                self.columns(),
                self.rows()
            ));
        }

        if self.tick_ms == 0 {
            return Err("tick_ms must be positive".to_string());
        }

        if self.obstacle_count_min > self.obstacle_count_max {
            return Err(format!(
                "obstacle_count_min ({}) cannot exceed obstacle_count_max ({})",
                self.obstacle_count_min, self.obstacle_count_max
            ));
        }

        // two snakes, food and power-up must still fit
        let tiles = (self.columns() * self.rows()) as usize;
        if self.obstacle_count_max + 4 >= tiles {
            return Err(format!(
                "obstacle_count_max ({}) leaves no room on a {} tile board",
                self.obstacle_count_max, tiles
            ));
        }

        Ok(())
    }
}
