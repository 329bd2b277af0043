//! Tile grid laid over the pixel canvas

use super::config::GameConfig;
use super::state::Position;

/// Discretizes a `width x height` pixel canvas into square tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub columns: i32,
    pub rows: i32,
    pub tile_size: i32,
}

impl Grid {
    pub fn new(columns: i32, rows: i32, tile_size: i32) -> Self {
        Self {
            columns,
            rows,
            tile_size,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.columns() as i32,
            config.rows() as i32,
            config.tile_size as i32,
        )
    }

    /// Total number of tiles
    pub fn tile_count(&self) -> usize {
        (self.columns.max(0) * self.rows.max(0)) as usize
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.columns && pos.y >= 0 && pos.y < self.rows
    }

    /// Tile containing the pixel `(px, py)`
    pub fn tile_at_pixel(&self, px: i32, py: i32) -> Position {
        Position::new(px.div_euclid(self.tile_size), py.div_euclid(self.tile_size))
    }

    /// Top-left pixel of a tile
    pub fn to_pixels(&self, pos: Position) -> (i32, i32) {
        (pos.x * self.tile_size, pos.y * self.tile_size)
    }

    /// Tile under the canvas centre
    pub fn center(&self) -> Position {
        self.tile_at_pixel(
            self.columns * self.tile_size / 2,
            self.rows * self.tile_size / 2,
        )
    }

    /// Row-major iterator over every tile
    pub fn tiles(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.columns).map(move |x| Position::new(x, y)))
    }
}
