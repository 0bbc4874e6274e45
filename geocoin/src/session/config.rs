//! Game session configuration.
//!
//! One struct combines everything a session needs: world geometry, spawn
//! parameters, the visibility cap and the starting position. Defaults match
//! the original game world.

use crate::coord::{Position, DEFAULT_CELL_SIZE, DEFAULT_SCALE};

/// Default starting position (Oakes College classroom).
pub const DEFAULT_ORIGIN: Position = Position {
    lat: 36.98949379578401,
    lng: -122.06277128548504,
};

/// Default visibility window radius in cells.
pub const DEFAULT_WINDOW_RADIUS: u32 = 8;

/// Default probability that a first-visited cell spawns a cache.
pub const DEFAULT_SPAWN_PROBABILITY: f64 = 0.1;

/// Default upper bound on a fresh cache's coin stock.
pub const DEFAULT_MAX_INITIAL_COINS: u32 = 5;

/// Default cap on simultaneously visible caches.
pub const DEFAULT_MAX_VISIBLE: usize = 40;

/// Configuration for a [`GameSession`](super::GameSession).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    /// Starting position for a fresh player.
    pub origin: Position,
    /// Grid cell size in degrees.
    pub cell_size: f64,
    /// Scale factor for cell indexing.
    pub scale: f64,
    /// Visibility window radius in cells (Chebyshev).
    pub window_radius: u32,
    /// Probability that a first-visited cell spawns a cache.
    pub spawn_probability: f64,
    /// Upper bound on a fresh cache's coin stock.
    pub max_initial_coins: u32,
    /// Maximum number of simultaneously visible caches.
    pub max_visible: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN,
            cell_size: DEFAULT_CELL_SIZE,
            scale: DEFAULT_SCALE,
            window_radius: DEFAULT_WINDOW_RADIUS,
            spawn_probability: DEFAULT_SPAWN_PROBABILITY,
            max_initial_coins: DEFAULT_MAX_INITIAL_COINS,
            max_visible: DEFAULT_MAX_VISIBLE,
        }
    }
}

impl GameConfig {
    /// Set the starting position.
    pub fn with_origin(mut self, origin: Position) -> Self {
        self.origin = origin;
        self
    }

    /// Set the visibility window radius.
    pub fn with_window_radius(mut self, radius: u32) -> Self {
        self.window_radius = radius;
        self
    }

    /// Set the spawn probability.
    pub fn with_spawn_probability(mut self, probability: f64) -> Self {
        self.spawn_probability = probability;
        self
    }

    /// Set the maximum initial coin stock.
    pub fn with_max_initial_coins(mut self, max: u32) -> Self {
        self.max_initial_coins = max;
        self
    }

    /// Set the visible-cache cap.
    pub fn with_max_visible(mut self, max: usize) -> Self {
        self.max_visible = max;
        self
    }
}

/// One manual movement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Increase latitude by one cell.
    North,
    /// Decrease latitude by one cell.
    South,
    /// Increase longitude by one cell.
    East,
    /// Decrease longitude by one cell.
    West,
}

impl Direction {
    /// The (lat, lng) offset of one step at the given cell size.
    pub fn offset(self, cell_size: f64) -> (f64, f64) {
        match self {
            Direction::North => (cell_size, 0.0),
            Direction::South => (-cell_size, 0.0),
            Direction::East => (0.0, cell_size),
            Direction::West => (0.0, -cell_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_original_world() {
        let config = GameConfig::default();
        assert_eq!(config.cell_size, 0.0001);
        assert_eq!(config.window_radius, 8);
        assert_eq!(config.spawn_probability, 0.1);
        assert_eq!(config.max_initial_coins, 5);
    }

    #[test]
    fn test_builder_methods() {
        let config = GameConfig::default()
            .with_window_radius(1)
            .with_spawn_probability(1.0)
            .with_max_visible(5);
        assert_eq!(config.window_radius, 1);
        assert_eq!(config.spawn_probability, 1.0);
        assert_eq!(config.max_visible, 5);
    }

    #[test]
    fn test_direction_offsets_are_one_cell() {
        let cell = 0.0001;
        assert_eq!(Direction::North.offset(cell), (cell, 0.0));
        assert_eq!(Direction::South.offset(cell), (-cell, 0.0));
        assert_eq!(Direction::East.offset(cell), (0.0, cell));
        assert_eq!(Direction::West.offset(cell), (0.0, -cell));
    }
}
