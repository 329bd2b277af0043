//! Rejection-sampled placement of pickups, obstacles and respawning snakes

use std::collections::HashSet;

use rand::Rng;
use rand::seq::IteratorRandom;

use super::grid::Grid;
use super::state::Position;

/// Random draws per tile before giving up on pure rejection sampling
const DRAWS_PER_TILE: usize = 64;

/// Draw a uniformly random tile that `is_blocked` accepts
///
/// Draws until a free tile turns up. On a crowded board it falls back to a
/// uniform pick among the remaining free tiles, and returns `None` only when
/// every tile is blocked.
pub fn sample_free_tile<R, F>(rng: &mut R, grid: &Grid, is_blocked: F) -> Option<Position>
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    let tiles = grid.tile_count();
    if tiles == 0 {
        return None;
    }

    for _ in 0..tiles * DRAWS_PER_TILE {
        let pos = Position::new(
            rng.gen_range(0..grid.columns),
            rng.gen_range(0..grid.rows),
        );
        if !is_blocked(pos) {
            return Some(pos);
        }
    }

    grid.tiles().filter(|pos| !is_blocked(*pos)).choose(rng)
}

/// Place `count` distinct obstacles, never on any tile in `avoid`
///
/// Stops early if the board runs out of room.
pub fn place_obstacles<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &Grid,
    count: usize,
    avoid: &[Position],
) -> HashSet<Position> {
    let mut obstacles = HashSet::with_capacity(count);

    while obstacles.len() < count {
        let Some(pos) = sample_free_tile(rng, grid, |pos| {
            avoid.contains(&pos) || obstacles.contains(&pos)
        }) else {
            break;
        };
        obstacles.insert(pos);
    }

    obstacles
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_sample_respects_blocked_tiles() {
        let mut rng = StdRng::seed_from_u64(1);
        let grid = Grid::new(4, 4, 10);
        let blocked: HashSet<Position> = grid.tiles().filter(|p| p.x < 3).collect();

        for _ in 0..50 {
            let pos = sample_free_tile(&mut rng, &grid, |p| blocked.contains(&p)).unwrap();
            assert_eq!(pos.x, 3);
            assert!(grid.is_in_bounds(pos));
        }
    }

    #[test]
    fn test_sample_finds_last_free_tile() {
        let mut rng = StdRng::seed_from_u64(2);
        let grid = Grid::new(5, 5, 10);
        let only = Position::new(2, 3);

        let pos = sample_free_tile(&mut rng, &grid, |p| p != only);
        assert_eq!(pos, Some(only));
    }

    #[test]
    fn test_sample_full_board_is_none() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = Grid::new(3, 3, 10);
        assert_eq!(sample_free_tile(&mut rng, &grid, |_| true), None);
    }

    #[test]
    fn test_obstacles_avoid_given_tiles() {
        let mut rng = StdRng::seed_from_u64(4);
        let grid = Grid::new(6, 6, 10);
        let avoid = [Position::new(3, 3), Position::new(0, 0)];

        for _ in 0..20 {
            let obstacles = place_obstacles(&mut rng, &grid, 9, &avoid);
            assert_eq!(obstacles.len(), 9);
            for pos in &avoid {
                assert!(!obstacles.contains(pos));
            }
        }
    }

    #[test]
    fn test_obstacles_capped_by_free_space() {
        let mut rng = StdRng::seed_from_u64(5);
        let grid = Grid::new(2, 2, 10);
        let obstacles = place_obstacles(&mut rng, &grid, 10, &[Position::new(0, 0)]);
        assert_eq!(obstacles.len(), 3);
    }
}
