//! Rival steering: pick a target, then take the safe step that closes on it

use rand::Rng;

use super::action::Direction;
use super::state::{GameState, Position};

/// What the rival is currently heading for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Food(Position),
    PowerUp(Position),
    /// Chase mode, aimed at the player's head
    Player(Position),
}

impl Target {
    pub fn position(&self) -> Position {
        match *self {
            Target::Food(pos) | Target::PowerUp(pos) | Target::Player(pos) => pos,
        }
    }
}

/// Choose the rival's target for this tick
///
/// Below `chase_threshold` the rival forages for the nearer pickup (food on
/// a tie). Once its score reaches the threshold it hunts the player.
pub fn select_target(state: &GameState, chase_threshold: i32) -> Target {
    if state.rival_score >= chase_threshold {
        return Target::Player(state.player.head());
    }

    let head = state.rival.head();
    if head.distance_to(state.power_up) < head.distance_to(state.food) {
        Target::PowerUp(state.power_up)
    } else {
        Target::Food(state.food)
    }
}

/// A step is safe if it stays on the board, off obstacles and off the
/// rival's own body
pub fn is_safe_step(state: &GameState, pos: Position) -> bool {
    state.grid.is_in_bounds(pos) && !state.is_obstacle(pos) && !state.rival.occupies(pos)
}

/// Greedy move choice for the rival
///
/// Scans `Direction::SCAN_ORDER` and keeps the first safe direction with the
/// smallest Euclidean distance to `target`. With no safe direction it picks
/// one at random and lets collision resolution deal with the outcome.
pub fn choose_direction<R: Rng + ?Sized>(state: &GameState, target: Position, rng: &mut R) -> Direction {
    let head = state.rival.head();
    let mut best: Option<(Direction, f64)> = None;

    for direction in Direction::SCAN_ORDER {
        let next = head.moved_in_direction(direction);
        if !is_safe_step(state, next) {
            continue;
        }

        let distance = next.distance_to(target);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((direction, distance)),
        }
    }

    match best {
        Some((direction, _)) => direction,
        None => Direction::random(rng),
    }
}

/// Target selection plus move selection in one call
pub fn plan_rival_move<R: Rng + ?Sized>(
    state: &GameState,
    chase_threshold: i32,
    rng: &mut R,
) -> (Target, Direction) {
    let target = select_target(state, chase_threshold);
    let direction = choose_direction(state, target.position(), rng);
    (target, direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::Grid;
    use crate::game::state::Snake;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn state_with_rival(rival: Snake) -> GameState {
        GameState::new(
            Grid::new(10, 10, 25),
            Snake::new(Position::new(0, 9), Direction::Right, 1),
            rival,
            Position::new(9, 5),
            Position::new(0, 0),
            HashSet::new(),
        )
    }

    #[test]
    fn test_target_is_nearer_pickup() {
        let mut state = state_with_rival(Snake::new(Position::new(7, 5), Direction::Up, 1));
        assert_eq!(select_target(&state, 100), Target::Food(Position::new(9, 5)));

        state.rival.body[0] = Position::new(1, 1);
        assert_eq!(select_target(&state, 100), Target::PowerUp(Position::new(0, 0)));
    }

    #[test]
    fn test_target_tie_prefers_food() {
        let mut state = state_with_rival(Snake::new(Position::new(5, 5), Direction::Up, 1));
        state.food = Position::new(7, 5);
        state.power_up = Position::new(3, 5);
        assert_eq!(select_target(&state, 100), Target::Food(Position::new(7, 5)));
    }

    #[test]
    fn test_chase_mode_targets_player_head() {
        let mut state = state_with_rival(Snake::new(Position::new(5, 5), Direction::Up, 1));
        state.rival_score = 99;
        assert!(matches!(select_target(&state, 100), Target::Food(_)));

        state.rival_score = 100;
        assert_eq!(
            select_target(&state, 100),
            Target::Player(state.player.head())
        );
    }

    #[test]
    fn test_moves_toward_target() {
        let state = state_with_rival(Snake::new(Position::new(5, 5), Direction::Up, 1));
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(choose_direction(&state, Position::new(5, 0), &mut rng), Direction::Up);
        assert_eq!(choose_direction(&state, Position::new(5, 9), &mut rng), Direction::Down);
        assert_eq!(choose_direction(&state, Position::new(0, 5), &mut rng), Direction::Left);
    }

    #[test]
    fn test_tie_break_follows_scan_order() {
        let state = state_with_rival(Snake::new(Position::new(5, 5), Direction::Up, 1));
        let mut rng = StdRng::seed_from_u64(0);

        // Right and Up are equally close to (6, 4); Right is scanned first
        assert_eq!(choose_direction(&state, Position::new(6, 4), &mut rng), Direction::Right);
        // Left and Up tie for (4, 4); Left comes before Up
        assert_eq!(choose_direction(&state, Position::new(4, 4), &mut rng), Direction::Left);
        // Target on the head: all four tie, Right wins
        assert_eq!(choose_direction(&state, Position::new(5, 5), &mut rng), Direction::Right);
    }

    #[test]
    fn test_avoids_obstacles_walls_and_own_body() {
        let mut state = state_with_rival(Snake::new(Position::new(9, 5), Direction::Right, 3));
        // body trails to the left: (8,5), (7,5)
        state.obstacles.insert(Position::new(9, 4));
        let mut rng = StdRng::seed_from_u64(0);

        // Right is off the board, Left is body, Up is an obstacle
        assert_eq!(choose_direction(&state, Position::new(9, 0), &mut rng), Direction::Down);
    }

    #[test]
    fn test_boxed_in_picks_random_direction() {
        let mut state = state_with_rival(Snake::new(Position::new(0, 0), Direction::Left, 2));
        // body at (1,0); walls on left and top; obstacle below
        state.obstacles.insert(Position::new(0, 1));
        let mut rng = StdRng::seed_from_u64(9);

        let mut seen = HashSet::new();
        for _ in 0..100 {
            seen.insert(choose_direction(&state, Position::new(5, 5), &mut rng));
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_plan_returns_target_and_step() {
        let state = state_with_rival(Snake::new(Position::new(8, 5), Direction::Up, 1));
        let mut rng = StdRng::seed_from_u64(0);
        let (target, direction) = plan_rival_move(&state, 100, &mut rng);
        assert_eq!(target, Target::Food(Position::new(9, 5)));
        assert_eq!(direction, Direction::Right);
    }
}
