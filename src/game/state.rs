use std::collections::HashSet;

use super::action::Direction;
use super::grid::Grid;

/// A position on the tile grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Euclidean distance in tiles
    pub fn distance_to(&self, other: Position) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }
}

/// Timed obstacle immunity granted by a power-up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassThrough {
    remaining: u32,
}

impl PassThrough {
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Start (or restart) the effect for `ticks` ticks
    pub fn activate(&mut self, ticks: u32) {
        self.remaining = ticks;
    }

    /// Count down one tick; the effect ends when it reaches zero
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

/// A snake on the board
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
    pub pass_through: PassThrough,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        Self {
            body,
            direction,
            pass_through: PassThrough::default(),
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Check if any segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Change heading unless the new direction reverses the current one
    ///
    /// Returns whether the turn was accepted.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Move snake in current direction, growing if should_grow is true
    pub fn move_snake(&mut self, should_grow: bool) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);

        if !should_grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    GameOver,
}

/// What ended the player's session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Head left the board
    Wall,
    /// Head hit an obstacle without pass-through
    Obstacle,
    /// Snake hit itself
    SelfCollision,
    /// Head ran into the other snake
    Snake,
}

/// Complete session state
///
/// Owned by the mode loop; the engine mutates it once per tick and the
/// renderer only reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub grid: Grid,
    pub player: Snake,
    pub rival: Snake,
    pub food: Position,
    pub power_up: Position,
    pub obstacles: HashSet<Position>,
    pub player_score: i32,
    pub rival_score: i32,
    /// Best player score across sessions, persisted between runs
    pub high_score: u32,
    pub phase: Phase,
    pub ticks: u32,
    /// Cause of the last game over, if any
    pub collision: Option<CollisionType>,
}

impl GameState {
    /// Create a running session with zero scores
    pub fn new(
        grid: Grid,
        player: Snake,
        rival: Snake,
        food: Position,
        power_up: Position,
        obstacles: HashSet<Position>,
    ) -> Self {
        Self {
            grid,
            player,
            rival,
            food,
            power_up,
            obstacles,
            player_score: 0,
            rival_score: 0,
            high_score: 0,
            phase: Phase::Running,
            ticks: 0,
            collision: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_obstacle(&self, pos: Position) -> bool {
        self.obstacles.contains(&pos)
    }

    /// Check if a position is occupied by either snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.player.occupies(pos) || self.rival.occupies(pos)
    }

    /// Tiles a pickup or respawning snake may not land on
    pub fn is_blocked(&self, pos: Position) -> bool {
        self.is_occupied_by_snake(pos) || self.is_obstacle(pos)
    }

    /// Player score as shown on screen
    pub fn display_player_score(&self) -> u32 {
        self.player_score.max(0) as u32
    }

    /// Rival score as shown on screen
    pub fn display_rival_score(&self) -> u32 {
        self.rival_score.max(0) as u32
    }

    /// The record including the session in progress
    pub fn best_score(&self) -> u32 {
        self.high_score.max(self.display_player_score())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> GameState {
        GameState::new(
            Grid::new(20, 20, 25),
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Snake::new(Position::new(10, 10), Direction::Up, 1),
            Position::new(15, 15),
            Position::new(2, 2),
            HashSet::from([Position::new(7, 7)]),
        )
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
    }

    #[test]
    fn test_euclidean_distance() {
        let a = Position::new(0, 0);
        assert_eq!(a.distance_to(Position::new(3, 4)), 5.0);
        assert_eq!(a.distance_to(a), 0.0);
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.body[1], Position::new(4, 5));
        assert_eq!(snake.body[2], Position::new(3, 5));
        assert!(!snake.pass_through.is_active());
    }

    #[test]
    fn test_snake_movement() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        // Move without growing
        snake.move_snake(false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));

        // Move with growing
        snake.move_snake(true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(7, 5));
    }

    #[test]
    fn test_turn_rejects_reversal() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 1);
        assert!(!snake.turn(Direction::Left));
        assert_eq!(snake.direction, Direction::Right);
        assert!(snake.turn(Direction::Up));
        assert_eq!(snake.direction, Direction::Up);
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(!snake.collides_with_body(Position::new(5, 5))); // head
        assert!(snake.collides_with_body(Position::new(4, 5))); // body
        assert!(!snake.collides_with_body(Position::new(10, 10))); // empty
        assert!(snake.occupies(Position::new(5, 5)));
    }

    #[test]
    fn test_pass_through_countdown() {
        let mut effect = PassThrough::default();
        effect.activate(2);
        assert!(effect.is_active());
        effect.tick();
        assert_eq!(effect.remaining(), 1);
        effect.tick();
        assert!(!effect.is_active());
        effect.tick();
        assert_eq!(effect.remaining(), 0);
    }

    #[test]
    fn test_blocked_tiles() {
        let state = sample_state();
        assert!(state.is_blocked(Position::new(4, 5)));
        assert!(state.is_blocked(Position::new(10, 10)));
        assert!(state.is_blocked(Position::new(7, 7)));
        assert!(!state.is_blocked(Position::new(15, 15)));
    }

    #[test]
    fn test_display_scores_clamp_at_zero() {
        let mut state = sample_state();
        state.rival_score = -50;
        state.player_score = 30;
        assert_eq!(state.display_rival_score(), 0);
        assert_eq!(state.display_player_score(), 30);
    }

    #[test]
    fn test_best_score_follows_live_score() {
        let mut state = sample_state();
        state.high_score = 40;
        state.player_score = 30;
        assert_eq!(state.best_score(), 40);

        state.player_score = 55;
        assert_eq!(state.best_score(), 55);
        assert_eq!(state.high_score, 40);
    }
}
