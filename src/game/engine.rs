use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::{
    action::{Direction, PendingInput},
    ai::{self, Target},
    config::GameConfig,
    grid::Grid,
    spawn,
    state::{CollisionType, GameState, Phase, Position, Snake},
};

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PlayerAteFood,
    RivalAteFood,
    PlayerPowerUp,
    RivalPowerUp,
    /// Rival hit something, lost points and respawned
    RivalCrashed { collision: CollisionType },
    GameOver {
        collision: CollisionType,
        new_high_score: bool,
    },
    Paused,
    Resumed,
    Restarted,
}

/// Result of a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Events in the order they happened
    pub events: Vec<GameEvent>,
    /// What the rival was steering for, if the board advanced
    pub rival_target: Option<Target>,
}

impl TickOutcome {
    pub fn contains(&self, event: GameEvent) -> bool {
        self.events.contains(&event)
    }

    /// The game-over event of this tick, if any
    pub fn game_over(&self) -> Option<(CollisionType, bool)> {
        self.events.iter().find_map(|event| match *event {
            GameEvent::GameOver {
                collision,
                new_high_score,
            } => Some((collision, new_high_score)),
            _ => None,
        })
    }

    /// What the rival crashed into this tick, if it did
    pub fn rival_crash(&self) -> Option<CollisionType> {
        self.events.iter().find_map(|event| match *event {
            GameEvent::RivalCrashed { collision } => Some(collision),
            _ => None,
        })
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Engine with a reproducible random sequence
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let grid = Grid::from_config(&config);
        Self { config, grid, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh session with no recorded high score
    pub fn reset(&mut self) -> GameState {
        self.new_session(0)
    }

    /// Start a fresh session, carrying over the best score so far
    pub fn new_session(&mut self, high_score: u32) -> GameState {
        let grid = self.grid;
        let center = grid.center();
        let player = Snake::new(center, Direction::Right, 1);

        let rival_head =
            spawn::sample_free_tile(&mut self.rng, &grid, |pos| pos == center).unwrap_or(center);
        let rival = Snake::new(rival_head, Direction::random(&mut self.rng), 1);

        // an inverted range means a fixed count rather than a panic
        let min = self.config.obstacle_count_min;
        let max = self.config.obstacle_count_max.max(min);
        let obstacle_count = self.rng.gen_range(min..=max);
        let obstacles =
            spawn::place_obstacles(&mut self.rng, &grid, obstacle_count, &[center, rival_head]);

        // pickups are placed once the snakes and obstacles are down
        let mut state = GameState::new(grid, player, rival, center, center, obstacles);
        state.high_score = high_score;
        if let Some(food) = self.free_pickup_tile(&state, None) {
            state.food = food;
        }
        if let Some(power_up) = self.free_pickup_tile(&state, Some(state.food)) {
            state.power_up = power_up;
        }

        info!(
            obstacles = state.obstacles.len(),
            rival = ?rival_head,
            high_score,
            "session started"
        );
        state
    }

    /// Apply pending intents and, while running, advance the board one tick
    ///
    /// Intents are applied restart first, then pause, then the turn. A
    /// restart only takes effect after game over and ends the tick with the
    /// fresh board; a pause toggle is ignored after game over.
    pub fn tick(&mut self, state: &mut GameState, input: PendingInput) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        if input.restart && state.phase == Phase::GameOver {
            *state = self.new_session(state.high_score);
            outcome.events.push(GameEvent::Restarted);
            return outcome;
        }

        if input.toggle_pause {
            match state.phase {
                Phase::Running => {
                    state.phase = Phase::Paused;
                    outcome.events.push(GameEvent::Paused);
                }
                Phase::Paused => {
                    state.phase = Phase::Running;
                    outcome.events.push(GameEvent::Resumed);
                }
                Phase::GameOver => {}
            }
        }

        if !state.is_running() {
            return outcome;
        }

        if let Some(direction) = input.direction {
            if !state.player.turn(direction) {
                debug!(?direction, heading = ?state.player.direction, "reversal ignored");
            }
        }

        self.advance(state, &mut outcome);
        outcome
    }

    /// One step of the board: move, resolve collisions, consume, count down
    fn advance(&mut self, state: &mut GameState, outcome: &mut TickOutcome) {
        state.ticks += 1;

        // Player moves first; only food makes it grow
        let player_next = state.player.head().moved_in_direction(state.player.direction);
        state.player.move_snake(player_next == state.food);

        // Rival plans against the player's new head; food or power-up grows it
        let (target, direction) =
            ai::plan_rival_move(state, self.config.chase_threshold, &mut self.rng);
        outcome.rival_target = Some(target);
        state.rival.direction = direction;
        let rival_next = state.rival.head().moved_in_direction(direction);
        state
            .rival
            .move_snake(rival_next == state.food || rival_next == state.power_up);

        if let Some(collision) = self.check_player_collision(state) {
            self.end_session(state, collision, outcome);
            return;
        }

        if let Some(collision) = self.check_rival_collision(state) {
            self.crash_rival(state, collision);
            outcome.events.push(GameEvent::RivalCrashed { collision });
        }

        self.consume_food(state, outcome);
        let (player_boosted, rival_boosted) = self.consume_power_up(state, outcome);

        if !player_boosted {
            state.player.pass_through.tick();
        }
        if !rival_boosted {
            state.rival.pass_through.tick();
        }
    }

    /// Player collisions, checked against post-move positions
    fn check_player_collision(&self, state: &GameState) -> Option<CollisionType> {
        let head = state.player.head();

        if !state.grid.is_in_bounds(head) {
            return Some(CollisionType::Wall);
        }

        if state.is_obstacle(head) && !state.player.pass_through.is_active() {
            return Some(CollisionType::Obstacle);
        }

        if state.player.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        if head == state.rival.head() || state.rival.collides_with_body(head) {
            return Some(CollisionType::Snake);
        }

        None
    }

    /// Rival collisions; these never end the session
    fn check_rival_collision(&self, state: &GameState) -> Option<CollisionType> {
        let head = state.rival.head();

        if !state.grid.is_in_bounds(head) {
            return Some(CollisionType::Wall);
        }

        if state.is_obstacle(head) && !state.rival.pass_through.is_active() {
            return Some(CollisionType::Obstacle);
        }

        if state.rival.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        if state.player.occupies(head) {
            return Some(CollisionType::Snake);
        }

        None
    }

    fn end_session(&mut self, state: &mut GameState, collision: CollisionType, outcome: &mut TickOutcome) {
        state.phase = Phase::GameOver;
        state.collision = Some(collision);

        let score = state.display_player_score();
        let new_high_score = score > state.high_score;
        if new_high_score {
            state.high_score = score;
        }

        info!(?collision, score, new_high_score, ticks = state.ticks, "game over");
        outcome.events.push(GameEvent::GameOver {
            collision,
            new_high_score,
        });
    }

    /// Penalize the rival and drop it, length 1, on a fresh free tile
    fn crash_rival(&mut self, state: &mut GameState, collision: CollisionType) {
        state.rival_score -= self.config.rival_crash_penalty;

        let food = state.food;
        let power_up = state.power_up;
        let spot = spawn::sample_free_tile(&mut self.rng, &state.grid, |pos| {
            state.is_blocked(pos) || pos == food || pos == power_up
        });

        match spot {
            Some(head) => {
                state.rival = Snake::new(head, Direction::random(&mut self.rng), 1);
                debug!(?collision, ?head, score = state.rival_score, "rival respawned");
            }
            None => warn!(?collision, "no free tile to respawn rival"),
        }
    }

    fn consume_food(&mut self, state: &mut GameState, outcome: &mut TickOutcome) {
        let player_ate = state.player.head() == state.food;
        let rival_ate = state.rival.head() == state.food;

        if player_ate {
            state.player_score += self.config.food_points;
            outcome.events.push(GameEvent::PlayerAteFood);
        }
        if rival_ate {
            state.rival_score += self.config.food_points;
            outcome.events.push(GameEvent::RivalAteFood);
        }

        if player_ate || rival_ate {
            if let Some(food) = self.free_pickup_tile(state, Some(state.power_up)) {
                state.food = food;
            }
        }
    }

    /// Returns which snakes picked up the power-up this tick
    fn consume_power_up(&mut self, state: &mut GameState, outcome: &mut TickOutcome) -> (bool, bool) {
        let player_took = state.player.head() == state.power_up;
        let rival_took = state.rival.head() == state.power_up;
        let ticks = self.config.pass_through_ticks;

        if player_took {
            state.player_score += self.config.power_up_points;
            state.player.pass_through.activate(ticks);
            outcome.events.push(GameEvent::PlayerPowerUp);
        }
        if rival_took {
            state.rival_score += self.config.power_up_points;
            state.rival.pass_through.activate(ticks);
            outcome.events.push(GameEvent::RivalPowerUp);
        }

        if player_took || rival_took {
            if let Some(power_up) = self.free_pickup_tile(state, Some(state.food)) {
                state.power_up = power_up;
            }
        }

        (player_took, rival_took)
    }

    /// Free tile for a pickup: no snake, no obstacle, not on `other`
    fn free_pickup_tile(&mut self, state: &GameState, other: Option<Position>) -> Option<Position> {
        spawn::sample_free_tile(&mut self.rng, &state.grid, |pos| {
            state.is_blocked(pos) || Some(pos) == other
        })
    }
}
