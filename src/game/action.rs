use rand::Rng;

/// Direction a snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Candidate order used by the rival when scanning moves
    pub const SCAN_ORDER: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (dx, dy) in tiles for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Uniformly random direction
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::SCAN_ORDER[rng.gen_range(0..Self::SCAN_ORDER.len())]
    }
}

/// Something the player asked for between two ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Change heading; rejected at tick time if it reverses the snake
    Turn(Direction),
    /// Running <-> Paused
    TogglePause,
    /// Start a new session after game over
    Restart,
}

/// Intent state collected by the input side and consumed by the next tick
///
/// The last requested direction wins. Pause toggles cancel out in pairs so
/// pressing pause twice within one tick leaves the phase unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingInput {
    pub direction: Option<Direction>,
    pub toggle_pause: bool,
    pub restart: bool,
}

impl PendingInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, intent: Intent) {
        match intent {
            Intent::Turn(direction) => self.direction = Some(direction),
            Intent::TogglePause => self.toggle_pause = !self.toggle_pause,
            Intent::Restart => self.restart = true,
        }
    }

    /// Hand the pending intents to the engine and clear them
    pub fn take(&mut self) -> PendingInput {
        std::mem::take(self)
    }

    pub fn is_empty(&self) -> bool {
        *self == PendingInput::default()
    }
}

impl From<Direction> for Intent {
    fn from(direction: Direction) -> Self {
        Intent::Turn(direction)
    }
}
