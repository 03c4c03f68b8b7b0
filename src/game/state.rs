use rand::{rngs::StdRng, SeedableRng};

use super::config::GameConfig;
use super::direction::Direction;

/// A cell on the game grid
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
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0. Never empty.
    pub body: Vec<Position>,
    /// Direction the next tick will move in
    pub heading: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and heading
    pub fn new(head: Position, heading: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = heading.opposite().delta();
        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_by(dx, dy));
        }

        Self { body, heading }
    }

    /// Build a snake from explicit cells, head first. Returns `None` for an empty list.
    pub fn from_cells(cells: Vec<Position>, heading: Direction) -> Option<Self> {
        if cells.is_empty() {
            return None;
        }
        Some(Self {
            body: cells,
            heading,
        })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// All cells, head first
    pub fn cells(&self) -> &[Position] {
        &self.body
    }

    /// Whether `pos` hits the snake after a move.
    ///
    /// When the snake is not growing its tail leaves on the same tick, so the
    /// tail cell is not an obstacle.
    pub fn blocks(&self, pos: Position, growing: bool) -> bool {
        let solid = if growing {
            &self.body[..]
        } else {
            &self.body[..self.body.len() - 1]
        };
        solid.contains(&pos)
    }

    /// Move snake one cell in its heading, growing if `should_grow` is true
    pub fn move_snake(&mut self, should_grow: bool) {
        let new_head = self.head().moved_in_direction(self.heading);
        self.body.insert(0, new_head);

        if !should_grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a snake built through `new` or `from_cells`
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Complete game state: one snake, one fruit, and a square grid.
///
/// Tick logic (`advance`, `set_heading`, `restart`, `place_fruit`) lives in
/// [`super::engine`].
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    /// `None` only when the snake covers the whole grid
    pub fruit: Option<Position>,
    /// Cells per side
    pub grid_size: usize,
    /// Ticks survived in the current round
    pub steps: u32,
    pub is_alive: bool,
    pub(super) rng: StdRng,
}

impl GameState {
    /// Create a fresh round from the configuration
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut state = Self {
            snake: Self::initial_snake(config.grid_size),
            fruit: None,
            grid_size: config.grid_size,
            steps: 0,
            is_alive: true,
            rng,
        };
        state.place_fruit();
        state
    }

    /// Create a state around an arbitrary snake and fruit, mainly for setting
    /// up positions in tests.
    ///
    /// The caller keeps the invariants: every snake cell on the grid and the
    /// fruit off the snake. Debug builds check both.
    pub fn with_snake(snake: Snake, fruit: Option<Position>, grid_size: usize, seed: u64) -> Self {
        let state = Self {
            snake,
            fruit,
            grid_size,
            steps: 0,
            is_alive: true,
            rng: StdRng::seed_from_u64(seed),
        };
        debug_assert!(
            state.snake.cells().iter().all(|&pos| state.is_in_bounds(pos)),
            "snake cells must lie on the grid"
        );
        debug_assert!(
            state.fruit.map_or(true, |pos| state.is_in_bounds(pos) && !state.is_occupied_by_snake(pos)),
            "fruit must be on the grid and off the snake"
        );
        state
    }

    pub(super) fn initial_snake(grid_size: usize) -> Snake {
        let center = (grid_size / 2) as i32;
        Snake::new(Position::new(center, center), Direction::Right, 1)
    }

    /// Current heading of the snake
    pub fn heading(&self) -> Direction {
        self.snake.heading
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let size = self.grid_size as i32;
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.body.contains(&pos)
    }

    /// Number of cells on the grid
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }
}
