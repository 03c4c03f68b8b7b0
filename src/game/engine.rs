use rand::{seq::SliceRandom, Rng};
use tracing::{debug, info, trace, warn};

use super::{
    direction::Direction,
    state::{CollisionType, GameState, Position},
};

/// Random samples tried before falling back to scanning every free cell
pub const FRUIT_SAMPLE_ATTEMPTS: usize = 100;

/// Information about a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    /// Whether the snake ate the fruit this step
    pub ate_fruit: bool,
    /// Type of collision if one occurred
    pub collision: Option<CollisionType>,
}

impl StepInfo {
    fn idle() -> Self {
        Self {
            ate_fruit: false,
            collision: None,
        }
    }
}

impl GameState {
    /// Request a new heading for the next tick.
    ///
    /// The exact reverse of the current heading is silently ignored.
    pub fn set_heading(&mut self, requested: Direction) {
        let snake = &mut self.snake;
        if requested.is_opposite(snake.heading) {
            trace!(?requested, current = ?snake.heading, "reverse heading ignored");
            return;
        }
        snake.heading = requested;
    }

    /// Run one tick: move, eat, collide.
    ///
    /// Does nothing once the round is over. On a fatal move the snake is left
    /// where it was and `is_alive` turns false.
    pub fn advance(&mut self) -> StepInfo {
        if !self.is_alive {
            return StepInfo::idle();
        }

        let new_head = self.snake.head().moved_in_direction(self.snake.heading);
        let ate_fruit = self.fruit == Some(new_head);

        if let Some(collision) = self.check_collision(new_head, ate_fruit) {
            self.is_alive = false;
            info!(
                ?collision,
                length = self.snake.len(),
                steps = self.steps,
                "game over"
            );
            return StepInfo {
                ate_fruit: false,
                collision: Some(collision),
            };
        }

        self.snake.move_snake(ate_fruit);
        self.steps += 1;

        if ate_fruit {
            debug!(length = self.snake.len(), "fruit eaten");
            self.place_fruit();
        }

        StepInfo {
            ate_fruit,
            collision: None,
        }
    }

    /// Reset to a fresh round: one-cell snake at the center heading right
    pub fn restart(&mut self) {
        self.snake = Self::initial_snake(self.grid_size);
        self.steps = 0;
        self.is_alive = true;
        self.place_fruit();
        info!(grid_size = self.grid_size, "round started");
    }

    /// Put the fruit on a random free cell and return it.
    ///
    /// Samples the grid a bounded number of times, then picks uniformly among
    /// the remaining free cells. Yields `None` when the snake fills the grid.
    pub fn place_fruit(&mut self) -> Option<Position> {
        let size = self.grid_size as i32;
        let mut fruit = None;

        if size > 0 {
            for _ in 0..FRUIT_SAMPLE_ATTEMPTS {
                let pos = Position::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size));
                if !self.is_occupied_by_snake(pos) {
                    fruit = Some(pos);
                    break;
                }
            }
        }

        if fruit.is_none() {
            let free: Vec<Position> = (0..size)
                .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
                .filter(|pos| !self.is_occupied_by_snake(*pos))
                .collect();
            fruit = free.choose(&mut self.rng).copied();
        }

        match fruit {
            Some(pos) => debug!(x = pos.x, y = pos.y, "fruit placed"),
            None => warn!(length = self.snake.len(), "no free cell left for fruit"),
        }

        self.fruit = fruit;
        fruit
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, new_head: Position, growing: bool) -> Option<CollisionType> {
        if !self.is_in_bounds(new_head) {
            return Some(CollisionType::Wall);
        }

        if self.snake.blocks(new_head, growing) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }
}
