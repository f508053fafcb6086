use serde::{Deserialize, Serialize};

use super::heading::Heading;
use super::state::Cell;
use crate::error::ConfigError;

pub const BOARD_WIDTH: i32 = 800;
pub const BOARD_HEIGHT: i32 = 500;
pub const CELL_SIZE: i32 = 20;

pub const INITIAL_SPEED_MS: u64 = 200;
pub const MIN_SPEED_MS: u64 = 30;
pub const SPEED_STEP_MS: u64 = 2;
pub const FOOD_REWARD: u32 = 2;

/// Random draws before food placement falls back to scanning the board
pub const MAX_FOOD_ATTEMPTS: usize = 1_000;

pub const INITIAL_SNAKE: [Cell; 4] = [
    Cell::new(160, 200),
    Cell::new(140, 200),
    Cell::new(120, 200),
    Cell::new(100, 200),
];
pub const INITIAL_HEADING: Heading = Heading::Right;
pub const INITIAL_FOOD: Cell = Cell::new(300, 200);

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board width in board units
    pub board_width: i32,
    /// Board height in board units
    pub board_height: i32,
    /// Side of one cell; every coordinate is a multiple of it
    pub cell_size: i32,

    /// Tick interval at the start of a game
    pub initial_speed_ms: u64,
    /// Tick interval never drops below this
    pub min_speed_ms: u64,
    /// Interval shaved off per food eaten
    pub speed_step_ms: u64,
    /// Points per food eaten
    pub food_reward: u32,

    /// Body laid out by `start()`, head first
    pub initial_snake: Vec<Cell>,
    pub initial_heading: Heading,
    pub initial_food: Cell,

    pub max_food_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            cell_size: CELL_SIZE,
            initial_speed_ms: INITIAL_SPEED_MS,
            min_speed_ms: MIN_SPEED_MS,
            speed_step_ms: SPEED_STEP_MS,
            food_reward: FOOD_REWARD,
            initial_snake: INITIAL_SNAKE.to_vec(),
            initial_heading: INITIAL_HEADING,
            initial_food: INITIAL_FOOD,
            max_food_attempts: MAX_FOOD_ATTEMPTS,
        }
    }
}

impl GameConfig {
    /// Default pacing on a custom board and starting layout
    pub fn with_layout(
        board_width: i32,
        board_height: i32,
        initial_snake: Vec<Cell>,
        initial_heading: Heading,
        initial_food: Cell,
    ) -> Self {
        Self {
            board_width,
            board_height,
            initial_snake,
            initial_heading,
            initial_food,
            ..Default::default()
        }
    }

    /// Cells per row
    pub fn columns(&self) -> i32 {
        self.board_width / self.cell_size
    }

    /// Cells per column
    pub fn rows(&self) -> i32 {
        self.board_height / self.cell_size
    }

    pub fn total_cells(&self) -> usize {
        (self.columns() * self.rows()) as usize
    }

    /// Check if a cell is within the board bounds
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.board_width && cell.y >= 0 && cell.y < self.board_height
    }

    /// In bounds and aligned to the cell grid
    pub fn is_on_grid(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && cell.x % self.cell_size == 0 && cell.y % self.cell_size == 0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size <= 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.board_width <= 0
            || self.board_height <= 0
            || self.board_width % self.cell_size != 0
            || self.board_height % self.cell_size != 0
        {
            return Err(ConfigError::BoardNotAligned {
                width: self.board_width,
                height: self.board_height,
                cell_size: self.cell_size,
            });
        }
        if self.min_speed_ms == 0 || self.min_speed_ms > self.initial_speed_ms {
            return Err(ConfigError::BadSpeed {
                initial_ms: self.initial_speed_ms,
                min_ms: self.min_speed_ms,
            });
        }
        if self.max_food_attempts == 0 {
            return Err(ConfigError::ZeroFoodAttempts);
        }

        let Some(&head) = self.initial_snake.first() else {
            return Err(ConfigError::EmptySnake);
        };

        for (i, &cell) in self.initial_snake.iter().enumerate() {
            if !self.is_on_grid(cell) {
                return Err(ConfigError::SnakeOffGrid { cell });
            }
            if self.initial_snake[..i].contains(&cell) {
                return Err(ConfigError::SnakeOverlaps { cell });
            }
        }
        for pair in self.initial_snake.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if Heading::between((from.x, from.y), (to.x, to.y), self.cell_size).is_none() {
                return Err(ConfigError::SnakeNotContiguous { from, to });
            }
        }

        let neck = self.initial_snake.get(1).copied();
        if neck == Some(head.stepped(self.initial_heading, self.cell_size)) {
            return Err(ConfigError::HeadingIntoBody {
                heading: self.initial_heading,
            });
        }

        if !self.is_on_grid(self.initial_food) || self.initial_snake.contains(&self.initial_food) {
            return Err(ConfigError::FoodUnavailable {
                cell: self.initial_food,
            });
        }

        Ok(())
    }
}
