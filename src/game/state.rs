use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::heading::Heading;

/// A cell on the board, in board units (multiples of the cell size)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Neighbouring cell one step in `heading`
    pub fn stepped(&self, heading: Heading, cell_size: i32) -> Self {
        let (dx, dy) = heading.displacement(cell_size);
        self.moved_by(dx, dy)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The snake's body. Head at index 0, tail last; never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: Vec<Cell>,
}

impl Snake {
    /// Wrap an already validated, non-empty body
    pub(crate) fn from_body(body: Vec<Cell>) -> Self {
        debug_assert!(!body.is_empty());
        Self { body }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.body
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Whether moving the head onto `cell` hits the body. When the snake does
    /// not grow this tick, its tail vacates and is not an obstacle.
    pub fn blocks(&self, cell: Cell, grows: bool) -> bool {
        let solid = if grows {
            &self.body[..]
        } else {
            &self.body[..self.body.len() - 1]
        };
        solid.contains(&cell)
    }

    /// Prepend `new_head`, dropping the tail unless the snake grows
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Snake left the board
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// Score and pacing of the current game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u32,
    /// Tick interval in milliseconds
    pub speed_ms: u64,
    pub started: bool,
    pub over: bool,
}

impl GameState {
    pub fn idle(speed_ms: u64) -> Self {
        Self {
            score: 0,
            speed_ms,
            started: false,
            over: false,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    pub fn is_running(&self) -> bool {
        self.started && !self.over
    }
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snake cells, head first
    pub snake: Vec<Cell>,
    pub food: Cell,
}

impl Snapshot {
    pub fn head(&self) -> Option<Cell> {
        self.snake.first().copied()
    }
}
