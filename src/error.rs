use thiserror::Error;

use crate::game::{Cell, Heading};

/// Faults raised by the engine while a game is running
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// `tick()` was called before `start()` or after the game ended
    #[error("tick requested while no game is running")]
    NotRunning,
    /// The snake covers every cell of the board, so food cannot be placed
    #[error("no free cell left for food: snake occupies all {cells} cells")]
    NoFreeCell { cells: usize },
}

/// Reasons a [`GameConfig`](crate::game::GameConfig) is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cell size must be positive")]
    ZeroCellSize,
    #[error("board {width}x{height} is not a positive multiple of cell size {cell_size}")]
    BoardNotAligned {
        width: i32,
        height: i32,
        cell_size: i32,
    },
    #[error("initial snake has no segments")]
    EmptySnake,
    #[error("initial snake segment {cell} is off the board or not cell aligned")]
    SnakeOffGrid { cell: Cell },
    #[error("initial snake segments {from} and {to} are not adjacent")]
    SnakeNotContiguous { from: Cell, to: Cell },
    #[error("initial snake overlaps itself at {cell}")]
    SnakeOverlaps { cell: Cell },
    #[error("initial heading {heading:?} points back into the snake")]
    HeadingIntoBody { heading: Heading },
    #[error("initial food {cell} is off the board, misaligned or under the snake")]
    FoodUnavailable { cell: Cell },
    #[error("tick intervals invalid: initial {initial_ms}ms, minimum {min_ms}ms")]
    BadSpeed { initial_ms: u64, min_ms: u64 },
    #[error("food placement needs at least one attempt")]
    ZeroFoodAttempts,
}
