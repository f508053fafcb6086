//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies,
//! plus the tick scheduler that paces it. The engine only produces snapshots;
//! drawing them is left to the caller.

pub mod config;
pub mod engine;
pub mod heading;
pub mod scheduler;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use engine::{GameEngine, TickEvent, TickOutcome};
pub use heading::Heading;
pub use scheduler::TickScheduler;
pub use state::{Cell, CollisionType, GameState, Snake, Snapshot};
