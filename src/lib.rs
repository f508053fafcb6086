//! Snake Board - the classic Snake game on a fixed 800x500 board
//!
//! This library provides:
//! - Core game logic and tick scheduling (game module)
//! - Typed engine and configuration errors (error module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive terminal session (modes module)

pub mod error;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;

pub use error::{ConfigError, EngineError};
