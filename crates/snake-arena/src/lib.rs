//! Headless snake game.
//!
//! [`Arena`] owns the board and the snake and applies one [`Move`](snake_core::Move) per turn;
//! [`play`] drives any [`Agent`](snake_agent::Agent) against it and tallies [`ArenaStats`].

#![forbid(unsafe_code)]

pub mod arena;
pub mod config;
pub mod play;

pub use arena::{Arena, ArenaError, DeathCause, StepOutcome};
pub use config::ArenaConfig;
pub use play::{play, ArenaStats};
