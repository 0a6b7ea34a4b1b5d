//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed step per tick (no elapsed-time scaling)
//! - No timers, I/O, or rendering
//! - Paddles are read-only inputs; only the ball and score events come out

pub mod advance;
pub mod state;

pub use advance::{Advance, advance};
pub use state::{Ball, GameState, Paddle, Player, Score, ScoringEvent};
