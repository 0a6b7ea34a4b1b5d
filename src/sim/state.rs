//! Game state and core simulation types
//!
//! Everything the tick loop reads or commits lives in [`GameState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clamp_paddle_x;
use crate::consts::*;

/// Which side of the table a paddle (and its score) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Near paddle, bottom of the field
    One,
    /// Far paddle, top of the field
    Two,
}

/// One point attribution, emitted on a ball-paddle hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringEvent {
    pub player: Player,
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self::new(
            Vec2::new(BALL_START_X, BALL_START_Y),
            Vec2::new(BALL_START_DX, BALL_START_DY),
        )
    }
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius: BALL_RADIUS,
        }
    }
}

/// An axis-aligned paddle. Dimensions are fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    width: f32,
    height: f32,
}

impl Paddle {
    pub fn new(x: f32, y: f32) -> Self {
        Self::with_size(x, y, PADDLE_WIDTH, PADDLE_HEIGHT)
    }

    pub fn with_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(clamp_paddle_x(x, width), y),
            width,
            height,
        }
    }

    /// Near paddle (player 1) at its start position
    pub fn near() -> Self {
        Self::new(PADDLE_START_X, NEAR_PADDLE_Y)
    }

    /// Far paddle (player 2) at its start position
    pub fn far() -> Self {
        Self::new(PADDLE_START_X, FAR_PADDLE_Y)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Strictly inside the paddle's horizontal extent (edges don't count)
    #[inline]
    pub fn spans(&self, x: f32) -> bool {
        x > self.pos.x && x < self.pos.x + self.width
    }

    /// Move the left edge by `dx`, staying inside the field
    pub fn shift(&mut self, dx: f32) {
        self.set_x(self.pos.x + dx);
    }

    /// Place the left edge at `x`, staying inside the field
    pub fn set_x(&mut self, x: f32) {
        self.pos.x = clamp_paddle_x(x, self.width);
    }
}

/// Per-player point counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player1: u32,
    pub player2: u32,
}

impl Score {
    pub fn award(&mut self, player: Player, points: u32) {
        let counter = match player {
            Player::One => &mut self.player1,
            Player::Two => &mut self.player2,
        };
        *counter = counter.saturating_add(points);
    }

    /// Scoreboard text, far player first
    pub fn label(&self) -> String {
        format!("{} : {}", self.player2, self.player1)
    }
}

/// Complete match state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub ball: Ball,
    /// Near paddle (player 1)
    pub paddle1: Paddle,
    /// Far paddle (player 2)
    pub paddle2: Paddle,
    pub score: Score,
    /// Ticks simulated since start or last reset
    pub time_ticks: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Start-of-session state
    pub fn new() -> Self {
        Self {
            ball: Ball::default(),
            paddle1: Paddle::near(),
            paddle2: Paddle::far(),
            score: Score::default(),
            time_ticks: 0,
        }
    }

    pub fn paddle(&self, player: Player) -> &Paddle {
        match player {
            Player::One => &self.paddle1,
            Player::Two => &self.paddle2,
        }
    }

    pub fn paddle_mut(&mut self, player: Player) -> &mut Paddle {
        match player {
            Player::One => &mut self.paddle1,
            Player::Two => &mut self.paddle2,
        }
    }

    /// Back to start-of-session values
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
