//! Game settings
//!
//! Controls and presentation knobs. Nothing here is persisted; overrides come
//! from an optional JSON blob (the canvas `data-settings` attribute on web).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SessionError;
use crate::sim::Player;

/// Paddle movement direction for a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Sign applied to the paddle step
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Key identifiers (DOM `KeyboardEvent.key`) for both paddles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub player1_left: String,
    pub player1_right: String,
    pub player2_left: String,
    pub player2_right: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            player1_left: "ArrowLeft".into(),
            player1_right: "ArrowRight".into(),
            player2_left: "a".into(),
            player2_right: "d".into(),
        }
    }
}

impl KeyBindings {
    /// Look up which paddle a key moves, and which way
    pub fn lookup(&self, key: &str) -> Option<(Player, Direction)> {
        if key == self.player1_left {
            Some((Player::One, Direction::Left))
        } else if key == self.player1_right {
            Some((Player::One, Direction::Right))
        } else if key == self.player2_left {
            Some((Player::Two, Direction::Left))
        } else if key == self.player2_right {
            Some((Player::Two, Direction::Right))
        } else {
            None
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Tick period in milliseconds
    pub tick_interval_ms: i32,

    // === Controls ===
    pub keys: KeyBindings,
    /// Pixels moved per key press
    pub paddle_step: f32,

    // === Scoring ===
    pub points_per_hit: u32,

    // === Presentation ===
    /// CSS color for ball, paddles and score text
    pub fill_color: String,
    /// CSS font for the score text
    pub font: String,
    /// Score text anchor (canvas pixels)
    pub score_pos: Vec2,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            keys: KeyBindings::default(),
            paddle_step: PADDLE_STEP,
            points_per_hit: POINTS_PER_HIT,
            fill_color: "#0095DD".into(),
            font: "24px Arial".into(),
            score_pos: Vec2::new(280.0, 450.0),
        }
    }
}

impl Settings {
    /// Parse overrides; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        let settings: Self = serde_json::from_str(json)?;
        log::info!("Loaded settings overrides");
        Ok(settings.sanitized())
    }

    /// Settings from an optional JSON blob, falling back to defaults on error
    pub fn from_optional_json(json: Option<&str>) -> Self {
        match json {
            Some(json) => Self::from_json(json).unwrap_or_else(|e| {
                log::warn!("Ignoring invalid settings: {}", e);
                Self::default()
            }),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Keep values usable: at least a 1 ms tick and a non-negative step
    fn sanitized(mut self) -> Self {
        self.tick_interval_ms = self.tick_interval_ms.max(1);
        if !self.paddle_step.is_finite() || self.paddle_step < 0.0 {
            self.paddle_step = PADDLE_STEP;
        }
        self
    }
}
