//! Canvas Pong - two players, one device, one canvas
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball step, wall/paddle collisions, scoring)
//! - `session`: Tick loop state, pause flag, score bookkeeping
//! - `input`: Keyboard and touch mapping onto paddle positions
//! - `renderer`: Drawing through the `Surface` primitives
//! - `platform`: Browser wiring (timer, listeners, teardown)
//! - `settings`: Tunable controls and presentation

pub mod error;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::SessionError;
pub use session::{Session, TickOutcome};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playing field dimensions (canvas pixels)
    pub const FIELD_WIDTH: f32 = 600.0;
    pub const FIELD_HEIGHT: f32 = 900.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_X: f32 = 300.0;
    pub const BALL_START_Y: f32 = 450.0;
    /// Pixels per tick
    pub const BALL_START_DX: f32 = 4.0;
    pub const BALL_START_DY: f32 = 4.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_START_X: f32 = 250.0;
    /// Near paddle (player 1) sits at the bottom, far paddle (player 2) at the top
    pub const NEAR_PADDLE_Y: f32 = 880.0;
    pub const FAR_PADDLE_Y: f32 = 10.0;

    /// Distance the ball is pushed off a paddle after a hit
    pub const PADDLE_SNAP: f32 = 10.0;

    /// Fixed tick period in milliseconds
    pub const TICK_INTERVAL_MS: i32 = 10;
    /// Keyboard paddle step (pixels per key press)
    pub const PADDLE_STEP: f32 = 20.0;
    /// Points awarded per paddle hit
    pub const POINTS_PER_HIT: u32 = 5;
}

/// Clamp a paddle's left edge so the paddle stays inside the field
#[inline]
pub fn clamp_paddle_x(x: f32, paddle_width: f32) -> f32 {
    x.clamp(0.0, (consts::FIELD_WIDTH - paddle_width).max(0.0))
}
