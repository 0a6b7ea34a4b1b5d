//! Rendering module
//!
//! Draws the match through four primitives. Backends implement [`Surface`]:
//! the browser canvas on wasm32, and [`CommandBuffer`] everywhere else.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod commands;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use commands::{CommandBuffer, DrawCommand};

use glam::Vec2;

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::settings::Settings;
use crate::sim::{GameState, Paddle};

/// A 2D drawing target
pub trait Surface {
    /// Wipe a `size` region starting at the origin
    fn clear(&mut self, size: Vec2);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: &str);
    fn fill_text(&mut self, text: &str, at: Vec2, font: &str, color: &str);
}

/// Draw one frame: clear, ball, both paddles, score
pub fn render<S: Surface + ?Sized>(surface: &mut S, state: &GameState, settings: &Settings) {
    let color = settings.fill_color.as_str();

    surface.clear(Vec2::new(FIELD_WIDTH, FIELD_HEIGHT));
    surface.fill_circle(state.ball.pos, state.ball.radius, color);
    draw_paddle(surface, &state.paddle1, color);
    draw_paddle(surface, &state.paddle2, color);
    surface.fill_text(
        &state.score.label(),
        settings.score_pos,
        &settings.font,
        color,
    );
}

fn draw_paddle<S: Surface + ?Sized>(surface: &mut S, paddle: &Paddle, color: &str) {
    surface.fill_rect(paddle.pos, paddle.size(), color);
}
