//! Recorded draw calls
//!
//! Headless backend: each frame is kept as a list of commands so it can be
//! inspected or logged instead of rasterized.

use glam::Vec2;

use super::Surface;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        size: Vec2,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: String,
    },
    Rect {
        origin: Vec2,
        size: Vec2,
        color: String,
    },
    Text {
        text: String,
        at: Vec2,
        font: String,
        color: String,
    },
}

/// Surface that records the current frame
///
/// A `clear` starts a new frame, mirroring what a canvas shows.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl CommandBuffer {
    /// Commands of the most recent frame
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames started so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Score text of the most recent frame, if one was drawn
    pub fn score_text(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for CommandBuffer {
    fn clear(&mut self, size: Vec2) {
        self.commands.clear();
        self.frames += 1;
        self.commands.push(DrawCommand::Clear { size });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color: color.to_owned(),
        });
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: &str) {
        self.commands.push(DrawCommand::Rect {
            origin,
            size,
            color: color.to_owned(),
        });
    }

    fn fill_text(&mut self, text: &str, at: Vec2, font: &str, color: &str) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            at,
            font: font.to_owned(),
            color: color.to_owned(),
        });
    }
}
