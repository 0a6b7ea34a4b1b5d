//! Session loop state
//!
//! Owns the match record and the pause flag. The platform layer drives
//! [`Session::tick`] from its timer and forwards input events here; nothing
//! in this module knows about timers or the DOM.

use crate::input::{self, PaddleCommand};
use crate::renderer::{Surface, render};
use crate::settings::Settings;
use crate::sim::{GameState, ScoringEvent, advance};

/// What a single tick did
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Paused: nothing simulated, nothing drawn
    Paused,
    /// One step simulated and the frame redrawn
    Advanced { events: Vec<ScoringEvent> },
}

/// A running match
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    settings: Settings,
    paused: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: GameState::new(),
            settings,
            paused: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Flip the pause flag, returning the new value. State is kept as is.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
        self.paused
    }

    /// Restart the match from start-of-session values. Pause is untouched.
    pub fn reset(&mut self) {
        self.state.reset();
        log::info!("Match reset");
    }

    /// Apply a key press; returns whether the key was bound
    pub fn handle_key(&mut self, key: &str) -> bool {
        match input::key_command(&self.settings.keys, key) {
            Some(cmd) => {
                self.apply(cmd);
                true
            }
            None => false,
        }
    }

    /// Apply a drag at `client_x` (first contact point, if any)
    pub fn handle_drag(&mut self, client_x: Option<f32>, surface_left: f32) -> bool {
        match input::drag_command(client_x, surface_left) {
            Some(cmd) => {
                self.apply(cmd);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, cmd: PaddleCommand) {
        input::apply(&mut self.state, cmd, self.settings.paddle_step);
    }

    /// Run one tick: simulate, commit, score, redraw
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> TickOutcome {
        if self.paused {
            return TickOutcome::Paused;
        }

        let step = advance(&self.state.ball, &self.state.paddle1, &self.state.paddle2);
        self.state.ball = step.ball;
        for event in &step.events {
            self.state
                .score
                .award(event.player, self.settings.points_per_hit);
            log::debug!(
                "Tick {}: {:?} scores ({})",
                self.state.time_ticks,
                event.player,
                self.state.score.label()
            );
        }
        self.state.time_ticks += 1;

        render(surface, &self.state, &self.settings);

        TickOutcome::Advanced {
            events: step.events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::CommandBuffer;
    use crate::sim::{Ball, Player};
    use glam::Vec2;

    #[test]
    fn test_tick_advances_and_renders() {
        let mut session = Session::default();
        let mut buffer = CommandBuffer::default();

        let outcome = session.tick(&mut buffer);
        assert_eq!(outcome, TickOutcome::Advanced { events: vec![] });
        assert_eq!(session.state().ball.pos, Vec2::new(304.0, 454.0));
        assert_eq!(session.state().time_ticks, 1);
        assert_eq!(buffer.frames(), 1);
        assert_eq!(buffer.score_text(), Some("0 : 0"));
    }

    #[test]
    fn test_paused_ticks_change_nothing() {
        let mut session = Session::default();
        let mut buffer = CommandBuffer::default();
        session.tick(&mut buffer);

        assert!(session.toggle_pause());
        let before = session.state().clone();
        for _ in 0..500 {
            assert_eq!(session.tick(&mut buffer), TickOutcome::Paused);
        }
        assert_eq!(session.state(), &before);
        assert_eq!(buffer.frames(), 1);

        assert!(!session.toggle_pause());
        session.tick(&mut buffer);
        assert_eq!(buffer.frames(), 2);
        assert_ne!(session.state().ball, before.ball);
    }

    #[test]
    fn test_hit_awards_points_per_hit() {
        let mut session = Session::default();
        session.state.ball = Ball::new(Vec2::new(300.0, 875.0), Vec2::new(4.0, 4.0));

        let mut buffer = CommandBuffer::default();
        let outcome = session.tick(&mut buffer);
        assert_eq!(
            outcome,
            TickOutcome::Advanced {
                events: vec![ScoringEvent {
                    player: Player::One
                }]
            }
        );
        assert_eq!(session.state().score.player1, 5);
        assert_eq!(session.state().score.player2, 0);
        assert_eq!(buffer.score_text(), Some("0 : 5"));
    }

    #[test]
    fn test_custom_points_per_hit() {
        let mut session = Session::new(Settings {
            points_per_hit: 1,
            ..Default::default()
        });
        session.state.ball = Ball::new(Vec2::new(300.0, 15.0), Vec2::new(4.0, -4.0));
        session.tick(&mut CommandBuffer::default());
        assert_eq!(session.state().score.player2, 1);
    }

    #[test]
    fn test_input_while_paused_still_moves_paddles() {
        let mut session = Session::default();
        session.toggle_pause();
        assert!(session.handle_key("ArrowRight"));
        assert!(!session.handle_key("x"));
        assert_eq!(session.state().paddle1.pos.x, 270.0);

        assert!(session.handle_drag(Some(100.0), 0.0));
        assert_eq!(session.state().paddle1.pos.x, 50.0);
        assert!(!session.handle_drag(None, 0.0));
        assert_eq!(session.state().paddle1.pos.x, 50.0);
    }

    #[test]
    fn test_next_tick_sees_latest_paddle() {
        let mut session = Session::default();
        session.state.ball = Ball::new(Vec2::new(120.0, 875.0), Vec2::new(4.0, 4.0));
        // Near paddle starts at 250..350, out of reach; drag it under the ball
        session.handle_drag(Some(120.0), 0.0);

        let outcome = session.tick(&mut CommandBuffer::default());
        assert!(matches!(outcome, TickOutcome::Advanced { ref events } if events.len() == 1));
        assert_eq!(session.state().ball.pos.y, 870.0);
    }

    #[test]
    fn test_reset_keeps_pause_flag() {
        let mut session = Session::default();
        let mut buffer = CommandBuffer::default();
        for _ in 0..50 {
            session.tick(&mut buffer);
        }
        session.handle_key("a");
        session.toggle_pause();

        session.reset();
        assert_eq!(session.state(), &GameState::new());
        assert!(session.is_paused());
    }

    #[test]
    fn test_long_run_stays_in_field() {
        let mut session = Session::default();
        let mut buffer = CommandBuffer::default();
        for i in 0..5_000 {
            if i % 37 == 0 {
                session.handle_key("ArrowLeft");
                session.handle_key("d");
            }
            session.tick(&mut buffer);
            let pos = session.state().ball.pos;
            assert!((0.0..=600.0).contains(&pos.x));
            assert!((0.0..=900.0).contains(&pos.y));
        }
        assert_eq!(buffer.frames(), 5_000);
    }
}
