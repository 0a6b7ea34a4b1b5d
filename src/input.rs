//! Input mapping
//!
//! Keyboard and touch events move paddles directly, independent of the tick
//! clock. The next tick sees whatever position was committed last.

use crate::clamp_paddle_x;
use crate::settings::{Direction, KeyBindings};
use crate::sim::{GameState, Player};

/// A paddle move decoded from a platform event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaddleCommand {
    /// Step a paddle left or right by the configured amount
    Step { player: Player, dir: Direction },
    /// Drag the near paddle so it centers on a surface-relative x
    DragTo { x: f32 },
}

/// Decode a key press. Unbound keys yield nothing.
pub fn key_command(keys: &KeyBindings, key: &str) -> Option<PaddleCommand> {
    keys.lookup(key)
        .map(|(player, dir)| PaddleCommand::Step { player, dir })
}

/// Decode a drag from the first contact point's client x
///
/// `None` (a touch event with no touches) decodes to nothing.
pub fn drag_command(client_x: Option<f32>, surface_left: f32) -> Option<PaddleCommand> {
    let client_x = client_x?;
    if !client_x.is_finite() || !surface_left.is_finite() {
        return None;
    }
    Some(PaddleCommand::DragTo {
        x: client_x - surface_left,
    })
}

/// Left edge for a paddle centered on `x`, kept inside the field
pub fn centered_paddle_x(x: f32, paddle_width: f32) -> f32 {
    clamp_paddle_x(x - paddle_width / 2.0, paddle_width)
}

/// Apply a decoded command to the paddles
pub fn apply(state: &mut GameState, command: PaddleCommand, step: f32) {
    match command {
        PaddleCommand::Step { player, dir } => {
            state.paddle_mut(player).shift(dir.sign() * step);
        }
        PaddleCommand::DragTo { x } => {
            let paddle = state.paddle_mut(Player::One);
            let target = centered_paddle_x(x, paddle.width());
            paddle.set_x(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    #[test]
    fn test_keys_move_their_own_paddle() {
        let keys = KeyBindings::default();
        let mut state = GameState::new();

        apply(&mut state, key_command(&keys, "ArrowLeft").unwrap(), PADDLE_STEP);
        assert_eq!(state.paddle1.pos.x, 230.0);
        assert_eq!(state.paddle2.pos.x, 250.0);

        apply(&mut state, key_command(&keys, "d").unwrap(), PADDLE_STEP);
        assert_eq!(state.paddle1.pos.x, 230.0);
        assert_eq!(state.paddle2.pos.x, 270.0);
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        assert_eq!(key_command(&KeyBindings::default(), "Enter"), None);
    }

    #[test]
    fn test_drag_centers_near_paddle() {
        let mut state = GameState::new();
        let cmd = drag_command(Some(420.0), 20.0).unwrap();
        apply(&mut state, cmd, PADDLE_STEP);
        // 420 - 20 - 50
        assert_eq!(state.paddle1.pos.x, 350.0);
        assert_eq!(state.paddle2.pos.x, 250.0);
    }

    #[test]
    fn test_drag_clamps_to_field() {
        let mut state = GameState::new();
        apply(&mut state, PaddleCommand::DragTo { x: -40.0 }, PADDLE_STEP);
        assert_eq!(state.paddle1.pos.x, 0.0);
        apply(&mut state, PaddleCommand::DragTo { x: 1200.0 }, PADDLE_STEP);
        assert_eq!(state.paddle1.pos.x, FIELD_WIDTH - PADDLE_WIDTH);
    }

    #[test]
    fn test_empty_touch_is_noop() {
        assert_eq!(drag_command(None, 0.0), None);
        assert_eq!(drag_command(Some(f32::NAN), 0.0), None);
    }

    fn any_step() -> impl Strategy<Value = PaddleCommand> {
        (
            prop_oneof![Just(Player::One), Just(Player::Two)],
            prop_oneof![Just(Direction::Left), Just(Direction::Right)],
        )
            .prop_map(|(player, dir)| PaddleCommand::Step { player, dir })
    }

    proptest! {
        #[test]
        fn prop_paddles_never_leave_field(
            start in prop_oneof![Just(0.0f32), Just(500.0f32), 0.0f32..=500.0],
            steps in prop::collection::vec(any_step(), 0..80),
        ) {
            let mut state = GameState::new();
            state.paddle1.set_x(start);
            state.paddle2.set_x(start);
            for cmd in steps {
                apply(&mut state, cmd, PADDLE_STEP);
                for paddle in [&state.paddle1, &state.paddle2] {
                    prop_assert!(paddle.pos.x >= 0.0);
                    prop_assert!(paddle.pos.x <= FIELD_WIDTH - paddle.width());
                }
            }
        }

        #[test]
        fn prop_drag_stays_in_field(x in -2000.0f32..2000.0) {
            let mut state = GameState::new();
            apply(&mut state, PaddleCommand::DragTo { x }, PADDLE_STEP);
            prop_assert!(state.paddle1.pos.x >= 0.0);
            prop_assert!(state.paddle1.pos.x <= FIELD_WIDTH - PADDLE_WIDTH);
        }
    }
}
