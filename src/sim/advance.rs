//! Fixed timestep simulation step
//!
//! One call to [`advance`] moves the ball by one tick and resolves wall and
//! paddle contacts. The step is a pure function of its inputs.

use super::state::{Ball, Paddle, Player, ScoringEvent};
use crate::consts::*;

/// Result of one simulation step
#[derive(Debug, Clone, PartialEq)]
pub struct Advance {
    pub ball: Ball,
    /// Zero, one, or (on a very short field) two scoring events
    pub events: Vec<ScoringEvent>,
}

/// Advance the ball by one tick against the walls and both paddles
///
/// Paddle contact is judged against the ball's pre-move `x` and one step
/// ahead of the projected `y`. Both paddle checks run every tick, so a single
/// tick can score for both players.
pub fn advance(ball: &Ball, paddle1: &Paddle, paddle2: &Paddle) -> Advance {
    let mut vel = ball.vel;
    let mut events = Vec::new();

    let projected = ball.pos + vel;

    // Walls test the projected position itself (paddles look one step
    // further). Velocity flips only; position is corrected below.
    if projected.y > FIELD_HEIGHT || projected.y < 0.0 {
        vel.y = -vel.y;
    }
    if projected.x > FIELD_WIDTH || projected.x < 0.0 {
        vel.x = -vel.x;
    }

    let mut snapped_y = None;

    // Near paddle (bottom)
    if projected.y + vel.y > paddle1.pos.y && paddle1.spans(ball.pos.x) {
        vel.y = -vel.y;
        snapped_y = Some(paddle1.pos.y - PADDLE_SNAP);
        events.push(ScoringEvent {
            player: Player::One,
        });
    }

    // Far paddle (top)
    let probe_y = snapped_y.unwrap_or(projected.y);
    if probe_y + vel.y < paddle2.pos.y + paddle2.height() && paddle2.spans(ball.pos.x) {
        vel.y = -vel.y;
        snapped_y = Some(paddle2.pos.y + paddle2.height() + PADDLE_SNAP);
        events.push(ScoringEvent {
            player: Player::Two,
        });
    }

    let mut pos = ball.pos + vel;
    if let Some(y) = snapped_y {
        pos.y = y;
    }

    Advance {
        ball: Ball { pos, vel, ..*ball },
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn ball(x: f32, y: f32, dx: f32, dy: f32) -> Ball {
        Ball::new(Vec2::new(x, y), Vec2::new(dx, dy))
    }

    #[test]
    fn test_near_paddle_hit_scores_player_one() {
        let paddle1 = Paddle::new(250.0, 880.0);
        let paddle2 = Paddle::far();

        let result = advance(&ball(300.0, 875.0, 4.0, 4.0), &paddle1, &paddle2);
        assert_eq!(result.ball.vel, Vec2::new(4.0, -4.0));
        assert_eq!(result.ball.pos.y, 870.0);
        assert_eq!(result.ball.pos.x, 304.0);
        assert_eq!(
            result.events,
            vec![ScoringEvent {
                player: Player::One
            }]
        );
    }

    #[test]
    fn test_far_paddle_hit_scores_player_two() {
        let paddle1 = Paddle::near();
        let paddle2 = Paddle::new(250.0, 10.0);

        let result = advance(&ball(300.0, 15.0, 4.0, -4.0), &paddle1, &paddle2);
        assert_eq!(result.ball.vel.y, 4.0);
        assert_eq!(result.ball.pos.y, 30.0);
        assert_eq!(
            result.events,
            vec![ScoringEvent {
                player: Player::Two
            }]
        );
    }

    #[test]
    fn test_no_collision_moves_by_velocity() {
        let start = ball(300.0, 450.0, 4.0, 4.0);
        let result = advance(&start, &Paddle::near(), &Paddle::far());
        assert_eq!(result.ball.pos, Vec2::new(304.0, 454.0));
        assert_eq!(result.ball.vel, start.vel);
        assert!(result.events.is_empty());
    }

    #[test]
    fn test_miss_outside_paddle_span() {
        // Ball beside the near paddle: no score, bottom wall bounce instead
        let paddle1 = Paddle::new(250.0, 880.0);
        let result = advance(&ball(100.0, 898.0, 4.0, 4.0), &paddle1, &Paddle::far());
        assert!(result.events.is_empty());
        assert_eq!(result.ball.vel.y, -4.0);
        assert_eq!(result.ball.pos, Vec2::new(104.0, 894.0));
    }

    #[test]
    fn test_wall_waits_for_projected_crossing() {
        // Projected y lands exactly short of the wall: keep going
        let start = ball(100.0, 894.0, 4.0, 4.0);
        let result = advance(&start, &Paddle::near(), &Paddle::far());
        assert_eq!(result.ball.pos, Vec2::new(104.0, 898.0));
        assert_eq!(result.ball.vel, Vec2::new(4.0, 4.0));

        // Next tick would cross it: flip and stay inside
        let result = advance(&result.ball, &Paddle::near(), &Paddle::far());
        assert_eq!(result.ball.vel, Vec2::new(4.0, -4.0));
        assert_eq!(result.ball.pos, Vec2::new(108.0, 894.0));
    }

    #[test]
    fn test_paddle_edge_does_not_count() {
        let paddle1 = Paddle::new(250.0, 880.0);
        let result = advance(&ball(250.0, 875.0, 4.0, 4.0), &paddle1, &Paddle::far());
        assert!(result.events.is_empty());
    }

    #[test]
    fn test_paddle_uses_pre_move_x() {
        // Projected x (351) is past the right edge, pre-move x (347) is not
        let paddle1 = Paddle::new(250.0, 880.0);
        let result = advance(&ball(347.0, 875.0, 4.0, 4.0), &paddle1, &Paddle::far());
        assert_eq!(result.events.len(), 1);

        // And the other way round: pre-move x outside, projected inside
        let result = advance(&ball(248.0, 875.0, 4.0, 4.0), &paddle1, &Paddle::far());
        assert!(result.events.is_empty());
    }

    #[test]
    fn test_corner_flips_both_axes() {
        let result = advance(
            &ball(598.0, 898.0, 4.0, 4.0),
            &Paddle::new(0.0, 880.0),
            &Paddle::far(),
        );
        assert_eq!(result.ball.vel, Vec2::new(-4.0, -4.0));
        assert_eq!(result.ball.pos, Vec2::new(594.0, 894.0));
        assert!(result.events.is_empty());
    }

    #[test]
    fn test_double_score_on_short_reach() {
        // Paddles overlapping vertically: both checks fire in one tick
        let paddle1 = Paddle::new(250.0, 100.0);
        let paddle2 = Paddle::new(250.0, 200.0);

        let result = advance(&ball(300.0, 150.0, 4.0, 4.0), &paddle1, &paddle2);
        assert_eq!(
            result.events,
            vec![
                ScoringEvent {
                    player: Player::One
                },
                ScoringEvent {
                    player: Player::Two
                },
            ]
        );
        // Two flips cancel out; the far paddle's snap wins
        assert_eq!(result.ball.vel.y, 4.0);
        assert_eq!(result.ball.pos.y, 220.0);
    }

    #[test]
    fn test_radius_preserved() {
        let result = advance(&Ball::default(), &Paddle::near(), &Paddle::far());
        assert_eq!(result.ball.radius, 10.0);
    }

    proptest! {
        #[test]
        fn prop_vertical_wall_bounce(
            x in 1.0f32..599.0,
            y in 880.0f32..900.0,
            dx in -8.0f32..8.0,
            dy in 0.5f32..10.0,
        ) {
            prop_assume!(y + dy > FIELD_HEIGHT);
            // Paddle parked away from the ball so only the wall applies
            let paddle1 = Paddle::new(if x < 300.0 { 500.0 } else { 0.0 }, 880.0);
            let result = advance(&ball(x, y, dx, dy), &paddle1, &Paddle::far());
            prop_assert_eq!(result.ball.vel.y, -dy);
        }

        #[test]
        fn prop_horizontal_wall_bounce(
            x in 580.0f32..600.0,
            y in 100.0f32..800.0,
            dx in 0.5f32..10.0,
            dy in -8.0f32..8.0,
        ) {
            prop_assume!(x + dx > FIELD_WIDTH);
            let result = advance(&ball(x, y, dx, dy), &Paddle::near(), &Paddle::far());
            prop_assert_eq!(result.ball.vel.x, -dx);

            let mirrored = advance(&ball(FIELD_WIDTH - x, y, -dx, dy), &Paddle::near(), &Paddle::far());
            prop_assert_eq!(mirrored.ball.vel.x, dx);
        }

        #[test]
        fn prop_ball_stays_in_field(
            x in 0.0f32..=600.0,
            y in 0.0f32..=900.0,
            dx in -10.0f32..10.0,
            dy in -10.0f32..10.0,
            p1 in 0.0f32..=500.0,
            p2 in 0.0f32..=500.0,
        ) {
            let result = advance(
                &ball(x, y, dx, dy),
                &Paddle::new(p1, NEAR_PADDLE_Y),
                &Paddle::new(p2, FAR_PADDLE_Y),
            );
            let pos = result.ball.pos;
            prop_assert!((0.0..=FIELD_WIDTH).contains(&pos.x), "x out of field: {}", pos.x);
            prop_assert!((0.0..=FIELD_HEIGHT).contains(&pos.y), "y out of field: {}", pos.y);
            prop_assert!(result.events.len() <= 2);
            prop_assert_eq!(result.ball.vel.x.abs(), dx.abs());
            prop_assert_eq!(result.ball.vel.y.abs(), dy.abs());
        }
    }
}
