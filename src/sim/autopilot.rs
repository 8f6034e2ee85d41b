//! Demo autopilot
//!
//! Picks a paddle position for the headless driver and attract mode. It
//! reads the same state a renderer would and feeds back through
//! [`GameState::set_pointer_x`], like any other pointer.

use super::state::{Ball, GameState};
use crate::consts::*;

/// Fraction of the paddle half-width to aim off center, so returns angle
/// back toward the middle of the field instead of looping vertically
const AIM_OFFSET: f32 = 0.3;

/// Frames until a descending ball reaches the paddle line
fn frames_to_paddle(ball: &Ball, paddle_y: f32) -> Option<f32> {
    if ball.vel.y <= 0.0 {
        return None;
    }
    Some(((paddle_y - ball.radius - ball.pos.y) / ball.vel.y).max(0.0))
}

/// Where a ball will cross the paddle line, folding side-wall bounces
pub fn predict_landing_x(ball: &Ball, paddle_y: f32) -> Option<f32> {
    let frames = frames_to_paddle(ball, paddle_y)?;
    let raw = ball.pos.x + ball.vel.x * frames;

    let span = FIELD_WIDTH - 2.0 * ball.radius;
    let u = (raw - ball.radius).rem_euclid(2.0 * span);
    let folded = if u <= span { u } else { 2.0 * span - u };
    Some(ball.radius + folded)
}

/// Target paddle center for this frame, or None when there is nothing to chase
pub fn autopilot_target(state: &GameState) -> Option<f32> {
    let paddle_y = state.paddle.y;

    let urgent = state
        .balls
        .iter()
        .filter_map(|b| frames_to_paddle(b, paddle_y).map(|t| (t, b)))
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, b)| b);

    if let Some(ball) = urgent {
        let landing = predict_landing_x(ball, paddle_y)?;
        let toward_center = (FIELD_WIDTH / 2.0 - landing).signum();
        return Some(landing - toward_center * state.paddle.half_width() * AIM_OFFSET);
    }

    // Every ball is heading up: go collect the lowest capsule
    if let Some(capsule) = state
        .power_ups
        .iter()
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    {
        return Some(capsule.pos.x);
    }

    state.balls.first().map(|b| b.pos.x)
}
