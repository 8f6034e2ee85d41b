//! Per-frame simulation step
//!
//! Core game loop that advances the simulation by one frame. Ball, particle
//! and capsule positions move a fixed amount per call; `dt` (milliseconds)
//! only drives the timers.

use glam::Vec2;
use rand::Rng;

use super::collision::{
    Overlaps, ball_paddle_contact, circle_intersects_rect, reflect_axis, rects_touch,
};
use super::difficulty::Tuning;
use super::state::{Ball, GameEvent, GamePhase, GameState, Paddle, PowerUp, PowerUpKind};
use crate::colors;
use crate::consts::*;

impl GameState {
    /// Advance one display frame given the wall-clock time since the last one.
    ///
    /// Events from the previous frame are discarded first, so [`GameState::events`]
    /// always holds this frame's. Does nothing else unless a level is in play.
    /// Slow motion scales the delta before it reaches the step.
    pub fn frame(&mut self, elapsed_ms: f32) {
        self.events.clear();
        if self.phase != GamePhase::Playing {
            return;
        }
        let elapsed = if elapsed_ms.is_finite() {
            elapsed_ms.clamp(0.0, MAX_FRAME_MS)
        } else {
            0.0
        };
        let dt = elapsed * self.slow_motion.time_scale();
        tick(self, dt);
    }

    /// Apply a collected power-up. Both kinds award the bonus and a burst at
    /// the paddle, even when a multiball pickup is capped.
    pub fn activate_power_up(&mut self, kind: PowerUpKind) {
        let applied = match kind {
            PowerUpKind::Expand => {
                self.paddle.expand();
                true
            }
            PowerUpKind::MultiBall => self.clone_ball(),
        };

        let origin = Vec2::new(self.paddle.x, self.paddle.y);
        self.spawn_particles(origin, colors::NEON_GREEN);
        self.score += POWERUP_SCORE;
        log::debug!("Power-up {:?} collected (applied: {})", kind, applied);
        self.emit(GameEvent::PowerUpCollected { kind, applied });
    }

    /// Add a twin of the first ball flying the mirrored horizontal direction
    fn clone_ball(&mut self) -> bool {
        if self.balls.len() >= MAX_BALLS {
            return false;
        }
        let Some(first) = self.balls.first().copied() else {
            return false;
        };
        let mut twin = first;
        twin.vel.x = -first.vel.x;
        self.balls.push(twin);
        true
    }
}

/// Advance the game state by one frame of `dt` milliseconds (already scaled)
pub fn tick(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.slow_motion.update(dt);

    if state.paddle.update_expand(dt) {
        log::debug!("Paddle expand expired");
    }

    update_balls(state);
    update_particles(state);
    update_power_ups(state);

    let GameState { screen_shake, rng, .. } = &mut *state;
    screen_shake.update(dt, rng);

    // A life loss this frame may already have ended the game
    if state.phase == GamePhase::Playing && state.alive_bricks() == 0 {
        state.win_level();
    }
}

fn update_balls(state: &mut GameState) {
    let mut lost = vec![false; state.balls.len()];

    for (i, lost_flag) in lost.iter_mut().enumerate() {
        let mut ball = state.balls[i];

        move_ball(&mut ball);

        if ball_paddle_contact(ball.pos, ball.radius, ball.vel, &state.paddle.rect()) {
            bounce_off_paddle(&mut ball, &state.paddle, &state.tuning);
            state.emit(GameEvent::PaddleHit { speed: ball.speed });
        }

        collide_bricks(state, &mut ball);

        if ball.bottom() >= FIELD_HEIGHT {
            *lost_flag = true;
        } else {
            ball.enforce_min_vertical();
        }
        state.balls[i] = ball;
    }

    if !lost.contains(&true) {
        return;
    }

    let mut flags = lost.iter();
    state.balls.retain(|_| !flags.next().copied().unwrap_or(false));
    for _ in lost.iter().filter(|l| **l) {
        state.emit(GameEvent::BallLost);
    }

    if state.balls.is_empty() {
        state.lose_life();
    }
}

/// Integrate position and bounce off the side and top walls
fn move_ball(ball: &mut Ball) {
    ball.pos += ball.vel;

    if ball.pos.x - ball.radius <= 0.0 || ball.pos.x + ball.radius >= FIELD_WIDTH {
        ball.vel.x = -ball.vel.x;
        ball.pos.x = ball.pos.x.clamp(ball.radius, FIELD_WIDTH - ball.radius);
    }

    if ball.pos.y - ball.radius <= 0.0 {
        ball.vel.y = -ball.vel.y;
        ball.pos.y = ball.radius;
    }
}

/// Relaunch a ball off the paddle.
///
/// The hit offset from the paddle center (-1..1) picks the launch angle, up
/// to 60° either side of straight up. Speed grows by the tuning increment up
/// to the cap.
pub fn bounce_off_paddle(ball: &mut Ball, paddle: &Paddle, tuning: &Tuning) {
    let hit = ((ball.pos.x - paddle.x) / paddle.half_width()).clamp(-1.0, 1.0);
    let angle = hit * MAX_BOUNCE_ANGLE - std::f32::consts::FRAC_PI_2;

    ball.speed = (ball.speed + tuning.speed_increment).min(tuning.max_ball_speed);
    ball.vel = Vec2::new(angle.cos(), angle.sin()) * ball.speed;
    if ball.vel.y > 0.0 {
        ball.vel.y = -ball.vel.y;
    }

    // Sit just above the paddle so the next frame can't re-trigger
    ball.pos.y = paddle.y - ball.radius - 1.0;
}

/// Resolve the first alive brick the ball overlaps, if any
fn collide_bricks(state: &mut GameState, ball: &mut Ball) {
    let Some(index) = state
        .bricks
        .iter()
        .position(|b| b.alive && circle_intersects_rect(ball.pos, ball.radius, &b.rect))
    else {
        return;
    };

    let rect = state.bricks[index].rect;
    let axis = Overlaps::measure(ball.pos, ball.radius, &rect).resolve();
    ball.vel = reflect_axis(ball.vel, axis);

    let destroyed = state.bricks[index].hit();
    state.trigger_screen_shake();
    state.emit(GameEvent::BrickHit {
        index,
        hits_left: state.bricks[index].hits,
    });

    if !destroyed {
        return;
    }

    let points = BRICK_POINTS * state.level as u64;
    state.score += points;
    state.emit(GameEvent::BrickDestroyed { index, points });

    let center = rect.center();
    let color = state.bricks[index].color;
    state.spawn_particles(center, color);

    if state.rng.random::<f32>() < state.tuning.powerup_chance {
        let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
        state.power_ups.push(PowerUp::new(center, kind));
        state.emit(GameEvent::PowerUpSpawned(kind));
    }

    if state.alive_bricks() == 0 {
        state.slow_motion.arm();
        state.emit(GameEvent::SlowMotionStarted);
    }
}

fn update_particles(state: &mut GameState) {
    for p in state.particles.iter_mut() {
        p.pos += p.vel;
        p.vel.y += PARTICLE_GRAVITY;
        p.life -= p.decay;
    }
    state.particles.retain(|p| p.life > 0.0);
}

fn update_power_ups(state: &mut GameState) {
    let paddle = state.paddle.rect();
    let mut collected = Vec::new();

    state.power_ups.retain_mut(|pu| {
        pu.pos.y += pu.vy;
        if rects_touch(&pu.rect(), &paddle) {
            collected.push(pu.kind);
            return false;
        }
        pu.pos.y <= FIELD_HEIGHT
    });

    for kind in collected {
        state.activate_power_up(kind);
    }
}
