//! Game state and core simulation types
//!
//! Everything a renderer needs to draw a frame lives here and is read-only
//! from the outside between steps.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::difficulty::Tuning;
use super::session::FinalScore;
use crate::colors;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No game running (title screen)
    Idle,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Every brick destroyed, waiting for next-level command
    LevelComplete,
    /// Out of lives
    GameOver,
}

/// A ball entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Velocity in pixels per frame
    pub vel: Vec2,
    pub radius: f32,
    /// Scalar speed, raised by paddle bounces up to the difficulty cap
    pub speed: f32,
}

impl Ball {
    /// Create a ball at `pos` travelling at `angle` (radians, screen space, y down)
    pub fn launch(pos: Vec2, angle: f32, speed: f32) -> Self {
        Self {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            radius: BALL_RADIUS,
            speed,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    /// Keep |dy| at or above the minimum, preserving direction
    pub fn enforce_min_vertical(&mut self) {
        if self.vel.y.abs() < MIN_VERTICAL_VELOCITY {
            self.vel.y = if self.vel.y < 0.0 {
                -MIN_VERTICAL_VELOCITY
            } else {
                MIN_VERTICAL_VELOCITY
            };
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Center x
    pub x: f32,
    /// Top edge (fixed)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Width to revert to when the expand effect ends
    pub base_width: f32,
    pub expanded: bool,
    /// Remaining expand time (ms)
    pub expand_timer: f32,
}

impl Paddle {
    pub fn new(base_width: f32) -> Self {
        Self {
            x: FIELD_WIDTH / 2.0,
            y: FIELD_HEIGHT - PADDLE_MARGIN,
            width: base_width,
            height: PADDLE_HEIGHT,
            base_width,
            expanded: false,
            expand_timer: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x - self.width / 2.0, self.y, self.width, self.height)
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    /// Move the paddle center, keeping the whole paddle inside the field
    pub fn move_to(&mut self, x: f32) {
        let half = self.half_width();
        self.x = x.clamp(half, FIELD_WIDTH - half);
    }

    /// Apply (or refresh) the expand effect
    pub fn expand(&mut self) {
        self.expanded = true;
        self.width = EXPANDED_PADDLE_WIDTH;
        self.expand_timer = POWERUP_DURATION;
        self.move_to(self.x);
    }

    /// Run down the expand timer. Returns true when the paddle shrank back.
    pub fn update_expand(&mut self, dt: f32) -> bool {
        if !self.expanded {
            return false;
        }
        self.expand_timer -= dt;
        if self.expand_timer <= 0.0 {
            self.expanded = false;
            self.expand_timer = 0.0;
            self.width = self.base_width;
            self.move_to(self.x);
            return true;
        }
        false
    }
}

/// Brick toughness class, assigned by row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrickTier {
    pub color: u32,
    pub hits: u8,
}

/// Tiers from the top row down; rows past the last reuse it
pub const BRICK_TIERS: [BrickTier; 5] = [
    BrickTier { color: colors::NEON_PINK, hits: 1 },
    BrickTier { color: colors::NEON_CYAN, hits: 1 },
    BrickTier { color: colors::NEON_ORANGE, hits: 2 },
    BrickTier { color: colors::NEON_PURPLE, hits: 2 },
    BrickTier { color: colors::NEON_YELLOW, hits: 3 },
];

impl BrickTier {
    pub fn for_row(row: u32) -> BrickTier {
        let index = (row as usize).min(BRICK_TIERS.len() - 1);
        BRICK_TIERS[index]
    }
}

/// A brick entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub hits: u8,
    pub max_hits: u8,
    pub color: u32,
    pub alive: bool,
}

impl Brick {
    pub fn new(rect: Rect, tier: BrickTier) -> Self {
        Self {
            rect,
            hits: tier.hits,
            max_hits: tier.hits,
            color: tier.color,
            alive: true,
        }
    }

    /// Take one hit. Returns true if this hit destroyed the brick.
    pub fn hit(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.hits = self.hits.saturating_sub(1);
        if self.hits == 0 {
            self.alive = false;
            return true;
        }
        false
    }

    /// Render opacity, fading with damage
    pub fn opacity(&self) -> f32 {
        0.5 + (self.hits as f32 / self.max_hits.max(1) as f32) * 0.5
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Temporarily widen the paddle
    Expand,
    /// Clone a ball with mirrored horizontal velocity
    MultiBall,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 2] = [PowerUpKind::Expand, PowerUpKind::MultiBall];

    pub fn color(&self) -> u32 {
        match self {
            PowerUpKind::Expand => colors::NEON_GREEN,
            PowerUpKind::MultiBall => colors::NEON_YELLOW,
        }
    }
}

/// A falling power-up capsule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    /// Center x, top y
    pub pos: Vec2,
    pub kind: PowerUpKind,
    /// Fall speed (px/frame)
    pub vy: f32,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            kind,
            vy: POWERUP_SPEED,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x - POWERUP_WIDTH / 2.0,
            self.pos.y,
            POWERUP_WIDTH,
            POWERUP_HEIGHT,
        )
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: u32,
    /// 1.0 at spawn, removed at 0
    pub life: f32,
    /// Life lost per step
    pub decay: f32,
}

/// Maximum particles
pub const MAX_PARTICLES: usize = 256;

/// Slow-motion state, armed when the last brick of a level breaks
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SlowMotion {
    pub active: bool,
    /// Remaining real time (ms)
    pub timer: f32,
}

impl SlowMotion {
    pub fn arm(&mut self) {
        self.active = true;
        self.timer = SLOW_MOTION_DURATION;
    }

    /// Multiplier the frame driver applies to elapsed time
    pub fn time_scale(&self) -> f32 {
        if self.active { SLOW_MOTION_SCALE } else { 1.0 }
    }

    /// Count down by a scaled delta, converting back to real time
    pub fn update(&mut self, scaled_dt: f32) {
        if !self.active {
            return;
        }
        self.timer -= scaled_dt / SLOW_MOTION_SCALE;
        if self.timer <= 0.0 {
            self.active = false;
            self.timer = 0.0;
        }
    }
}

/// Screen shake state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenShake {
    /// Current render offset
    pub offset: Vec2,
    /// Remaining shake time (ms)
    pub timer: f32,
}

impl ScreenShake {
    pub fn trigger(&mut self) {
        self.timer = SCREEN_SHAKE_DURATION;
    }

    pub fn is_active(&self) -> bool {
        self.timer > 0.0
    }

    /// Decay the timer and roll a new offset scaled by the remaining fraction
    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R) {
        if self.timer > 0.0 {
            self.timer = (self.timer - dt).max(0.0);
            let intensity = (self.timer / SCREEN_SHAKE_DURATION) * SCREEN_SHAKE_INTENSITY;
            self.offset = Vec2::new(
                (rng.random::<f32>() - 0.5) * intensity * 2.0,
                (rng.random::<f32>() - 0.5) * intensity * 2.0,
            );
        } else {
            self.offset = Vec2::ZERO;
        }
    }
}

/// Cosmetic knobs; never affect scoring or physics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Effects {
    pub particle_cap: usize,
    pub screen_shake: bool,
}

impl Default for Effects {
    fn default() -> Self {
        Self {
            particle_cap: MAX_PARTICLES,
            screen_shake: true,
        }
    }
}

/// Notable things that happened during a step or command, for renderers and audio
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PaddleHit { speed: f32 },
    BrickHit { index: usize, hits_left: u8 },
    BrickDestroyed { index: usize, points: u64 },
    PowerUpSpawned(PowerUpKind),
    /// `applied` is false when a multiball pickup hit the ball cap
    PowerUpCollected { kind: PowerUpKind, applied: bool },
    BallLost,
    LifeLost { lives_left: u32 },
    SlowMotionStarted,
    LevelCleared { level: u32, score: u64 },
    GameOver(FinalScore),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Tunables for the current game, fixed at start
    pub(crate) tuning: Tuning,
    pub effects: Effects,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    /// Current level (1-based)
    pub level: u32,
    pub slow_motion: SlowMotion,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    pub bricks: Vec<Brick>,
    pub particles: Vec<Particle>,
    pub power_ups: Vec<PowerUp>,
    pub screen_shake: ScreenShake,
    /// Events since the last drain
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game state with the given seed
    pub fn new(seed: u64) -> Self {
        let tuning = Tuning::default();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            effects: Effects::default(),
            phase: GamePhase::Idle,
            score: 0,
            lives: tuning.starting_lives,
            level: 1,
            slow_motion: SlowMotion::default(),
            paddle: Paddle::new(tuning.paddle_width),
            balls: Vec::new(),
            bricks: Vec::new(),
            particles: Vec::new(),
            power_ups: Vec::new(),
            screen_shake: ScreenShake::default(),
            events: Vec::new(),
        }
    }

    /// Create a fresh ball above the paddle, launched roughly straight up
    pub fn new_ball(&mut self) -> Ball {
        let angle = -std::f32::consts::FRAC_PI_2
            + (self.rng.random::<f32>() - 0.5) * 2.0 * BALL_SPAWN_SPREAD;
        let speed = self.tuning.spawn_speed(self.level);
        let pos = Vec2::new(
            FIELD_WIDTH / 2.0,
            FIELD_HEIGHT - PADDLE_MARGIN - BALL_SPAWN_CLEARANCE,
        );
        Ball::launch(pos, angle, speed)
    }

    /// Replace all balls with a single fresh one
    pub fn respawn_ball(&mut self) {
        let ball = self.new_ball();
        self.balls.clear();
        self.balls.push(ball);
    }

    /// Tunables the current game was started with
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn alive_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }

    /// Emit a radial burst of particles, respecting the particle cap
    pub fn spawn_particles(&mut self, origin: Vec2, color: u32) {
        let room = self.effects.particle_cap.saturating_sub(self.particles.len());
        for _ in 0..PARTICLE_COUNT.min(room) {
            let angle = self.rng.random::<f32>() * std::f32::consts::TAU;
            let speed = 2.0 + self.rng.random::<f32>() * 4.0;
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                radius: 3.0 + self.rng.random::<f32>() * 4.0,
                color,
                life: 1.0,
                decay: 0.02 + self.rng.random::<f32>() * 0.02,
            });
        }
    }

    pub fn trigger_screen_shake(&mut self) {
        if self.effects.screen_shake {
            self.screen_shake.trigger();
        }
    }

    /// Clear transient effects (particles, capsules, shake)
    pub fn clear_effects(&mut self) {
        self.particles.clear();
        self.power_ups.clear();
        self.screen_shake = ScreenShake::default();
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brick_hit_is_idempotent_after_death() {
        let mut brick = Brick::new(Rect::new(0.0, 0.0, 70.0, 25.0), BRICK_TIERS[2]);
        assert_eq!(brick.hits, 2);
        assert!(!brick.hit());
        assert!(brick.alive);
        assert_eq!(brick.hits, 1);
        assert!(brick.hit());
        assert!(!brick.alive);
        assert!(!brick.hit());
        assert_eq!(brick.hits, 0);
        assert!(!brick.alive);
    }

    #[test]
    fn test_tier_for_row_clamps() {
        assert_eq!(BrickTier::for_row(0).hits, 1);
        assert_eq!(BrickTier::for_row(4).hits, 3);
        assert_eq!(BrickTier::for_row(9), BRICK_TIERS[4]);
    }

    #[test]
    fn test_paddle_move_clamps_to_field() {
        let mut paddle = Paddle::new(120.0);
        paddle.move_to(-500.0);
        assert_eq!(paddle.x, 60.0);
        paddle.move_to(5000.0);
        assert_eq!(paddle.x, FIELD_WIDTH - 60.0);
    }

    #[test]
    fn test_expand_refresh_and_revert() {
        let mut paddle = Paddle::new(120.0);
        paddle.expand();
        assert_eq!(paddle.width, EXPANDED_PADDLE_WIDTH);
        assert!(!paddle.update_expand(6000.0));
        paddle.expand();
        assert_eq!(paddle.expand_timer, POWERUP_DURATION);
        assert!(!paddle.update_expand(9999.0));
        assert!(paddle.update_expand(1.0));
        assert!(!paddle.expanded);
        assert_eq!(paddle.width, 120.0);
    }

    #[test]
    fn test_expand_near_wall_stays_in_field() {
        let mut paddle = Paddle::new(120.0);
        paddle.move_to(FIELD_WIDTH);
        paddle.expand();
        assert!(paddle.rect().right() <= FIELD_WIDTH);
    }

    #[test]
    fn test_min_vertical_preserves_sign() {
        let mut ball = Ball::launch(Vec2::ZERO, 0.0, 5.0);
        ball.vel.y = -0.5;
        ball.enforce_min_vertical();
        assert_eq!(ball.vel.y, -MIN_VERTICAL_VELOCITY);
        ball.vel.y = 0.0;
        ball.enforce_min_vertical();
        assert_eq!(ball.vel.y, MIN_VERTICAL_VELOCITY);
    }

    #[test]
    fn test_new_ball_within_spawn_cone() {
        let mut state = GameState::new(7);
        for _ in 0..100 {
            let ball = state.new_ball();
            let angle = ball.vel.y.atan2(ball.vel.x);
            let from_up = (angle + std::f32::consts::FRAC_PI_2).abs();
            assert!(from_up <= BALL_SPAWN_SPREAD + 1e-5);
            assert!((ball.vel.length() - ball.speed).abs() < 1e-4);
        }
    }

    #[test]
    fn test_particle_cap_respected() {
        let mut state = GameState::new(1);
        state.effects.particle_cap = 20;
        state.spawn_particles(Vec2::ZERO, colors::NEON_PINK);
        state.spawn_particles(Vec2::ZERO, colors::NEON_PINK);
        assert_eq!(state.particles.len(), 20);
    }

    #[test]
    fn test_shake_disabled_by_effects() {
        let mut state = GameState::new(1);
        state.effects.screen_shake = false;
        state.trigger_screen_shake();
        assert!(!state.screen_shake.is_active());
    }

    #[test]
    fn test_slow_motion_runs_in_real_time() {
        let mut slow = SlowMotion::default();
        slow.arm();
        // 300ms of scaled time is 1000ms of real time
        slow.update(299.0);
        assert!(slow.active);
        slow.update(2.0);
        assert!(!slow.active);
        assert_eq!(slow.time_scale(), 1.0);
    }
}
