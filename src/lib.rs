//! Neon Breaker - A brick breaker arcade game core
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, session progression)
//! - `highscores`: Per-difficulty leaderboards
//! - `persistence`: Highscore storage backends
//! - `platform`: Browser/native platform abstraction
//! - `settings`: Driver configuration

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::{HighScoreBook, HighScoreEntry, Leaderboard};
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
///
/// Distances are in field pixels, velocities in pixels per frame and
/// durations in milliseconds.
pub mod consts {
    /// Playing field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle geometry
    pub const PADDLE_HEIGHT: f32 = 16.0;
    /// Gap between the paddle top and the bottom of the field
    pub const PADDLE_MARGIN: f32 = 40.0;
    pub const EXPANDED_PADDLE_WIDTH: f32 = 180.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Spawn height above the paddle
    pub const BALL_SPAWN_CLEARANCE: f32 = 30.0;
    /// Half-width of the random launch cone around straight up (radians, ~14°)
    pub const BALL_SPAWN_SPREAD: f32 = 0.25;
    /// Launch speed bonus per level past the first
    pub const BALL_LEVEL_SPEED_BONUS: f32 = 0.5;
    /// Floor for |dy| so the ball never travels purely sideways
    pub const MIN_VERTICAL_VELOCITY: f32 = 2.0;
    /// Steepest paddle deflection from vertical (60°)
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_3;
    pub const MAX_BALLS: usize = 5;

    /// Brick grid
    pub const BRICK_COLS: u32 = 10;
    pub const BRICK_WIDTH: f32 = 70.0;
    pub const BRICK_HEIGHT: f32 = 25.0;
    pub const BRICK_PADDING: f32 = 8.0;
    pub const BRICK_TOP_OFFSET: f32 = 60.0;
    pub const BRICK_LEFT_OFFSET: f32 = 25.0;
    /// Base points per destroyed brick (multiplied by level)
    pub const BRICK_POINTS: u64 = 10;

    /// Effects
    pub const SCREEN_SHAKE_INTENSITY: f32 = 8.0;
    pub const SCREEN_SHAKE_DURATION: f32 = 100.0;
    pub const PARTICLE_COUNT: usize = 15;
    pub const PARTICLE_GRAVITY: f32 = 0.1;
    pub const SLOW_MOTION_DURATION: f32 = 1000.0;
    pub const SLOW_MOTION_SCALE: f32 = 0.3;

    /// Power-ups
    pub const POWERUP_WIDTH: f32 = 30.0;
    pub const POWERUP_HEIGHT: f32 = 20.0;
    pub const POWERUP_SPEED: f32 = 3.0;
    pub const POWERUP_DURATION: f32 = 10_000.0;
    pub const POWERUP_SCORE: u64 = 50;

    /// Longest frame delta the driver will feed to the step (tab resume, first frame)
    pub const MAX_FRAME_MS: f32 = 250.0;
}

/// Packed 0xRRGGBB colors shared by the simulation and any renderer
pub mod colors {
    pub const NEON_PINK: u32 = 0xff00ff;
    pub const NEON_CYAN: u32 = 0x00ffff;
    pub const NEON_YELLOW: u32 = 0xffff00;
    pub const NEON_GREEN: u32 = 0x00ff88;
    pub const NEON_ORANGE: u32 = 0xff6600;
    pub const NEON_PURPLE: u32 = 0x9900ff;
}
