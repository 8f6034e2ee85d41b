//! Simulation module
//!
//! All gameplay logic lives here. This module has no rendering or platform
//! dependencies:
//! - Variable frame delta drives timers; positions move per frame
//! - Seeded RNG only, owned by the game state
//! - One game state per session, no globals

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod session;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_target;
pub use collision::{Axis, Rect, circle_intersects_rect, resolve_axis};
pub use difficulty::{Difficulty, DifficultyProfile, Tuning};
pub use session::FinalScore;
pub use state::{
    BRICK_TIERS, Ball, Brick, BrickTier, Effects, GameEvent, GamePhase, GameState, MAX_PARTICLES,
    Paddle, Particle, PowerUp, PowerUpKind, ScreenShake, SlowMotion,
};
pub use tick::tick;
