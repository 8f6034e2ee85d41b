//! Difficulty profiles and per-game tuning
//!
//! A profile is a static bundle of starting tunables. At game start the
//! chosen profile is turned into a [`Tuning`] that the game state holds for
//! the rest of the run; nothing writes to it afterwards.

use serde::{Deserialize, Serialize};

/// Selectable difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// HUD label
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn profile(&self) -> &'static DifficultyProfile {
        match self {
            Difficulty::Easy => &EASY,
            Difficulty::Medium => &MEDIUM,
            Difficulty::Hard => &HARD,
        }
    }
}

/// Starting tunables for one difficulty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Launch speed at level 1 (px/frame)
    pub ball_speed: f32,
    /// Cap for paddle speed-ups
    pub max_ball_speed: f32,
    /// Speed added per paddle bounce
    pub speed_increment: f32,
    pub lives: u32,
    pub paddle_width: f32,
    /// Brick rows at level 0; the grid grows by one row every two levels
    pub brick_rows: u32,
    /// Chance that a destroyed brick drops a power-up
    pub powerup_chance: f32,
}

const EASY: DifficultyProfile = DifficultyProfile {
    ball_speed: 5.0,
    max_ball_speed: 9.0,
    speed_increment: 0.1,
    lives: 5,
    paddle_width: 140.0,
    brick_rows: 4,
    powerup_chance: 0.2,
};

const MEDIUM: DifficultyProfile = DifficultyProfile {
    ball_speed: 6.0,
    max_ball_speed: 11.0,
    speed_increment: 0.15,
    lives: 3,
    paddle_width: 120.0,
    brick_rows: 5,
    powerup_chance: 0.15,
};

const HARD: DifficultyProfile = DifficultyProfile {
    ball_speed: 7.5,
    max_ball_speed: 14.0,
    speed_increment: 0.2,
    lives: 2,
    paddle_width: 100.0,
    brick_rows: 6,
    powerup_chance: 0.1,
};

/// Runtime tunables for a single game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub difficulty: Difficulty,
    pub ball_speed: f32,
    pub max_ball_speed: f32,
    pub speed_increment: f32,
    pub starting_lives: u32,
    pub paddle_width: f32,
    pub brick_rows: u32,
    pub powerup_chance: f32,
}

impl Tuning {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let p = difficulty.profile();
        Self {
            difficulty,
            ball_speed: p.ball_speed,
            max_ball_speed: p.max_ball_speed,
            speed_increment: p.speed_increment,
            starting_lives: p.lives,
            paddle_width: p.paddle_width,
            brick_rows: p.brick_rows,
            powerup_chance: p.powerup_chance,
        }
    }

    /// Launch speed for a freshly spawned ball on the given level
    pub fn spawn_speed(&self, level: u32) -> f32 {
        self.ball_speed + crate::consts::BALL_LEVEL_SPEED_BONUS * level.saturating_sub(1) as f32
    }

    /// Number of brick rows on the given level
    pub fn rows_for_level(&self, level: u32) -> u32 {
        self.brick_rows + level / 2
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::default())
    }
}
