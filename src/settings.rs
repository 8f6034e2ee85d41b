//! Driver settings and preferences
//!
//! Loaded from a JSON file, then overridden from the environment. None of
//! these change game rules; they pick the difficulty, seed and cosmetics.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::sim::{Difficulty, Effects};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

/// Environment variable overrides
pub const ENV_DIFFICULTY: &str = "NEON_BREAKER_DIFFICULTY";
pub const ENV_SEED: &str = "NEON_BREAKER_SEED";
pub const ENV_HIGHSCORES: &str = "NEON_BREAKER_HIGHSCORES";
pub const ENV_QUALITY: &str = "NEON_BREAKER_QUALITY";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty for new games
    pub difficulty: Difficulty,
    /// Fixed RNG seed (random per run when absent)
    pub seed: Option<u64>,

    // === Driver ===
    /// Simulated frame length (ms)
    pub frame_ms: f32,
    /// Frame budget per game before the driver ends it
    pub max_frames: u64,
    /// Number of games the headless driver plays
    pub games: u32,
    /// Highscore file
    pub highscores_path: PathBuf,

    // === Visual Effects ===
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Screen shake on brick hits
    pub screen_shake: bool,
    /// Particle effects
    pub particles: bool,
    /// Reduced motion (no shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            seed: None,

            frame_ms: 1000.0 / 60.0,
            max_frames: 60 * 60 * 5,
            games: 1,
            highscores_path: PathBuf::from("neon_breaker_highscores.json"),

            quality: QualityPreset::Medium,
            screen_shake: true,
            particles: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Cosmetic knobs for the simulation
    pub fn effects(&self) -> Effects {
        Effects {
            particle_cap: self.max_particles(),
            screen_shake: self.effective_screen_shake(),
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Ignoring malformed settings {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Apply overrides from process environment variables
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup. Unparseable values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup(ENV_DIFFICULTY) {
            match Difficulty::from_str(&value) {
                Some(difficulty) => self.difficulty = difficulty,
                None => log::warn!("Unknown difficulty {:?} in {}", value, ENV_DIFFICULTY),
            }
        }
        if let Some(seed) = lookup(ENV_SEED).and_then(|v| v.trim().parse().ok()) {
            self.seed = Some(seed);
        }
        if let Some(path) = lookup(ENV_HIGHSCORES).filter(|v| !v.is_empty()) {
            self.highscores_path = PathBuf::from(path);
        }
        if let Some(value) = lookup(ENV_QUALITY) {
            match QualityPreset::from_str(value.trim()) {
                Some(quality) => self.quality = quality,
                None => log::warn!("Unknown quality {:?} in {}", value, ENV_QUALITY),
            }
        }
    }
}
