//! Session progression: game start, lives, levels and pause
//!
//! Commands from the input layer land here. Each returns whether it was
//! accepted in the current phase; rejected commands leave the state alone.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::difficulty::{Difficulty, Tuning};
use super::state::{Brick, BrickTier, GameEvent, GamePhase, GameState, Paddle, SlowMotion};
use crate::consts::*;

/// Result of a finished game, handed to the highscore collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScore {
    pub score: u64,
    pub level: u32,
    pub difficulty: Difficulty,
}

/// Lay out the brick grid for a level. Deeper rows get tougher tiers.
pub fn generate_bricks(tuning: &Tuning, level: u32) -> Vec<Brick> {
    let rows = tuning.rows_for_level(level);
    let mut bricks = Vec::with_capacity((rows * BRICK_COLS) as usize);

    for row in 0..rows {
        let tier = BrickTier::for_row(row);
        let y = BRICK_TOP_OFFSET + row as f32 * (BRICK_HEIGHT + BRICK_PADDING);
        for col in 0..BRICK_COLS {
            let x = BRICK_LEFT_OFFSET + col as f32 * (BRICK_WIDTH + BRICK_PADDING);
            bricks.push(Brick::new(Rect::new(x, y, BRICK_WIDTH, BRICK_HEIGHT), tier));
        }
    }

    bricks
}

impl GameState {
    /// Start a new game at level 1 with the given difficulty
    pub fn start_game(&mut self, difficulty: Difficulty) -> bool {
        if !matches!(self.phase, GamePhase::Idle | GamePhase::GameOver) {
            return false;
        }
        self.tuning = Tuning::for_difficulty(difficulty);
        self.score = 0;
        self.level = 1;
        self.lives = self.tuning.starting_lives;
        self.slow_motion = SlowMotion::default();
        self.reset_level();
        self.phase = GamePhase::Playing;
        log::info!(
            "Game started: {} ({} lives, {} bricks)",
            difficulty.label(),
            self.lives,
            self.bricks.len()
        );
        true
    }

    /// Play again after a game over, keeping the difficulty
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.start_game(self.tuning.difficulty)
    }

    /// Advance from a cleared level to the next one.
    ///
    /// Slow motion armed by the last brick keeps running into the new level.
    pub fn next_level(&mut self) -> bool {
        if self.phase != GamePhase::LevelComplete {
            return false;
        }
        self.level += 1;
        self.reset_level();
        self.phase = GamePhase::Playing;
        log::info!("Level {} started ({} bricks)", self.level, self.bricks.len());
        true
    }

    /// Rebuild paddle, ball and bricks for the current level
    fn reset_level(&mut self) {
        self.paddle = Paddle::new(self.tuning.paddle_width);
        self.respawn_ball();
        self.bricks = generate_bricks(&self.tuning, self.level);
        self.clear_effects();
    }

    /// Every ball is gone: spend a life or end the game
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        log::debug!("Life lost, {} left", self.lives);
        self.emit(GameEvent::LifeLost {
            lives_left: self.lives,
        });

        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            let final_score = self.final_score();
            log::info!(
                "Game over: {} points on level {} ({})",
                final_score.score,
                final_score.level,
                final_score.difficulty.label()
            );
            self.emit(GameEvent::GameOver(final_score));
        } else {
            self.respawn_ball();
        }
    }

    /// Freeze the simulation after the last brick breaks
    pub fn win_level(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::LevelComplete;
        log::info!("Level {} cleared, score {}", self.level, self.score);
        self.emit(GameEvent::LevelCleared {
            level: self.level,
            score: self.score,
        });
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.phase = GamePhase::Playing;
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Abandon the current game and return to the title screen.
    ///
    /// Returns the score to record, if there is one worth recording.
    pub fn end_game(&mut self) -> Option<FinalScore> {
        if !matches!(
            self.phase,
            GamePhase::Playing | GamePhase::Paused | GamePhase::LevelComplete
        ) {
            return None;
        }
        self.phase = GamePhase::Idle;
        log::info!("Game ended at level {} with {} points", self.level, self.score);
        (self.score > 0).then(|| self.final_score())
    }

    /// Leave the game-over screen
    pub fn go_home(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.phase = GamePhase::Idle;
        true
    }

    /// Follow the pointer. Out-of-field positions clamp; non-finite ones are ignored.
    pub fn set_pointer_x(&mut self, x: f32) {
        if self.phase != GamePhase::Playing || !x.is_finite() {
            return;
        }
        self.paddle.move_to(x);
    }

    pub fn final_score(&self) -> FinalScore {
        FinalScore {
            score: self.score,
            level: self.level,
            difficulty: self.tuning.difficulty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BRICK_TIERS;
    use proptest::prelude::*;

    fn clear_bricks(state: &mut GameState) {
        for brick in &mut state.bricks {
            brick.alive = false;
            brick.hits = 0;
        }
    }

    #[test]
    fn test_start_game_applies_difficulty() {
        let mut state = GameState::new(42);
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.start_game(Difficulty::Hard));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 2);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.paddle.width, 100.0);
        assert_eq!(state.tuning().difficulty, Difficulty::Hard);
        assert_eq!(state.tuning().starting_lives, 2);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].speed, 7.5);
        // 6 base rows + 1/2 = 6 rows
        assert_eq!(state.bricks.len(), 60);
        assert!(!state.start_game(Difficulty::Easy));
    }

    #[test]
    fn test_brick_tiers_by_row() {
        let tuning = Tuning::for_difficulty(Difficulty::Hard);
        let bricks = generate_bricks(&tuning, 4);
        // 6 + 2 rows
        assert_eq!(bricks.len(), 80);
        assert_eq!(bricks[0].max_hits, BRICK_TIERS[0].hits);
        assert_eq!(bricks[20].color, BRICK_TIERS[2].color);
        assert_eq!(bricks[79].hits, BRICK_TIERS[4].hits);
        assert_eq!(bricks[79].color, BRICK_TIERS[4].color);
        assert_eq!(bricks[11].rect, Rect::new(103.0, 93.0, 70.0, 25.0));
        assert!(bricks.iter().all(|b| b.rect.right() <= FIELD_WIDTH));
    }

    #[test]
    fn test_next_level_rebuilds() {
        let mut state = GameState::new(42);
        state.start_game(Difficulty::Easy);
        state.activate_power_up(crate::sim::PowerUpKind::Expand);
        state.trigger_screen_shake();
        clear_bricks(&mut state);
        state.win_level();
        assert_eq!(state.phase, GamePhase::LevelComplete);
        let score = state.score;

        assert!(state.next_level());
        assert_eq!(state.level, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.alive_bricks(), (4 + 1) * 10);
        assert!(!state.paddle.expanded);
        assert_eq!(state.paddle.width, 140.0);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].speed, 5.5);
        assert!(state.particles.is_empty());
        assert!(state.power_ups.is_empty());
        assert!(!state.screen_shake.is_active());
        assert_eq!(state.score, score);
    }

    #[test]
    fn test_slow_motion_carries_into_next_level() {
        let mut state = GameState::new(42);
        state.start_game(Difficulty::Easy);
        state.tuning.powerup_chance = 0.0;
        let rect = Rect::new(300.0, 200.0, 70.0, 25.0);
        state.bricks = vec![Brick::new(rect, BRICK_TIERS[0])];
        state.balls[0].pos = glam::Vec2::new(335.0, 236.0);
        state.balls[0].vel = glam::Vec2::new(0.0, -5.0);

        state.frame(16.0);
        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert!(state.slow_motion.active);

        assert!(state.next_level());
        assert!(state.slow_motion.active);
        state.activate_power_up(crate::sim::PowerUpKind::Expand);
        state.trigger_screen_shake();

        state.frame(100.0);
        assert!((state.paddle.expand_timer - (POWERUP_DURATION - 30.0)).abs() < 1e-3);
        assert!((state.screen_shake.timer - (SCREEN_SHAKE_DURATION - 30.0)).abs() < 1e-3);
        assert!((state.slow_motion.timer - (SLOW_MOTION_DURATION - 100.0)).abs() < 1e-3);
    }

    #[test]
    fn test_next_level_rejected_while_playing() {
        let mut state = GameState::new(42);
        state.start_game(Difficulty::Easy);
        assert!(!state.next_level());
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_win_level_only_once() {
        let mut state = GameState::new(42);
        state.start_game(Difficulty::Easy);
        state.drain_events();
        state.win_level();
        state.win_level();
        assert_eq!(state.drain_events().len(), 1);
    }

    #[test]
    fn test_lose_life_until_game_over() {
        let mut state = GameState::new(42);
        state.start_game(Difficulty::Hard);
        state.score = 90;
        state.balls.clear();
        state.lose_life();
        assert_eq!(state.lives, 1);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.phase, GamePhase::Playing);

        state.balls.clear();
        state.lose_life();
        assert_eq!(state.lives, 0);
        assert!(state.balls.is_empty());
        assert_eq!(state.phase, GamePhase::GameOver);
        let final_score = FinalScore {
            score: 90,
            level: 1,
            difficulty: Difficulty::Hard,
        };
        assert_eq!(state.drain_events().last(), Some(&GameEvent::GameOver(final_score)));
    }

    #[test]
    fn test_pause_resume() {
        let mut state = GameState::new(42);
        assert!(!state.pause());
        state.start_game(Difficulty::Easy);
        let before = state.balls.clone();
        assert!(state.pause());
        assert!(state.is_paused());
        assert!(!state.pause());
        assert_eq!(state.balls, before);
        assert!(state.toggle_pause());
        assert!(state.is_playing());
        assert!(!state.resume());
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = GameState::new(42);
        state.start_game(Difficulty::Medium);
        assert!(!state.restart());
        state.lives = 1;
        state.score = 300;
        state.level = 4;
        state.balls.clear();
        state.lose_life();
        assert!(state.restart());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.tuning.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_end_game_flushes_score() {
        let mut state = GameState::new(42);
        state.start_game(Difficulty::Easy);
        assert_eq!(state.end_game(), None);
        assert_eq!(state.phase, GamePhase::Idle);

        state.start_game(Difficulty::Easy);
        state.score = 40;
        state.pause();
        let final_score = state.end_game();
        assert_eq!(
            final_score,
            Some(FinalScore {
                score: 40,
                level: 1,
                difficulty: Difficulty::Easy
            })
        );
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.end_game(), None);
    }

    #[test]
    fn test_go_home_from_game_over() {
        let mut state = GameState::new(42);
        assert!(!state.go_home());
        state.start_game(Difficulty::Easy);
        state.lives = 1;
        state.balls.clear();
        state.lose_life();
        assert!(state.go_home());
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.start_game(Difficulty::Hard));
    }

    #[test]
    fn test_pointer_ignored_when_not_playing() {
        let mut state = GameState::new(42);
        state.start_game(Difficulty::Easy);
        state.pause();
        state.set_pointer_x(100.0);
        assert_eq!(state.paddle.x, FIELD_WIDTH / 2.0);
        state.resume();
        state.set_pointer_x(f32::NAN);
        assert_eq!(state.paddle.x, FIELD_WIDTH / 2.0);
        state.set_pointer_x(100.0);
        assert_eq!(state.paddle.x, 100.0);
    }

    proptest! {
        #[test]
        fn prop_pointer_keeps_paddle_in_field(x in -10_000.0f32..10_000.0) {
            let mut state = GameState::new(3);
            state.start_game(Difficulty::Medium);
            state.set_pointer_x(x);
            let rect = state.paddle.rect();
            prop_assert!(rect.x >= 0.0);
            prop_assert!(rect.right() <= FIELD_WIDTH);
        }

        #[test]
        fn prop_level_brick_count(level in 1u32..20) {
            for difficulty in Difficulty::ALL {
                let tuning = Tuning::for_difficulty(difficulty);
                let bricks = generate_bricks(&tuning, level);
                let expected = (tuning.brick_rows + level / 2) * BRICK_COLS;
                prop_assert_eq!(bricks.len() as u32, expected);
                prop_assert!(bricks.iter().all(|b| b.alive));
            }
        }
    }
}
