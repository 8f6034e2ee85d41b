//! High score leaderboard system
//!
//! Tracks the top 10 scores per difficulty. Storage failures never reach
//! the player: an unreadable book is treated as empty.

use serde::{Deserialize, Serialize};

use crate::persistence::HighScoreStore;
use crate::sim::{Difficulty, FinalScore};

/// Maximum number of high scores to keep per difficulty
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's score
    pub score: u64,
    /// Level reached
    pub level: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// One difficulty's leaderboard, sorted best first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u64, level: u32, timestamp: f64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                score,
                level,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

/// Leaderboards for every difficulty, as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScoreBook {
    #[serde(default)]
    pub easy: HighScores,
    #[serde(default)]
    pub medium: HighScores,
    #[serde(default)]
    pub hard: HighScores,
}

impl HighScoreBook {
    pub fn table(&self, difficulty: Difficulty) -> &HighScores {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    pub fn table_mut(&mut self, difficulty: Difficulty) -> &mut HighScores {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }
}

/// The highscore collaborator the game reports finished runs to
#[derive(Debug)]
pub struct Leaderboard<S: HighScoreStore> {
    store: S,
}

impl<S: HighScoreStore> Leaderboard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the book, falling back to an empty one
    pub fn book(&self) -> HighScoreBook {
        match self.store.load() {
            Ok(book) => book,
            Err(err) => {
                log::warn!("{err}; treating highscores as empty");
                HighScoreBook::default()
            }
        }
    }

    /// Ordered top entries for one difficulty
    pub fn top(&self, difficulty: Difficulty) -> Vec<HighScoreEntry> {
        self.book().table(difficulty).entries.clone()
    }

    /// Record a finished game. Returns true if it made the table and was saved.
    pub fn report_final_score(&mut self, result: &FinalScore, timestamp: f64) -> bool {
        if result.score == 0 {
            return false;
        }

        let mut book = self.book();
        let Some(rank) = book
            .table_mut(result.difficulty)
            .add_score(result.score, result.level, timestamp)
        else {
            return false;
        };

        match self.store.save(&book) {
            Ok(()) => {
                log::info!(
                    "New {} highscore: {} (rank {})",
                    result.difficulty.label(),
                    result.score,
                    rank
                );
                true
            }
            Err(err) => {
                log::warn!("Could not save highscore: {err}");
                false
            }
        }
    }
}

/// Format a timestamp as a relative date string
pub fn format_date(timestamp: f64, now: f64) -> String {
    let diff_secs = (now - timestamp) / 1000.0;
    let diff_mins = diff_secs / 60.0;
    let diff_hours = diff_mins / 60.0;
    let diff_days = diff_hours / 24.0;

    if diff_days >= 1.0 {
        let days = diff_days.floor() as i64;
        if days == 1 {
            "Yesterday".to_string()
        } else if days < 7 {
            format!("{} days ago", days)
        } else {
            let weeks = days / 7;
            if weeks == 1 {
                "1 week ago".to_string()
            } else {
                format!("{} weeks ago", weeks)
            }
        }
    } else if diff_hours >= 1.0 {
        let hours = diff_hours.floor() as i64;
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if diff_mins >= 1.0 {
        let mins = diff_mins.floor() as i64;
        if mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", mins)
        }
    } else {
        "Just now".to_string()
    }
}
