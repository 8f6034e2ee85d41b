//! Highscore storage backends
//!
//! Features:
//! - JSON document keyed by difficulty
//! - Atomic file replace (tmp → save) on native
//! - LocalStorage on the web
//! - In-memory store for tests and headless runs
//!
//! Backends report failures; [`crate::Leaderboard`] decides what to do with them.

pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;
pub mod memory;

pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;
pub use memory::MemoryStore;

use std::fmt;

use crate::highscores::HighScoreBook;

/// Somewhere a highscore book can be read from and written to
pub trait HighScoreStore {
    /// Read the stored book. A store with nothing saved yet returns an empty book.
    fn load(&self) -> Result<HighScoreBook, StoreError>;

    fn save(&mut self, book: &HighScoreBook) -> Result<(), StoreError>;
}

#[derive(Debug)]
pub enum StoreError {
    /// Filesystem failure
    Io(std::io::Error),
    /// Stored data exists but does not parse
    Corrupt(String),
    /// Backend not reachable (no storage in this browser, write refused)
    Unavailable(&'static str),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "highscore storage I/O error: {err}"),
            Self::Corrupt(detail) => write!(f, "highscore data is corrupt: {detail}"),
            Self::Unavailable(reason) => write!(f, "highscore storage unavailable: {reason}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Corrupt(err.to_string())
    }
}
