//! In-memory store
//!
//! Keeps the serialized JSON rather than the book itself so loads go through
//! the same parsing as the real backends.

use super::{HighScoreStore, StoreError};
use crate::highscores::HighScoreBook;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    json: Option<String>,
    /// Refuse every write
    pub read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with raw (possibly invalid) data
    pub fn with_raw(json: impl Into<String>) -> Self {
        Self {
            json: Some(json.into()),
            read_only: false,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.json.as_deref()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<HighScoreBook, StoreError> {
        match &self.json {
            Some(json) => Ok(serde_json::from_str(json)?),
            None => Ok(HighScoreBook::default()),
        }
    }

    fn save(&mut self, book: &HighScoreBook) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::Unavailable("store is read-only"));
        }
        self.json = Some(serde_json::to_string(book)?);
        Ok(())
    }
}
