//! Browser LocalStorage store (wasm32 only)

use super::{HighScoreStore, StoreError};
use crate::highscores::HighScoreBook;

#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "neon_breaker_highscores";

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable("LocalStorage not accessible"))
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> Result<HighScoreBook, StoreError> {
        let storage = Self::storage()?;
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => Ok(serde_json::from_str(&json)?),
            Ok(None) => Ok(HighScoreBook::default()),
            Err(_) => Err(StoreError::Unavailable("LocalStorage read refused")),
        }
    }

    fn save(&mut self, book: &HighScoreBook) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        let json = serde_json::to_string(book)?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|_| StoreError::Unavailable("LocalStorage write refused"))?;
        log::info!("Highscores saved");
        Ok(())
    }
}
