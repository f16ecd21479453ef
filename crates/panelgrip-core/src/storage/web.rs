//! Web Storage implementation for WebAssembly.
//!
//! Wraps `window.localStorage` or `window.sessionStorage`.

use super::{KeyValueStore, StorageError, StorageResult};
use web_sys::Storage;

/// Browser Web Storage backend.
///
/// Not Send/Sync: the underlying handle belongs to the JS main thread.
#[derive(Debug, Clone)]
pub struct WebStore {
    storage: Storage,
}

impl WebStore {
    /// Wrap an existing `Storage` object.
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// The window's `localStorage`.
    pub fn local() -> StorageResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("No window object".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("localStorage error: {:?}", e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage not available".to_string()))?;
        Ok(Self::new(storage))
    }

    /// The window's `sessionStorage`.
    pub fn session() -> StorageResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("No window object".to_string()))?;
        let storage = window
            .session_storage()
            .map_err(|e| StorageError::Unavailable(format!("sessionStorage error: {:?}", e)))?
            .ok_or_else(|| StorageError::Unavailable("sessionStorage not available".to_string()))?;
        Ok(Self::new(storage))
    }
}

impl KeyValueStore for WebStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Other(format!("getItem error: {:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        // Fails when the quota is exceeded
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Other(format!("setItem error: {:?}", e)))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| StorageError::Other(format!("removeItem error: {:?}", e)))
    }
}
