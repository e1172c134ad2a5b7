//! Saved-session store.
//!
//! Persists the authenticated browsing context (cookies) captured by the
//! login flow and hands it back to every submission/search invocation.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::protocol::StorageState;

/// Session store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No session has been captured yet.
    #[error("Session file not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid session file: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// File-backed store for the captured browsing session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Is a captured session present on disk?
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the saved session.
    pub fn load(&self) -> Result<StorageState, StoreError> {
        if !self.path.exists() {
            return Err(StoreError::NotFound(self.path.display().to_string()));
        }
        let content = std::fs::read_to_string(&self.path)?;
        let state: StorageState = serde_json::from_str(&content)?;
        debug!(
            "Loaded session with {} cookies from {}",
            state.cookies.len(),
            self.path.display()
        );
        Ok(state)
    }

    /// Persist a captured session, creating parent directories as needed.
    pub fn save(&self, state: &StorageState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, content)?;
        info!("Session saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Cookie;

    fn sample_state() -> StorageState {
        StorageState {
            cookies: vec![Cookie {
                name: "hhtoken".to_string(),
                value: "abc".to_string(),
                domain: Some(".hh.ru".to_string()),
                path: Some("/".to_string()),
                expires: None,
                http_only: Some(true),
                secure: Some(true),
                same_site: None,
            }],
        }
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        assert!(!store.exists());
        assert!(matches!(store.load(), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("session.json"));

        store.save(&sample_state()).unwrap();
        assert!(store.exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded, sample_state());
    }

    #[test]
    fn test_load_garbage_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = SessionStore::new(path);
        assert!(matches!(store.load(), Err(StoreError::Invalid(_))));
    }
}
