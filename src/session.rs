//! Session persistence — the token and cached profile that survive app
//! restarts.
//!
//! A single small record under fixed keys, cleared in full on logout. The
//! store never holds the pending OTP challenge; that is in-flight state
//! only.

use std::io::Write;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::auth::User;
use crate::error::SessionStoreError;

/// Key for the session token within the stored document.
pub const SESSION_TOKEN_KEY: &str = "auth_token";
/// Key for the cached user profile within the stored document.
pub const USER_KEY: &str = "user_data";

/// The persisted session: bearer token + last-known profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredSession {
    #[serde(rename = "auth_token")]
    pub token: String,
    #[serde(rename = "user_data")]
    pub user: User,
}

/// Persistence contract for the session record.
///
/// Implementations must treat `save` as a full overwrite and `clear` as
/// removing everything; partial sessions must never survive.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<StoredSession>, SessionStoreError>;
    fn save(&self, session: &StoredSession) -> Result<(), SessionStoreError>;
    fn clear(&self) -> Result<(), SessionStoreError>;
}

// ─── File-backed store ───────────────────────────────────────────────────────

/// JSON-file-backed store for native embedders. Writes go through a temp
/// file + rename so a crash mid-write cannot corrupt the session.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<StoredSession>, SessionStoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let session = serde_json::from_slice(&bytes)
            .map_err(|e| SessionStoreError::Corrupt(e.to_string()))?;
        Ok(Some(session))
    }

    fn save(&self, session: &StoredSession) -> Result<(), SessionStoreError> {
        let json = serde_json::to_vec_pretty(session)
            .map_err(|e| SessionStoreError::Corrupt(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        {
            let mut file = std::fs::File::create(&tmp)?;
            file.write_all(&json)?;
            file.sync_all()?;
        }
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ─── In-memory store ─────────────────────────────────────────────────────────

/// Ephemeral store for tests and embedders that manage persistence
/// themselves.
#[derive(Default)]
pub struct MemorySessionStore {
    session: RwLock<Option<StoredSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<StoredSession>, SessionStoreError> {
        Ok(self.session.read().expect("session store lock").clone())
    }

    fn save(&self, session: &StoredSession) -> Result<(), SessionStoreError> {
        *self.session.write().expect("session store lock") = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        *self.session.write().expect("session store lock") = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> StoredSession {
        StoredSession {
            token: "tok_123".to_string(),
            user: User {
                id: 7,
                name: "Asha".to_string(),
                phone: "9876543210".to_string(),
                role: "customer".to_string(),
            },
        }
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemorySessionStore::new();
        assert_eq!(store.load().unwrap(), None);
        store.save(&session()).unwrap();
        assert_eq!(store.load().unwrap(), Some(session()));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join("kirana-sdk-test-session");
        let _ = std::fs::remove_dir_all(&dir);
        let store = FileSessionStore::new(dir.join("session.json"));

        assert_eq!(store.load().unwrap(), None);
        store.save(&session()).unwrap();
        assert_eq!(store.load().unwrap(), Some(session()));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        // Clearing an already-empty store is fine.
        store.clear().unwrap();

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_stored_session_uses_fixed_keys() {
        let json = serde_json::to_value(session()).unwrap();
        assert!(json.get(SESSION_TOKEN_KEY).is_some());
        assert!(json.get(USER_KEY).is_some());
    }
}
