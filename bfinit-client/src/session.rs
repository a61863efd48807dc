//! Session - bearer token capability shared by every component
//!
//! Constructed once at startup and handed out by clone; all clones see
//! the same token. When backed by a [`SessionStorage`] the token survives
//! restarts.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Key the token is stored under in the session file
pub const TOKEN_KEY: &str = "bfinitBlogAccessToken";

const SESSION_FILE: &str = "session.json";

/// Session file storage
#[derive(Debug, Clone)]
pub struct SessionStorage {
    path: PathBuf,
}

impl SessionStorage {
    /// Storage at `<dir>/session.json`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(SESSION_FILE),
        }
    }

    /// Save the token
    pub fn save(&self, token: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut map = Map::new();
        map.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
        let json = serde_json::to_string_pretty(&Value::Object(map))?;
        fs::write(&self.path, json)
    }

    /// Load the token
    ///
    /// Accepts the keyed JSON layout, a bare JSON string, or a plain token.
    pub fn load(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let token = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => map.get(TOKEN_KEY)?.as_str()?.to_string(),
            Ok(Value::String(s)) => s,
            Ok(_) => return None,
            Err(_) => raw.to_string(),
        };
        (!token.is_empty()).then_some(token)
    }

    /// Remove the session file
    pub fn delete(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Shared session handle
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
    storage: Option<SessionStorage>,
}

impl Session {
    /// Session that lives only as long as the process
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Session backed by a file, restoring any saved token
    pub fn persistent(storage: SessionStorage) -> Self {
        let token = storage.load();
        if token.is_some() {
            tracing::debug!(path = %storage.path().display(), "Restored session token");
        }
        Self {
            token: Arc::new(RwLock::new(token)),
            storage: Some(storage),
        }
    }

    /// Current bearer token
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Forget the token locally and remove the session file
    pub fn logout(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        if let Some(storage) = &self.storage
            && let Err(e) = storage.delete()
        {
            tracing::warn!(error = %e, "Failed to remove session file");
        }
    }

    /// Store a freshly issued token
    pub(crate) fn sign_in(&self, token: String) -> std::io::Result<()> {
        if let Some(storage) = &self.storage {
            storage.save(&token)?;
        }
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
        Ok(())
    }

    /// Seed a token obtained elsewhere
    pub fn with_token(self, token: impl Into<String>) -> Self {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_save_load_delete() {
        let dir = TempDir::new().unwrap();
        let storage = SessionStorage::new(dir.path());
        assert!(storage.load().is_none());

        storage.save("tok-123").unwrap();
        assert!(storage.exists());
        assert_eq!(storage.load().as_deref(), Some("tok-123"));

        let raw = fs::read_to_string(storage.path()).unwrap();
        assert!(raw.contains(TOKEN_KEY));

        storage.delete().unwrap();
        assert!(!storage.exists());
        assert!(storage.load().is_none());
    }

    #[test]
    fn test_storage_accepts_plain_and_quoted_tokens() {
        let dir = TempDir::new().unwrap();
        let storage = SessionStorage::new(dir.path());

        fs::write(storage.path(), "plain-token\n").unwrap();
        assert_eq!(storage.load().as_deref(), Some("plain-token"));

        fs::write(storage.path(), "\"quoted-token\"").unwrap();
        assert_eq!(storage.load().as_deref(), Some("quoted-token"));
    }

    #[test]
    fn test_session_clones_share_token() {
        let dir = TempDir::new().unwrap();
        let session = Session::persistent(SessionStorage::new(dir.path()));
        let view = session.clone();
        assert!(!view.is_authenticated());

        session.sign_in("abc".into()).unwrap();
        assert_eq!(view.token().as_deref(), Some("abc"));

        let restored = Session::persistent(SessionStorage::new(dir.path()));
        assert!(restored.is_authenticated());

        view.logout();
        assert!(!session.is_authenticated());
        assert!(Session::persistent(SessionStorage::new(dir.path())).token().is_none());
    }
}
