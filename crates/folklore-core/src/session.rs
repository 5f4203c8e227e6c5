use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::User;

/// The client's view of who is logged in.
///
/// Created from a login/register response, restored from disk at
/// startup, and destroyed on logout or when token verification fails.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}

const SESSION_FILE: &str = "session.json";

/// Durable session storage: one JSON file under the data dir, the
/// local-storage equivalent for a terminal client.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)
            .with_context(|| format!("failed to create data dir {}", data_dir.display()))?;
        Ok(Self {
            path: data_dir.join(SESSION_FILE),
        })
    }

    /// Load the persisted session. A missing or unreadable file yields
    /// the unauthenticated default; a corrupt file is logged and
    /// treated the same way rather than failing startup.
    pub fn load(&self) -> Session {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Session::default(),
        };
        match serde_json::from_str(&raw) {
            Ok(session) => session,
            Err(e) => {
                warn!("discarding corrupt session file {}: {}", self.path.display(), e);
                Session::default()
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let raw = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }

    /// Remove the persisted session. Already-absent is success.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to remove {}", self.path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_session() -> Session {
        Session {
            token: Some("tok123".to_string()),
            user: Some(User {
                id: 3,
                username: "ghostwatcher".to_string(),
                avatar: Some("👻".to_string()),
                rank: Some("OBSERVER".to_string()),
                created_at: Some("2024-01-05T00:00:00".to_string()),
            }),
        }
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path()).unwrap();

        store.save(&sample_session()).unwrap();
        let loaded = store.load();
        assert_eq!(loaded.token.as_deref(), Some("tok123"));
        assert_eq!(loaded.user.unwrap().username, "ghostwatcher");
    }

    #[test]
    fn test_missing_file_is_unauthenticated() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path()).unwrap();
        let session = store.load();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_corrupt_file_is_unauthenticated() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path()).unwrap();
        fs::write(dir.path().join(SESSION_FILE), "{not json").unwrap();
        assert!(!store.load().is_authenticated());
    }

    #[test]
    fn test_clear_removes_file_and_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path()).unwrap();
        store.save(&sample_session()).unwrap();

        store.clear().unwrap();
        assert!(!store.load().is_authenticated());

        // Clearing again must not fail
        store.clear().unwrap();
    }
}
