//! File-backed session store.
//!
//! Persistent values live in `<dir>/session.json` so that a signed-in
//! admin console survives restarts. Session-scoped values stay in memory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dashmap::DashMap;
use tracing::{debug, warn};

use folio_core::AppResult;
use folio_core::error::AppError;
use folio_core::traits::{SessionStore, StorageScope};

/// Name of the file holding persistent values.
pub const SESSION_FILE: &str = "session.json";

/// Session store persisting long-lived values to a JSON file.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    /// Persistent values; every mutation rewrites the file under this lock.
    persistent: Mutex<BTreeMap<String, String>>,
    session: DashMap<String, String>,
}

impl FileSessionStore {
    /// Open the store in `dir`, loading any existing session file.
    ///
    /// A corrupt file is logged and treated as empty.
    pub fn open(dir: impl AsRef<Path>) -> AppResult<Self> {
        let path = dir.as_ref().join(SESSION_FILE);
        let persistent = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Ignoring unreadable session file");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), keys = persistent.len(), "Session store opened");

        Ok(Self {
            path,
            persistent: Mutex::new(persistent),
            session: DashMap::new(),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `mutate` to a copy of the persistent map, write it out, and
    /// only then make it current. A failed write leaves memory untouched.
    fn with_persistent<R>(
        &self,
        mutate: impl FnOnce(&mut BTreeMap<String, String>) -> R,
    ) -> AppResult<R> {
        let mut guard = self
            .persistent
            .lock()
            .map_err(|_| AppError::storage("Session store lock poisoned"))?;
        let mut next = guard.clone();
        let result = mutate(&mut next);
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&next)?;
        std::fs::write(&self.path, json)?;
        *guard = next;
        Ok(result)
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, scope: StorageScope, key: &str) -> AppResult<Option<String>> {
        match scope {
            StorageScope::Persistent => {
                let guard = self
                    .persistent
                    .lock()
                    .map_err(|_| AppError::storage("Session store lock poisoned"))?;
                Ok(guard.get(key).cloned())
            }
            StorageScope::Session => Ok(self.session.get(key).map(|v| v.value().clone())),
        }
    }

    fn set(&self, scope: StorageScope, key: &str, value: &str) -> AppResult<()> {
        match scope {
            StorageScope::Persistent => self.with_persistent(|map| {
                map.insert(key.to_string(), value.to_string());
            }),
            StorageScope::Session => {
                self.session.insert(key.to_string(), value.to_string());
                Ok(())
            }
        }
    }

    fn remove(&self, scope: StorageScope, key: &str) -> AppResult<()> {
        match scope {
            StorageScope::Persistent => self.with_persistent(|map| {
                map.remove(key);
            }),
            StorageScope::Session => {
                self.session.remove(key);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::traits::keys;

    #[test]
    fn test_persistent_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileSessionStore::open(dir.path()).unwrap();
            store.set_tokens("access", Some("refresh")).unwrap();
            store
                .set(StorageScope::Session, keys::REDIRECT_AFTER_AUTH, "/admin/projects")
                .unwrap();
        }

        let store = FileSessionStore::open(dir.path()).unwrap();
        assert_eq!(store.token().unwrap().as_deref(), Some("access"));
        assert_eq!(store.refresh_token().unwrap().as_deref(), Some("refresh"));
        assert!(store
            .get(StorageScope::Session, keys::REDIRECT_AFTER_AUTH)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_clear_auth_rewrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::open(dir.path().join("nested")).unwrap();
        store.set_tokens("access", Some("refresh")).unwrap();
        store.clear_auth().unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let map: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SESSION_FILE), "{not json").unwrap();
        let store = FileSessionStore::open(dir.path()).unwrap();
        assert!(store.token().unwrap().is_none());
    }

    #[test]
    fn test_failed_write_keeps_previous_values() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::open(dir.path()).unwrap();
        store.set_tokens("access", None).unwrap();

        // A directory in place of the file makes every write fail.
        std::fs::remove_file(store.path()).unwrap();
        std::fs::create_dir(store.path()).unwrap();

        assert!(store.set_tokens("other", None).is_err());
        assert!(store.clear_auth().is_err());
        assert_eq!(store.token().unwrap().as_deref(), Some("access"));
    }
}
