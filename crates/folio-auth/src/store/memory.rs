//! In-memory session store using DashMap.

use std::sync::Arc;

use dashmap::DashMap;

use folio_core::AppResult;
use folio_core::traits::{SessionStore, StorageScope};

/// Session store that keeps everything in process memory.
///
/// Both scopes end with the process; useful for tests and for the
/// public site server, which never signs in.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: Arc<DashMap<(StorageScope, String), String>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored values across both scopes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no values.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, scope: StorageScope, key: &str) -> AppResult<Option<String>> {
        Ok(self
            .entries
            .get(&(scope, key.to_string()))
            .map(|v| v.value().clone()))
    }

    fn set(&self, scope: StorageScope, key: &str, value: &str) -> AppResult<()> {
        self.entries
            .insert((scope, key.to_string()), value.to_string());
        Ok(())
    }

    fn remove(&self, scope: StorageScope, key: &str) -> AppResult<()> {
        self.entries.remove(&(scope, key.to_string()));
        Ok(())
    }
}
