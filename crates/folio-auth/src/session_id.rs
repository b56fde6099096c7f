//! Per-process session identifier.

use chrono::Utc;
use uuid::Uuid;

use folio_core::AppResult;
use folio_core::traits::{SessionStore, StorageScope, keys};

/// Generate an id of the form `session_<millis>_<9 random chars>`.
pub fn generate_session_id() -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("session_{}_{}", Utc::now().timestamp_millis(), &random[..9])
}

/// Return the stored session id, creating one on first use.
pub fn session_id(store: &dyn SessionStore) -> AppResult<String> {
    if let Some(id) = store.get(StorageScope::Session, keys::SESSION_ID)? {
        return Ok(id);
    }
    let id = generate_session_id();
    store.set(StorageScope::Session, keys::SESSION_ID, &id)?;
    Ok(id)
}

/// Forget the session id.
pub fn clear_session_id(store: &dyn SessionStore) -> AppResult<()> {
    store.remove(StorageScope::Session, keys::SESSION_ID)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySessionStore;

    #[test]
    fn test_generated_format() {
        let id = generate_session_id();
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "session");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
    }

    #[test]
    fn test_session_id_is_stable_until_cleared() {
        let store = MemorySessionStore::new();
        let first = session_id(&store).unwrap();
        assert_eq!(session_id(&store).unwrap(), first);

        clear_session_id(&store).unwrap();
        assert!(store.get(StorageScope::Session, keys::SESSION_ID).unwrap().is_none());
    }
}
