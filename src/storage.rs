//! Persistent key-value storage collaborator.
//!
//! The application owns the backing store (browser local storage, a settings
//! file on desktop builds). The client reads the auth token before every
//! request and writes it back whenever a response carries a refreshed value;
//! hosted-app builds additionally read the user-configured server host at
//! construction time.

use std::collections::HashMap;
use std::sync::Mutex;

/// Storage key holding the user-configured server host (hosted-app builds).
pub const HOST_KEY: &str = "encore-host";

/// Storage key holding the current auth token.
pub const TOKEN_KEY: &str = "jwt-token";

/// Persistent key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, overwriting any previous value.
    fn set(&self, key: &str, value: &str);
}

/// In-memory [`KeyValueStore`], for tests and embedders without persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.entries.lock() {
            Ok(entries) => entries.get(key).cloned(),
            Err(poisoned) => poisoned.into_inner().get(key).cloned(),
        }
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_previous_value() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "first");
        store.set(TOKEN_KEY, "second");
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("second"));
    }

    #[test]
    fn get_missing_key_returns_none() {
        let store = MemoryStore::new();
        assert!(store.get(HOST_KEY).is_none());
    }
}
