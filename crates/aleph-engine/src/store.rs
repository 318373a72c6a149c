//! Preference store
//!
//! One boolean key for the enabled flag and one for the hidden-menu flag,
//! key-value, last-write-wins, no schema versioning. Writes are
//! fire-and-forget: nothing in the engine waits on persistence, and a failed
//! write degrades to a warning.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Enabled flag key (absent means enabled)
pub const ENABLED_KEY: &str = "rtlHelperEnabled";

/// Hidden-menu flag key (absent means visible)
pub const MENU_HIDDEN_KEY: &str = "rtlHelperMenuHidden";

/// Durable key-value store for boolean preferences
pub trait PrefStore {
    fn get_bool(&self, key: &str) -> Option<bool>;
    fn set_bool(&mut self, key: &str, value: bool);
}

/// In-memory store, for tests and embedders with their own persistence
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefStore for MemoryStore {
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).copied()
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.values.insert(key.to_string(), value);
    }
}

/// JSON-file-backed store
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    values: HashMap<String, bool>,
}

impl JsonStore {
    /// Open a store file, starting empty when it is missing or unreadable
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = fs::read_to_string(&path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default();
        Self { path, values }
    }

    fn flush(&self) {
        match serde_json::to_string_pretty(&self.values) {
            Ok(json) => {
                if let Err(err) = fs::write(&self.path, json) {
                    tracing::warn!("failed to write preferences to {:?}: {}", self.path, err);
                }
            }
            Err(err) => tracing::warn!("failed to serialize preferences: {}", err),
        }
    }
}

impl PrefStore for JsonStore {
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).copied()
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.values.insert(key.to_string(), value);
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_bool(ENABLED_KEY), None);
        store.set_bool(ENABLED_KEY, false);
        assert_eq!(store.get_bool(ENABLED_KEY), Some(false));
    }

    #[test]
    fn test_json_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut store = JsonStore::open(&path);
        store.set_bool(ENABLED_KEY, false);
        store.set_bool(MENU_HIDDEN_KEY, true);

        let reopened = JsonStore::open(&path);
        assert_eq!(reopened.get_bool(ENABLED_KEY), Some(false));
        assert_eq!(reopened.get_bool(MENU_HIDDEN_KEY), Some(true));
    }

    #[test]
    fn test_json_store_missing_file() {
        let store = JsonStore::open("/nonexistent/dir/prefs.json");
        assert_eq!(store.get_bool(ENABLED_KEY), None);
    }
}
