use std::collections::HashMap;
use std::sync::Mutex;

use tracing::info;

/// Key the confirmation record is stored under.
pub const CONFIRMATION_KEY: &str = "confirmation";

/// Session-scoped key-value store of JSON strings. It lives for the duration
/// of the browser session and is cleared when the session ends. There is
/// exactly one writer (the submitter); the confirmation view reads strictly
/// after the write.
pub struct SessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Set a key, overwriting any prior value.
    pub fn set(&self, key: &str, value: String) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap();
        entries.get(key).cloned()
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(key)
    }

    /// Session end: drop everything.
    pub fn clear(&self) {
        let mut entries = self.entries.lock().unwrap();
        let count = entries.len();
        entries.clear();
        info!("Session ended, cleared {} stored entries", count);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
