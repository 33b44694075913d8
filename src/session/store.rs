//! Session entry persistence.
//!
//! The admin console keeps its session as two opaque, cookie-style
//! key-value entries with an expiry. The store is an explicit trait passed
//! into the gate rather than ambient global state, so
//! tests run against an in-memory map and the CLI runs against a JSON file
//! in the user's data directory.
//!
//! Entries are whole-value read/write; no transactional discipline is
//! required.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{BlesspetsError, Result};

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

/// A persisted value with an absolute expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEntry {
    /// Opaque entry payload.
    pub value: String,
    /// UTC timestamp at which the entry stops being readable.
    pub expires_at: DateTime<Utc>,
}

impl StoredEntry {
    fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Key-value persistence surface for session state.
///
/// Values are opaque strings with a time-to-live. An expired entry reads as
/// absent; removal of a missing entry succeeds.
pub trait SessionStore: Send + Sync {
    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns [`BlesspetsError::Store`] or an I/O error if the backing
    /// medium rejects the write.
    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Returns the live value for `key`, or `None` when absent or expired.
    ///
    /// # Errors
    ///
    /// Returns an error only when the backing medium cannot be read at all.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Removes the entry for `key`; a missing entry is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium rejects the write.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: SessionStore + ?Sized> SessionStore for std::sync::Arc<S> {
    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        (**self).set(key, value, ttl)
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-process store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, StoredEntry>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, StoredEntry>>> {
        self.entries
            .lock()
            .map_err(|_| BlesspetsError::Store("session store lock poisoned".to_string()))
    }
}

impl SessionStore for MemoryStore {
    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.lock()?.insert(
            key.to_string(),
            StoredEntry {
                value: value.to_string(),
                expires_at: Utc::now() + ttl,
            },
        );
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .lock()?
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone()))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// File-backed store: a JSON map of `key -> {value, expires_at}`.
///
/// The whole file is read and rewritten on every operation; last write wins.
/// An unreadable or corrupt file reads as empty so a damaged session never
/// locks the user out of logging in again.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default session file location under the user's data directory.
    ///
    /// # Errors
    ///
    /// Returns [`BlesspetsError::Store`] when no home directory can be
    /// determined for the current user.
    pub fn default_path() -> Result<PathBuf> {
        directories::ProjectDirs::from("com", "blesspets", "blesspets")
            .map(|dirs| dirs.data_dir().join("session.json"))
            .ok_or_else(|| {
                BlesspetsError::Store("could not determine a data directory".to_string())
            })
    }

    fn read_entries(&self) -> Result<HashMap<String, StoredEntry>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str(&contents) {
            Ok(entries) => Ok(entries),
            Err(error) => {
                warn!(path = %self.path.display(), %error, "session file unreadable, treating as empty");
                Ok(HashMap::new())
            }
        }
    }

    fn write_entries(&self, entries: &HashMap<String, StoredEntry>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(
            key.to_string(),
            StoredEntry {
                value: value.to_string(),
                expires_at: Utc::now() + ttl,
            },
        );
        self.write_entries(&entries)
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.read_entries()?;
        Ok(entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone()))
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_and_get() {
        let store = MemoryStore::new();
        store.set("token", "abc", Duration::days(7)).unwrap();
        assert_eq!(store.get("token").unwrap(), Some("abc".to_string()));
    }

    #[test]
    fn test_memory_store_get_absent_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_memory_store_expired_entry_reads_as_absent() {
        let store = MemoryStore::new();
        store.set("token", "abc", Duration::seconds(-1)).unwrap();
        assert_eq!(store.get("token").unwrap(), None);
    }

    #[test]
    fn test_memory_store_last_write_wins() {
        let store = MemoryStore::new();
        store.set("token", "first", Duration::days(7)).unwrap();
        store.set("token", "second", Duration::days(7)).unwrap();
        assert_eq!(store.get("token").unwrap(), Some("second".to_string()));
    }

    #[test]
    fn test_memory_store_remove_is_idempotent() {
        let store = MemoryStore::new();
        store.set("token", "abc", Duration::days(7)).unwrap();
        store.remove("token").unwrap();
        store.remove("token").unwrap();
        assert_eq!(store.get("token").unwrap(), None);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileStore::new(&path);
        store.set("token", "abc", Duration::days(7)).unwrap();

        // A fresh instance over the same path sees the entry.
        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("token").unwrap(), Some("abc".to_string()));
    }

    #[test]
    fn test_file_store_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nope.json"));
        assert_eq!(store.get("token").unwrap(), None);
        store.remove("token").unwrap();
    }

    #[test]
    fn test_file_store_corrupt_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get("token").unwrap(), None);
    }

    #[test]
    fn test_file_store_expired_entry_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("session.json"));
        store.set("token", "abc", Duration::seconds(-1)).unwrap();
        assert_eq!(store.get("token").unwrap(), None);
    }

    #[test]
    fn test_stored_entry_roundtrip_through_json() {
        let entry = StoredEntry {
            value: "abc".to_string(),
            expires_at: DateTime::from_timestamp(1_800_000_000, 0).expect("valid timestamp"),
        };

        let json = serde_json::to_string(&entry).expect("serialize");
        let restored: StoredEntry = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored.value, entry.value);
        assert_eq!(restored.expires_at, entry.expires_at);
    }
}
