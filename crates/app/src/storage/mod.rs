//! Durable key-value storage.
//!
//! The client persists small JSON snapshots (session, tokens, baskets)
//! under fixed string keys. Writes are synchronous and best-effort:
//! failures are logged at `warn` and swallowed, never surfaced to callers.

use std::{fs, path::PathBuf, sync::RwLock};

use rustc_hash::FxHashMap;
use tracing::warn;

/// String key-value storage with best-effort persistence.
pub trait KeyValueStore: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    fn set(&self, key: &str, value: &str);

    /// Delete a value.
    fn remove(&self, key: &str);
}

/// Ephemeral in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<FxHashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.write() {
            values.remove(key);
        }
    }
}

/// JSON-file-backed store holding one string map.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: RwLock<FxHashMap<String, String>>,
}

impl FileStore {
    /// Open a store at `path`, starting empty when the file is missing or
    /// unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let values = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|error| {
                warn!("discarding unreadable state file {}: {error}", path.display());

                FxHashMap::default()
            }),
            Err(_) => FxHashMap::default(),
        };

        Self {
            path,
            values: RwLock::new(values),
        }
    }

    fn flush(&self, values: &FxHashMap<String, String>) {
        let Ok(raw) = serde_json::to_string_pretty(values) else {
            return;
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                _ = fs::create_dir_all(parent);
            }
        }

        if let Err(error) = fs::write(&self.path, raw) {
            warn!("failed to persist state file {}: {error}", self.path.display());
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.to_string(), value.to_string());
            self.flush(&values);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.write() {
            values.remove(key);
            self.flush(&values);
        }
    }
}
