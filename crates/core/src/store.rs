//! Client-local key-value storage
//!
//! The cart is persisted through this abstraction rather than through a
//! process-wide global, so callers inject whichever backend fits:
//! - [`MemoryStore`] for tests and ephemeral sessions
//! - [`FileStore`] for one-file-per-key persistence on disk
//!
//! # Example
//!
//! ```rust
//! use rimas_core::store::{KeyValueStore, MemoryStore};
//!
//! let mut store = MemoryStore::new();
//! store.set("cart", "[]").unwrap();
//! assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));
//! ```

use crate::error::{Error, ErrorCode, Result, ResultExt};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// String-keyed storage of opaque serialized values
pub trait KeyValueStore {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`, returning whether it existed
    fn remove(&mut self, key: &str) -> Result<bool>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one entry
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self { entries }
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        Ok(self.entries.remove(key).is_some())
    }
}

/// File-backed store, one file per key
///
/// File names are the SHA-256 of the key, so any key string is safe to use.
/// Values are written to a temporary file and renamed into place, so readers
/// never observe a partially written value.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .map_err(Error::from)
            .context(format!("Failed to create store directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    /// Open the store at the configured directory, or the platform default
    pub fn open_configured(dir: Option<&str>) -> Result<Self> {
        match dir {
            Some(d) => Self::open(d),
            None => Self::open(default_store_dir()?),
        }
    }

    /// Directory holding the entries
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.value", hash_key(key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let value = fs::read_to_string(&path)
            .map_err(Error::from)
            .context(format!("Failed to read stored value for '{key}'"))?;
        Ok(Some(value))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.value_path(key);
        let tmp_path = path.with_extension("tmp");

        fs::write(&tmp_path, value)
            .and_then(|()| fs::rename(&tmp_path, &path))
            .map_err(|e| {
                Error::new(ErrorCode::StorageError, format!("Failed to store '{key}'"))
                    .with_source(e)
            })?;

        tracing::trace!(key, bytes = value.len(), "Stored value");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        let path = self.value_path(key);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        Ok(true)
    }
}

/// Platform-local data directory for the store
fn default_store_dir() -> Result<PathBuf> {
    dirs::data_local_dir()
        .map(|d| d.join("rimas-bookstore"))
        .ok_or_else(|| {
            Error::new(ErrorCode::StorageUnavailable, "No local data directory available")
                .with_suggestion("Set cart.storage_dir in the configuration file")
        })
}

fn hash_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}
