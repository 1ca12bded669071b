//! Key-value persistence adapter behind the project store.
//!
//! Synchronous, last-writer-wins, no transactional guarantees. The store
//! serializes on every state change and deserializes once at startup.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::error::{Result, TinkerError};

pub trait Storage: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory storage for tests and ephemeral embedding.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Durable storage keeping one `<key>.json` file per key under a base
/// directory (`~/.tinkerpad` by default). Writes go through a temporary
/// file and rename so a crash never leaves a half-written value.
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| TinkerError::storage("could not determine home directory"))?;
        Self::with_dir(home.join(".tinkerpad"))
    }

    /// Create a storage rooted at a custom directory (useful for testing).
    pub fn with_dir(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(|e| {
            TinkerError::storage(format!("failed to create storage directory: {e}"))
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &std::path::Path {
        &self.base_dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path)
            .map_err(|e| TinkerError::storage(format!("failed to read '{key}': {e}")))?;
        Ok(Some(value))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)
            .map_err(|e| TinkerError::storage(format!("failed to write '{key}': {e}")))?;
        fs::rename(&tmp_path, &path)
            .map_err(|e| TinkerError::storage(format!("failed to commit '{key}': {e}")))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| TinkerError::storage(format!("failed to remove '{key}': {e}")))?;
        }
        Ok(())
    }
}
