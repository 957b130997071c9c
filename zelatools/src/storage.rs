//! Client-side key-value persistence.
//!
//! The storefront client keeps its state (the cart and the logged-in user) in named string
//! slots, the way a browser keeps them in `localStorage`. The [`KeyValueStore`] trait is the
//! seam: the CLI uses a JSON file under the user's home directory, and tests use an in-memory
//! map.
use std::{collections::HashMap, fs, io, path::PathBuf};

use dirs::home_dir;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Storage format error: {0}")]
    Format(String),
}

pub trait KeyValueStore {
    /// Returns the raw string stored under `key`, or `None` when the slot is empty.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

//--------------------------------------    MemoryStore    ------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.slots.remove(key);
        Ok(())
    }
}

//--------------------------------------     FileStore     ------------------------------------------------------

/// Stores the slots as a single JSON object in `~/.zelatools/storage.json`. Every operation
/// reads and rewrites the whole file; the slots are small and the CLI is single-shot, so there
/// is no point in anything cleverer.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn in_home_dir() -> Result<Self, StorageError> {
        let home = home_dir().ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Home directory not found"))?;
        let dir = home.join(".zelatools");
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            set_permissions(&dir, 0o700)?;
        }
        Ok(Self { path: dir.join("storage.json") })
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_slots(&self) -> Result<HashMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        let value: Value = serde_json::from_str(&raw).map_err(|e| StorageError::Format(e.to_string()))?;
        let obj = value.as_object().ok_or_else(|| StorageError::Format("storage file is not an object".into()))?;
        let slots = obj
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
            .collect();
        Ok(slots)
    }

    fn write_slots(&self, slots: &HashMap<String, String>) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(slots).map_err(|e| StorageError::Format(e.to_string()))?;
        fs::write(&self.path, json)?;
        set_permissions(&self.path, 0o600)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_slots()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.read_slots().unwrap_or_default();
        slots.insert(key.to_string(), value.to_string());
        self.write_slots(&slots)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut slots = self.read_slots().unwrap_or_default();
        slots.remove(key);
        self.write_slots(&slots)
    }
}

fn set_permissions(path: &PathBuf, perms: u32) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let metadata = fs::metadata(path)?;
        let mut permissions = metadata.permissions();
        permissions.set_mode(perms);
        fs::set_permissions(path, permissions)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::{FileStore, KeyValueStore, MemoryStore};

    #[test]
    fn file_store_round_trip() {
        let path = std::env::temp_dir().join(format!("zelatools-storage-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let mut store = FileStore::at_path(path.clone());
        assert!(store.get("cart").unwrap().is_none());
        store.set("cart", "[]").unwrap();
        store.set("currentUser", "{\"id\":1}").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));
        store.remove("cart").unwrap();
        assert!(store.get("cart").unwrap().is_none());
        assert!(store.get("currentUser").unwrap().is_some());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.get("cart").unwrap().is_none());
        store.set("cart", "[]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));
        store.remove("cart").unwrap();
        assert!(store.get("cart").unwrap().is_none());
    }
}
