use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
#[cfg(unix)]
use std::{io::Write, os::unix::fs::OpenOptionsExt};
use strum::{AsRefStr, Display, EnumIter};

use crate::config::TogglConfig;

/// Keys persisted between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum StoreKey {
    Token,
    Wid,
    Section,
}

/// Durable string storage for session identity and the last UI section.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: StoreKey) -> Result<Option<String>>;
    fn set(&self, key: StoreKey, value: &str) -> Result<()>;
    fn remove(&self, key: StoreKey) -> Result<()>;
}

/// One file per key under the config directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted next to the config file.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(TogglConfig::root_path()?))
    }

    fn path(&self, key: StoreKey) -> PathBuf {
        self.root.join(key.as_ref())
    }
}

fn secure_write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    #[cfg(unix)]
    {
        std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?
            .write_all(content.as_bytes())?;
    }

    #[cfg(not(unix))]
    {
        std::fs::write(path, content)?;
    }

    Ok(())
}

impl KeyValueStore for FileStore {
    fn get(&self, key: StoreKey) -> Result<Option<String>> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }

        let value = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {} file", key))?;
        let value = value.trim().to_string();
        if value.is_empty() {
            return Ok(None);
        }
        Ok(Some(value))
    }

    fn set(&self, key: StoreKey, value: &str) -> Result<()> {
        secure_write(&self.path(key), value)
            .with_context(|| format!("Failed to write {} file", key))
    }

    fn remove(&self, key: StoreKey) -> Result<()> {
        let path = self.path(key);
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {} file", key))?;
        }
        Ok(())
    }
}

/// Volatile store used by dev mode.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<StoreKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: StoreKey) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(&key).cloned())
    }

    fn set(&self, key: StoreKey, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StoreKey) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        for key in StoreKey::iter() {
            assert_eq!(store.get(key).unwrap(), None);
        }
    }

    #[test]
    fn values_round_trip_through_files_named_after_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        store.set(StoreKey::Token, "abc123").unwrap();
        store.set(StoreKey::Wid, "42").unwrap();

        assert_eq!(store.get(StoreKey::Token).unwrap().as_deref(), Some("abc123"));
        assert_eq!(store.get(StoreKey::Wid).unwrap().as_deref(), Some("42"));
        assert!(dir.path().join("nested").join("token").exists());
        assert!(dir.path().join("nested").join("wid").exists());
    }

    #[test]
    fn blank_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        std::fs::write(dir.path().join("section"), "\n").unwrap();

        assert_eq!(store.get(StoreKey::Section).unwrap(), None);
    }

    #[test]
    fn set_overwrites_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set(StoreKey::Section, "loading").unwrap();
        store.set(StoreKey::Section, "app").unwrap();

        assert_eq!(store.get(StoreKey::Section).unwrap().as_deref(), Some("app"));
    }

    #[cfg(unix)]
    #[test]
    fn files_are_private_to_the_user() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set(StoreKey::Token, "abc123").unwrap();

        let mode = std::fs::metadata(dir.path().join("token"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn remove_deletes_file_and_tolerates_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set(StoreKey::Token, "abc123").unwrap();

        store.remove(StoreKey::Token).unwrap();
        store.remove(StoreKey::Wid).unwrap();

        assert_eq!(store.get(StoreKey::Token).unwrap(), None);
        assert!(!dir.path().join("token").exists());
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get(StoreKey::Token).unwrap(), None);

        store.set(StoreKey::Token, "abc").unwrap();

        assert_eq!(store.get(StoreKey::Token).unwrap().as_deref(), Some("abc"));

        store.remove(StoreKey::Token).unwrap();
        assert_eq!(store.get(StoreKey::Token).unwrap(), None);
    }
}
