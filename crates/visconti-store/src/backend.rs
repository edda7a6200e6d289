//! Storage backends.
//!
//! A backend stores raw string values by key, the way browser local storage
//! does. Typed access lives in [`LocalStore`](crate::LocalStore).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::StoreError;

/// Raw key-value storage.
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// List all keys, sorted.
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

/// In-process storage that lives as long as the backend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryBackend {
    /// Create an empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|e| StoreError::StoreError(format!("memory store poisoned: {e}")))
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.lock()?.keys().cloned().collect())
    }
}

/// File-backed storage: one `<key>.json` file per key in a directory.
///
/// Writes go to a temporary file that is then renamed over the target, so a
/// reader sees either the old value or the new one.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Open (and create if needed) a storage directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| StoreError::OpenError(format!("{}: {e}", dir.display())))?;
        Ok(Self { dir })
    }

    /// The directory holding the stored values.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
            && !key.starts_with('.');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        tracing::trace!(key, path = %path.display(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let name = entry?.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.starts_with('.') {
                continue;
            }
            if let Some(key) = name.strip_suffix(".json") {
                keys.push(key.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_set_get_remove() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("cart").unwrap(), None);

        backend.set("cart", "[]").unwrap();
        assert_eq!(backend.get("cart").unwrap().as_deref(), Some("[]"));

        backend.remove("cart").unwrap();
        assert_eq!(backend.get("cart").unwrap(), None);
    }

    #[test]
    fn test_memory_remove_missing_is_ok() {
        let backend = MemoryBackend::new();
        assert!(backend.remove("nothing").is_ok());
    }

    #[test]
    fn test_file_round_trip_across_handles() {
        let dir = tempfile::tempdir().unwrap();

        let first = FileBackend::open(dir.path()).unwrap();
        first.set("cart", r#"[{"id":"p1","qty":2}]"#).unwrap();

        let second = FileBackend::open(dir.path()).unwrap();
        assert_eq!(
            second.get("cart").unwrap().as_deref(),
            Some(r#"[{"id":"p1","qty":2}]"#)
        );
    }

    #[test]
    fn test_file_keys_skip_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        backend.set("cart", "[]").unwrap();
        backend.set("activeOffer", "{}").unwrap();
        std::fs::write(dir.path().join(".cart.json.tmp"), "junk").unwrap();

        assert_eq!(backend.keys().unwrap(), vec!["activeOffer", "cart"]);
    }

    #[test]
    fn test_file_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        assert!(matches!(
            backend.set("../escape", "x"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(backend.get(""), Err(StoreError::InvalidKey(_))));
    }

    #[test]
    fn test_file_remove_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        assert!(backend.remove("cart").is_ok());
    }
}
