//! Key-value blob transports backing the record store.

use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::PathBuf,
};

use crate::{EngineError, ResultEngine};

/// Opaque key-value blob store.
///
/// A single `set` is assumed to be atomic from the caller's point of view.
pub trait BlobStore {
    /// Returns the blob stored under `key`, `None` when absent.
    fn get(&self, key: &str) -> ResultEngine<Option<String>>;
    /// Overwrites the blob stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> ResultEngine<()>;
    /// Removes `key`; removing an absent key is not an error.
    fn delete(&mut self, key: &str) -> ResultEngine<()>;
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> ResultEngine<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(EngineError::InvalidValue(format!("invalid blob key: {key}")));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> ResultEngine<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> ResultEngine<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)?;
        // Write next to the target and rename so a crash never leaves half a blob.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> ResultEngine<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory store, for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, String>,
}

impl MemoryBlobStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one raw blob.
    #[must_use]
    pub fn with_blob(key: &str, value: &str) -> Self {
        let mut blobs = HashMap::new();
        blobs.insert(key.to_string(), value.to_string());
        Self { blobs }
    }

    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> ResultEngine<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> ResultEngine<()> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> ResultEngine<()> {
        self.blobs.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_rejects_path_like_keys() {
        let store = FileBlobStore::new("unused");
        assert!(store.path_for("../etc/passwd").is_err());
        assert!(store.path_for("a/b").is_err());
        assert!(store.path_for(".hidden").is_err());
        assert!(store.path_for("").is_err());
        assert!(store.path_for("smart_shop_items_v1").is_ok());
    }

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryBlobStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "[]").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("[]"));
        store.delete("k").unwrap();
        store.delete("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
