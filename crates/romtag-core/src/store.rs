//! Durable key/value storage for cached query results and records

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{CoreError, CoreResult};

/// Minimal get/put store
///
/// Entries are never invalidated. A `put` either lands completely or not at
/// all; readers never see a partial value.
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`
    fn get(&self, key: &str) -> CoreResult<Option<String>>;

    /// Store `value` under `key`
    fn put(&self, key: &str, value: &str) -> CoreResult<()>;

    /// Check whether a value exists under `key`
    fn contains(&self, key: &str) -> CoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// Staging directory for in-flight writes, inside the store root
const STAGING_DIR: &str = ".staging";

/// One file per key inside a directory
///
/// Writes are staged in a subdirectory, so no key is reserved for temp files.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Open (creating if needed) a store rooted at `root`
    pub fn open(root: impl Into<PathBuf>) -> CoreResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| CoreError::IoWithPath {
            path: root.display().to_string(),
            source: e,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> CoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && key != STAGING_DIR
            && !key.contains(['/', '\\', '\0']);
        if !valid {
            return Err(CoreError::InvalidStoreKey {
                key: key.to_string(),
            });
        }
        Ok(self.root.join(key))
    }
}

impl KeyValueStore for DirStore {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CoreError::IoWithPath {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }

    /// Write to a PID-suffixed staging file, then rename into place
    fn put(&self, key: &str, value: &str) -> CoreResult<()> {
        let path = self.path_for(key)?;
        let staging = self.root.join(STAGING_DIR);
        std::fs::create_dir_all(&staging).map_err(|e| CoreError::IoWithPath {
            path: staging.display().to_string(),
            source: e,
        })?;
        let temp_path = staging.join(format!("{}.{}", key, std::process::id()));

        std::fs::write(&temp_path, value).map_err(|e| CoreError::IoWithPath {
            path: temp_path.display().to_string(),
            source: e,
        })?;
        std::fs::rename(&temp_path, &path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            CoreError::IoWithPath {
                path: path.display().to_string(),
                source: e,
            }
        })?;
        Ok(())
    }

    fn contains(&self, key: &str) -> CoreResult<bool> {
        Ok(self.path_for(key)?.is_file())
    }
}

/// In-memory store, used when nothing should touch the disk
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> CoreResult<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
