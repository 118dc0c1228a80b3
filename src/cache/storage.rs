//! Persistent string-keyed storage backends
//!
//! The cache manager never touches the filesystem directly. It goes through the
//! `Storage` trait so tests can swap in `MemoryStorage` and so a full disk is
//! reported uniformly as `StorageError::QuotaExceeded`.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use directories::ProjectDirs;
use thiserror::Error;

/// File extension used for every stored key
const ENTRY_EXTENSION: &str = "json";

/// Errors raised by storage backends and the cache manager
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The medium has no room left for the write
    #[error("Storage quota exceeded while writing '{key}'")]
    QuotaExceeded { key: String },

    /// The value could not be encoded as JSON
    #[error("Failed to serialize cache entry: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A string-keyed, string-valued persistent store
pub trait Storage: Send + Sync {
    /// Returns the stored value, or `None` if the key does not exist
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`; removing a missing key is not an error
    fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Lists every stored key starting with `prefix`
    fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError>;
}

/// Stores each key as `<key>.json` inside a directory
///
/// Uses `~/.cache/pokedex/` on Linux by default. The directory is created
/// lazily on the first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a FileStorage in the XDG-compliant cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "pokedex")?;
        Some(Self {
            dir: project_dirs.cache_dir().to_path_buf(),
        })
    }

    /// Creates a FileStorage rooted at a custom directory
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the entry files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", key, ENTRY_EXTENSION))
    }
}

fn is_quota_error(err: &std::io::Error) -> bool {
    matches!(err.kind(), ErrorKind::StorageFull | ErrorKind::FileTooLarge)
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.entry_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let result = fs::create_dir_all(&self.dir)
            .and_then(|_| fs::write(self.entry_path(key), value));
        match result {
            Ok(()) => Ok(()),
            Err(e) if is_quota_error(&e) => Err(StorageError::QuotaExceeded {
                key: key.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(ENTRY_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if stem.starts_with(prefix) {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// In-process storage, optionally limited to a total number of bytes
///
/// The capacity counts key and value lengths, which is how browser storage
/// quotas are measured. A write that would exceed it fails with
/// `StorageError::QuotaExceeded` and leaves the previous value in place.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
    capacity: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a MemoryStorage that rejects writes past `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            capacity: Some(capacity),
        }
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        // A poisoned map is still structurally valid
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.lock();
        if let Some(capacity) = self.capacity {
            let used: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if used + key.len() + value.len() > capacity {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                });
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.lock().remove(key);
        Ok(())
    }

    fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        Ok(self
            .lock()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}
