//! Cache manager for persisting API responses
//!
//! Provides a `CacheManager` that wraps serializable data in a timestamped
//! envelope, stores it under a `pokemon_`-prefixed key, and evicts entries
//! lazily when a read finds them older than the TTL.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::storage::{Storage, StorageError};

/// Prefix applied to every logical key before it reaches storage
pub const KEY_PREFIX: &str = "pokemon_";

/// Logical key of the favorites list, exempt from `clear_all`
pub const FAVORITES_KEY: &str = "favorites";

/// Time-to-live for every cache entry in hours
pub const CACHE_TTL_HOURS: i64 = 24;

/// Envelope persisted for every cache entry
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The cached data
    pub data: T,
    /// When the data was written, in epoch milliseconds
    pub timestamp: i64,
}

/// Whether a read honours the TTL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expiry {
    Ttl,
    Never,
}

/// Time-boxed key/value cache over a `Storage` backend
#[derive(Clone)]
pub struct CacheManager {
    storage: Arc<dyn Storage>,
    ttl: Duration,
}

impl std::fmt::Debug for CacheManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheManager").field("ttl", &self.ttl).finish()
    }
}

/// Full storage key for a logical key
pub fn storage_key(key: &str) -> String {
    format!("{}{}", KEY_PREFIX, key)
}

impl CacheManager {
    /// Creates a CacheManager with the default 24-hour TTL
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            ttl: Duration::hours(CACHE_TTL_HOURS),
        }
    }

    /// Reads a fresh entry for `key`
    ///
    /// Returns `None` if the entry is missing, cannot be parsed, or is older than
    /// the TTL. Expired entries are deleted as a side effect.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.load(key, Expiry::Ttl)
    }

    /// Reads an entry for `key` regardless of its age
    pub fn get_pinned<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.load(key, Expiry::Never)
    }

    fn load<T: DeserializeOwned>(&self, key: &str, expiry: Expiry) -> Option<T> {
        let full_key = storage_key(key);
        let raw = match self.storage.read(&full_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key, "cache miss");
                return None;
            }
            Err(e) => {
                warn!(key, error = %e, "cache read failed, treating as miss");
                return None;
            }
        };

        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(key, error = %e, "unreadable cache entry, treating as miss");
                return None;
            }
        };

        if expiry == Expiry::Ttl && self.is_expired(entry.timestamp) {
            debug!(key, "cache entry expired, evicting");
            if let Err(e) = self.storage.delete(&full_key) {
                warn!(key, error = %e, "failed to evict expired cache entry");
            }
            return None;
        }

        debug!(key, "cache hit");
        Some(entry.data)
    }

    fn is_expired(&self, timestamp: i64) -> bool {
        self.is_expired_at(Utc::now().timestamp_millis(), timestamp)
    }

    /// An entry is still valid when exactly one TTL has elapsed
    fn is_expired_at(&self, now_millis: i64, timestamp: i64) -> bool {
        now_millis - timestamp > self.ttl.num_milliseconds()
    }

    /// Writes `data` under `key` with the current timestamp
    ///
    /// If storage reports its quota exceeded, every non-favorites entry is
    /// cleared and the write is retried once. A second failure is returned.
    pub fn set<T: Serialize>(&self, key: &str, data: &T) -> Result<(), StorageError> {
        let entry = CacheEntry {
            data,
            timestamp: Utc::now().timestamp_millis(),
        };
        let json = serde_json::to_string(&entry)?;
        let full_key = storage_key(key);

        match self.storage.write(&full_key, &json) {
            Err(StorageError::QuotaExceeded { .. }) => {
                warn!(key, "storage quota exceeded, clearing cache and retrying");
                self.clear_all()?;
                self.storage.write(&full_key, &json)
            }
            other => other,
        }
    }

    /// Removes every cached entry except the favorites list
    ///
    /// Returns the number of removed entries.
    pub fn clear_all(&self) -> Result<usize, StorageError> {
        let favorites = storage_key(FAVORITES_KEY);
        let mut removed = 0;
        for key in self.storage.list_keys(KEY_PREFIX)? {
            if key == favorites {
                continue;
            }
            self.storage.delete(&key)?;
            removed += 1;
        }
        info!(removed, "cleared cache");
        Ok(removed)
    }
}
