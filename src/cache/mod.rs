//! Cache module for storing API responses
//!
//! This module provides a cache manager that persists API responses through a
//! pluggable string-keyed `Storage` backend. Entries are wrapped in a
//! `{data, timestamp}` envelope under a `pokemon_` key prefix and expire
//! lazily after 24 hours. The favorites list lives in the same store under a
//! reserved key that bulk clearing leaves alone.

mod favorites;
mod manager;
mod storage;

pub use favorites::FavoritesStore;
pub use manager::{
    storage_key, CacheEntry, CacheManager, CACHE_TTL_HOURS, FAVORITES_KEY, KEY_PREFIX,
};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
