//! Favorites list persisted through the cache manager

use super::manager::{CacheManager, FAVORITES_KEY};
use super::storage::StorageError;

/// Reads and writes the favorites list under the reserved `favorites` key
///
/// The list shares the cache envelope format but is read without the TTL, so
/// favorites never silently expire.
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    cache: CacheManager,
}

impl FavoritesStore {
    pub fn new(cache: CacheManager) -> Self {
        Self { cache }
    }

    /// Returns the persisted favorites, or an empty list if none were saved
    pub fn get_favorites(&self) -> Vec<String> {
        self.cache.get_pinned(FAVORITES_KEY).unwrap_or_default()
    }

    /// Replaces the persisted favorites
    pub fn set_favorites(&self, favorites: &[String]) -> Result<(), StorageError> {
        self.cache.set(FAVORITES_KEY, &favorites)
    }
}
