//! Application state management for the Pokédex
//!
//! This module holds the in-memory Pokémon list, the loading state, and the
//! favorites list, and merges catalog results into them.

use thiserror::Error;
use tracing::warn;

use crate::cache::{CacheManager, FavoritesStore, StorageError};
use crate::data::{normalize_name, CatalogClient, CatalogError, Pokemon};

/// Errors from changing the favorites list
#[derive(Debug, Error)]
pub enum FavoriteError {
    /// The name is empty once trimmed
    #[error("Favorite name cannot be blank")]
    InvalidName,

    /// The updated list could not be persisted
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Whether a multi-step load is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
}

/// Main application struct managing state and data
pub struct App<C: CatalogClient> {
    /// Pokémon known to the application, in catalog order
    pub pokemons: Vec<Pokemon>,
    /// Current load state
    pub load_state: LoadState,
    /// Normalized names of favorite Pokémon, in the order they were added
    favorites: Vec<String>,
    catalog: C,
    favorites_store: FavoritesStore,
    cache: CacheManager,
}

impl<C: CatalogClient> App<C> {
    /// Creates an App, restoring favorites from the cache
    pub fn new(catalog: C, cache: CacheManager) -> Self {
        let favorites_store = FavoritesStore::new(cache.clone());
        let favorites = favorites_store.get_favorites();
        Self {
            pokemons: Vec::new(),
            load_state: LoadState::Idle,
            favorites,
            catalog,
            favorites_store,
            cache,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Replaces the in-memory list with the full catalog
    ///
    /// The loading state returns to `Idle` whether or not the fetch succeeds.
    pub async fn load_pokemons(&mut self) -> Result<(), CatalogError> {
        self.load_state = LoadState::Loading;
        let result = self.catalog.fetch_all_pokemons().await;
        self.load_state = LoadState::Idle;

        self.pokemons = result?.into_iter().map(Pokemon::from).collect();
        Ok(())
    }

    /// Fetches details for `url` and merges them into the matching record
    ///
    /// Fields present in the fetched data overwrite the record's; absent ones
    /// are kept. If no record has this url the list is left untouched. The
    /// fetched data is returned either way.
    pub async fn update_pokemon_details(&mut self, url: &str) -> Result<Pokemon, CatalogError> {
        self.load_state = LoadState::Loading;
        let result = self.catalog.fetch_and_cache_pokemon_details(url).await;
        self.load_state = LoadState::Idle;
        let details = result?;

        if let Some(existing) = self
            .pokemons
            .iter_mut()
            .find(|p| p.url.as_deref() == Some(url))
        {
            existing.merge_from(details.clone());
        }
        Ok(details)
    }

    /// Adds `name` to the favorites if absent, removes it otherwise
    ///
    /// Names are normalized the same way catalog lookups are, and blank names
    /// are rejected. The in-memory list only changes once the new list has
    /// been persisted. Returns whether the Pokémon is a favorite after the
    /// toggle.
    pub fn toggle_favorite(&mut self, name: &str) -> Result<bool, FavoriteError> {
        let name = normalize_name(name);
        if name.is_empty() {
            return Err(FavoriteError::InvalidName);
        }

        let mut favorites = self.favorites.clone();
        let now_favorite = match favorites.iter().position(|f| *f == name) {
            Some(index) => {
                favorites.remove(index);
                false
            }
            None => {
                favorites.push(name);
                true
            }
        };
        self.favorites_store.set_favorites(&favorites)?;
        self.favorites = favorites;
        Ok(now_favorite)
    }

    pub fn is_favorite(&self, name: &str) -> bool {
        let name = normalize_name(name);
        self.favorites.iter().any(|f| *f == name)
    }

    /// Resolves every favorite to its full record, one request at a time
    ///
    /// Favorites that fail to resolve are logged and skipped.
    pub async fn get_favorite_pokemons_with_details(&mut self) -> Vec<Pokemon> {
        self.load_state = LoadState::Loading;
        let mut favorite_pokemons = Vec::with_capacity(self.favorites.len());

        for name in &self.favorites {
            match self.catalog.get_pokemon_by_name(name).await {
                Ok(details) => favorite_pokemons.push(details),
                Err(e) => warn!(%name, error = %e, "skipping favorite"),
            }
        }

        self.load_state = LoadState::Idle;
        favorite_pokemons
    }

    /// Looks up a loaded Pokémon by name
    pub fn find_by_name(&self, name: &str) -> Option<&Pokemon> {
        let name = normalize_name(name);
        self.pokemons.iter().find(|p| p.name == name)
    }

    /// Drops every cached response, keeping favorites
    pub fn clear_cache(&self) -> Result<usize, StorageError> {
        self.cache.clear_all()
    }
}
