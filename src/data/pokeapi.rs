//! PokéAPI catalog client
//!
//! Fetches the paginated Pokémon listing and per-Pokémon details from PokéAPI,
//! consulting the cache before every request and populating it afterwards.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use super::transport::{HttpResponse, Transport};
use super::{normalize_name, Pokemon, PokemonSummary};
use crate::cache::{CacheManager, StorageError, FAVORITES_KEY};

/// Base URL for PokéAPI v2
pub const POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Cache key for the full catalog listing
pub const ALL_POKEMONS_CACHE_KEY: &str = "pokedex_all_pokemons";

/// Errors that can occur when fetching catalog data
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The transport could not reach the server
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The server answered with a non-success status
    #[error("Error fetching {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    /// No Pokémon with the requested name exists
    #[error("Pokémon not found: {0}")]
    NotFound(String),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Writing the result to the cache failed
    #[error("Cache write failed: {0}")]
    Storage(#[from] StorageError),
}

/// Operations the application state needs from a Pokémon catalog
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Returns every Pokémon summary in listing order
    async fn fetch_all_pokemons(&self) -> Result<Vec<PokemonSummary>, CatalogError>;

    /// Returns the details of the Pokémon called `name` (case-insensitive)
    async fn get_pokemon_by_name(&self, name: &str) -> Result<Pokemon, CatalogError>;

    /// Returns the details behind a Pokémon detail URL
    async fn fetch_and_cache_pokemon_details(&self, url: &str) -> Result<Pokemon, CatalogError>;
}

/// One page of the listing endpoint
#[derive(Debug, Deserialize)]
struct ListPage {
    results: Vec<PokemonSummary>,
    next: Option<String>,
}

/// Catalog client for PokéAPI with read-through caching
#[derive(Clone)]
pub struct PokeApiClient {
    transport: Arc<dyn Transport>,
    cache: CacheManager,
    base_url: String,
}

impl std::fmt::Debug for PokeApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PokeApiClient")
            .field("cache", &self.cache)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl PokeApiClient {
    /// Creates a client against the public PokéAPI
    pub fn new(transport: Arc<dyn Transport>, cache: CacheManager) -> Self {
        Self {
            transport,
            cache,
            base_url: POKEAPI_BASE_URL.to_string(),
        }
    }

    /// Overrides the API base URL (trailing slashes are ignored)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The cache this client reads and writes
    pub fn cache(&self) -> &CacheManager {
        &self.cache
    }

    /// First page of the listing endpoint
    fn listing_url(&self) -> String {
        format!("{}/pokemon", self.base_url)
    }

    /// Detail endpoint for an already-normalized name
    fn detail_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}", self.base_url, name)
    }

    async fn fetch_page(&self, url: &str) -> Result<ListPage, CatalogError> {
        let response = self.transport.get(url).await?;
        let response = ensure_success(url, response)?;
        Ok(serde_json::from_slice(&response.body)?)
    }
}

fn ensure_success(url: &str, response: HttpResponse) -> Result<HttpResponse, CatalogError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(CatalogError::Status {
            url: url.to_string(),
            status: response.status,
        })
    }
}

#[async_trait]
impl CatalogClient for PokeApiClient {
    async fn fetch_all_pokemons(&self) -> Result<Vec<PokemonSummary>, CatalogError> {
        if let Some(cached) = self.cache.get::<Vec<PokemonSummary>>(ALL_POKEMONS_CACHE_KEY) {
            debug!(count = cached.len(), "catalog served from cache");
            return Ok(cached);
        }

        let mut all_pokemons = Vec::new();
        let mut next_url = Some(self.listing_url());
        while let Some(url) = next_url {
            debug!(%url, "fetching catalog page");
            let page = self.fetch_page(&url).await?;
            all_pokemons.extend(page.results);
            next_url = page.next;
        }

        info!(count = all_pokemons.len(), "fetched catalog");
        self.cache.set(ALL_POKEMONS_CACHE_KEY, &all_pokemons)?;
        Ok(all_pokemons)
    }

    async fn get_pokemon_by_name(&self, name: &str) -> Result<Pokemon, CatalogError> {
        let normalized = normalize_name(name);
        if normalized.is_empty() {
            return Err(CatalogError::NotFound(name.to_string()));
        }

        let cacheable = is_cacheable_key(&normalized);
        if cacheable {
            if let Some(cached) = self.cache.get::<Pokemon>(&normalized) {
                return Ok(cached);
            }
        }

        let url = self.detail_url(&normalized);
        let response = self.transport.get(&url).await?;
        if !response.is_success() {
            return Err(CatalogError::NotFound(name.to_string()));
        }

        let raw: Value = serde_json::from_slice(&response.body)?;
        let pokemon = map_pokemon_data(&raw);
        if cacheable {
            self.cache.set(&normalized, &pokemon)?;
        }
        Ok(pokemon)
    }

    async fn fetch_and_cache_pokemon_details(&self, url: &str) -> Result<Pokemon, CatalogError> {
        let key = extract_pokemon_key(url);
        let cacheable = is_cacheable_key(&key);

        if cacheable {
            if let Some(cached) = self.cache.get::<Pokemon>(&key) {
                return Ok(cached);
            }
        }

        let response = ensure_success(url, self.transport.get(url).await?)?;
        let raw: Value = serde_json::from_slice(&response.body)?;
        let pokemon = map_pokemon_data(&raw);

        if cacheable {
            self.cache.set(&key, &pokemon)?;
        } else {
            debug!(%url, "detail url has no cacheable pokemon segment, not caching");
        }
        Ok(pokemon)
    }
}

/// Whether a Pokémon key may be used as a cache key
///
/// Empty keys and the keys the cache reserves for its own entries are
/// never read or written on behalf of a Pokémon.
fn is_cacheable_key(key: &str) -> bool {
    !key.is_empty() && key != FAVORITES_KEY && key != ALL_POKEMONS_CACHE_KEY
}

fn detail_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"/pokemon/([^/]+)/?$").expect("valid detail url pattern")
    })
}

/// Extracts the lower-cased trailing `/pokemon/<segment>` of a detail URL
///
/// Returns an empty string when the URL does not end in a Pokémon segment.
pub fn extract_pokemon_key(url: &str) -> String {
    detail_url_pattern()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
        .unwrap_or_default()
}

/// Projects the recognized fields of a raw detail payload into a `Pokemon`
///
/// Unknown fields are dropped. Missing or ill-typed fields are left absent.
pub fn map_pokemon_data(raw: &Value) -> Pokemon {
    fn field<T: serde::de::DeserializeOwned>(raw: &Value, name: &str) -> Option<T> {
        raw.get(name)
            .filter(|v| !v.is_null())
            .and_then(|v| T::deserialize(v).ok())
    }

    Pokemon {
        name: field(raw, "name").unwrap_or_default(),
        url: field(raw, "url"),
        id: field(raw, "id"),
        height: field(raw, "height"),
        weight: field(raw, "weight"),
        types: field(raw, "types"),
        sprites: field(raw, "sprites"),
        cries: field(raw, "cries"),
    }
}
