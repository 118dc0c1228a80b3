//! Pokémon cry downloads
//!
//! The sound service serves one audio file per Pokémon id. Playback is left to
//! the caller; this client only fetches the bytes.

use std::sync::Arc;

use tracing::debug;

use super::pokeapi::CatalogError;
use super::transport::Transport;

/// Base URL for the cry sound service
pub const SOUNDS_BASE_URL: &str = "https://pokedex-api-sounds.onrender.com";

/// Client for the cry sound service
#[derive(Clone)]
pub struct SoundClient {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl SoundClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: SOUNDS_BASE_URL.to_string(),
        }
    }

    /// Overrides the sound service base URL (trailing slashes are ignored)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn sound_url(&self, pokemon_id: u32) -> String {
        format!("{}/sound/{}", self.base_url, pokemon_id)
    }

    /// Downloads the cry audio for `pokemon_id`
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - Raw audio bytes as served
    /// * `Err(CatalogError::Status)` - If the service has no sound for the id
    pub async fn fetch_cry(&self, pokemon_id: u32) -> Result<Vec<u8>, CatalogError> {
        let url = self.sound_url(pokemon_id);
        let response = self.transport.get(&url).await?;
        if !response.is_success() {
            return Err(CatalogError::Status {
                url,
                status: response.status,
            });
        }
        debug!(pokemon_id, bytes = response.body.len(), "downloaded cry");
        Ok(response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::transport::testing::ScriptedTransport;
    use crate::data::HttpResponse;

    #[tokio::test]
    async fn test_fetch_cry_returns_bytes() {
        let transport = ScriptedTransport::new().respond(
            "https://pokedex-api-sounds.onrender.com/sound/25",
            HttpResponse::new(200, vec![0x4f, 0x67, 0x67, 0x53]),
        );
        let client = SoundClient::new(Arc::new(transport));

        let bytes = client.fetch_cry(25).await.unwrap();

        assert_eq!(bytes, vec![0x4f, 0x67, 0x67, 0x53]);
    }

    #[tokio::test]
    async fn test_fetch_cry_missing_sound_is_status_error() {
        let client = SoundClient::new(Arc::new(ScriptedTransport::new()));

        let err = client.fetch_cry(9999).await.unwrap_err();

        assert!(matches!(err, CatalogError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_cry_custom_base_url() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond("http://sounds.local/sound/1", HttpResponse::new(200, "ok")),
        );
        let client = SoundClient::new(transport.clone()).with_base_url("http://sounds.local/");

        client.fetch_cry(1).await.unwrap();

        assert_eq!(transport.requests(), vec!["http://sounds.local/sound/1"]);
    }
}
