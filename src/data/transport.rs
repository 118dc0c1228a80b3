//! HTTP transport used by the API clients
//!
//! Clients only need "GET this URL and give me the status and body", so the
//! seam is a single async method. Production code uses reqwest; tests script
//! responses per URL.

use async_trait::async_trait;
use reqwest::Client;

use super::pokeapi::CatalogError;

/// Status and body of a completed HTTP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs GET requests
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches `url`. Non-success statuses are returned, not raised.
    async fn get(&self, url: &str) -> Result<HttpResponse, CatalogError>;
}

/// Transport backed by a reqwest client
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, CatalogError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport shared by the client tests

    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Replays canned responses by URL and records every request
    #[derive(Debug, Default)]
    pub struct ScriptedTransport {
        responses: Mutex<HashMap<String, Result<HttpResponse, String>>>,
        requests: Mutex<Vec<String>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond_json(self, url: &str, body: serde_json::Value) -> Self {
            self.respond(url, HttpResponse::new(200, body.to_string()))
        }

        pub fn respond(self, url: &str, response: HttpResponse) -> Self {
            self.responses
                .lock()
                .unwrap()
                .insert(url.to_string(), Ok(response));
            self
        }

        pub fn fail(self, url: &str, message: &str) -> Self {
            self.responses
                .lock()
                .unwrap()
                .insert(url.to_string(), Err(message.to_string()));
            self
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn get(&self, url: &str) -> Result<HttpResponse, CatalogError> {
            self.requests.lock().unwrap().push(url.to_string());
            let scripted = self.responses.lock().unwrap().get(url).cloned();
            match scripted {
                Some(Ok(response)) => Ok(response),
                Some(Err(message)) => Err(CatalogError::Connection(message)),
                None => Ok(HttpResponse::new(404, "Not Found")),
            }
        }
    }
}
