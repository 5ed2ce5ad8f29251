//! Remote JSON fetching used by the startup refresh.

use async_trait::async_trait;
use fortune_core::{FortuneError, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

/// Source of remote JSON documents.
///
/// `Ok(None)` means the resource could not be fetched (transport error or
/// non-success status). A body that arrives but is not JSON is an error.
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<Option<Value>>;
}

pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(concat!("fortune/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpDownloader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn fetch_json(&self, url: &str) -> Result<Option<Value>> {
        debug!("Fetching {}", url);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Request to {} failed: {}", url, e);
                return Ok(None);
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Request to {} returned {}", url, status);
            return Ok(None);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read body from {}: {}", url, e);
                return Ok(None);
            }
        };

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|source| FortuneError::Decode {
                url: url.to_string(),
                source,
            })
    }
}
