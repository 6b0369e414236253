//! Downloading post attachments and turning them into grayscale base64.

use std::time::Duration;

use reqwest::Client;

use crate::{encode_base64, to_grayscale, ImagingError};

/// HTTP client for image attachments.
#[derive(Debug, Clone)]
pub struct ImageFetcher {
    client: Client,
}

impl ImageFetcher {
    /// Creates a fetcher with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ImagingError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, ImagingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("socialproxy/0.1 (image-fetch)")
            .build()?;
        Ok(Self { client })
    }

    /// Downloads the raw bytes at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ImagingError::Http`] on network failure or a non-2xx status.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, ImagingError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// Downloads `url`, converts it to grayscale and returns it base64-encoded.
    ///
    /// # Errors
    ///
    /// Propagates fetch, decode and encode failures.
    pub async fn grayscale_base64(&self, url: &str) -> Result<String, ImagingError> {
        let bytes = self.fetch(url).await?;
        let gray = to_grayscale(&bytes, url)?;
        tracing::debug!(url, original = bytes.len(), grayscale = gray.len(), "transcoded image");
        Ok(encode_base64(&gray))
    }

    /// Like [`ImageFetcher::grayscale_base64`], but logs the failure and
    /// yields `None` instead of propagating it.
    pub async fn grayscale_base64_or_none(&self, url: &str) -> Option<String> {
        match self.grayscale_base64(url).await {
            Ok(encoded) => Some(encoded),
            Err(e) => {
                tracing::warn!(url, error = %e, "error fetching or converting image");
                None
            }
        }
    }
}
