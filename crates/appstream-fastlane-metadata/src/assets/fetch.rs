//! Screenshot retrieval.

use thiserror::Error;

/// Why a screenshot could not be retrieved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server answered with an error status (400 or above).
    #[error("HTTP status {0}")]
    Status(u16),

    /// The request did not complete.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Retrieves the bytes behind a screenshot URL.
pub trait ScreenshotFetcher {
    /// Fetch one URL.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Blocking HTTP fetcher.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    /// Create a fetcher with the default client settings.
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("appstream-fastlane/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

#[cfg(feature = "http")]
impl ScreenshotFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(FetchError::Status(status));
        }

        let body = response
            .bytes()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(body.to_vec())
    }
}
