//! URL reachability probe used during link creation.
//!
//! A link is only created for a URL that answers an HTTP probe with a
//! 2xx/3xx status within the timeout. Anything else is treated as an
//! invalid URL.

use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// Errors that can occur while probing a URL.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("URL unreachable: {0}")]
    Unreachable(String),

    #[error("URL responded with HTTP {0}")]
    BadStatus(u16),
}

/// Trait for checking that a URL is reachable before shortening it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlProber: Send + Sync {
    /// Probes the URL.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] if the URL is malformed, the request fails, or
    /// the response status is outside the 2xx/3xx range.
    async fn probe(&self, url: &str) -> Result<(), ProbeError>;
}

/// HTTP prober with a bounded timeout.
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    /// Creates a prober whose requests abort after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProbeError::Unreachable(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl UrlProber for HttpProber {
    async fn probe(&self, url: &str) -> Result<(), ProbeError> {
        let parsed = Url::parse(url).map_err(|e| ProbeError::InvalidUrl(e.to_string()))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ProbeError::InvalidUrl(format!(
                "unsupported scheme '{}', try putting 'http://' or 'https://' in front of the URL",
                parsed.scheme()
            )));
        }

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| ProbeError::Unreachable(e.to_string()))?;

        let status = response.status().as_u16();
        if !(200..400).contains(&status) {
            return Err(ProbeError::BadStatus(status));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rejects_malformed_url() {
        let prober = HttpProber::new(Duration::from_secs(5)).unwrap();

        let result = prober.probe("not a url").await;

        assert!(matches!(result, Err(ProbeError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_rejects_non_http_scheme() {
        let prober = HttpProber::new(Duration::from_secs(5)).unwrap();

        let result = prober.probe("ftp://example.com/file").await;

        assert!(matches!(result, Err(ProbeError::InvalidUrl(_))));
    }
}
