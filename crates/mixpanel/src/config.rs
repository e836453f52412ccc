//! Client configuration.

use std::time::Duration;

/// Default ingestion API URL.
pub const DEFAULT_API_URL: &str = "https://api.mixpanel.com";

/// Mixpanel client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) token: String,
    pub(crate) api_url: String,
    pub(crate) timeout: Option<Duration>,
}

impl Config {
    /// Get the project token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Get the base API URL, without a trailing slash.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Get the request timeout, if one was configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Builder for the Mixpanel client.
#[derive(Debug)]
pub struct MixpanelBuilder {
    token: String,
    api_url: Option<String>,
    timeout: Option<Duration>,
    pub(crate) http_client: Option<reqwest::Client>,
}

impl MixpanelBuilder {
    /// Create a new builder with the given project token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: None,
            timeout: None,
            http_client: None,
        }
    }

    /// Set the base API URL. A blank URL falls back to [`DEFAULT_API_URL`].
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Set a request timeout on the internally built HTTP client.
    ///
    /// Ignored when a client is supplied with [`MixpanelBuilder::http_client`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a preconfigured HTTP client, e.g. one that goes through a proxy.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Build the configuration.
    pub(crate) fn build_config(&self) -> Result<Config, crate::Error> {
        if self.token.is_empty() {
            return Err(crate::Error::Config("token cannot be empty".into()));
        }

        let api_url = match self.api_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
            _ => DEFAULT_API_URL.to_string(),
        };

        Ok(Config {
            token: self.token.clone(),
            api_url,
            timeout: self.timeout,
        })
    }
}
