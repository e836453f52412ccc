//! HTTP transport for submitting requests.

use crate::config::{Config, MixpanelBuilder};
use crate::error::{Error, SubmitError};
use serde::Serialize;
use tracing::{debug, warn};

/// Body the ingestion API returns on success.
const SUCCESS_MARKER: &str = "1";

/// Ingestion API sub-paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Events and aliases.
    Track,
    /// User profile updates.
    Engage,
    /// User profile unions.
    EngageUnion,
    /// Group profile updates.
    Groups,
    /// Group profile unions.
    GroupsUnion,
}

impl Endpoint {
    /// Sub-path appended to the base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Track => "track",
            Endpoint::Engage => "engage",
            Endpoint::EngageUnion => "engage#profile-union",
            Endpoint::Groups => "groups",
            Endpoint::GroupsUnion => "groups#group-union",
        }
    }

    /// Full request URL under `base`.
    pub fn url(&self, base: &str) -> String {
        format!("{}/{}", base, self.path())
    }
}

/// HTTP transport for the Mixpanel ingestion API.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a new HTTP transport, reusing the builder's client when one was given.
    pub fn new(config: &Config, builder: MixpanelBuilder) -> Result<Self, Error> {
        let client = match builder.http_client {
            Some(client) => client,
            None => {
                let mut client = reqwest::Client::builder();
                if let Some(timeout) = config.timeout() {
                    client = client.timeout(timeout);
                }
                client
                    .build()
                    .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?
            }
        };

        Ok(Self {
            client,
            base_url: config.api_url().to_string(),
        })
    }

    /// Submit one request object. The body is sent as a single-element array
    /// and the call succeeds only if the response body is exactly `1`.
    pub async fn submit<T: Serialize>(
        &self,
        endpoint: Endpoint,
        request: &T,
    ) -> Result<(), Error> {
        let url = endpoint.url(&self.base_url);

        self.post(&url, request).await.map_err(|source| {
            warn!(
                url = %url,
                status = ?source.status(),
                body = ?source.body(),
                error = %source,
                "submission failed"
            );
            Error::Submit { url, source }
        })
    }

    async fn post<T: Serialize>(&self, url: &str, request: &T) -> Result<(), SubmitError> {
        let body = serde_json::to_vec(&[request]).map_err(SubmitError::Serialize)?;

        debug!(url = %url, bytes = body.len(), "sending request");

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(SubmitError::Transport)?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| SubmitError::ReadBody { status, source })?;

        if text != SUCCESS_MARKER {
            return Err(SubmitError::UnexpectedResponse { status, body: text });
        }

        debug!(url = %url, status = %status, "request accepted");

        Ok(())
    }
}
