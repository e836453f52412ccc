//! Error types for the Mixpanel client.

use reqwest::StatusCode;

/// Errors returned by the Mixpanel client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A submission to the ingestion API failed.
    ///
    /// `url` is the full request URL, including the endpoint sub-path.
    #[error("mixpanel request to {url} failed: {source}")]
    Submit {
        url: String,
        #[source]
        source: SubmitError,
    },
}

impl Error {
    /// The request URL of a failed submission.
    ///
    /// This is the configured base URL with trailing slashes removed,
    /// a single `/`, and the endpoint sub-path.
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Submit { url, .. } => Some(url),
            Error::Config(_) => None,
        }
    }

    /// The underlying submission failure, if any.
    pub fn submit_error(&self) -> Option<&SubmitError> {
        match self {
            Error::Submit { source, .. } => Some(source),
            Error::Config(_) => None,
        }
    }
}

/// Why a single submission did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The request body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The request never produced a response (connect, DNS, timeout).
    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// A response arrived but its body could not be read.
    #[error("failed to read response body (HTTP {status}): {source}")]
    ReadBody {
        status: StatusCode,
        #[source]
        source: reqwest::Error,
    },

    /// The body was not the success marker.
    #[error("response not 1 (HTTP {status}): {body}")]
    UnexpectedResponse { status: StatusCode, body: String },
}

impl SubmitError {
    /// HTTP status of the response, when one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SubmitError::Serialize(_) => None,
            SubmitError::Transport(e) => e.status(),
            SubmitError::ReadBody { status, .. } => Some(*status),
            SubmitError::UnexpectedResponse { status, .. } => Some(*status),
        }
    }

    /// Raw response body, when it was read.
    pub fn body(&self) -> Option<&str> {
        match self {
            SubmitError::UnexpectedResponse { body, .. } => Some(body),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn unexpected(body: &str) -> Error {
        Error::Submit {
            url: "https://api.mixpanel.com/track".into(),
            source: SubmitError::UnexpectedResponse {
                status: StatusCode::OK,
                body: body.into(),
            },
        }
    }

    #[test]
    fn test_submit_error_keeps_url() {
        let err = unexpected("0");
        assert_eq!(err.url(), Some("https://api.mixpanel.com/track"));
        assert!(err.to_string().contains("https://api.mixpanel.com/track"));
    }

    #[test]
    fn test_unexpected_response_message() {
        let err = unexpected("0");
        assert!(err.to_string().contains("response not 1"));

        let inner = err.submit_error().unwrap();
        assert_eq!(inner.status(), Some(StatusCode::OK));
        assert_eq!(inner.body(), Some("0"));
    }

    #[test]
    fn test_source_unwraps_to_submit_error() {
        let err = unexpected(r#"{"error":"bad token"}"#);
        let source = err.source().unwrap();
        assert!(source.to_string().starts_with("response not 1"));
    }

    #[test]
    fn test_config_error_has_no_url() {
        let err = Error::Config("token cannot be empty".into());
        assert!(err.url().is_none());
        assert!(err.submit_error().is_none());
    }

    #[test]
    fn test_serialize_error_has_no_response() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SubmitError::Serialize(json_err);
        assert!(err.status().is_none());
        assert!(err.body().is_none());
    }
}
