//! Upstream failure conditions.

use thiserror::Error;

/// The upstream could not be reached or did not answer with JSON.
///
/// Both variants mean the same thing to a handler: the capability is unavailable.
/// Non-2xx answers are not errors; they come back as an [`UpstreamResponse`](super::UpstreamResponse).
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection refused, DNS failure, timeout, or the body could not be read.
    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    /// The upstream body was not valid JSON.
    #[error("invalid JSON from upstream: {0}")]
    InvalidBody(#[source] serde_json::Error),

    /// The configured base URL and path did not form a valid URL.
    #[error("invalid upstream URL: {0}")]
    InvalidUrl(#[source] url::ParseError),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        // Error text is returned to callers without the upstream URL.
        UpstreamError::Transport(err.without_url())
    }
}

/// Result type for upstream calls.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
