//! Outbound client for the upstream image API.
//!
//! # Responsibilities
//! - Build the outbound URL from the base URL, a path and query parameters
//! - Inject the credential header on every call
//! - Serialize write bodies as JSON
//! - Return the raw upstream status with the parsed JSON body
//!
//! # Design Decisions
//! - No retries: votes are not idempotent and callers can retry themselves
//! - Non-2xx statuses are returned, not interpreted
//! - An empty credential is still sent, so upstream answers with its own auth error
//! - Dropping the returned future aborts the in-flight request

use std::time::{Duration, Instant};

use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use serde_json::Value;
use url::Url;

use crate::config::{TimeoutConfig, UpstreamConfig};
use crate::upstream::error::{UpstreamError, UpstreamResult};

/// Status and parsed body returned by the upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// HTTP client bound to one upstream base URL and credential.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    credential_header: HeaderName,
    credential: HeaderValue,
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("base_url", &self.base_url)
            .field("credential_header", &self.credential_header)
            .finish_non_exhaustive()
    }
}

impl UpstreamClient {
    /// Create a client from validated configuration.
    pub fn new(config: &UpstreamConfig, timeouts: &TimeoutConfig) -> UpstreamResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.upstream_secs))
            .build()?;

        Ok(Self::with_http_client(http, config))
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_http_client(http: reqwest::Client, config: &UpstreamConfig) -> Self {
        let credential_header = HeaderName::from_bytes(config.credential_header.as_bytes())
            .unwrap_or_else(|_| {
                tracing::warn!(
                    header = %config.credential_header,
                    "Invalid credential header name, falling back to x-api-key"
                );
                HeaderName::from_static("x-api-key")
            });

        let mut credential = HeaderValue::from_str(&config.api_key).unwrap_or_else(|_| {
            tracing::warn!("Upstream credential is not a valid header value, sending it empty");
            HeaderValue::from_static("")
        });
        credential.set_sensitive(true);

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credential_header,
            credential,
        }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Outbound URL for `path` with `query` URL-encoded in order.
    pub fn url_for(&self, path: &str, query: &[(&str, &str)]) -> UpstreamResult<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(UpstreamError::InvalidUrl)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Perform one upstream call.
    pub async fn call(
        &self,
        path: &str,
        method: Method,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> UpstreamResult<UpstreamResponse> {
        let url = self.url_for(path, query)?;
        let start = Instant::now();

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(self.credential_header.clone(), self.credential.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        tracing::debug!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            bytes = bytes.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Upstream responded"
        );

        let body = serde_json::from_slice(&bytes).map_err(UpstreamError::InvalidBody)?;
        Ok(UpstreamResponse { status, body })
    }
}
