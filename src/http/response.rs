//! Response construction.
//!
//! # Responsibilities
//! - Serialize JSON bodies with the right content type
//! - Pass upstream status and body through unchanged
//! - Build the uniform error envelope
//! - Attach the CORS header set to every response built here
//!
//! # Design Decisions
//! - Upstream bodies are opaque `serde_json::Value`s, never re-shaped
//! - Object keys keep their upstream order (`preserve_order`)
//! - Serialization failures degrade to an empty-body 500 rather than panicking

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::Response,
};
use serde::{Deserialize, Serialize};

use crate::security::CorsPolicy;
use crate::upstream::UpstreamResponse;

const APPLICATION_JSON: &str = "application/json";

/// Uniform body for locally generated failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    /// Attach an underlying failure message. Empty messages are dropped.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        let details = details.into();
        self.details = (!details.is_empty()).then_some(details);
        self
    }
}

/// Serialize `body` as JSON with `status` and the CORS header set.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T, cors: &CorsPolicy) -> Response {
    let mut response = match serde_json::to_vec(body) {
        Ok(bytes) => {
            let mut response = Response::new(Body::from(bytes));
            *response.status_mut() = status;
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
            response
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response body");
            let mut response = Response::new(Body::empty());
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            response
        }
    };
    cors.apply(response.headers_mut());
    response
}

/// Relay the upstream status and body unchanged.
pub fn passthrough(upstream: UpstreamResponse, cors: &CorsPolicy) -> Response {
    json_response(upstream.status, &upstream.body, cors)
}

/// Error envelope response. `status` must be a client or server error.
pub fn error_response(status: StatusCode, envelope: &ErrorEnvelope, cors: &CorsPolicy) -> Response {
    debug_assert!(status.is_client_error() || status.is_server_error());
    json_response(status, envelope, cors)
}

/// Answer to a CORS preflight: 204, no body.
pub fn preflight(cors: &CorsPolicy) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;
    cors.apply(response.headers_mut());
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
    use serde_json::json;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_envelope_omits_missing_details() {
        let envelope = ErrorEnvelope::new("Not allowed");
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "error": "Not allowed" })
        );

        let envelope = ErrorEnvelope::new("Failed").with_details("");
        assert_eq!(envelope.details, None);

        let envelope = ErrorEnvelope::new("Failed").with_details("connection refused");
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "error": "Failed", "details": "connection refused" })
        );
    }

    #[tokio::test]
    async fn test_passthrough_keeps_status_and_body() {
        let upstream = UpstreamResponse {
            status: StatusCode::UNAUTHORIZED,
            body: json!({ "message": "invalid api key", "extra": [1, 2] }),
        };

        let response = passthrough(upstream, &CorsPolicy::default());
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[CONTENT_TYPE], APPLICATION_JSON);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            body_json(response).await,
            json!({ "message": "invalid api key", "extra": [1, 2] })
        );
    }

    #[tokio::test]
    async fn test_passthrough_keeps_key_order() {
        let raw = r#"{"url":"http://x/1.jpg","id":"abc","breeds":[],"width":10}"#;
        let upstream = UpstreamResponse {
            status: StatusCode::OK,
            body: serde_json::from_str(raw).unwrap(),
        };

        let response = passthrough(upstream, &CorsPolicy::default());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(std::str::from_utf8(&bytes).unwrap(), raw);
    }

    #[tokio::test]
    async fn test_preflight_is_empty_204() {
        let response = preflight(&CorsPolicy::default());
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }
}
