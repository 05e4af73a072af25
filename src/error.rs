//! Locally generated failures and their HTTP shape.

use axum::{
    http::{header::ALLOW, HeaderValue, Method, StatusCode},
    response::Response,
};
use serde::Serialize;
use thiserror::Error;

use crate::http::response::{error_response, json_response, ErrorEnvelope};
use crate::routing::{available_routes, Capability};
use crate::security::CorsPolicy;
use crate::upstream::UpstreamError;

/// Every failure the proxy reports itself.
///
/// Non-2xx upstream answers are not represented here; they are passed through.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Required request data is missing or malformed.
    #[error("{0}")]
    ClientInput(String),

    /// Request body exceeded the configured limit.
    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// The capability only accepts `allowed`.
    #[error("Method not allowed. Use {allowed}.")]
    MethodNotAllowed { allowed: Method },

    /// No route matched the path.
    #[error("Not Found")]
    RouteNotFound { path: String },

    /// The capability could not complete its work.
    #[error("{capability:?} failed: {details}")]
    Capability {
        capability: Capability,
        details: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NotFoundBody<'a> {
    error: &'static str,
    path: &'a str,
    available_routes: Vec<&'static str>,
}

impl ProxyError {
    /// Failure of `capability` caused by an unavailable upstream.
    pub fn upstream(capability: Capability, err: UpstreamError) -> Self {
        ProxyError::Capability {
            capability,
            details: err.to_string(),
        }
    }

    /// Failure of `capability` on malformed input that is reported as an internal error.
    pub fn malformed(capability: Capability, err: impl std::fmt::Display) -> Self {
        ProxyError::Capability {
            capability,
            details: err.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::ClientInput(_) => StatusCode::BAD_REQUEST,
            ProxyError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ProxyError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            ProxyError::Capability { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render the failure with the CORS header set.
    pub fn into_response(self, cors: &CorsPolicy) -> Response {
        let status = self.status();
        match self {
            ProxyError::RouteNotFound { path } => json_response(
                status,
                &NotFoundBody {
                    error: "Not Found",
                    path: &path,
                    available_routes: available_routes(),
                },
                cors,
            ),
            ProxyError::MethodNotAllowed { ref allowed } => {
                let envelope = ErrorEnvelope::new(self.to_string());
                let mut response = error_response(status, &envelope, cors);
                if let Ok(value) = HeaderValue::from_str(allowed.as_str()) {
                    response.headers_mut().insert(ALLOW, value);
                }
                response
            }
            ProxyError::Capability {
                capability,
                details,
            } => {
                let envelope =
                    ErrorEnvelope::new(capability.failure_message()).with_details(details);
                error_response(status, &envelope, cors)
            }
            ProxyError::ClientInput(_) | ProxyError::PayloadTooLarge { .. } => {
                error_response(status, &ErrorEnvelope::new(self.to_string()), cors)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let response = ProxyError::RouteNotFound {
            path: "/dogs".into(),
        }
        .into_response(&CorsPolicy::default());

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({
                "error": "Not Found",
                "path": "/dogs",
                "availableRoutes": ["/cats/random", "/cats/breeds", "/cats/search", "/cats/vote"],
            })
        );
    }

    #[tokio::test]
    async fn test_method_not_allowed_sets_allow() {
        let response = ProxyError::MethodNotAllowed {
            allowed: Method::POST,
        }
        .into_response(&CorsPolicy::default());

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[ALLOW], "POST");
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Method not allowed. Use POST." })
        );
    }

    #[tokio::test]
    async fn test_capability_failure_envelope() {
        let response = ProxyError::Capability {
            capability: Capability::Breeds,
            details: "connection refused".into(),
        }
        .into_response(&CorsPolicy::default());

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Failed to fetch breeds", "details": "connection refused" })
        );
    }

    #[test]
    fn test_statuses_are_errors() {
        let errors = [
            ProxyError::ClientInput("x".into()),
            ProxyError::PayloadTooLarge { limit: 1 },
            ProxyError::MethodNotAllowed {
                allowed: Method::POST,
            },
            ProxyError::RouteNotFound { path: "/".into() },
            ProxyError::malformed(Capability::Vote, "bad json"),
        ];
        for err in errors {
            assert!(err.status().as_u16() >= 400, "{err:?}");
        }
    }
}
