//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for every request
//! - Split the inbound request into method, path, query and body
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Query parsing is lenient: the first occurrence of a key wins
//! - The body is left unread; only handlers that need it consume it

use std::collections::HashMap;

use axum::{
    body::Body,
    http::{HeaderValue, Method, Request},
};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the request ID, in and out.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Makes a fresh UUID v4 request ID when the caller did not send one.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Query parameters of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(HashMap<String, String>);

impl QueryParams {
    /// Parse a raw, URL-encoded query string.
    pub fn parse(query: Option<&str>) -> Self {
        let mut params = HashMap::new();
        if let Some(query) = query {
            for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
                params
                    .entry(key.into_owned())
                    .or_insert_with(|| value.into_owned());
            }
        }
        Self(params)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value of `key`, or `default` when it is missing or empty.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match self.get(key) {
            Some(value) if !value.is_empty() => value,
            _ => default,
        }
    }

    /// Value of `key` when present and non-empty.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }
}

/// An inbound request, reduced to what routing and handlers need.
#[derive(Debug)]
pub struct IncomingRequest {
    pub method: Method,
    pub path: String,
    pub query: QueryParams,
    pub request_id: String,
    pub body: Body,
}

impl From<Request<Body>> for IncomingRequest {
    fn from(request: Request<Body>) -> Self {
        let (parts, body) = request.into_parts();
        let request_id = parts
            .headers
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        Self {
            method: parts.method,
            path: parts.uri.path().to_string(),
            query: QueryParams::parse(parts.uri.query()),
            request_id,
            body,
        }
    }
}
