//! CORS response headers.
//!
//! # Responsibilities
//! - Produce the fixed CORS header set for preflight and real responses
//! - Derive the allowed methods from the capabilities being served
//!
//! # Design Decisions
//! - Pure: the same route table always yields the same headers
//! - Any origin is allowed; the proxy holds no client credentials
//! - Headers are inserted on every response, success or failure

use axum::http::{
    header::{
        ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    },
    HeaderMap, HeaderName, HeaderValue,
};

use crate::routing::Capability;

const ANY_ORIGIN: &str = "*";
const READ_METHODS: &str = "GET, OPTIONS";
const WRITE_METHODS: &str = "GET, POST, OPTIONS";
const READ_HEADERS: &str = "Content-Type";
const WRITE_HEADERS: &str = "Content-Type, Authorization";

/// CORS header policy for a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorsPolicy {
    allow_writes: bool,
}

impl CorsPolicy {
    /// Policy for a deployment that only serves reads.
    pub const fn read_only() -> Self {
        Self { allow_writes: false }
    }

    /// Policy for a deployment with at least one write capability.
    pub const fn read_write() -> Self {
        Self { allow_writes: true }
    }

    /// Policy matching the given set of served capabilities.
    pub fn for_capabilities(capabilities: &[Capability]) -> Self {
        Self {
            allow_writes: capabilities.iter().any(|c| c.is_write()),
        }
    }

    /// The header set as `(name, value)` pairs.
    pub fn header_pairs(&self) -> [(HeaderName, HeaderValue); 3] {
        let (methods, headers) = if self.allow_writes {
            (WRITE_METHODS, WRITE_HEADERS)
        } else {
            (READ_METHODS, READ_HEADERS)
        };

        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(ANY_ORIGIN)),
            (ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(methods)),
            (ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(headers)),
        ]
    }

    /// The header set as a map.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(3);
        self.apply(&mut map);
        map
    }

    /// Insert the header set into `headers`, replacing existing values.
    pub fn apply(&self, headers: &mut HeaderMap) {
        for (name, value) in self.header_pairs() {
            headers.insert(name, value);
        }
    }
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self::for_capabilities(&Capability::ALL)
    }
}
