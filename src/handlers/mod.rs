//! Endpoint handlers.
//!
//! # Data Flow
//! ```text
//! IncomingRequest
//!     → routing::resolve (method, path)
//!     → Preflight | Index | NotFound      answered locally
//!     → Capability(..)                    validate → upstream call → shape
//!     → Response (always carries the CORS header set)
//! ```
//!
//! # Design Decisions
//! - Handlers return `Result<Response, ProxyError>`; the error is rendered here
//! - Validation strictly precedes the upstream call
//! - Upstream non-2xx answers are passed through, not mapped

pub mod breeds;
pub mod index;
pub mod random;
pub mod search;
pub mod vote;

use axum::response::Response;

use crate::error::ProxyError;
use crate::http::request::IncomingRequest;
use crate::http::response::preflight;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::{resolve, Capability, Route};

/// Default `limit` forwarded for image queries.
pub const DEFAULT_LIMIT: &str = "10";

/// Resolve and answer one request.
pub async fn dispatch(state: &AppState, request: IncomingRequest) -> (Route, Response) {
    let route = resolve(&request.method, &request.path);

    let result = match route {
        Route::Preflight => Ok(preflight(&state.cors)),
        Route::Index => Ok(index::directory(&state.cors)),
        Route::NotFound => Err(ProxyError::RouteNotFound { path: request.path }),
        Route::Capability(capability) => handle_capability(state, capability, request).await,
    };

    let response = result.unwrap_or_else(|err| {
        if let ProxyError::Capability { capability, details } = &err {
            tracing::warn!(
                capability = capability.label(),
                error = %details,
                "Capability failed"
            );
            metrics::record_capability_failure(capability.label());
        }
        err.into_response(&state.cors)
    });

    (route, response)
}

async fn handle_capability(
    state: &AppState,
    capability: Capability,
    request: IncomingRequest,
) -> Result<Response, ProxyError> {
    match capability {
        Capability::RandomImages => random::handle(state, request).await,
        Capability::Breeds => breeds::handle(state, request).await,
        Capability::Search => search::handle(state, request).await,
        Capability::Vote => vote::handle(state, request).await,
    }
}
