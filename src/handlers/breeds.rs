//! Breed list capability.

use axum::{http::Method, response::Response};

use crate::error::ProxyError;
use crate::http::request::IncomingRequest;
use crate::http::response::passthrough;
use crate::http::server::AppState;
use crate::routing::Capability;

pub const UPSTREAM_PATH: &str = "/breeds";

/// Forward to the upstream breed listing. Takes no input.
pub async fn handle(state: &AppState, _request: IncomingRequest) -> Result<Response, ProxyError> {
    let upstream = state
        .upstream
        .call(UPSTREAM_PATH, Method::GET, &[], None)
        .await
        .map_err(|e| ProxyError::upstream(Capability::Breeds, e))?;

    Ok(passthrough(upstream, &state.cors))
}
