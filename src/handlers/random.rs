//! Random images capability.

use axum::{http::Method, response::Response};

use crate::error::ProxyError;
use crate::handlers::DEFAULT_LIMIT;
use crate::http::request::{IncomingRequest, QueryParams};
use crate::http::response::passthrough;
use crate::http::server::AppState;
use crate::routing::Capability;

pub const UPSTREAM_PATH: &str = "/images/search";

/// Upstream query for a random image request.
///
/// `limit` defaults to 10; `breed_ids` is only sent when non-empty.
pub fn upstream_query(params: &QueryParams) -> Vec<(&'static str, &str)> {
    let mut query = vec![("limit", params.get_or("limit", DEFAULT_LIMIT))];
    if let Some(breed_ids) = params.non_empty("breed_ids") {
        query.push(("breed_ids", breed_ids));
    }
    query
}

pub async fn handle(state: &AppState, request: IncomingRequest) -> Result<Response, ProxyError> {
    let query = upstream_query(&request.query);

    let upstream = state
        .upstream
        .call(UPSTREAM_PATH, Method::GET, &query, None)
        .await
        .map_err(|e| ProxyError::upstream(Capability::RandomImages, e))?;

    Ok(passthrough(upstream, &state.cors))
}
