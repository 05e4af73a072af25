//! Filtered image search capability.

use axum::{http::Method, response::Response};

use crate::error::ProxyError;
use crate::handlers::DEFAULT_LIMIT;
use crate::http::request::{IncomingRequest, QueryParams};
use crate::http::response::passthrough;
use crate::http::server::AppState;
use crate::routing::Capability;

pub const UPSTREAM_PATH: &str = "/images/search";

const FILTERS: [&str; 2] = ["breed_ids", "category_ids"];

/// Upstream query for a search: `limit` plus each non-empty filter.
pub fn upstream_query(params: &QueryParams) -> Vec<(&'static str, &str)> {
    let mut query = vec![("limit", params.get_or("limit", DEFAULT_LIMIT))];
    for filter in FILTERS {
        if let Some(value) = params.non_empty(filter) {
            query.push((filter, value));
        }
    }
    query
}

pub async fn handle(state: &AppState, request: IncomingRequest) -> Result<Response, ProxyError> {
    let query = upstream_query(&request.query);

    let upstream = state
        .upstream
        .call(UPSTREAM_PATH, Method::GET, &query, None)
        .await
        .map_err(|e| ProxyError::upstream(Capability::Search, e))?;

    Ok(passthrough(upstream, &state.cors))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_non_empty_filters() {
        let params = QueryParams::parse(Some("breed_ids=&category_ids=5"));
        assert_eq!(
            upstream_query(&params),
            vec![("limit", "10"), ("category_ids", "5")]
        );
    }

    #[test]
    fn test_all_filters() {
        let params = QueryParams::parse(Some("category_ids=1&limit=4&breed_ids=abys"));
        assert_eq!(
            upstream_query(&params),
            vec![("limit", "4"), ("breed_ids", "abys"), ("category_ids", "1")]
        );
    }
}
