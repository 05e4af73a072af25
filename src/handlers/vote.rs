//! Vote submission capability.
//!
//! The only write capability. Checks run in order and stop at the first
//! failure, all before the upstream is contacted:
//! 1. method must be POST (405)
//! 2. body must fit the size limit (413)
//! 3. body must be JSON (500, reported like an upstream failure)
//! 4. `image_id` and `value` must be truthy (400)
//!
//! Truthiness follows the loose JavaScript rules the widget was written
//! against, so `"value": 0` is rejected as missing. Downvotes therefore
//! cannot be submitted through this route.

use axum::{http::Method, response::Response};
use serde_json::Value;

use crate::error::ProxyError;
use crate::http::request::IncomingRequest;
use crate::http::response::passthrough;
use crate::http::server::AppState;
use crate::routing::Capability;
use crate::security::limits::read_body_limited;

pub const UPSTREAM_PATH: &str = "/votes";

pub const MISSING_FIELDS: &str = "Missing required fields: image_id and value (0 or 1)";

/// Loose truthiness: missing, `null`, `false`, `0` and `""` are falsy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Whether a vote body carries both required fields.
pub fn has_required_fields(body: &Value) -> bool {
    is_truthy(body.get("image_id")) && is_truthy(body.get("value"))
}

pub async fn handle(state: &AppState, request: IncomingRequest) -> Result<Response, ProxyError> {
    if request.method != Method::POST {
        return Err(ProxyError::MethodNotAllowed {
            allowed: Method::POST,
        });
    }

    let bytes = read_body_limited(request.body, state.config.security.max_body_size).await?;
    let body: Value = serde_json::from_slice(&bytes)
        .map_err(|e| ProxyError::malformed(Capability::Vote, e))?;

    if !has_required_fields(&body) {
        return Err(ProxyError::ClientInput(MISSING_FIELDS.to_string()));
    }

    let upstream = state
        .upstream
        .call(UPSTREAM_PATH, Method::POST, &[], Some(&body))
        .await
        .map_err(|e| ProxyError::upstream(Capability::Vote, e))?;

    Ok(passthrough(upstream, &state.cors))
}
