//! Root directory of available routes.

use axum::{http::StatusCode, response::Response};
use serde_json::{json, Map, Value};

use crate::http::response::json_response;
use crate::routing::Capability;
use crate::security::CorsPolicy;

pub const SERVICE_NAME: &str = "The Cat API Middleware";

/// Static description of every capability route.
pub fn directory_body() -> Value {
    let routes: Map<String, Value> = Capability::ALL
        .iter()
        .map(|c| (c.path().to_string(), Value::from(c.description())))
        .collect();

    json!({
        "message": SERVICE_NAME,
        "routes": routes,
    })
}

pub fn directory(cors: &CorsPolicy) -> Response {
    json_response(StatusCode::OK, &directory_body(), cors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_lists_every_capability() {
        let body = directory_body();
        assert_eq!(body["message"], SERVICE_NAME);

        let routes = body["routes"].as_object().unwrap();
        assert_eq!(routes.len(), 4);
        for capability in Capability::ALL {
            assert!(routes.contains_key(capability.path()));
        }
    }
}
