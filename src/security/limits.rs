//! Request body limits.
//!
//! The vote capability is the only one that reads a body; it is buffered up
//! to `security.max_body_size` and rejected with 413 past that.

use axum::body::{Body, Bytes};

use crate::error::ProxyError;

/// Buffer a request body, failing once `limit` bytes are exceeded.
pub async fn read_body_limited(body: Body, limit: usize) -> Result<Bytes, ProxyError> {
    axum::body::to_bytes(body, limit)
        .await
        .map_err(|_| ProxyError::PayloadTooLarge { limit })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_body_within_limit() {
        let bytes = read_body_limited(Body::from("{\"a\":1}"), 64).await.unwrap();
        assert_eq!(&bytes[..], b"{\"a\":1}");
    }

    #[tokio::test]
    async fn test_body_over_limit() {
        let result = read_body_limited(Body::from(vec![b'x'; 65]), 64).await;
        assert!(matches!(result, Err(ProxyError::PayloadTooLarge { limit: 64 })));
    }
}
