//! Upstream API subsystem.
//!
//! # Data Flow
//! ```text
//! handler (path, method, query, body?)
//!     → client.rs (build URL, inject credential, send)
//!     → upstream API
//!     → client.rs (read body, parse JSON)
//!     → UpstreamResponse { status, body } | UpstreamError
//! ```

pub mod client;
pub mod error;

pub use client::{UpstreamClient, UpstreamResponse};
pub use error::{UpstreamError, UpstreamResult};
