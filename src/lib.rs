//! Cat API proxy library.
//!
//! Forwards a small set of read and vote routes to an upstream image API,
//! injecting the secret credential and attaching CORS headers to every answer.

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use error::ProxyError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
