//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, split into IncomingRequest)
//!     → handlers::dispatch (routing + capability handlers)
//!     → response.rs (JSON / passthrough / error envelope, CORS headers)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{IncomingRequest, QueryParams, X_REQUEST_ID};
pub use response::ErrorEnvelope;
pub use server::{AppState, HttpServer};
