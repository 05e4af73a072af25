//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → limits.rs (cap body size before parsing)
//!     → handler
//! Outgoing response:
//!     → cors.rs (attach CORS header set)
//! ```
//!
//! # Design Decisions
//! - No authentication of callers; the upstream credential never leaves the process
//! - Every response, including failures, carries the CORS header set

pub mod cors;
pub mod limits;

pub use cors::CorsPolicy;
