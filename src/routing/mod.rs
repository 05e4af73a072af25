//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (resolve)
//!     → Return: Preflight | Index | Capability(..) | NotFound
//! ```
//!
//! # Design Decisions
//! - Route table is fixed at compile time
//! - Deterministic: same input always resolves to the same route
//! - Resolution is a pure function, resolved once per request

pub mod router;

pub use router::{available_routes, resolve, Capability, Route};
