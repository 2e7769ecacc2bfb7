//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, target)
//!     → fork.rs (first path segment → method → gate)
//!     → matched gate receives the request with the segment stripped
//!     → or: fallback gate (unknown segment) / 405 (unknown method)
//!
//! Table construction (at startup):
//!     Endpoint::new(method, "/name", gate)   (endpoint.rs validates the name)
//!     → Fork::new(fallback, endpoints)       (rejects duplicates)
//!     → immutable Fork, itself a Gate
//! ```
//!
//! # Design Decisions
//! - One segment per Fork; nesting Forks builds deeper trees
//! - Construction errors are configuration faults, never request-time errors
//! - No wildcards, no regex

pub mod endpoint;
pub mod fork;

pub use endpoint::{Endpoint, RouteError};
pub use fork::Fork;
