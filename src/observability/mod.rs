//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Gates, Forks and the network adapter produce:
//!     → logging.rs (structured log events, request spans)
//!     → metrics.rs (request counters and latency histograms)
//!
//! Consumers:
//!     → stdout (text or JSON lines)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID (UUID v4) attached to every request span
//! - Routing decisions logged at debug level only

pub mod logging;
pub mod metrics;
