//! torii: composable HTTP request dispatch.
//!
//! A [`Gate`](gate::Gate) turns a request into a response. A
//! [`Fork`](routing::Fork) is a Gate that dispatches on the first path
//! segment and the method; Forks nest to build deeper trees. The
//! [`http`] module carries the message model and the axum adapter that puts a
//! Gate on the network.

// Core abstraction
pub mod gate;
pub mod http;
pub mod routing;

// Response decoration
pub mod cookie;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use gate::{Context, Gate, GateExt};
pub use http::{HttpServer, Method, Request, Response};
pub use lifecycle::Shutdown;
pub use routing::{Endpoint, Fork};
