//! HTTP message model and network adapter.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum serve, trace layer, graceful shutdown)
//!     → handler.rs (axum request → Request, Context per request)
//!     → Gate::respond
//!     → handler.rs (Response → headers, status, streamed body)
//!     → Send to client
//! ```
//!
//! Model types: [`Method`], [`Head`], [`Body`], [`Request`], [`Response`].

pub mod body;
pub mod handler;
pub mod head;
pub mod method;
pub mod request;
pub mod response;
pub mod server;

pub use axum::http::StatusCode;
pub use body::Body;
pub use handler::{GateHandler, HandlerError, DEFAULT_BUFFER_SIZE};
pub use head::{Head, Header};
pub use method::{Method, UnsupportedMethod};
pub use request::Request;
pub use response::Response;
pub use server::HttpServer;
