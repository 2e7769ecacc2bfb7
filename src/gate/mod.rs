//! The Gate abstraction.
//!
//! # Data Flow
//! ```text
//! Network adapter
//!     → Gate::respond(ctx, Request)
//!         → Fork (rewrites target, picks a nested Gate)
//!         → Func / custom Gate (produces the Response)
//!     ← Response (status, head, optional body)
//! ```
//!
//! # Design Decisions
//! - One operation, no error channel: failures are expressed as responses
//!   with an informative status
//! - `respond` returns a boxed future so Gates can be stored as trait
//!   objects in routing tables
//! - Gates are `Send + Sync`; a built tree is shared by concurrent requests
//! - Composition is plain wrapping (`map_response`), not a middleware stack

mod context;
mod defaults;
mod func;

use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::http::{Request, Response};

pub use context::Context;
pub use defaults::{NotFound, Status};
pub use func::{from_fn, Func};

/// Responds to a request with a response.
pub trait Gate: Send + Sync {
    /// Produce the response for `request`.
    ///
    /// Every call yields exactly one response.
    fn respond(&self, ctx: Context, request: Request) -> BoxFuture<'_, Response>;
}

/// Type-erased Gate that can be cloned cheaply.
pub type SharedGate = Arc<dyn Gate>;

impl<G: Gate + ?Sized> Gate for Arc<G> {
    fn respond(&self, ctx: Context, request: Request) -> BoxFuture<'_, Response> {
        (**self).respond(ctx, request)
    }
}

impl<G: Gate + ?Sized> Gate for Box<G> {
    fn respond(&self, ctx: Context, request: Request) -> BoxFuture<'_, Response> {
        (**self).respond(ctx, request)
    }
}

/// Combinators available on every Gate.
pub trait GateExt: Gate + Sized {
    /// Post-process every response this Gate produces.
    fn map_response<F>(self, f: F) -> MapResponse<Self, F>
    where
        F: Fn(Response) -> Response + Send + Sync,
    {
        MapResponse { gate: self, f }
    }

    /// Erase the concrete type.
    fn shared(self) -> SharedGate
    where
        Self: 'static,
    {
        Arc::new(self)
    }
}

impl<G: Gate> GateExt for G {}

/// Gate returned by [`GateExt::map_response`].
#[derive(Debug, Clone)]
pub struct MapResponse<G, F> {
    gate: G,
    f: F,
}

impl<G, F> Gate for MapResponse<G, F>
where
    G: Gate,
    F: Fn(Response) -> Response + Send + Sync,
{
    fn respond(&self, ctx: Context, request: Request) -> BoxFuture<'_, Response> {
        self.gate.respond(ctx, request).map(&self.f).boxed()
    }
}
