//! Ready-made Gates.

use axum::http::StatusCode;
use futures_util::future::{self, BoxFuture};

use crate::gate::{Context, Gate};
use crate::http::{Request, Response};

/// Always responds `404 Not Found` with no body.
///
/// The usual fallback for a [`Fork`](crate::routing::Fork).
#[derive(Debug, Clone, Copy, Default)]
pub struct NotFound;

impl Gate for NotFound {
    fn respond(&self, _ctx: Context, _request: Request) -> BoxFuture<'_, Response> {
        Box::pin(future::ready(Response::new(StatusCode::NOT_FOUND)))
    }
}

/// Always responds with a fixed status and no body.
#[derive(Debug, Clone, Copy)]
pub struct Status(pub StatusCode);

impl Gate for Status {
    fn respond(&self, _ctx: Context, _request: Request) -> BoxFuture<'_, Response> {
        Box::pin(future::ready(Response::new(self.0)))
    }
}
