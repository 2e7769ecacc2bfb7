//! Plain functions as Gates.

use std::future::Future;

use futures_util::future::BoxFuture;

use crate::gate::{Context, Gate};
use crate::http::{Request, Response};

/// Gate backed by an async function or closure.
#[derive(Clone, Copy)]
pub struct Func<F> {
    f: F,
}

/// Wrap `f` so it can be used wherever a Gate is expected.
///
/// ```
/// use torii::gate::{self, Context, Gate};
/// use torii::http::{Request, Response};
///
/// let hello = gate::from_fn(|_ctx: Context, _req: Request| async {
///     Response::text(axum::http::StatusCode::OK, "hello")
/// });
/// # fn assert_gate(_: &impl Gate) {}
/// # assert_gate(&hello);
/// ```
pub fn from_fn<F, Fut>(f: F) -> Func<F>
where
    F: Fn(Context, Request) -> Fut + Send + Sync,
    Fut: Future<Output = Response> + Send + 'static,
{
    Func { f }
}

impl<F, Fut> Gate for Func<F>
where
    F: Fn(Context, Request) -> Fut + Send + Sync,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn respond(&self, ctx: Context, request: Request) -> BoxFuture<'_, Response> {
        Box::pin((self.f)(ctx, request))
    }
}

impl<F> std::fmt::Debug for Func<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Func").finish_non_exhaustive()
    }
}
