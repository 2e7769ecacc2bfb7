//! Single-level path router.
//!
//! # Responsibilities
//! - Build the segment → method → gate table once
//! - Dispatch on the first path segment and the method
//! - Strip the matched segment before forwarding
//!
//! # Design Decisions
//! - Immutable after construction (shared across requests without locks)
//! - O(1) lookup: two hash lookups per request
//! - Unknown segment goes to the fallback; known segment with an unknown
//!   method is answered `405` directly
//! - Deeper hierarchies are built by nesting Forks, one segment per level
//! - The root path yields the empty segment, which only a `/` endpoint
//!   matches; otherwise it reaches the fallback
//! - The path is split before percent-decoding, so `%2F` never adds a
//!   segment; only the looked-up segment is decoded, the forwarded rest
//!   keeps its encoding

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use axum::http::uri::{Parts, PathAndQuery};
use axum::http::{StatusCode, Uri};
use futures_util::future::{self, BoxFuture};
use percent_encoding::percent_decode_str;

use crate::gate::{Context, Gate, SharedGate};
use crate::http::{Method, Request, Response};
use crate::routing::endpoint::{Endpoint, RouteError};

/// Gate that dispatches to other Gates by first path segment and method.
#[derive(Clone)]
pub struct Fork {
    routes: HashMap<String, HashMap<Method, SharedGate>>,
    fallback: SharedGate,
}

impl Fork {
    /// Build a fork from a fallback and a set of endpoints.
    ///
    /// Fails when two endpoints share the same segment and method.
    pub fn new(
        fallback: impl Gate + 'static,
        endpoints: impl IntoIterator<Item = Endpoint>,
    ) -> Result<Self, RouteError> {
        let mut routes: HashMap<String, HashMap<Method, SharedGate>> = HashMap::new();
        for endpoint in endpoints {
            let (segment, method, gate) = endpoint.into_parts();
            let methods = routes.entry(segment.clone()).or_default();
            if methods.contains_key(&method) {
                return Err(RouteError::DuplicateRoute { method, segment });
            }
            methods.insert(method, gate);
        }

        Ok(Self {
            routes,
            fallback: Arc::new(fallback),
        })
    }

    /// Registered (segment, method) pairs, sorted.
    pub fn routes(&self) -> Vec<(&str, Method)> {
        let mut pairs: Vec<(&str, Method)> = self
            .routes
            .iter()
            .flat_map(|(segment, methods)| {
                methods.keys().map(move |method| (segment.as_str(), *method))
            })
            .collect();
        pairs.sort();
        pairs
    }
}

impl Gate for Fork {
    fn respond(&self, ctx: Context, request: Request) -> BoxFuture<'_, Response> {
        let path = request.target.path().trim_matches('/');
        let (first, rest) = path.split_once('/').unwrap_or((path, ""));
        let segment = percent_decode_str(first).decode_utf8_lossy();

        let Some(methods) = self.routes.get(segment.as_ref()) else {
            tracing::debug!(
                segment = %segment,
                method = %request.method,
                "No route matched, using fallback"
            );
            return self.fallback.respond(ctx, request);
        };

        let Some(gate) = methods.get(&request.method) else {
            tracing::debug!(
                segment = %segment,
                method = %request.method,
                "Method not allowed"
            );
            return Box::pin(future::ready(Response::new(StatusCode::METHOD_NOT_ALLOWED)));
        };

        match rewrite_target(&request.target, rest) {
            Ok(target) => gate.respond(ctx, request.retarget(target)),
            Err(e) => {
                tracing::warn!(
                    target = %request.target,
                    error = %e,
                    "Failed to rewrite request target"
                );
                Box::pin(future::ready(Response::new(StatusCode::BAD_REQUEST)))
            }
        }
    }
}

/// Replace the path of `target` with `/` + `rest`, keeping the query.
///
/// Absolute-form targets keep scheme and authority. Anything else (origin
/// form, or the bare authority of a `CONNECT`) becomes origin form.
fn rewrite_target(target: &Uri, rest: &str) -> Result<Uri, axum::http::Error> {
    let path_and_query = match target.query() {
        Some(query) => format!("/{rest}?{query}"),
        None => format!("/{rest}"),
    };
    let path_and_query = PathAndQuery::try_from(path_and_query)?;

    let mut parts = if target.scheme().is_some() {
        target.clone().into_parts()
    } else {
        Parts::default()
    };
    parts.path_and_query = Some(path_and_query);
    Ok(Uri::from_parts(parts)?)
}

impl fmt::Debug for Fork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fork")
            .field("routes", &self.routes())
            .finish_non_exhaustive()
    }
}
