//! Bridge between axum and a Gate.
//!
//! # Responsibilities
//! - Translate inbound axum requests into [`Request`]s
//! - Give every request a [`Context`] (server cancellation, deadline,
//!   client disconnect)
//! - Translate the Gate's [`Response`] back: headers, status, body
//! - Stream bodies in chunks of a configured size
//!
//! # Design Decisions
//! - A response without a body gets the status reason phrase as its body
//! - Errors reading a Gate's body are logged (when enabled) and never
//!   propagated; hyper aborts that response. Failures writing to the client
//!   socket stay inside hyper, which drops the connection
//! - Methods outside [`Method`](crate::http::Method) are answered `501`
//!   without reaching the Gate
//! - Invalid header names/values coming out of a Gate are skipped

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::Router;
use futures_util::TryStreamExt;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::gate::{Context, Gate, SharedGate};
use crate::http::{Request, Response};
use crate::observability::metrics;

/// Default chunk size used when streaming response bodies.
pub const DEFAULT_BUFFER_SIZE: usize = 2048;

/// Invalid handler option. Treat as a configuration fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("buffer size must be greater than zero")]
    ZeroBufferSize,
}

/// Serves a Gate through axum.
#[derive(Clone)]
pub struct GateHandler {
    gate: SharedGate,
    buffer_size: usize,
    log_failures: bool,
    request_timeout: Option<Duration>,
    cancellation: CancellationToken,
}

impl GateHandler {
    pub fn new(gate: impl Gate + 'static) -> Self {
        Self::shared(Arc::new(gate))
    }

    pub fn shared(gate: SharedGate) -> Self {
        Self {
            gate,
            buffer_size: DEFAULT_BUFFER_SIZE,
            log_failures: false,
            request_timeout: None,
            cancellation: CancellationToken::new(),
        }
    }

    /// Chunk size for streaming response bodies. Defaults to 2048.
    pub fn with_buffer_size(mut self, size: usize) -> Result<Self, HandlerError> {
        if size == 0 {
            return Err(HandlerError::ZeroBufferSize);
        }
        self.buffer_size = size;
        Ok(self)
    }

    /// Log errors reading response bodies. Off by default.
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.log_failures = enabled;
        self
    }

    /// Deadline applied to every request context.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Parent token for every request context.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Axum router sending every request to the Gate.
    pub fn into_router(self) -> Router {
        Router::new().fallback(serve).with_state(self)
    }

    /// Run one inbound request through the Gate.
    pub async fn handle(&self, request: axum::extract::Request) -> axum::response::Response {
        let start = Instant::now();
        let request_id = Uuid::new_v4();
        let span = tracing::debug_span!(
            "request",
            request_id = %request_id,
            method = %request.method(),
            uri = %request.uri()
        );
        let method = request.method().to_string();

        async move {
            let response = match Request::try_from(request) {
                Ok(request) => self.respond(request).await,
                Err(e) => {
                    tracing::debug!(error = %e, "Rejecting request");
                    Response::new(StatusCode::NOT_IMPLEMENTED)
                }
            };

            tracing::debug!(status = response.status.as_u16(), "Gate responded");
            metrics::record_response(&method, response.status.as_u16(), start);
            self.to_http(response, request_id)
        }
        .instrument(span)
        .await
    }

    async fn respond(&self, request: Request) -> Response {
        let mut ctx = Context::with_cancellation(self.cancellation.child_token());
        if let Some(timeout) = self.request_timeout {
            ctx = ctx.with_timeout(timeout);
        }

        // Cancels the context if the client goes away before we finish.
        let guard = ctx.cancellation_token().clone().drop_guard();
        let response = self.gate.respond(ctx, request).await;
        guard.disarm();
        response
    }

    fn to_http(&self, response: Response, request_id: Uuid) -> axum::response::Response {
        let Response { status, head, body } = response;

        let mut headers = HeaderMap::with_capacity(head.len());
        for header in head {
            match (
                HeaderName::try_from(header.key.as_str()),
                HeaderValue::try_from(header.value.as_str()),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.append(name, value);
                }
                _ => tracing::warn!(key = %header.key, "Skipping invalid response header"),
            }
        }

        let body = match body {
            Some(body) => {
                let log_failures = self.log_failures;
                let stream = body.into_stream(self.buffer_size).inspect_err(move |e| {
                    if log_failures {
                        tracing::warn!(
                            request_id = %request_id,
                            error = %e,
                            "Failed to read response body, aborting response"
                        );
                    }
                });
                axum::body::Body::from_stream(stream)
            }
            None => axum::body::Body::from(status.canonical_reason().unwrap_or_default()),
        };

        let mut out = axum::response::Response::new(body);
        *out.status_mut() = status;
        *out.headers_mut() = headers;
        out
    }
}

async fn serve(
    State(handler): State<GateHandler>,
    request: axum::extract::Request,
) -> axum::response::Response {
    handler.handle(request).await
}
